use std::collections::{BTreeMap, HashMap};

pub const ACTIVITY_KEY: &str = "activity";
pub const EMAIL_KEY: &str = "email";

/// Roles of the interactive controls inside the activities list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRole {
    RemoveParticipant,
}

impl ControlRole {
    pub const ALL: [ControlRole; 1] = [ControlRole::RemoveParticipant];

    /// Value of the `data-role` marker rendered on the control.
    pub const fn marker(self) -> &'static str {
        match self {
            ControlRole::RemoveParticipant => "remove-participant",
        }
    }
}

/// What a click landed on: the role marker and the `data-*` values of the control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub role: Option<String>,
    pub data: BTreeMap<String, String>,
}

impl ClickTarget {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            data: BTreeMap::new(),
        }
    }

    pub fn removal(activity: &str, email: &str) -> Self {
        Self::new(ControlRole::RemoveParticipant.marker())
            .with_data(ACTIVITY_KEY, activity)
            .with_data(EMAIL_KEY, email)
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// A data value, treating empty strings as absent.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }
}

/// Single delegated click handler for the list region, keyed by role marker.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    routes: HashMap<&'static str, ControlRole>,
}

impl Default for DispatchTable {
    fn default() -> Self {
        let routes = ControlRole::ALL
            .into_iter()
            .map(|role| (role.marker(), role))
            .collect();
        Self { routes }
    }
}

impl DispatchTable {
    pub fn resolve(&self, target: &ClickTarget) -> Option<ControlRole> {
        let marker = target.role.as_deref()?;
        self.routes.get(marker).copied()
    }
}
