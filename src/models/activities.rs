use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Activities keyed by name, in the order the service listed them.
pub type ActivitiesListing = IndexMap<String, Activity>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: String,
    pub max_participants: u32,
    // Registration order, as returned by the service.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity. Negative when the service admitted more people than it has room for.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_keeps_service_order() {
        let raw = r#"{
            "Programming Class": {"description": "p", "schedule": "Tue", "max_participants": 20, "participants": []},
            "Chess Club": {"description": "c", "schedule": "Fri", "max_participants": 12, "participants": ["a@x.com"]},
            "Art Club": {"description": "a", "schedule": "Wed", "max_participants": 5, "participants": null}
        }"#;
        let listing: ActivitiesListing = serde_json::from_str(raw).unwrap();

        let names: Vec<&str> = listing.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Programming Class", "Chess Club", "Art Club"]);
        assert!(listing["Art Club"].participants.is_empty());
    }

    #[test]
    fn spots_left_goes_negative_when_over_admitted() {
        let activity = Activity {
            max_participants: 1,
            participants: vec!["a@x.com".into(), "b@x.com".into(), "c@x.com".into()],
            ..Activity::default()
        };
        assert_eq!(activity.spots_left(), -2);
    }
}
