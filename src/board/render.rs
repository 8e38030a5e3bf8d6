//! Listing → view structs for the activities list and the activity select.
//!
//! Markup and escaping are the templates' job; nothing here produces HTML.

use crate::board::controls::{ClickTarget, ControlRole, ACTIVITY_KEY, EMAIL_KEY};
use crate::models::{ActivitiesListing, Activity};

pub const LIST_LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
pub const LIST_LOADING: &str = "Loading activities...";

/// Where the page posts clicks on list controls.
pub const LIST_CLICK_ACTION: &str = "/activities-list/click";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantView {
    pub activity: String,
    pub email: String,
    pub role: &'static str,
}

impl ParticipantView {
    /// What a click on this participant's removal control carries.
    pub fn click_target(&self) -> ClickTarget {
        ClickTarget::new(self.role)
            .with_data(ACTIVITY_KEY, self.activity.as_str())
            .with_data(EMAIL_KEY, self.email.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCardView {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub participants: Vec<ParticipantView>,
}

/// Contents of the activities list region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRegion {
    Notice(&'static str),
    Cards(Vec<ActivityCardView>),
}

impl ListRegion {
    pub fn cards(&self) -> &[ActivityCardView] {
        match self {
            ListRegion::Cards(cards) => cards,
            ListRegion::Notice(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub fn activity_cards(listing: &ActivitiesListing) -> ListRegion {
    ListRegion::Cards(
        listing
            .iter()
            .map(|(name, activity)| activity_card(name, activity))
            .collect(),
    )
}

pub fn activity_card(name: &str, activity: &Activity) -> ActivityCardView {
    ActivityCardView {
        name: name.to_string(),
        description: activity.description.clone(),
        schedule: activity.schedule.clone(),
        spots_left: activity.spots_left(),
        participants: activity
            .participants
            .iter()
            .map(|email| ParticipantView {
                activity: name.to_string(),
                email: email.clone(),
                role: ControlRole::RemoveParticipant.marker(),
            })
            .collect(),
    }
}

pub fn select_options(listing: &ActivitiesListing) -> Vec<SelectOption> {
    listing
        .keys()
        .map(|name| SelectOption {
            value: name.clone(),
            label: name.clone(),
        })
        .collect()
}

pub fn option_views(options: &[SelectOption], selected: &str) -> Vec<OptionView> {
    options
        .iter()
        .map(|opt| OptionView {
            value: opt.value.clone(),
            label: opt.label.clone(),
            selected: opt.value == selected,
        })
        .collect()
}
