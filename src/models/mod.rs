pub mod activities;
pub mod service_replies;

pub use activities::{ActivitiesListing, Activity};
pub use service_replies::ServiceReplyBody;
