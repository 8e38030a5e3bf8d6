//! Askama partials for the regions the board owns. The page template includes the same files,
//! so its struct carries the same field names.

use askama::Template;

use crate::board::message::Message;
use crate::board::render::{ListRegion, OptionView};

#[derive(Template)]
#[template(path = "activities_list.html")]
pub struct ActivitiesListTemplate<'a> {
    pub list_id: &'a str,
    pub region: &'a ListRegion,
    pub click_action: &'a str,
}

#[derive(Template)]
#[template(path = "select.html")]
pub struct SelectTemplate<'a> {
    pub select_id: &'a str,
    pub options: &'a [OptionView],
}

#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageTemplate<'a> {
    pub message_id: &'a str,
    pub message: Option<&'a Message>,
}
