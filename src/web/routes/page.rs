use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension,
};
use tracing::error;

use crate::board::message::Message;
use crate::board::render::{ListRegion, OptionView, LIST_CLICK_ACTION};
use crate::board::BoardElements;
use crate::services::activities_api_service::ActivitiesApi;
use crate::web::middleware::visitor::Visitor;
use crate::web::prompt::PendingConfirmation;
use crate::web::{AppState, VisitorPage};

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate<'a> {
    pub form_id: &'a str,
    pub email_id: &'a str,
    pub email_value: &'a str,
    pub list_id: &'a str,
    pub region: &'a ListRegion,
    pub click_action: &'a str,
    pub select_id: &'a str,
    pub options: Vec<OptionView>,
    pub message_id: &'a str,
    pub message: Option<&'a Message>,
    pub pending: Option<&'a PendingConfirmation>,
}

impl<'a> BoardTemplate<'a> {
    pub fn for_visitor(elements: &'a BoardElements, page: &'a VisitorPage) -> Self {
        Self {
            form_id: &elements.form,
            email_id: &elements.email,
            email_value: &page.state.form().email,
            list_id: &elements.list,
            region: page.state.region(),
            click_action: LIST_CLICK_ACTION,
            select_id: &elements.select,
            options: page.state.option_views(),
            message_id: &elements.message,
            message: page.state.message().visible(),
            pending: page.pending.as_ref(),
        }
    }
}

/// Every page load re-fetches the listing for this visitor, then renders their board.
pub async fn board_page(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
) -> Response {
    let listing = state.api.list_activities().await;

    let rendered = state.with_visitor(&visitor.id, |page| {
        page.state.apply_listing(listing);
        BoardTemplate::for_visitor(&state.elements, page).render()
    });

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Board page render failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
