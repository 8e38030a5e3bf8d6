//! Form posts of the board. Each handler reads what it needs from the visitor's page, calls
//! the activities service without holding the page, then applies the reply.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use tracing::debug;

use crate::board::controls::{ClickTarget, ACTIVITY_KEY, EMAIL_KEY};
use crate::board::{ActionOutcome, RemovalStep};
use crate::services::activities_api_service::ActivitiesApi;
use crate::web::middleware::visitor::Visitor;
use crate::web::prompt::{FormPrompt, PendingConfirmation};
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupFormData {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub activity: String,
}

pub async fn signup_handler(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
    Form(form): Form<SignupFormData>,
) -> Response {
    let request = state.with_visitor(&visitor.id, |page| {
        page.state.form_mut().fill(form.email, form.activity);
        page.state.begin_signup()
    });

    let result = state.api.sign_up(&request.activity, &request.email).await;
    let outcome = state.with_visitor(&visitor.id, |page| page.state.finish_signup(&request, result));
    debug!("Signup form handled: {:?}", outcome);

    if outcome == ActionOutcome::Succeeded {
        refresh_listing(&state, &visitor).await;
    }

    // Post/redirect/get keeps the visitor on the board.
    Redirect::to("/").into_response()
}

#[derive(Debug, Deserialize)]
pub struct ListClickForm {
    pub role: Option<String>,
    pub activity: Option<String>,
    pub email: Option<String>,
    pub confirmed: Option<String>, // yes|no
}

impl ListClickForm {
    fn target(&self) -> ClickTarget {
        let mut target = ClickTarget {
            role: self.role.clone(),
            ..ClickTarget::default()
        };
        if let Some(activity) = &self.activity {
            target = target.with_data(ACTIVITY_KEY, activity.as_str());
        }
        if let Some(email) = &self.email {
            target = target.with_data(EMAIL_KEY, email.as_str());
        }
        target
    }

    fn answer(&self) -> Option<bool> {
        self.confirmed.as_deref().map(|v| v == "yes")
    }
}

pub async fn list_click_handler(
    State(state): State<AppState>,
    Extension(visitor): Extension<Visitor>,
    Form(form): Form<ListClickForm>,
) -> Response {
    let target = form.target();
    let mut prompt = FormPrompt::answering(form.answer());

    let step = state.with_visitor(&visitor.id, |page| {
        let step = page.state.begin_removal(&target, &mut prompt);
        page.pending = prompt
            .take_asked()
            .map(|question| PendingConfirmation::new(question, &target));
        step
    });

    let outcome = match step {
        RemovalStep::Done(outcome) => outcome,
        RemovalStep::Send(request) => {
            let result = state.api.unregister(&request.activity, &request.email).await;
            state.with_visitor(&visitor.id, |page| page.state.finish_removal(&request, result))
        }
    };
    debug!("List click handled: {:?}", outcome);

    if outcome == ActionOutcome::Succeeded {
        refresh_listing(&state, &visitor).await;
    }

    Redirect::to("/").into_response()
}

async fn refresh_listing(state: &AppState, visitor: &Visitor) {
    let listing = state.api.list_activities().await;
    state.with_visitor(&visitor.id, |page| page.state.apply_listing(listing));
}
