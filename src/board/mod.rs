//! The activity board: one page-bound component that lists activities, signs people up and
//! removes participants, re-fetching the whole listing after every successful change.
//!
//! [`BoardState`] holds what the page shows and applies each step of a flow synchronously.
//! The service calls between those steps happen outside it, so a host can keep the state
//! behind a short-lived lock.

pub mod controls;
pub mod message;
pub mod render;
pub mod templates;

use std::time::Duration;

use askama::Template;
use tracing::{debug, error, info, warn};

use crate::errors::ApiError;
use crate::models::ActivitiesListing;
use crate::services::activities_api_service::{ActivitiesApi, ServiceReply};
use controls::{ClickTarget, ControlRole, DispatchTable, ACTIVITY_KEY, EMAIL_KEY};
use message::{MessageKind, MessageSlot};
use render::{ListRegion, OptionView, SelectOption, LIST_CLICK_ACTION};
use templates::{ActivitiesListTemplate, MessageTemplate, SelectTemplate};

pub const SIGNUP_MESSAGE_DURATION: Duration = Duration::from_secs(5);
pub const REMOVAL_MESSAGE_DURATION: Duration = Duration::from_secs(4);

pub const SIGNUP_FAILED: &str = "An error occurred";
pub const SIGNUP_UNREACHABLE: &str = "Failed to sign up. Please try again.";
pub const REMOVAL_SUCCEEDED: &str = "Deelnemer verwijderd";
pub const REMOVAL_FAILED: &str = "Kon deelnemer niet verwijderen";
pub const REMOVAL_UNREACHABLE: &str = "Fout bij verwijderen. Probeer het opnieuw.";

/// Blocking yes/no question put to the visitor.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

/// Ids of the page elements the board is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardElements {
    pub list: String,
    pub select: String,
    pub form: String,
    pub message: String,
    pub email: String,
}

impl Default for BoardElements {
    fn default() -> Self {
        Self {
            list: "activities-list".to_string(),
            select: "activity".to_string(),
            form: "signup-form".to_string(),
            message: "message".to_string(),
            email: "email".to_string(),
        }
    }
}

/// Current values of the signup form controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

impl SignupForm {
    pub fn fill(&mut self, email: impl Into<String>, activity: impl Into<String>) {
        self.email = email.into();
        self.activity = activity.into();
    }

    pub fn reset(&mut self) {
        self.email.clear();
        self.activity.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The click did not land on a control the board handles, or the control lacked its data.
    Ignored,
    Declined,
    Succeeded,
    Failed,
}

/// A signup about to be sent, taken from the form at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalStep {
    /// Confirmed; the DELETE still has to be sent.
    Send(RemovalRequest),
    Done(ActionOutcome),
}

/// Everything the page shows for one visitor.
#[derive(Debug)]
pub struct BoardState {
    controls: DispatchTable,
    region: ListRegion,
    options: Vec<SelectOption>,
    form: SignupForm,
    message: MessageSlot,
    refreshes: u64,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            controls: DispatchTable::default(),
            region: ListRegion::Notice(render::LIST_LOADING),
            options: Vec::new(),
            form: SignupForm::default(),
            message: MessageSlot::default(),
            refreshes: 0,
        }
    }
}

impl BoardState {
    /// Rebuilds the cards and the select options from a listing fetch.
    pub fn apply_listing(&mut self, result: Result<ActivitiesListing, ApiError>) {
        self.refreshes += 1;
        match result {
            Ok(listing) => {
                self.region = render::activity_cards(&listing);
                self.options = render::select_options(&listing);
                debug!("Activities list rebuilt with {} activities", listing.len());
            }
            Err(e) => {
                error!("Error fetching activities: {}", e);
                self.region = ListRegion::Notice(render::LIST_LOAD_FAILED);
            }
        }
    }

    /// Reads the form for a submission. The previous message goes away while the call runs.
    pub fn begin_signup(&mut self) -> SignupRequest {
        self.message.clear();
        SignupRequest {
            activity: self.form.activity.clone(),
            email: self.form.email.clone(),
        }
    }

    pub fn finish_signup(
        &mut self,
        request: &SignupRequest,
        result: Result<ServiceReply, ApiError>,
    ) -> ActionOutcome {
        match result {
            Ok(reply) if reply.is_success() => {
                let text = reply.body.message_text().unwrap_or_default().to_string();
                self.message
                    .show(text, MessageKind::Success, SIGNUP_MESSAGE_DURATION);
                self.form.reset();
                info!("Signed up a participant for {}", request.activity);
                ActionOutcome::Succeeded
            }
            Ok(reply) => {
                warn!("Signup for {} rejected with {}", request.activity, reply.status);
                let text = reply.body.detail_text().unwrap_or(SIGNUP_FAILED).to_string();
                self.message
                    .show(text, MessageKind::Error, SIGNUP_MESSAGE_DURATION);
                ActionOutcome::Failed
            }
            Err(e) => {
                error!("Error signing up: {}", e);
                self.message.show(
                    SIGNUP_UNREACHABLE,
                    MessageKind::Error,
                    SIGNUP_MESSAGE_DURATION,
                );
                ActionOutcome::Failed
            }
        }
    }

    /// Dispatches a click inside the list and asks for confirmation of a removal.
    pub fn begin_removal(
        &mut self,
        target: &ClickTarget,
        prompt: &mut impl Confirm,
    ) -> RemovalStep {
        match self.controls.resolve(target) {
            Some(ControlRole::RemoveParticipant) => {}
            None => return RemovalStep::Done(ActionOutcome::Ignored),
        }
        let (Some(activity), Some(email)) = (target.data(ACTIVITY_KEY), target.data(EMAIL_KEY))
        else {
            return RemovalStep::Done(ActionOutcome::Ignored);
        };

        let question = format!("Verwijder {} van {}?", email, activity);
        if !prompt.confirm(&question) {
            return RemovalStep::Done(ActionOutcome::Declined);
        }

        self.message.clear();
        RemovalStep::Send(RemovalRequest {
            activity: activity.to_string(),
            email: email.to_string(),
        })
    }

    pub fn finish_removal(
        &mut self,
        request: &RemovalRequest,
        result: Result<ServiceReply, ApiError>,
    ) -> ActionOutcome {
        match result {
            Ok(reply) if reply.is_success() => {
                let text = reply.body.message_text().unwrap_or(REMOVAL_SUCCEEDED).to_string();
                self.message
                    .show(text, MessageKind::Success, REMOVAL_MESSAGE_DURATION);
                info!("Removed a participant from {}", request.activity);
                ActionOutcome::Succeeded
            }
            Ok(reply) => {
                warn!("Removal from {} rejected with {}", request.activity, reply.status);
                let text = reply.body.detail_text().unwrap_or(REMOVAL_FAILED).to_string();
                self.message
                    .show(text, MessageKind::Error, REMOVAL_MESSAGE_DURATION);
                ActionOutcome::Failed
            }
            Err(e) => {
                error!("Error removing participant: {}", e);
                self.message.show(
                    REMOVAL_UNREACHABLE,
                    MessageKind::Error,
                    REMOVAL_MESSAGE_DURATION,
                );
                ActionOutcome::Failed
            }
        }
    }

    pub fn region(&self) -> &ListRegion {
        &self.region
    }

    pub fn select_options(&self) -> &[SelectOption] {
        &self.options
    }

    /// The select options with the form's current activity selected.
    pub fn option_views(&self) -> Vec<OptionView> {
        render::option_views(&self.options, &self.form.activity)
    }

    pub fn message(&self) -> &MessageSlot {
        &self.message
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.form
    }

    /// Number of listing fetches applied so far, the initial load included.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }
}

/// A board wired to a service and a confirmation prompt, driving each flow end to end.
pub struct ActivityBoard<A, P> {
    api: A,
    prompt: P,
    elements: BoardElements,
    state: BoardState,
}

impl<A, P> ActivityBoard<A, P>
where
    A: ActivitiesApi,
    P: Confirm,
{
    pub fn new(api: A, prompt: P, elements: BoardElements) -> Self {
        Self {
            api,
            prompt,
            elements,
            state: BoardState::default(),
        }
    }

    /// Builds the board and loads the listing once.
    pub async fn start(api: A, prompt: P, elements: BoardElements) -> Self {
        let mut board = Self::new(api, prompt, elements);
        board.refresh().await;
        board
    }

    /// Re-fetches the listing and rebuilds the cards and the select options.
    pub async fn refresh(&mut self) {
        let result = self.api.list_activities().await;
        self.state.apply_listing(result);
    }

    /// Handles a submission of the signup form with its current field values.
    pub async fn submit_signup(&mut self) -> ActionOutcome {
        let request = self.state.begin_signup();
        let result = self.api.sign_up(&request.activity, &request.email).await;
        let outcome = self.state.finish_signup(&request, result);
        if outcome == ActionOutcome::Succeeded {
            self.refresh().await;
        }
        outcome
    }

    /// Delegated click handler of the activities list.
    pub async fn click(&mut self, target: &ClickTarget) -> ActionOutcome {
        let request = match self.state.begin_removal(target, &mut self.prompt) {
            RemovalStep::Send(request) => request,
            RemovalStep::Done(outcome) => return outcome,
        };
        let result = self.api.unregister(&request.activity, &request.email).await;
        let outcome = self.state.finish_removal(&request, result);
        if outcome == ActionOutcome::Succeeded {
            self.refresh().await;
        }
        outcome
    }

    pub fn elements(&self) -> &BoardElements {
        &self.elements
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        self.state.form_mut()
    }

    /// The `activities-list` region as markup.
    pub fn list_markup(&self) -> Result<String, askama::Error> {
        ActivitiesListTemplate {
            list_id: &self.elements.list,
            region: self.state.region(),
            click_action: LIST_CLICK_ACTION,
        }
        .render()
    }

    pub fn select_markup(&self) -> Result<String, askama::Error> {
        SelectTemplate {
            select_id: &self.elements.select,
            options: &self.state.option_views(),
        }
        .render()
    }

    pub fn message_markup(&self) -> Result<String, askama::Error> {
        MessageTemplate {
            message_id: &self.elements.message,
            message: self.state.message().visible(),
        }
        .render()
    }
}
