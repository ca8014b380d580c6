//! The sign-in page controller.
//!
//! Owns the two pieces of page-lifetime state (the session identifier and the
//! submit flow state) and every transition between them. Handlers are plain
//! methods over the finite event set; the only asynchronous operation is
//! [`SignInController::submit`].

use crate::clock::Clock;
use crate::config::ControllerConfig;
use crate::core::{
    EventDisposition, FieldId, KeyChord, Result, SubmitState, UiEvent, UnloadDecision,
};
use crate::session::SessionStore;
use crate::surface::PageSurface;
use crate::transport::{RegisterApi, RegisterRequest, SignOutRequest};
use crate::validate::{normalize_register_no, validate_field, validate_form};
use log::{debug, error, info};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

/// Shown when submission is attempted with invalid fields.
pub const MSG_FILL_REQUIRED: &str = "Please fill all required fields correctly.";
/// Fallback when the server rejects without an error message.
pub const MSG_REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
/// Shown on any transport failure; the underlying error is logged, not shown.
pub const MSG_NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
/// Shown when the browser refuses to close the page after success.
pub const MSG_CLOSE_FALLBACK: &str = "You are signed in! You may now close this window.";
/// Confirmation prompt for leaving with unsaved input.
pub const UNLOAD_PROMPT: &str =
    "You have not completed registration. Are you sure you want to leave?";

/// Success message interpolating the signed-in name.
pub fn welcome_message(name: &str) -> String {
    format!("Welcome, {name}! You are now signed in.")
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; no request was made.
    Invalid,
    /// A request is already in flight (or the flow already finished);
    /// silently ignored.
    InFlight,
    /// Registration accepted, session established.
    SignedIn,
    /// Server rejected the registration with the contained message.
    Rejected(String),
    /// The request itself failed (connectivity, malformed response).
    TransportFailed,
}

/// Result of a sign-out attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutOutcome {
    /// No session was ever established on this page.
    NoSession,
    SignedOut,
    Rejected(String),
    TransportFailed,
}

/// Result of dispatching a synchronous page event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// A field was validated; carries the predicate result.
    Validated(bool),
    /// A guard decided whether the event passes through.
    Disposition(EventDisposition),
    /// The unload guard decided whether to interfere.
    Unload(UnloadDecision),
}

struct ControllerState {
    /// Set exactly once, by a successful registration.
    session_id: Option<String>,
    submit_state: SubmitState,
    close_task: Option<JoinHandle<()>>,
}

/// Controller for the lab sign-in page.
///
/// All collaborators sit behind trait objects so the controller can be driven
/// without a browser: the page is a [`PageSurface`], the backend a
/// [`RegisterApi`], storage a [`SessionStore`] and time a
/// [`crate::clock::TimeSource`] inside the [`Clock`].
///
/// # Examples
///
/// ```
/// use lab_signin::{
///     Clock, ControllerConfig, FieldId, MemorySessionStore, MemorySurface, PageSurface,
///     SignInController, UiEvent,
/// };
/// use lab_signin::transport::HttpRegisterApi;
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let surface = Arc::new(MemorySurface::new());
/// let controller = SignInController::new(
///     ControllerConfig::new("http://localhost:5000"),
///     surface.clone(),
///     Arc::new(HttpRegisterApi::new("http://localhost:5000")),
///     Arc::new(MemorySessionStore::new()),
///     Clock::system(),
/// )?;
///
/// surface.set_field_value(FieldId::Name, "Jo");
/// controller.handle_event(UiEvent::Blur(FieldId::Name));
/// # Ok(())
/// # }
/// ```
pub struct SignInController {
    config: ControllerConfig,
    surface: Arc<dyn PageSurface>,
    api: Arc<dyn RegisterApi>,
    store: Arc<dyn SessionStore>,
    clock: Clock,
    state: Mutex<ControllerState>,
}

impl SignInController {
    /// Create the controller and initialize the page.
    ///
    /// Fails if the configuration is invalid or a required page element is
    /// missing. Performs the initial clock tick so the time fields are
    /// populated before the first interval elapses.
    pub fn new(
        config: ControllerConfig,
        surface: Arc<dyn PageSurface>,
        api: Arc<dyn RegisterApi>,
        store: Arc<dyn SessionStore>,
        clock: Clock,
    ) -> Result<Self> {
        config.validate()?;
        surface.check_required()?;

        clock.tick(surface.as_ref());

        Ok(Self {
            config,
            surface,
            api,
            store,
            clock,
            state: Mutex::new(ControllerState {
                session_id: None,
                submit_state: SubmitState::Idle,
                close_task: None,
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Session identifier established by a successful registration.
    pub fn session_id(&self) -> Option<String> {
        self.state().session_id.clone()
    }

    /// Current submit flow state.
    pub fn submit_state(&self) -> SubmitState {
        self.state().submit_state
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_state() == SubmitState::Submitting
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Take the pending close task, if a successful submit scheduled one.
    ///
    /// The page itself never awaits this; tests do.
    pub fn take_close_task(&self) -> Option<JoinHandle<()>> {
        self.state().close_task.take()
    }

    /// Start the once-per-second clock ticker.
    pub fn start_clock(&self) -> JoinHandle<()> {
        self.clock.spawn(Arc::clone(&self.surface), self.config.clock_period)
    }

    /// Dispatch one synchronous page event.
    pub fn handle_event(&self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::Input(FieldId::RegisterNo) => {
                EventOutcome::Validated(self.on_register_no_input())
            }
            UiEvent::Input(field) | UiEvent::Blur(field) | UiEvent::Change(field) => {
                EventOutcome::Validated(validate_field(self.surface.as_ref(), field))
            }
            UiEvent::ContextMenu => EventOutcome::Disposition(EventDisposition::Suppress),
            UiEvent::KeyDown(chord) => EventOutcome::Disposition(self.on_key_down(chord)),
            UiEvent::BeforeUnload => EventOutcome::Unload(self.on_before_unload()),
        }
    }

    /// Register-number keystrokes rewrite the field to its normalized form
    /// before validating, so the user only ever sees canonical input.
    fn on_register_no_input(&self) -> bool {
        let raw = self.surface.field_value(FieldId::RegisterNo);
        let normalized = normalize_register_no(&raw);
        if normalized != raw {
            self.surface.set_field_value(FieldId::RegisterNo, &normalized);
        }
        validate_field(self.surface.as_ref(), FieldId::RegisterNo)
    }

    /// Suppress shortcuts that open developer tools or view-source.
    pub fn on_key_down(&self, chord: KeyChord) -> EventDisposition {
        if chord.opens_devtools() {
            EventDisposition::Suppress
        } else {
            EventDisposition::Allow
        }
    }

    /// Warn before losing in-progress input: fires only while no session has
    /// been established and the register-number or name field has content.
    pub fn on_before_unload(&self) -> UnloadDecision {
        if self.state().session_id.is_none() {
            let register_no = self.surface.field_value(FieldId::RegisterNo);
            let name = self.surface.field_value(FieldId::Name);
            if !register_no.is_empty() || !name.is_empty() {
                return UnloadDecision::Confirm(UNLOAD_PROMPT);
            }
        }
        UnloadDecision::Proceed
    }

    /// Submit the registration form. The single suspension point of the page.
    ///
    /// Validation runs first and shows its own error even while a request is
    /// in flight; a second submit with valid fields is silently ignored until
    /// a failure returns the flow to idle. Success is terminal: the submit
    /// control stays disabled and a close attempt is scheduled after the
    /// configured delay.
    pub async fn submit(&self) -> SubmitOutcome {
        if !validate_form(self.surface.as_ref()) {
            self.surface.show_error(MSG_FILL_REQUIRED);
            return SubmitOutcome::Invalid;
        }

        {
            let mut state = self.state();
            if state.submit_state != SubmitState::Idle {
                debug!("submit ignored, flow is {:?}", state.submit_state);
                return SubmitOutcome::InFlight;
            }
            state.submit_state = SubmitState::Submitting;
        }

        self.surface.set_submit_enabled(false);
        self.surface.set_submit_loading(true);
        self.surface.hide_alerts();

        let request = self.assemble_request();
        info!("submitting registration for {}", request.register_no);

        match self.api.register(&request).await {
            Ok(response) if response.success => {
                let name = response.name.clone().unwrap_or_else(|| request.name.clone());
                {
                    let mut state = self.state();
                    state.session_id = response.session_id.clone();
                    state.submit_state = SubmitState::Done;
                }

                self.surface.show_success(&welcome_message(&name));
                if let Some(session_id) = &response.session_id {
                    self.store.set(&self.config.storage_key, session_id);
                }
                info!("registration accepted for {}", request.register_no);

                let close_task = self.schedule_close();
                self.state().close_task = Some(close_task);

                SubmitOutcome::SignedIn
            }
            Ok(response) => {
                let message = response.error.unwrap_or_else(|| MSG_REGISTRATION_FAILED.to_string());
                self.surface.show_error(&message);
                self.reset_to_idle();
                SubmitOutcome::Rejected(message)
            }
            Err(err) => {
                error!("registration request failed: {err}");
                self.surface.show_error(MSG_NETWORK_ERROR);
                self.reset_to_idle();
                SubmitOutcome::TransportFailed
            }
        }
    }

    /// Sign the established session out (the shutdown-handler flow).
    ///
    /// Clears the stored session key on success. The in-memory session
    /// identifier stays set; the page is done either way.
    pub async fn sign_out(&self) -> SignOutOutcome {
        let Some(session_id) = self.session_id() else {
            return SignOutOutcome::NoSession;
        };

        let request = SignOutRequest { session_id };
        match self.api.sign_out(&request).await {
            Ok(response) if response.success => {
                self.store.remove(&self.config.storage_key);
                info!("session signed out");
                SignOutOutcome::SignedOut
            }
            Ok(response) => {
                let message = response
                    .error
                    .unwrap_or_else(|| "Sign-out failed. Please try again.".to_string());
                SignOutOutcome::Rejected(message)
            }
            Err(err) => {
                error!("sign-out request failed: {err}");
                SignOutOutcome::TransportFailed
            }
        }
    }

    /// Gather the payload from the current field contents. The time and date
    /// come from the clock-maintained fields, not a fresh reading, so the
    /// server receives exactly what the page displayed.
    fn assemble_request(&self) -> RegisterRequest {
        let surface = self.surface.as_ref();
        RegisterRequest {
            register_no: surface.field_value(FieldId::RegisterNo).trim().to_uppercase(),
            name: surface.field_value(FieldId::Name).trim().to_string(),
            department: surface.field_value(FieldId::Department),
            system_no: surface.field_value(FieldId::SystemNo),
            in_time: surface.field_value(FieldId::InTime),
            in_date: surface.field_value(FieldId::InDate),
        }
    }

    fn reset_to_idle(&self) {
        self.state().submit_state = SubmitState::Idle;
        self.surface.set_submit_enabled(true);
        self.surface.set_submit_loading(false);
    }

    fn schedule_close(&self) -> JoinHandle<()> {
        let surface = Arc::clone(&self.surface);
        let delay = self.config.close_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !surface.request_close() {
                // The close attempt is best-effort; when the browser refuses,
                // the fallback message is the only recovery.
                surface.show_success(MSG_CLOSE_FALLBACK);
            }
        })
    }
}
