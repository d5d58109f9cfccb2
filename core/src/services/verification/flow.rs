//! Two-factor verification flow
//!
//! Ties the input controller, the request client and the lockout timer
//! together around a single state snapshot:
//!
//! input → candidate attempt → request → error display / lockout → editability
//!
//! State sits behind a `std::sync::Mutex` that is never held across an
//! `.await` or while calling into a collaborator, so a slow request never
//! blocks rendering and callbacks may read the state back.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;

use crate::domain::entities::{LockoutState, VerificationMode};
use crate::domain::value_objects::{SessionContext, VerificationError};
use crate::errors::{DomainResult, FlowError};

use super::client::VerificationClient;
use super::config::VerificationFlowConfig;
use super::input::InputController;
use super::lockout_timer::{LockoutObserver, LockoutTimer};
use super::traits::{Clock, FocusTarget, Navigator, SystemClock, TwoFactorApi};
use super::types::{EntryOutcome, InputOutcome, LockoutStatus, SubmitOutcome, VerificationState};

struct FlowState {
    input: InputController,
    loading: bool,
    error: Option<VerificationError>,
    attempts_remaining: Option<u32>,
    lockout: Option<LockoutState>,
    warning: Option<String>,
    completed: bool,
}

impl FlowState {
    fn ensure_editable(&self) -> Result<(), FlowError> {
        if self.completed {
            return Err(FlowError::AlreadyVerified);
        }
        if let Some(lockout) = &self.lockout {
            return Err(FlowError::LockedOut {
                remaining_seconds: lockout.remaining_seconds,
            });
        }
        if self.loading {
            return Err(FlowError::RequestInFlight);
        }
        Ok(())
    }

    fn clear_error(&mut self) {
        self.error = None;
        self.attempts_remaining = None;
    }
}

fn lock_state(state: &Mutex<FlowState>) -> MutexGuard<'_, FlowState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Feeds countdown ticks back into the flow state
struct FlowLockoutObserver {
    state: Weak<Mutex<FlowState>>,
}

impl LockoutObserver for FlowLockoutObserver {
    fn on_tick(&self, tick: &LockoutState) {
        if let Some(state) = self.state.upgrade() {
            let mut state = lock_state(&state);
            if let Some(lockout) = state.lockout.as_mut() {
                lockout.remaining_seconds = tick.remaining_seconds;
            }
        }
    }

    fn on_expired(&self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = lock_state(&state);
            state.lockout = None;
            state.clear_error();
        }
    }
}

/// Client-side two-factor verification step
pub struct TwoFactorVerificationFlow<A: TwoFactorApi, N: Navigator> {
    context: SessionContext,
    client: VerificationClient<A, N>,
    state: Arc<Mutex<FlowState>>,
    focus: Arc<dyn FocusTarget>,
    clock: Arc<dyn Clock>,
    timer: LockoutTimer,
    config: VerificationFlowConfig,
}

impl<A: TwoFactorApi, N: Navigator> TwoFactorVerificationFlow<A, N> {
    /// Create a new verification flow using the system clock
    ///
    /// # Arguments
    ///
    /// * `context` - Session of the user being verified
    /// * `api` - Remote verification API
    /// * `navigator` - Navigation collaborator, reset once on success
    /// * `focus` - Digit input widgets
    /// * `config` - Flow configuration
    pub fn new(
        context: SessionContext,
        api: Arc<A>,
        navigator: Arc<N>,
        focus: Arc<dyn FocusTarget>,
        config: VerificationFlowConfig,
    ) -> Self {
        Self::with_clock(context, api, navigator, focus, Arc::new(SystemClock), config)
    }

    /// Create a new verification flow with an explicit countdown clock
    pub fn with_clock(
        context: SessionContext,
        api: Arc<A>,
        navigator: Arc<N>,
        focus: Arc<dyn FocusTarget>,
        clock: Arc<dyn Clock>,
        config: VerificationFlowConfig,
    ) -> Self {
        let client = VerificationClient::new(
            api,
            navigator,
            config.authenticated_route.clone(),
            config.low_backup_code_threshold,
        );
        let state = FlowState {
            input: InputController::new(),
            loading: false,
            error: None,
            attempts_remaining: None,
            lockout: None,
            warning: None,
            completed: false,
        };

        Self {
            context,
            client,
            state: Arc::new(Mutex::new(state)),
            focus,
            timer: LockoutTimer::new(clock.clone(), config.countdown_tick),
            clock,
            config,
        }
    }

    /// Type into the digit box at `index`
    ///
    /// Completing the sixth digit submits the code when auto-submit is on.
    pub async fn enter_digit(&self, index: usize, text: &str) -> DomainResult<EntryOutcome> {
        let (outcome, focus) = {
            let mut state = lock_state(&self.state);
            state.ensure_editable()?;
            if state.input.mode() != VerificationMode::Totp {
                return Err(FlowError::WrongMode {
                    current: state.input.mode(),
                }
                .into());
            }
            let outcome = state.input.enter_digit(index, text);
            (outcome, state.input.take_focus_request())
        };
        self.apply_focus(focus);

        match outcome {
            InputOutcome::Updated => Ok(EntryOutcome::Updated),
            InputOutcome::Ignored => Ok(EntryOutcome::Ignored),
            InputOutcome::Ready(_) if !self.config.auto_submit => Ok(EntryOutcome::Ready),
            InputOutcome::Ready(_) => {
                tracing::debug!(event = "two_factor_auto_submit", "All digits entered");
                self.submit().await.map(EntryOutcome::Submitted)
            }
        }
    }

    /// Backspace in the digit box at `index`
    pub fn backspace(&self, index: usize) -> DomainResult<InputOutcome> {
        let (outcome, focus) = {
            let mut state = lock_state(&self.state);
            state.ensure_editable()?;
            let outcome = state.input.backspace(index);
            (outcome, state.input.take_focus_request())
        };
        self.apply_focus(focus);
        Ok(outcome)
    }

    /// Replace the backup code text
    pub fn set_backup_code(&self, text: &str) -> DomainResult<InputOutcome> {
        let mut state = lock_state(&self.state);
        state.ensure_editable()?;
        if state.input.mode() != VerificationMode::BackupCode {
            return Err(FlowError::WrongMode {
                current: state.input.mode(),
            }
            .into());
        }
        Ok(state.input.set_backup_code(text))
    }

    /// Switch between authenticator and backup code entry
    ///
    /// Clears the code, the error and the attempts remaining. A running
    /// lockout is unaffected. Refused while a request is in flight so its
    /// response cannot land on the other mode.
    pub fn toggle_mode(&self) -> DomainResult<VerificationMode> {
        let (mode, focus) = {
            let mut state = lock_state(&self.state);
            if state.completed {
                return Err(FlowError::AlreadyVerified.into());
            }
            if state.loading {
                return Err(FlowError::RequestInFlight.into());
            }
            let mode = state.input.toggle_mode();
            state.clear_error();
            (mode, state.input.take_focus_request())
        };
        self.apply_focus(focus);
        tracing::debug!(mode = %mode, event = "two_factor_mode_toggled", "Verification mode changed");
        Ok(mode)
    }

    /// Validate and submit the current code
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - malformed code, no request made
    /// * `DomainError::Flow` - locked out, request in flight, or already verified
    ///
    /// Remote failures are not errors here: they come back as
    /// `SubmitOutcome::Rejected` and are reflected in the state.
    pub async fn submit(&self) -> DomainResult<SubmitOutcome> {
        let attempt = {
            let mut state = lock_state(&self.state);
            state.ensure_editable()?;
            let attempt = state.input.candidate().map_err(|err| {
                tracing::debug!(error = %err, event = "two_factor_invalid_input", "Code rejected locally");
                err
            })?;
            state.loading = true;
            attempt
        };

        let outcome = self.client.submit(&self.context, &attempt).await;

        let (lockout, focus) = {
            let mut state = lock_state(&self.state);
            state.loading = false;
            match &outcome {
                SubmitOutcome::Verified(success) => {
                    state.clear_error();
                    state.warning = success.warning.clone();
                    state.completed = true;
                }
                SubmitOutcome::Rejected(error) => {
                    state.error = Some(error.clone());
                    if error.attempts_remaining.is_some() {
                        state.attempts_remaining = error.attempts_remaining;
                    }
                    if state.input.mode() == VerificationMode::Totp {
                        state.input.clear();
                    }
                    // Set alongside clearing `loading` so no submit slips in between.
                    state.lockout = error
                        .lockout_until
                        .and_then(|until| LockoutState::new(until, self.clock.now()));
                }
            }
            (state.lockout, state.input.take_focus_request())
        };
        self.apply_focus(focus);

        if let Some(lockout) = lockout {
            let observer = Arc::new(FlowLockoutObserver {
                state: Arc::downgrade(&self.state),
            });
            if self.timer.arm(lockout.until, observer).is_none() {
                // No countdown will ever clear it.
                let mut state = lock_state(&self.state);
                if state.lockout.map(|current| current.until) == Some(lockout.until) {
                    state.lockout = None;
                }
            }
        }

        Ok(outcome)
    }

    /// Snapshot of everything the screen renders
    pub fn state(&self) -> VerificationState {
        let state = lock_state(&self.state);
        VerificationState {
            mode: state.input.mode(),
            digits: state.input.digits().to_vec(),
            backup_code: state.input.backup_code().to_string(),
            focused_index: state.input.focused_index(),
            loading: state.loading,
            error: state.error.clone(),
            attempts_remaining: state.attempts_remaining,
            lockout: state.lockout,
            warning: state.warning.clone(),
            completed: state.completed,
        }
    }

    /// Take the one-time success warning, if any
    pub fn take_warning(&self) -> Option<String> {
        lock_state(&self.state).warning.take()
    }

    /// Subscribe to lockout countdown updates
    pub fn lockout_updates(&self) -> watch::Receiver<LockoutStatus> {
        self.timer.subscribe()
    }

    /// Tear down: stop any running countdown
    pub fn close(&self) {
        self.timer.cancel();
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    fn apply_focus(&self, index: Option<usize>) {
        if let Some(index) = index {
            self.focus.focus_digit(index);
        }
    }
}
