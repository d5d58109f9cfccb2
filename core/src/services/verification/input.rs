//! Verification input controller
//!
//! Holds the code being typed in either mode and tracks focus across the
//! per-digit boxes. It knows nothing about requests or lockouts; the flow
//! decides when edits are allowed.
//!
//! Focus changes are recorded as a pending request rather than pushed to the
//! widgets directly. The owner drains it with [`InputController::take_focus_request`]
//! once it has released any lock around the controller.

use ts_shared::code::is_all_digits;

use crate::domain::entities::{VerificationAttempt, VerificationMode, TOTP_CODE_LENGTH};
use crate::errors::ValidationError;

use super::types::InputOutcome;

/// Code entry state for both verification modes
pub struct InputController {
    mode: VerificationMode,
    digits: [Option<char>; TOTP_CODE_LENGTH],
    backup_code: String,
    focused: usize,
    focus_request: Option<usize>,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    /// Create a controller in TOTP mode
    pub fn new() -> Self {
        Self {
            mode: VerificationMode::Totp,
            digits: [None; TOTP_CODE_LENGTH],
            backup_code: String::new(),
            focused: 0,
            focus_request: None,
        }
    }

    pub fn mode(&self) -> VerificationMode {
        self.mode
    }

    pub fn digits(&self) -> &[Option<char>] {
        &self.digits
    }

    pub fn backup_code(&self) -> &str {
        &self.backup_code
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    /// Take the focus move requested by the last edit, if any
    pub fn take_focus_request(&mut self) -> Option<usize> {
        self.focus_request.take()
    }

    /// Apply text typed (or pasted) into the digit box at `index`
    ///
    /// Empty text clears the box. A single digit fills it and advances
    /// focus. Several digits are spread over the following boxes. Anything
    /// containing a non-digit is ignored.
    pub fn enter_digit(&mut self, index: usize, text: &str) -> InputOutcome {
        if self.mode != VerificationMode::Totp || index >= TOTP_CODE_LENGTH {
            return InputOutcome::Ignored;
        }

        if text.is_empty() {
            self.digits[index] = None;
            return InputOutcome::Updated;
        }

        if !is_all_digits(text) {
            return InputOutcome::Ignored;
        }

        let mut last = index;
        for (offset, digit) in text.chars().take(TOTP_CODE_LENGTH - index).enumerate() {
            self.digits[index + offset] = Some(digit);
            last = index + offset;
        }

        if last + 1 < TOTP_CODE_LENGTH {
            self.move_focus(last + 1);
        } else if last != index {
            self.move_focus(last);
        }

        match self.complete_code() {
            Some(code) => InputOutcome::Ready(code),
            None => InputOutcome::Updated,
        }
    }

    /// Handle backspace in the digit box at `index`
    ///
    /// Backspace on an empty box moves focus to the previous one.
    pub fn backspace(&mut self, index: usize) -> InputOutcome {
        if self.mode != VerificationMode::Totp || index >= TOTP_CODE_LENGTH {
            return InputOutcome::Ignored;
        }

        if self.digits[index].is_none() {
            if index == 0 {
                return InputOutcome::Ignored;
            }
            self.move_focus(index - 1);
        } else {
            self.digits[index] = None;
        }
        InputOutcome::Updated
    }

    /// Replace the backup code text
    pub fn set_backup_code(&mut self, text: &str) -> InputOutcome {
        if self.mode != VerificationMode::BackupCode {
            return InputOutcome::Ignored;
        }
        self.backup_code = text.to_string();
        InputOutcome::Updated
    }

    /// Switch modes, clearing whatever was entered
    pub fn toggle_mode(&mut self) -> VerificationMode {
        self.mode = self.mode.toggled();
        self.clear();
        self.mode
    }

    /// Clear both codes and return focus to the first box
    pub fn clear(&mut self) {
        self.digits = [None; TOTP_CODE_LENGTH];
        self.backup_code.clear();
        if self.mode == VerificationMode::Totp {
            self.move_focus(0);
        } else {
            self.focused = 0;
            self.focus_request = None;
        }
    }

    /// The current code as a validated attempt
    pub fn candidate(&self) -> Result<VerificationAttempt, ValidationError> {
        match self.mode {
            VerificationMode::Totp => {
                let code: String = self.digits.iter().flatten().collect();
                VerificationAttempt::totp(&code)
            }
            VerificationMode::BackupCode => VerificationAttempt::backup_code(&self.backup_code),
        }
    }

    fn complete_code(&self) -> Option<String> {
        self.digits.iter().copied().collect()
    }

    fn move_focus(&mut self, index: usize) {
        self.focused = index;
        self.focus_request = Some(index);
    }
}

impl std::fmt::Debug for InputController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputController")
            .field("mode", &self.mode)
            .field("filled", &self.digits.iter().flatten().count())
            .field("backup_code_len", &self.backup_code.len())
            .field("focused", &self.focused)
            .finish()
    }
}
