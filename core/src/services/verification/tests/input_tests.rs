//! Unit tests for the input controller

use crate::domain::entities::VerificationMode;
use crate::errors::ValidationError;
use crate::services::verification::{InputController, InputOutcome};

fn controller() -> InputController {
    InputController::new()
}

#[test]
fn test_single_digit_advances_focus() {
    let mut input = controller();

    assert_eq!(input.enter_digit(0, "4"), InputOutcome::Updated);
    assert_eq!(input.digits()[0], Some('4'));
    assert_eq!(input.focused_index(), 1);
    assert_eq!(input.take_focus_request(), Some(1));
    assert_eq!(input.take_focus_request(), None);
}

#[test]
fn test_non_digit_is_ignored() {
    let mut input = controller();

    assert_eq!(input.enter_digit(0, "a"), InputOutcome::Ignored);
    assert_eq!(input.enter_digit(0, "1a"), InputOutcome::Ignored);
    assert_eq!(input.digits()[0], None);
    assert_eq!(input.take_focus_request(), None);
}

#[test]
fn test_out_of_range_index_is_ignored() {
    let mut input = controller();
    assert_eq!(input.enter_digit(6, "1"), InputOutcome::Ignored);
    assert_eq!(input.backspace(6), InputOutcome::Ignored);
}

#[test]
fn test_empty_text_clears_position() {
    let mut input = controller();
    input.enter_digit(2, "7");
    assert_eq!(input.enter_digit(2, ""), InputOutcome::Updated);
    assert_eq!(input.digits()[2], None);
}

#[test]
fn test_last_digit_completes_code() {
    let mut input = controller();
    let mut moves = Vec::new();

    for (index, digit) in ["1", "2", "3", "4", "5"].iter().enumerate() {
        assert_eq!(input.enter_digit(index, digit), InputOutcome::Updated);
        moves.extend(input.take_focus_request());
    }
    assert_eq!(input.enter_digit(5, "6"), InputOutcome::Ready("123456".to_string()));
    // Focus stays on the last box
    assert_eq!(input.take_focus_request(), None);
    assert_eq!(moves, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_paste_spreads_across_boxes() {
    let mut input = controller();

    assert_eq!(input.enter_digit(0, "123"), InputOutcome::Updated);
    assert_eq!(&input.digits()[..4], &[Some('1'), Some('2'), Some('3'), None]);
    assert_eq!(input.take_focus_request(), Some(3));

    assert_eq!(
        input.enter_digit(3, "456789"),
        InputOutcome::Ready("123456".to_string())
    );
    assert_eq!(input.focused_index(), 5);
}

#[test]
fn test_backspace_on_empty_moves_focus_back() {
    let mut input = controller();
    input.enter_digit(0, "1");
    input.enter_digit(1, "2");
    input.take_focus_request();

    // Box 2 is empty: focus jumps back to box 1
    assert_eq!(input.backspace(2), InputOutcome::Updated);
    assert_eq!(input.take_focus_request(), Some(1));
    assert_eq!(input.digits()[1], Some('2'));

    // Box 1 is filled: it is cleared and focus stays
    assert_eq!(input.backspace(1), InputOutcome::Updated);
    assert_eq!(input.digits()[1], None);
    assert_eq!(input.focused_index(), 1);
    assert_eq!(input.take_focus_request(), None);
}

#[test]
fn test_backspace_on_first_empty_box_is_ignored() {
    let mut input = controller();
    assert_eq!(input.backspace(0), InputOutcome::Ignored);
    assert_eq!(input.take_focus_request(), None);
}

#[test]
fn test_toggle_mode_clears_codes() {
    let mut input = controller();
    input.enter_digit(0, "12");

    assert_eq!(input.toggle_mode(), VerificationMode::BackupCode);
    assert!(input.digits().iter().all(Option::is_none));
    assert_eq!(input.set_backup_code("ABCD-1234"), InputOutcome::Updated);

    assert_eq!(input.toggle_mode(), VerificationMode::Totp);
    assert_eq!(input.backup_code(), "");
    assert_eq!(input.take_focus_request(), Some(0));
}

#[test]
fn test_modes_reject_each_others_input() {
    let mut input = controller();
    assert_eq!(input.set_backup_code("ABCD1234"), InputOutcome::Ignored);

    input.toggle_mode();
    assert_eq!(input.enter_digit(0, "1"), InputOutcome::Ignored);
    assert_eq!(input.backspace(0), InputOutcome::Ignored);
}

#[test]
fn test_candidate_validates_current_mode() {
    let mut input = controller();
    input.enter_digit(0, "123");
    assert!(matches!(
        input.candidate(),
        Err(ValidationError::InvalidLength { actual: 3, .. })
    ));

    input.toggle_mode();
    input.set_backup_code("abcd-efgh");
    let attempt = input.candidate().unwrap();
    assert_eq!(attempt.code(), "abcdefgh");
    assert_eq!(attempt.mode, VerificationMode::BackupCode);
}
