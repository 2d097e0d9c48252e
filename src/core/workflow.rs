use crate::errors::{AppError, AppResult};
use crate::models::timesheet::{TimesheetAction, TimesheetState};

use crate::models::timesheet::TimesheetAction as A;
use crate::models::timesheet::TimesheetState as S;

const TRANSITIONS: &[(TimesheetState, TimesheetAction, TimesheetState)] = &[
    (S::Initial, A::Create, S::NotSubmitted),
    (S::NotSubmitted, A::Submit, S::Submitted),
    (S::NotSubmitted, A::Modify, S::NotSubmitted),
    (S::Submitted, A::Approve, S::Approved),
    (S::Submitted, A::Reject, S::Rejected),
    (S::Submitted, A::Reset, S::NotSubmitted),
    (S::Rejected, A::Submit, S::Submitted),
    (S::Rejected, A::Modify, S::Rejected),
    (S::Approved, A::Reset, S::NotSubmitted),
];

/// State reached by applying `action` in `state`. VIEW never changes it.
pub fn next_state(state: TimesheetState, action: TimesheetAction) -> AppResult<TimesheetState> {
    if action == A::View {
        return Ok(state);
    }

    TRANSITIONS
        .iter()
        .find(|(from, a, _)| *from == state && *a == action)
        .map(|(_, _, to)| *to)
        .ok_or_else(|| AppError::InvalidTransition {
            state: state.to_string(),
            action: action.to_string(),
        })
}

/// Actions accepted in `state`, VIEW included.
pub fn allowed_actions(state: TimesheetState) -> Vec<TimesheetAction> {
    let mut out = vec![A::View];
    out.extend(
        TRANSITIONS
            .iter()
            .filter(|(from, _, _)| *from == state)
            .map(|(_, a, _)| *a),
    );
    out
}
