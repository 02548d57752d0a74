use super::{util, Board, Decision, SwapError};
use crate::model::{Role, Shift, ShiftTime, SwapRequest, SwapStatus, User};
use crate::storage::Storage;
use chrono::NaiveDate;

pub(super) fn transition<S: Storage>(
    board: &mut Board<S>,
    request_id: u32,
    status: SwapStatus,
) -> Result<SwapRequest, SwapError> {
    let Some(pos) = board
        .ledger
        .swap_requests
        .iter()
        .position(|r| r.request_id == request_id)
    else {
        return Err(SwapError::UnknownRequest(request_id));
    };

    if !status.is_terminal() {
        return Err(SwapError::InvalidTransition(status));
    }
    let prev = board.ledger.swap_requests[pos].status;
    if prev.is_terminal() {
        return Err(SwapError::AlreadyResolved {
            request_id,
            status: prev,
        });
    }

    board.ledger.swap_requests[pos].status = status;

    if let Err(err) = board.flush() {
        board.ledger.swap_requests[pos].status = prev;
        tracing::warn!(request_id, %status, "transition rolled back: save failed");
        return Err(err);
    }

    tracing::info!(request_id, from = %prev, to = %status, "swap request updated");
    Ok(board.ledger.swap_requests[pos].clone())
}

pub(super) fn decide<S: Storage>(
    board: &mut Board<S>,
    actor: &User,
    request_id: u32,
    decision: Decision,
) -> Result<SwapRequest, SwapError> {
    match (decision.required_role(), actor.role()) {
        (Role::Nurse, Role::Admin) => {
            return Err(SwapError::NotPermitted("accept/decline is reserved to nurses"))
        }
        (Role::Admin, Role::Nurse) => {
            return Err(SwapError::NotPermitted("approve/reject is reserved to admins"))
        }
        _ => {}
    }

    let request = board
        .ledger
        .find_request(request_id)
        .ok_or(SwapError::UnknownRequest(request_id))?;
    if actor.role() == Role::Nurse && request.requester == actor.name {
        return Err(SwapError::NotPermitted("a nurse cannot decide on their own request"));
    }

    transition(board, request_id, decision.status())
}

pub(super) fn assign_shift<S: Storage>(
    board: &mut Board<S>,
    actor: &User,
    nurse_name: &str,
    date: NaiveDate,
    time: ShiftTime,
) -> Result<Shift, SwapError> {
    if actor.role() != Role::Admin {
        return Err(SwapError::NotPermitted("shift assignment is reserved to admins"));
    }
    if nurse_name.trim().is_empty() {
        return Err(SwapError::Validation("nurse name is required"));
    }

    let shift_id = util::next_id(board.ledger.shifts.iter().map(|s| s.shift_id));
    let shift = Shift::new(shift_id, nurse_name, date, time);
    board.ledger.shifts.push(shift.clone());
    tracing::info!(shift_id, nurse = nurse_name, %date, %time, "shift assigned");
    Ok(shift)
}
