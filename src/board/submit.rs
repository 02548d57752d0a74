use super::{util, Board, SwapError};
use crate::model::SwapRequest;
use crate::storage::Storage;
use chrono::{DateTime, Utc};

pub(super) fn submit_swap<S: Storage>(
    board: &mut Board<S>,
    requester: &str,
    shift_id: u32,
    reason: &str,
    now: DateTime<Utc>,
) -> Result<SwapRequest, SwapError> {
    if reason.trim().is_empty() {
        return Err(SwapError::Validation("a reason is required for a swap"));
    }
    let shift = board
        .ledger
        .find_shift(shift_id)
        .ok_or(SwapError::UnknownShift(shift_id))?;
    if shift.nurse_name != requester {
        return Err(SwapError::NotShiftOwner {
            shift_id,
            requester: requester.to_string(),
        });
    }

    let request_id = util::next_id(board.ledger.swap_requests.iter().map(|r| r.request_id));
    let request = SwapRequest::new(request_id, shift_id, requester, reason, now);
    board.ledger.swap_requests.push(request.clone());

    if let Err(err) = board.flush() {
        board.ledger.swap_requests.pop();
        tracing::warn!(request_id, "swap submission rolled back: save failed");
        return Err(err);
    }

    tracing::info!(request_id, shift_id, requester, "swap request submitted");
    Ok(request)
}
