use crate::model::{ModelError, Role, SwapStatus};
use thiserror::Error;

/// Décision prise sur une demande en attente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Decline,
    Approve,
    Reject,
}

impl Decision {
    pub fn status(self) -> SwapStatus {
        match self {
            Decision::Accept => SwapStatus::Accepted,
            Decision::Decline => SwapStatus::Declined,
            Decision::Approve => SwapStatus::Approved,
            Decision::Reject => SwapStatus::Rejected,
        }
    }

    pub fn required_role(self) -> Role {
        match self {
            Decision::Accept | Decision::Decline => Role::Nurse,
            Decision::Approve | Decision::Reject => Role::Admin,
        }
    }
}

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("validation failed: {0}")]
    Validation(&'static str),
    #[error("unknown shift: {0}")]
    UnknownShift(u32),
    #[error("unknown swap request: {0}")]
    UnknownRequest(u32),
    #[error("shift {shift_id} is not assigned to {requester}")]
    NotShiftOwner { shift_id: u32, requester: String },
    #[error("not permitted: {0}")]
    NotPermitted(&'static str),
    #[error("swap request {request_id} already {status}")]
    AlreadyResolved { request_id: u32, status: SwapStatus },
    #[error("invalid transition to {0}")]
    InvalidTransition(SwapStatus),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("persisting swap requests failed")]
    Persistence(#[source] anyhow::Error),
}
