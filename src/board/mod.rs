mod mutate;
mod submit;
mod types;
mod util;

pub use types::{Decision, SwapError};

use crate::model::{Ledger, Shift, ShiftTime, SwapRequest, SwapStatus, User};
use crate::storage::Storage;
use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};

/// Board : état explicite d'une session (shifts, demandes, stockage).
///
/// Toute mutation d'une demande réécrit la collection via le `Storage`
/// avant de rendre la main ; en cas d'échec, la mutation est annulée.
pub struct Board<S: Storage> {
    ledger: Ledger,
    storage: S,
}

impl<S: Storage> Board<S> {
    /// Ouvre une session : les demandes sont rechargées depuis le stockage.
    /// Une erreur de lecture (autre que fichier absent) est remontée telle quelle.
    pub fn open(shifts: Vec<Shift>, storage: S) -> anyhow::Result<Self> {
        let swap_requests = storage.load().context("loading swap requests")?;
        Ok(Self::with_ledger(
            Ledger {
                shifts,
                swap_requests,
            },
            storage,
        ))
    }

    pub fn with_ledger(ledger: Ledger, storage: S) -> Self {
        Self { ledger, storage }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn shifts(&self) -> &[Shift] {
        &self.ledger.shifts
    }
    pub fn swap_requests(&self) -> &[SwapRequest] {
        &self.ledger.swap_requests
    }
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Soumet une demande d'échange (statut `Pending`).
    pub fn submit_swap(
        &mut self,
        requester: &str,
        shift_id: u32,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<SwapRequest, SwapError> {
        submit::submit_swap(self, requester, shift_id, reason, now)
    }

    /// Passe une demande `Pending` vers un statut terminal.
    pub fn transition(
        &mut self,
        request_id: u32,
        status: SwapStatus,
    ) -> Result<SwapRequest, SwapError> {
        mutate::transition(self, request_id, status)
    }

    /// Décision d'un utilisateur, avec contrôle du rôle.
    pub fn decide(
        &mut self,
        actor: &User,
        request_id: u32,
        decision: Decision,
    ) -> Result<SwapRequest, SwapError> {
        mutate::decide(self, actor, request_id, decision)
    }

    /// Affectation manuelle d'un shift (admin).
    pub fn assign_shift(
        &mut self,
        actor: &User,
        nurse_name: &str,
        date: NaiveDate,
        time: ShiftTime,
    ) -> Result<Shift, SwapError> {
        mutate::assign_shift(self, actor, nurse_name, date, time)
    }

    fn flush(&self) -> Result<(), SwapError> {
        self.storage
            .save(&self.ledger.swap_requests)
            .map_err(SwapError::Persistence)
    }
}
