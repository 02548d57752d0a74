use crate::model::{Shift, SwapRequest, SwapStatus};
use chrono::NaiveDate;
use std::fmt;

/// Shifts d'une infirmière (comparaison exacte, sans trim ni casse).
pub fn shifts_for<'a>(shifts: &'a [Shift], nurse_name: &str) -> Vec<&'a Shift> {
    shifts.iter().filter(|s| s.nurse_name == nurse_name).collect()
}

/// Sépare en `(current, past)` : current = date >= reference, past = date < reference.
pub fn partition_by_date<'a>(
    shifts: impl IntoIterator<Item = &'a Shift>,
    reference: NaiveDate,
) -> (Vec<&'a Shift>, Vec<&'a Shift>) {
    shifts.into_iter().partition(|s| s.date >= reference)
}

pub fn sort_ascending_by_date(shifts: &mut [&Shift]) {
    shifts.sort_by_key(|s| s.date);
}

pub fn sort_descending_by_date(shifts: &mut [&Shift]) {
    shifts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Nombre de jours calendaires entre `reference` et le shift.
pub fn days_until(shift: &Shift, reference: NaiveDate) -> i64 {
    shift.date.signed_duration_since(reference).num_days()
}

/// Échéance d'un shift relativement à aujourd'hui.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClass {
    Today,
    Tomorrow,
    InDays(i64),
    Past(i64),
}

impl DayClass {
    pub fn from_days(days: i64) -> Self {
        match days {
            0 => DayClass::Today,
            1 => DayClass::Tomorrow,
            d if d > 1 => DayClass::InDays(d),
            d => DayClass::Past(-d),
        }
    }

    pub fn of(shift: &Shift, reference: NaiveDate) -> Self {
        Self::from_days(days_until(shift, reference))
    }
}

impl fmt::Display for DayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayClass::Today => f.write_str("Today"),
            DayClass::Tomorrow => f.write_str("Tomorrow"),
            DayClass::InDays(d) => write!(f, "In {d} days"),
            DayClass::Past(d) => write!(f, "{d} days ago"),
        }
    }
}

pub fn pending(requests: &[SwapRequest]) -> Vec<&SwapRequest> {
    requests
        .iter()
        .filter(|r| r.status == SwapStatus::Pending)
        .collect()
}

/// Demandes en attente qu'une infirmière peut traiter (hors les siennes).
pub fn pending_for_peer<'a>(requests: &'a [SwapRequest], viewer: &str) -> Vec<&'a SwapRequest> {
    requests
        .iter()
        .filter(|r| r.status == SwapStatus::Pending && r.requester != viewer)
        .collect()
}

pub fn requests_by<'a>(requests: &'a [SwapRequest], requester: &str) -> Vec<&'a SwapRequest> {
    requests.iter().filter(|r| r.requester == requester).collect()
}

/// Compteurs agrégés pour le tableau de bord admin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapMetrics {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub declined: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl SwapMetrics {
    pub fn collect(requests: &[SwapRequest]) -> Self {
        requests.iter().fold(Self::default(), |mut m, r| {
            m.total += 1;
            match r.status {
                SwapStatus::Pending => m.pending += 1,
                SwapStatus::Accepted => m.accepted += 1,
                SwapStatus::Declined => m.declined += 1,
                SwapStatus::Approved => m.approved += 1,
                SwapStatus::Rejected => m.rejected += 1,
            }
            m
        })
    }
}
