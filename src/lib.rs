#![forbid(unsafe_code)]
//! Shiftswap — coordination locale des échanges de shifts infirmiers (sans BD).
//!
//! - Modèle en mémoire : utilisateurs, shifts, demandes d'échange.
//! - Filtres et classement par date (à venir / passés, aujourd'hui / demain).
//! - Cycle de vie des demandes : `Pending` puis un statut terminal.
//! - Stockage fichier JSON des demandes, import/export CSV des shifts.

pub mod board;
pub mod dashboard;
pub mod io;
pub mod model;
pub mod query;
pub mod storage;

pub use board::{Board, Decision, SwapError};
pub use dashboard::{AdminDashboard, Dashboard, DashboardRenderer, NurseDashboard, TextDashboard};
pub use model::{
    seed_shifts, Ledger, ModelError, Role, Shift, ShiftTime, SwapRequest, SwapStatus, User,
    UserKind,
};
pub use query::{DayClass, SwapMetrics};
pub use storage::{JsonStorage, Storage};
