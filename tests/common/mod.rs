#![allow(dead_code)]
use shiftswap::{seed_shifts, Board, Ledger, Role, Storage, SwapRequest, User};
use std::cell::{Cell, RefCell};

/// Stockage en mémoire qui compte les sauvegardes.
#[derive(Default)]
pub struct RecordingStorage {
    pub saves: Cell<usize>,
    pub last: RefCell<Vec<SwapRequest>>,
    pub fail: Cell<bool>,
}

impl Storage for RecordingStorage {
    fn load(&self) -> anyhow::Result<Vec<SwapRequest>> {
        Ok(self.last.borrow().clone())
    }

    fn save(&self, requests: &[SwapRequest]) -> anyhow::Result<()> {
        if self.fail.get() {
            anyhow::bail!("disk full");
        }
        self.saves.set(self.saves.get() + 1);
        *self.last.borrow_mut() = requests.to_vec();
        Ok(())
    }
}

pub fn seeded_board() -> Board<RecordingStorage> {
    Board::with_ledger(
        Ledger {
            shifts: seed_shifts().unwrap(),
            swap_requests: Vec::new(),
        },
        RecordingStorage::default(),
    )
}

pub fn john() -> User {
    User::login("John Doe", "john@example.com", Role::Nurse).unwrap()
}

pub fn jane() -> User {
    User::login("Jane Smith", "jane@example.com", Role::Nurse).unwrap()
}

pub fn admin() -> User {
    User::login("Ada Admin", "ada@example.com", Role::Admin).unwrap()
}
