use crate::board::{Board, SwapError};
use crate::model::{Role, Shift, SwapRequest, User};
use crate::query::{self, DayClass, SwapMetrics};
use crate::storage::Storage;
use chrono::NaiveDate;

/// Shift à venir accompagné de son échéance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingShift {
    pub shift: Shift,
    pub when: DayClass,
}

/// Vue infirmière : shifts à venir / passés et demandes des collègues.
#[derive(Debug, Clone)]
pub struct NurseDashboard {
    pub nurse: String,
    pub is_pro: bool,
    pub today: NaiveDate,
    /// Tri chronologique croissant.
    pub current: Vec<UpcomingShift>,
    /// Du plus récent au plus ancien.
    pub past: Vec<Shift>,
    pub pending: Vec<SwapRequest>,
}

impl NurseDashboard {
    pub fn build<S: Storage>(
        board: &Board<S>,
        user: &User,
        today: NaiveDate,
    ) -> Result<Self, SwapError> {
        if user.role() != Role::Nurse {
            return Err(SwapError::NotPermitted("nurse dashboard requires the nurse role"));
        }

        let own = query::shifts_for(board.shifts(), &user.name);
        let (mut current, mut past) = query::partition_by_date(own, today);
        query::sort_ascending_by_date(&mut current);
        query::sort_descending_by_date(&mut past);

        Ok(Self {
            nurse: user.name.clone(),
            is_pro: user.is_pro,
            today,
            current: current
                .into_iter()
                .map(|s| UpcomingShift {
                    shift: s.clone(),
                    when: DayClass::of(s, today),
                })
                .collect(),
            past: past.into_iter().cloned().collect(),
            pending: query::pending_for_peer(board.swap_requests(), &user.name)
                .into_iter()
                .cloned()
                .collect(),
        })
    }

    /// Shifts pour lesquels un échange peut être demandé.
    pub fn swappable(&self) -> impl Iterator<Item = &Shift> {
        self.current.iter().map(|u| &u.shift)
    }
}

/// Vue admin : métriques et demandes à arbitrer.
#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub admin: String,
    pub metrics: SwapMetrics,
    pub pending: Vec<SwapRequest>,
}

impl AdminDashboard {
    pub fn build<S: Storage>(board: &Board<S>, user: &User) -> Result<Self, SwapError> {
        if user.role() != Role::Admin {
            return Err(SwapError::NotPermitted("admin dashboard requires the admin role"));
        }
        Ok(Self {
            admin: user.name.clone(),
            metrics: SwapMetrics::collect(board.swap_requests()),
            pending: query::pending(board.swap_requests())
                .into_iter()
                .cloned()
                .collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub enum Dashboard {
    Nurse(NurseDashboard),
    Admin(AdminDashboard),
}

impl Dashboard {
    /// Choisit la vue selon le rôle de l'utilisateur.
    pub fn for_user<S: Storage>(
        board: &Board<S>,
        user: &User,
        today: NaiveDate,
    ) -> Result<Self, SwapError> {
        match user.role() {
            Role::Nurse => NurseDashboard::build(board, user, today).map(Dashboard::Nurse),
            Role::Admin => AdminDashboard::build(board, user).map(Dashboard::Admin),
        }
    }

    pub fn render(&self, renderer: &dyn DashboardRenderer) -> String {
        match self {
            Dashboard::Nurse(view) => renderer.render_nurse(view),
            Dashboard::Admin(view) => renderer.render_admin(view),
        }
    }
}

/// Permet de customiser le rendu (texte, HTML, etc.).
pub trait DashboardRenderer {
    fn render_nurse(&self, view: &NurseDashboard) -> String;
    fn render_admin(&self, view: &AdminDashboard) -> String;
}

/// Rendu texte brut utilisé par la CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextDashboard;

impl DashboardRenderer for TextDashboard {
    fn render_nurse(&self, view: &NurseDashboard) -> String {
        let mut out = format!("Welcome Nurse {}\n", view.nurse);
        if view.is_pro {
            out.push_str("You are on the Pro Hospital Plan\n");
        } else {
            out.push_str("Upgrade to Pro Hospital Plan for unlimited swaps!\n");
        }

        out.push_str("\nCurrent shifts:\n");
        if view.current.is_empty() {
            out.push_str("  No upcoming shifts scheduled\n");
        }
        for u in &view.current {
            out.push_str(&format!(
                "  #{} {} {} | {}\n",
                u.shift.shift_id, u.shift.date, u.shift.time, u.when
            ));
        }

        out.push_str("\nPast shifts:\n");
        if view.past.is_empty() {
            out.push_str("  No past shifts\n");
        }
        for s in &view.past {
            out.push_str(&format!("  #{} {} {}\n", s.shift_id, s.date, s.time));
        }

        out.push_str("\nPending swap requests:\n");
        push_requests(&mut out, &view.pending);
        out
    }

    fn render_admin(&self, view: &AdminDashboard) -> String {
        let m = &view.metrics;
        let mut out = format!("Welcome Admin {}\n", view.admin);
        out.push_str(&format!("Total swap requests: {}\n", m.total));
        out.push_str(&format!("Pending requests: {}\n", m.pending));
        out.push_str(&format!(
            "Accepted: {} | Declined: {} | Approved: {} | Rejected: {}\n",
            m.accepted, m.declined, m.approved, m.rejected
        ));
        out.push_str("\nManage swap requests:\n");
        push_requests(&mut out, &view.pending);
        out
    }
}

fn push_requests(out: &mut String, requests: &[SwapRequest]) {
    if requests.is_empty() {
        out.push_str("  No pending swap requests\n");
    }
    for r in requests {
        out.push_str(&format!(
            "  #{} from {} (shift {}): {}\n",
            r.request_id, r.requester, r.shift_id, r.reason
        ));
    }
}
