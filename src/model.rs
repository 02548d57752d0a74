use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Format texte des dates de shift.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Horodatage ISO-8601 sans fuseau (`2024-03-18T09:00:00.123456`).
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation failed: {0}")]
    Validation(&'static str),
    #[error("invalid {kind}: {value:?}")]
    Parse { kind: &'static str, value: String },
}

/// Rôle, utilisé uniquement pour choisir le tableau de bord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Nurse,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Nurse => "nurse",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nurse" => Ok(Role::Nurse),
            "admin" => Ok(Role::Admin),
            _ => Err(ModelError::Parse {
                kind: "role",
                value: s.to_string(),
            }),
        }
    }
}

/// Variante d'utilisateur ; les champs propres à chaque rôle vivent ici.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKind {
    Nurse { swap_history: Vec<u32> },
    Admin,
}

/// Utilisateur de session (jamais persisté).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
    /// N'influe que sur les messages affichés, aucune limite n'est appliquée.
    pub is_pro: bool,
    pub kind: UserKind,
}

impl User {
    pub fn nurse<N: Into<String>, E: Into<String>>(name: N, email: E) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            is_pro: false,
            kind: UserKind::Nurse {
                swap_history: Vec::new(),
            },
        }
    }

    pub fn admin<N: Into<String>, E: Into<String>>(name: N, email: E) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            is_pro: false,
            kind: UserKind::Admin,
        }
    }

    /// Point d'entrée de connexion : nom et email obligatoires.
    pub fn login(name: &str, email: &str, role: Role) -> Result<Self, ModelError> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(ModelError::Validation("name and email are required"));
        }
        Ok(match role {
            Role::Nurse => Self::nurse(name, email),
            Role::Admin => Self::admin(name, email),
        })
    }

    pub fn role(&self) -> Role {
        match self.kind {
            UserKind::Nurse { .. } => Role::Nurse,
            UserKind::Admin => Role::Admin,
        }
    }

    pub fn upgrade_to_pro(&mut self) {
        self.is_pro = true;
    }
}

/// Créneaux horaires proposés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftTime {
    #[serde(rename = "Morning (6AM-2PM)")]
    Morning,
    #[serde(rename = "Evening (2PM-10PM)")]
    Evening,
    #[serde(rename = "Night (10PM-6AM)")]
    Night,
}

impl ShiftTime {
    pub const ALL: [ShiftTime; 3] = [ShiftTime::Morning, ShiftTime::Evening, ShiftTime::Night];

    pub fn label(self) -> &'static str {
        match self {
            ShiftTime::Morning => "Morning (6AM-2PM)",
            ShiftTime::Evening => "Evening (2PM-10PM)",
            ShiftTime::Night => "Night (10PM-6AM)",
        }
    }
}

impl fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepte le libellé complet ou sa forme courte (`morning`, `evening`, `night`).
impl FromStr for ShiftTime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        ShiftTime::ALL
            .into_iter()
            .find(|t| {
                t.label() == raw
                    || t.label()
                        .split_whitespace()
                        .next()
                        .is_some_and(|short| short.eq_ignore_ascii_case(raw))
            })
            .ok_or_else(|| ModelError::Parse {
                kind: "shift time",
                value: s.to_string(),
            })
    }
}

/// Parse une date calendaire `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| ModelError::Parse {
        kind: "date",
        value: raw.to_string(),
    })
}

/// Parse un horodatage RFC 3339, ou ISO-8601 sans fuseau lu en heure locale.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ModelError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, NAIVE_TIMESTAMP_FORMAT).map_err(|_| {
        ModelError::Parse {
            kind: "timestamp",
            value: raw.to_string(),
        }
    })?;
    // heure inexistante (passage à l'heure d'été) : lue comme UTC
    Ok(match Local.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    })
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Shift affecté à une infirmière. `nurse_name` est une simple clé de jointure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub shift_id: u32,
    pub nurse_name: String,
    pub date: NaiveDate,
    pub time: ShiftTime,
}

impl Shift {
    pub fn new<N: Into<String>>(
        shift_id: u32,
        nurse_name: N,
        date: NaiveDate,
        time: ShiftTime,
    ) -> Self {
        Self {
            shift_id,
            nurse_name: nurse_name.into(),
            date,
            time,
        }
    }

    /// Construit un shift depuis sa forme texte (seed, CSV, CLI).
    pub fn parse(
        shift_id: u32,
        nurse_name: &str,
        date: &str,
        time: &str,
    ) -> Result<Self, ModelError> {
        Ok(Self::new(shift_id, nurse_name, parse_date(date)?, time.parse()?))
    }
}

/// Liste de shifts rechargée à chaque démarrage en l'absence de fichier CSV.
pub fn seed_shifts() -> Result<Vec<Shift>, ModelError> {
    const SEED: [(u32, &str, &str, &str); 4] = [
        (1, "John Doe", "2024-03-20", "Morning (6AM-2PM)"),
        (2, "John Doe", "2024-03-22", "Night (10PM-6AM)"),
        (3, "Jane Smith", "2024-03-20", "Evening (2PM-10PM)"),
        (4, "Jane Smith", "2024-03-21", "Morning (6AM-2PM)"),
    ];
    SEED.iter()
        .map(|(id, name, date, time)| Shift::parse(*id, name, date, time))
        .collect()
}

/// Statut d'une demande d'échange. Tout statut autre que `Pending` est terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapStatus {
    Pending,
    Accepted,
    Declined,
    Approved,
    Rejected,
}

impl SwapStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SwapStatus::Pending => "Pending",
            SwapStatus::Accepted => "Accepted",
            SwapStatus::Declined => "Declined",
            SwapStatus::Approved => "Approved",
            SwapStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        self != SwapStatus::Pending
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Demande d'échange soumise par une infirmière.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub request_id: u32,
    pub shift_id: u32,
    pub requester: String,
    pub reason: String,
    pub status: SwapStatus,
    /// Écrit en RFC 3339 ; relu aussi sans fuseau.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl SwapRequest {
    pub fn new<R: Into<String>, S: Into<String>>(
        request_id: u32,
        shift_id: u32,
        requester: R,
        reason: S,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id,
            shift_id,
            requester: requester.into(),
            reason: reason.into(),
            status: SwapStatus::Pending,
            created_at,
        }
    }
}

/// Collections de la session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Ledger {
    pub shifts: Vec<Shift>,
    pub swap_requests: Vec<SwapRequest>,
}

impl Ledger {
    pub fn find_shift(&self, shift_id: u32) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.shift_id == shift_id)
    }
    pub fn find_request(&self, request_id: u32) -> Option<&SwapRequest> {
        self.swap_requests.iter().find(|r| r.request_id == request_id)
    }
    pub fn find_request_mut(&mut self, request_id: u32) -> Option<&mut SwapRequest> {
        self.swap_requests.iter_mut().find(|r| r.request_id == request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_time_accepts_label_and_short_form() {
        assert_eq!("Night (10PM-6AM)".parse::<ShiftTime>().unwrap(), ShiftTime::Night);
        assert_eq!("evening".parse::<ShiftTime>().unwrap(), ShiftTime::Evening);
        assert!("brunch".parse::<ShiftTime>().is_err());
    }

    #[test]
    fn login_requires_name_and_email() {
        assert_eq!(
            User::login("", "jd@example.com", Role::Nurse),
            Err(ModelError::Validation("name and email are required"))
        );
        let admin = User::login("Ada", "ada@example.com", Role::Admin).unwrap();
        assert_eq!(admin.role(), Role::Admin);
        assert!(!admin.is_pro);
    }

    #[test]
    fn malformed_date_is_a_parse_error() {
        let err = Shift::parse(9, "John Doe", "2024-13-01", "morning").unwrap_err();
        assert!(matches!(err, ModelError::Parse { kind: "date", .. }));
    }

    #[test]
    fn timestamps_without_offset_are_read_as_local_time() {
        let utc = parse_timestamp("2024-03-18T09:00:00+00:00").unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 3, 18, 9, 0, 0).unwrap());

        let naive = NaiveDateTime::parse_from_str("2024-03-18T09:00:00", NAIVE_TIMESTAMP_FORMAT)
            .unwrap();
        let expected = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(parse_timestamp("2024-03-18T09:00:00").unwrap(), expected);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn seed_list_has_four_shifts() {
        let seed = seed_shifts().unwrap();
        assert_eq!(seed.len(), 4);
        assert_eq!(seed[1].time, ShiftTime::Night);
    }
}
