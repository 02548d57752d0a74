#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use shiftswap::{
    board::{Board, Decision},
    dashboard::{Dashboard, TextDashboard},
    io,
    model::{self, parse_date, Role, ShiftTime, User},
    storage::JsonStorage,
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'échange de shifts (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des demandes d'échange
    #[arg(long, global = true, env = "SHIFTSWAP_DATA", default_value = "data.json")]
    data: PathBuf,

    /// CSV des shifts (`shift_id,nurse_name,date,time`) ; liste de démo sinon
    #[arg(long, global = true, env = "SHIFTSWAP_SHIFTS")]
    shifts: Option<PathBuf>,

    /// Nom de l'utilisateur connecté
    #[arg(long, global = true, env = "SHIFTSWAP_NAME", default_value = "")]
    name: String,

    /// Email de l'utilisateur connecté
    #[arg(long, global = true, env = "SHIFTSWAP_EMAIL", default_value = "")]
    email: String,

    /// nurse | admin
    #[arg(long, global = true, env = "SHIFTSWAP_ROLE", default_value = "nurse")]
    role: Role,

    /// Passe la session sur le plan Pro (messages uniquement)
    #[arg(long, global = true)]
    pro: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Afficher le tableau de bord du rôle connecté
    Dashboard {
        /// Date de référence (YYYY-MM-DD), aujourd'hui par défaut
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },

    /// Demander l'échange d'un de ses shifts
    Request {
        #[arg(long)]
        shift_id: u32,
        #[arg(long)]
        reason: String,
    },

    /// Accepter la demande d'un collègue
    Accept {
        #[arg(long)]
        request_id: u32,
    },

    /// Refuser la demande d'un collègue
    Decline {
        #[arg(long)]
        request_id: u32,
    },

    /// Approuver une demande (admin)
    Approve {
        #[arg(long)]
        request_id: u32,
    },

    /// Rejeter une demande (admin)
    Reject {
        #[arg(long)]
        request_id: u32,
    },

    /// Affecter manuellement un shift (admin)
    AssignShift {
        #[arg(long)]
        nurse: String,
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// morning | evening | night, ou le libellé complet
        #[arg(long)]
        time: ShiftTime,
    },

    /// Exporter les demandes (CSV) et/ou toute la session (JSON)
    Export {
        #[arg(long)]
        requests_csv: Option<PathBuf>,
        #[arg(long)]
        ledger_json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .try_init();
    }

    let mut user = User::login(&cli.name, &cli.email, cli.role).context("login")?;
    if cli.pro {
        user.upgrade_to_pro();
    }

    let shifts = match &cli.shifts {
        Some(path) => io::import_shifts_csv(path)
            .with_context(|| format!("importing shifts from {}", path.display()))?,
        None => model::seed_shifts()?,
    };
    let storage = JsonStorage::open(&cli.data)?;
    let mut board = Board::open(shifts, storage)?;

    match cli.cmd {
        Commands::Dashboard { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let view = Dashboard::for_user(&board, &user, today)?;
            print!("{}", view.render(&TextDashboard));
        }
        Commands::Request { shift_id, reason } => {
            let req = board.submit_swap(&user.name, shift_id, &reason, Utc::now())?;
            println!("Swap request #{} submitted", req.request_id);
        }
        Commands::Accept { request_id } => decide(&mut board, &user, request_id, Decision::Accept)?,
        Commands::Decline { request_id } => {
            decide(&mut board, &user, request_id, Decision::Decline)?
        }
        Commands::Approve { request_id } => {
            decide(&mut board, &user, request_id, Decision::Approve)?
        }
        Commands::Reject { request_id } => decide(&mut board, &user, request_id, Decision::Reject)?,
        Commands::AssignShift { nurse, date, time } => {
            let shift = board.assign_shift(&user, &nurse, date, time)?;
            match &cli.shifts {
                Some(path) => io::export_shifts_csv(path, board.shifts())
                    .with_context(|| format!("writing shifts to {}", path.display()))?,
                None => eprintln!("note: no --shifts file, assignment is kept for this session only"),
            }
            println!(
                "Assigned {} shift on {} to {} (shift #{})",
                shift.time, shift.date, shift.nurse_name, shift.shift_id
            );
        }
        Commands::Export {
            requests_csv,
            ledger_json,
        } => {
            if let Some(path) = requests_csv {
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                io::export_requests_csv(file, board.swap_requests())?;
            }
            if let Some(path) = ledger_json {
                io::export_ledger_json(path, board.ledger())?;
            }
        }
    }

    Ok(())
}

fn decide(
    board: &mut Board<JsonStorage>,
    user: &User,
    request_id: u32,
    decision: Decision,
) -> Result<()> {
    let req = board.decide(user, request_id, decision)?;
    println!("Request #{} is now {}", req.request_id, req.status);
    Ok(())
}
