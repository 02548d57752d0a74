use crate::model::{Ledger, Shift, SwapRequest};
use anyhow::Context;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de shifts depuis CSV: header `shift_id,nurse_name,date,time`
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Shift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let line = row + 2;
        let id = rec.get(0).context("missing shift_id")?.trim();
        let nurse = rec.get(1).context("missing nurse_name")?.trim();
        let date = rec.get(2).context("missing date")?;
        let time = rec.get(3).context("missing time")?;
        let id: u32 = id
            .parse()
            .with_context(|| format!("invalid shift_id {id:?} on line {line}"))?;
        let shift = Shift::parse(id, nurse, date, time)
            .with_context(|| format!("invalid shift on line {line}"))?;
        out.push(shift);
    }
    Ok(out)
}

/// Export CSV des shifts (même format que l'import)
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, shifts: &[Shift]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["shift_id", "nurse_name", "date", "time"])?;
    let mut id_buf = itoa::Buffer::new();
    for s in shifts {
        let date = s.date.to_string();
        w.write_record([
            id_buf.format(s.shift_id),
            s.nurse_name.as_str(),
            date.as_str(),
            s.time.label(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des demandes: header `request_id,shift_id,requester,reason,status,created_at`
pub fn export_requests_csv<W: std::io::Write>(
    writer: W,
    requests: &[SwapRequest],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(writer);
    w.write_record([
        "request_id",
        "shift_id",
        "requester",
        "reason",
        "status",
        "created_at",
    ])?;
    let mut request_buf = itoa::Buffer::new();
    let mut shift_buf = itoa::Buffer::new();
    for r in requests {
        let created_at = r.created_at.to_rfc3339();
        w.write_record([
            request_buf.format(r.request_id),
            shift_buf.format(r.shift_id),
            r.requester.as_str(),
            r.reason.as_str(),
            r.status.as_str(),
            created_at.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON de toute la session (jolie mise en forme)
pub fn export_ledger_json<P: AsRef<Path>>(path: P, ledger: &Ledger) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(ledger)?;
    fs::write(path, s)?;
    Ok(())
}
