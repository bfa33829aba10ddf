use crate::events::collect_events;
use crate::model::{Member, Planner};
use crate::schedule::format_hhmm;
use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Import de membres depuis CSV: header `username,email[,is_admin]`
pub fn import_members_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Member>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let username = rec.get(0).context("missing username")?.trim();
        let email = rec.get(1).context("missing email")?.trim();
        if username.is_empty() || email.is_empty() {
            bail!("invalid member row (empty)");
        }
        let mut member = Member::new(username.to_string(), email.to_string());
        if let Some(flag) = rec.get(2) {
            let flag = flag.trim();
            if !flag.is_empty() {
                member.is_admin = parse_bool(flag)
                    .with_context(|| format!("invalid is_admin value for username {username}"))?;
            }
        }
        out.push(member);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export JSON du planner (jolie mise en forme)
pub fn export_planner_json<P: AsRef<Path>>(path: P, planner: &Planner) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(planner)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du flux calendrier: header `id,title,start,end,type`
pub fn export_events_csv<P: AsRef<Path>>(path: P, planner: &Planner) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "title", "start", "end", "type"])?;
    for event in collect_events(planner, None) {
        w.write_record([
            event.id.as_str(),
            event.title.as_str(),
            event.start.as_str(),
            event.end.as_deref().unwrap_or(""),
            event.kind.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV du pointage: header `date,clock_in,clock_out,hours,location,notes`
pub fn export_timesheet_csv<P: AsRef<Path>>(
    path: P,
    planner: &Planner,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "clock_in", "clock_out", "hours", "location", "notes"])?;
    for entry in &planner.timesheet {
        let clock_in = entry.clock_in.to_rfc3339();
        let clock_out = entry.clock_out.map(|t| t.to_rfc3339()).unwrap_or_default();
        let hours = format!("{:.2}", entry.duration_minutes(now) as f64 / 60.0);
        w.write_record([
            entry.date.to_string().as_str(),
            clock_in.as_str(),
            clock_out.as_str(),
            hours.as_str(),
            entry.location.as_deref().unwrap_or(""),
            entry.notes.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Corps de la requête « création de disponibilités multiples » soumise
/// au backend : dates ISO, heures « HH:MM », discriminant de type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityBatch {
    pub dates: Vec<NaiveDate>,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub recurring: bool,
}

impl AvailabilityBatch {
    pub fn new(dates: Vec<NaiveDate>, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            dates,
            start_time: format_hhmm(start_time),
            end_time: format_hhmm(end_time),
            kind: "availability",
            recurring: true,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Réponse générique du backend: `{ success, error?, id? }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

pub fn parse_api_response(raw: &str) -> anyhow::Result<ApiResponse> {
    serde_json::from_str(raw).context("parsing backend response")
}
