#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use presence::{
    analytics::range_analytics,
    io,
    leave::{self, LeaveRequest},
    model::{AvailabilitySlot, BusySlot, EntryId, LeaveDay, Member, MemberId, Planner},
    notification::{prepare_decision_notice, TextNotice},
    schedule::{parse_12_hour, Recurrence, WeekdaySet},
    storage::{JsonStorage, Storage},
    timesheet::{self, format_duration, hours_display},
    AvailabilityBatch,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de gestion des présences (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON d'état du planner
    #[arg(long, global = true, default_value = "planner.json")]
    state: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aperçu d'une récurrence de disponibilité (résumé + semaines)
    Preview {
        /// Date de début (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Date de fin incluse (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Jours cochés "0,1,3" (dimanche = 0)
        #[arg(long)]
        days: String,
        /// Heure de début, format 12 heures
        #[arg(long, default_value = "09:00 AM")]
        start: String,
        /// Heure de fin, format 12 heures
        #[arg(long, default_value = "05:00 PM")]
        end: String,
    },

    /// Corps JSON de l'envoi groupé « disponibilités multiples »
    Payload {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        days: String,
        #[arg(long, default_value = "09:00 AM")]
        start: String,
        #[arg(long, default_value = "05:00 PM")]
        end: String,
        /// Fichier de sortie (stdout sinon)
        #[arg(long)]
        out: Option<String>,
    },

    /// Enregistre localement les créneaux d'une récurrence
    Apply {
        #[arg(long)]
        member: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        days: String,
        #[arg(long, default_value = "09:00 AM")]
        start: String,
        #[arg(long, default_value = "05:00 PM")]
        end: String,
    },

    /// Ajouter un membre
    AddMember {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        admin: bool,
    },

    /// Importer des membres depuis un CSV
    ImportMembers {
        #[arg(long)]
        csv: String,
    },

    /// Ajouter un créneau occupé
    AddBusy {
        #[arg(long)]
        member: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM (24 heures)
        #[arg(long, default_value = "10:00")]
        start: String,
        /// HH:MM (24 heures)
        #[arg(long, default_value = "11:00")]
        end: String,
        #[arg(long, default_value = "Meeting")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Poser une journée de congé au calendrier
    AddLeave {
        #[arg(long)]
        member: String,
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "Leave")]
        leave_type: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Lister le flux calendrier et optionnellement exporter
    Events {
        /// Filtrer sur un membre
        #[arg(long)]
        member: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Soumettre une demande de congés multi-jours
    LeaveSubmit {
        #[arg(long)]
        member: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value = "Leave")]
        leave_type: String,
        #[arg(long)]
        reason: String,
        #[arg(long, default_value = "")]
        contact: String,
    },

    /// Approuver une demande en attente
    LeaveApprove {
        #[arg(long)]
        request_id: String,
        #[arg(long)]
        comments: Option<String>,
    },

    /// Refuser une demande en attente
    LeaveReject {
        #[arg(long)]
        request_id: String,
        #[arg(long)]
        comments: Option<String>,
    },

    /// Lister les demandes et leurs compteurs
    LeaveList,

    /// Générer l'avis texte d'une demande décidée
    Notify {
        #[arg(long)]
        request_id: String,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },

    /// Ouvrir un pointage
    ClockIn {
        #[arg(long)]
        member: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        task: Option<String>,
    },

    /// Fermer le pointage ouvert
    ClockOut {
        #[arg(long)]
        member: String,
        #[arg(long, default_value_t = 0)]
        break_minutes: u32,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Afficher le pointage d'un membre et ses totaux
    Timesheet {
        #[arg(long)]
        member: String,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Synthèse d'activité sur une plage de dates
    Analytics {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        member: Option<String>,
    },
}

fn parse_weekdays(raw: &str) -> Result<WeekdaySet> {
    let indices: Vec<u8> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u8>().map_err(|_| anyhow::anyhow!("invalid weekday index: {s}")))
        .collect::<Result<_>>()?;
    Ok(WeekdaySet::from_indices(&indices)?)
}

fn parse_recurrence(from: &str, to: &str, days: &str, start: &str, end: &str) -> Result<Recurrence> {
    let start_date: NaiveDate = from.parse()?;
    let end_date: NaiveDate = to.parse()?;
    let start_time = parse_12_hour(start)?;
    let end_time = parse_12_hour(end)?;
    Ok(Recurrence {
        start: start_date,
        end: end_date,
        start_time,
        end_time,
        weekdays: parse_weekdays(days)?,
    })
}

fn member_id(planner: &Planner, username: &str) -> Result<MemberId> {
    planner
        .find_member_by_username(username)
        .map(|m| m.id.clone())
        .ok_or_else(|| anyhow::anyhow!("unknown member: {}", username))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.state)?;
    let mut planner = storage.load_or_init()?;

    let code = match cli.cmd {
        Commands::Preview {
            from,
            to,
            days,
            start,
            end,
        } => {
            let recurrence = parse_recurrence(&from, &to, &days, &start, &end)?;
            let plan = recurrence.plan()?;
            let summary = plan.summary;
            println!(
                "{} day(s) | {:.1} h/day | {:.1} h total",
                summary.total_days,
                summary.hours_per_day,
                summary.total_hours_display()
            );
            for bucket in &plan.weeks {
                let dates: Vec<String> =
                    bucket.scheduled_dates().map(|d| d.to_string()).collect();
                println!(
                    "{} → {} | {}",
                    bucket.week_start,
                    bucket.week_end,
                    dates.join(", ")
                );
            }
            if summary.total_days == 0 {
                eprintln!("WARN: no scheduled day in range");
                2
            } else {
                0
            }
        }
        Commands::Payload {
            from,
            to,
            days,
            start,
            end,
            out,
        } => {
            let recurrence = parse_recurrence(&from, &to, &days, &start, &end)?;
            let plan = recurrence.plan()?;
            let batch = AvailabilityBatch::new(
                plan.dates().collect(),
                recurrence.start_time,
                recurrence.end_time,
            );
            let body = batch.to_json()?;
            match out {
                Some(path) => std::fs::write(path, body)?,
                None => println!("{body}"),
            }
            0
        }
        Commands::Apply {
            member,
            from,
            to,
            days,
            start,
            end,
        } => {
            let id = member_id(&planner, &member)?;
            let recurrence = parse_recurrence(&from, &to, &days, &start, &end)?;
            let plan = recurrence.plan()?;
            for day in &plan.days {
                let mut slot = AvailabilitySlot::new(
                    id.clone(),
                    day.date,
                    recurrence.start_time,
                    recurrence.end_time,
                )
                .map_err(anyhow::Error::msg)?;
                slot.recurring = true;
                planner.availability.push(slot);
            }
            storage.save(&planner)?;
            println!(
                "{} slot(s) stored for {} ({:.1} h total)",
                plan.summary.total_days,
                member,
                plan.summary.total_hours_display()
            );
            0
        }
        Commands::AddMember {
            username,
            email,
            admin,
        } => {
            if planner.find_member_by_username(&username).is_some() {
                bail!("member already exists: {}", username);
            }
            let mut new_member = Member::new(username, email);
            new_member.is_admin = admin;
            planner.members.push(new_member);
            storage.save(&planner)?;
            0
        }
        Commands::ImportMembers { csv } => {
            let members = io::import_members_csv(csv)?;
            planner.members.extend(members);
            storage.save(&planner)?;
            0
        }
        Commands::AddBusy {
            member,
            date,
            start,
            end,
            title,
            description,
        } => {
            let id = member_id(&planner, &member)?;
            let date: NaiveDate = date.parse()?;
            let start = NaiveTime::parse_from_str(&start, "%H:%M")?;
            let end = NaiveTime::parse_from_str(&end, "%H:%M")?;
            let mut slot =
                BusySlot::new(id, date, start, end).map_err(anyhow::Error::msg)?;
            slot.title = title;
            slot.description = description;
            planner.busy.push(slot);
            storage.save(&planner)?;
            0
        }
        Commands::AddLeave {
            member,
            date,
            leave_type,
            notes,
        } => {
            let id = member_id(&planner, &member)?;
            let date: NaiveDate = date.parse()?;
            let mut day = LeaveDay::new(id, date, leave_type);
            day.notes = notes;
            planner.leave.push(day);
            storage.save(&planner)?;
            0
        }
        Commands::Events {
            member,
            out_json,
            out_csv,
        } => {
            let filter = match member {
                Some(username) => Some(member_id(&planner, &username)?),
                None => None,
            };
            let events = presence::collect_events(&planner, filter.as_ref());
            if let Some(path) = out_json {
                std::fs::write(path, serde_json::to_string_pretty(&events)?)?;
            }
            if let Some(path) = out_csv {
                io::export_events_csv(path, &planner)?;
            }
            // impression compacte
            for event in &events {
                println!(
                    "{} | {} → {} | {}",
                    event.id,
                    event.start,
                    event.end.as_deref().unwrap_or("-"),
                    event.title
                );
            }
            0
        }
        Commands::LeaveSubmit {
            member,
            from,
            to,
            leave_type,
            reason,
            contact,
        } => {
            let id = member_id(&planner, &member)?;
            let start: NaiveDate = from.parse()?;
            let end: NaiveDate = to.parse()?;
            let mut request = LeaveRequest::new(id, start, end, leave_type, reason)?;
            request.contact = contact;
            let total = request.total_days();
            let request_id = request.id.as_str().to_string();
            planner.requests.push(request);
            storage.save(&planner)?;
            println!("Leave request {request_id} submitted ({total} day(s))");
            0
        }
        Commands::LeaveApprove {
            request_id,
            comments,
        } => {
            leave::approve(&mut planner, &EntryId::new(&request_id), Utc::now(), comments)?;
            storage.save(&planner)?;
            println!("Leave request {request_id} approved");
            0
        }
        Commands::LeaveReject {
            request_id,
            comments,
        } => {
            leave::reject(&mut planner, &EntryId::new(&request_id), Utc::now(), comments)?;
            storage.save(&planner)?;
            println!("Leave request {request_id} rejected");
            0
        }
        Commands::LeaveList => {
            let counts = leave::counts_by_status(&planner.requests);
            println!(
                "pending: {} | approved: {} | rejected: {}",
                counts.pending, counts.approved, counts.rejected
            );
            for request in &planner.requests {
                let username = planner
                    .find_member_by_id(&request.member)
                    .map(|m| m.username.as_str())
                    .unwrap_or("-");
                println!(
                    "{} | {} | {} → {} | {} day(s) | {}",
                    request.id.as_str(),
                    username,
                    request.start_date,
                    request.end_date,
                    request.total_days(),
                    request.status.as_str()
                );
            }
            0
        }
        Commands::Notify { request_id, out } => {
            let renderer = TextNotice;
            let notice = prepare_decision_notice(
                &planner,
                &EntryId::new(&request_id),
                Utc::now(),
                &renderer,
            )?;
            std::fs::write(&out, notice.content)?;
            println!(
                "Notice generated for {} (request {}) at {}",
                notice.recipient,
                notice.request_id,
                notice.prepared_at.to_rfc3339()
            );
            0
        }
        Commands::ClockIn {
            member,
            location,
            task,
        } => {
            let id = member_id(&planner, &member)?;
            timesheet::clock_in(&mut planner, &id, Utc::now(), location, task)?;
            storage.save(&planner)?;
            println!("{member} clocked in");
            0
        }
        Commands::ClockOut {
            member,
            break_minutes,
            notes,
        } => {
            let id = member_id(&planner, &member)?;
            let minutes =
                timesheet::clock_out(&mut planner, &id, Utc::now(), break_minutes, notes)?;
            storage.save(&planner)?;
            println!("{member} clocked out after {}", format_duration(minutes));
            0
        }
        Commands::Timesheet { member, out_csv } => {
            let id = member_id(&planner, &member)?;
            let now = Utc::now();
            if let Some(path) = out_csv {
                io::export_timesheet_csv(path, &planner, now)?;
            }
            for entry in planner.timesheet.iter().filter(|e| e.member == id) {
                let state = if entry.is_active() { "active" } else { "done" };
                println!(
                    "{} | {} | {} | {}",
                    entry.date,
                    format_duration(entry.duration_minutes(now)),
                    entry.location.as_deref().unwrap_or("Office"),
                    state
                );
            }
            let totals = timesheet::work_totals(&planner.timesheet, &id, now);
            println!(
                "today: {:.1} h | week: {:.1} h",
                hours_display(totals.today_minutes),
                hours_display(totals.week_minutes)
            );
            0
        }
        Commands::Analytics { from, to, member } => {
            let start: NaiveDate = from.parse()?;
            let end: NaiveDate = to.parse()?;
            let filter = match member {
                Some(username) => Some(member_id(&planner, &username)?),
                None => None,
            };
            let analytics = range_analytics(&planner, start, end, filter.as_ref())?;
            println!(
                "availability: {:.1} h | busy: {:.1} h | leave: {} day(s) | scheduled: {} day(s) | rate: {:.1}%",
                analytics.total_availability_hours,
                analytics.total_busy_hours,
                analytics.total_leave_days,
                analytics.total_scheduled_days,
                analytics.availability_rate
            );
            0
        }
    };

    std::process::exit(code);
}
