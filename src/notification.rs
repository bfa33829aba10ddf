use crate::leave::{LeaveRequest, LeaveStatus};
use crate::model::{EntryId, Member, Planner};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};

/// Représente un avis généré pour le demandeur d'un congé.
#[derive(Debug, Clone)]
pub struct Notice {
    pub recipient: String,
    pub request_id: String,
    pub prepared_at: DateTime<Utc>,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, mail, etc.).
pub trait NoticeRenderer {
    fn render(&self, member: &Member, request: &LeaveRequest, prepared_at: DateTime<Utc>)
        -> String;
}

/// Gabarit texte simple destiné à un futur mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn render(
        &self,
        member: &Member,
        request: &LeaveRequest,
        prepared_at: DateTime<Utc>,
    ) -> String {
        let verdict = match request.status {
            LeaveStatus::Approved => "approuvée",
            LeaveStatus::Rejected => "refusée",
            LeaveStatus::Pending => "en attente",
        };
        format!(
            "Bonjour {name},\n\nTa demande de congés « {kind} » du {start} au {end} ({days} jour(s)) est {verdict}.\nCe message est généré le {prepared}.\n\nPense à prévenir ton équipe et à mettre ton agenda à jour.\n",
            name = member.username,
            kind = request.leave_type,
            start = request.start_date,
            end = request.end_date,
            days = request.total_days(),
            prepared = prepared_at.to_rfc3339()
        )
    }
}

/// Prépare l'avis de décision d'une demande de congés déjà tranchée.
pub fn prepare_decision_notice(
    planner: &Planner,
    request_id: &EntryId,
    now: DateTime<Utc>,
    renderer: &dyn NoticeRenderer,
) -> Result<Notice> {
    let request = planner
        .requests
        .iter()
        .find(|r| &r.id == request_id)
        .with_context(|| format!("unknown leave request: {}", request_id.as_str()))?;

    if request.status == LeaveStatus::Pending {
        bail!("leave request not decided yet: {}", request_id.as_str());
    }

    let member = planner
        .find_member_by_id(&request.member)
        .with_context(|| format!("unknown member: {}", request.member.as_str()))?;

    let content = renderer.render(member, request, now);
    Ok(Notice {
        recipient: member.email.clone(),
        request_id: request.id.as_str().to_string(),
        prepared_at: now,
        content,
    })
}
