//! View rendering: maps a [`ProgressDocument`] onto the page slots.
//!
//! Each operation takes its target slot as an `Option`. An absent slot means the page does
//! not carry that region, and the operation does nothing. Every piece of free text from the
//! document goes through [`escape_html`] before it becomes markup.
//!
//! [`ProgressDocument`]: crate::models::ProgressDocument

mod escape;
mod time;

pub use escape::escape_html;
pub use time::{format_instant, format_timestamp, parse_timestamp, DISPLAY_FORMAT, INVALID_DATE};

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::models::{ActivityEntry, Agent, ProgressDocument, RowStatus, StatusRow};
use crate::page::{Container, StatusTableBody, TableRow, TextSlot};

/// Owner cell content when a row has no owner.
pub const OWNER_PLACEHOLDER: &str = "—";

/// Shown instead of a list when there is no activity.
pub const NO_ACTIVITY: &str = "目前還沒有活動紀錄。";

/// Prefix in front of an agent's status label.
const AGENT_STATUS_PREFIX: &str = "狀態：";

/// Render one tagged table row per status row, preserving document order.
pub fn render_status_table(rows: &[StatusRow], target: Option<&mut StatusTableBody>) {
    let Some(body) = target else {
        return;
    };
    body.set_rows(rows.iter().map(status_table_row).collect());
}

fn status_table_row(row: &StatusRow) -> TableRow {
    let status = row.status;
    let owner = row.owner.as_deref().unwrap_or(OWNER_PLACEHOLDER);
    let notes = row.notes.as_deref().unwrap_or("");

    let mut html = String::new();
    for text in [row.area.as_str(), row.task.as_str(), owner] {
        html.push_str(&format!("<td>{}</td>", escape_html(text)));
    }
    html.push_str(&format!("<td>{}</td>", badge(status)));
    html.push_str(&format!("<td>{}</td>", escape_html(notes)));

    // Text content as a reader sees it, badge label included.
    let text = [row.area.as_str(), row.task.as_str(), owner, status.label(), notes].join("\n");

    TableRow::new(status, html, text)
}

/// Status badge markup. The class equals the status name, except `todo` which has none.
pub fn badge(status: RowStatus) -> String {
    match status.badge_class() {
        Some(class) => format!(r#"<span class="status {}">{}</span>"#, class, status.label()),
        None => format!(r#"<span class="status">{}</span>"#, status.label()),
    }
}

/// Render one card per agent, preserving document order.
pub fn render_agents(agents: &[Agent], target: Option<&mut Container>) {
    let Some(container) = target else {
        return;
    };
    let html: String = agents.iter().map(agent_card).collect();
    container.set_inner_html(html);
}

fn agent_card(agent: &Agent) -> String {
    let mut card = String::from(r#"<article class="agent">"#);
    card.push_str(r#"<div class="agent-head">"#);
    card.push_str(&format!(
        r#"<div class="agent-key">{}</div>"#,
        escape_html(&agent.key)
    ));
    card.push_str(&format!(
        r#"<div><div class="agent-name">{}</div><div class="small">{}<strong>{}</strong></div></div>"#,
        escape_html(&agent.name),
        AGENT_STATUS_PREFIX,
        escape_html(agent.status_label())
    ));
    card.push_str("</div>");

    if let Some(goal) = &agent.goal {
        card.push_str(&format!(r#"<p class="agent-goal">{}</p>"#, escape_html(goal)));
    }

    if !agent.deliverables.is_empty() {
        card.push_str(r#"<ul class="ul">"#);
        for deliverable in &agent.deliverables {
            card.push_str(&format!("<li>{}</li>", escape_html(deliverable)));
        }
        card.push_str("</ul>");
    }

    card.push_str("</article>");
    card
}

/// Render the activity log, most recent (last in the document) first.
pub fn render_activity<Tz: TimeZone>(
    items: &[ActivityEntry],
    target: Option<&mut Container>,
    tz: &Tz,
) where
    Tz::Offset: Display,
{
    let Some(container) = target else {
        return;
    };

    if items.is_empty() {
        container.set_inner_html(format!(r#"<p class="small">{}</p>"#, NO_ACTIVITY));
        return;
    }

    let mut html = String::from(r#"<ul class="ul">"#);
    for item in items.iter().rev() {
        html.push_str(&format!(
            r#"<li><span class="small">{}</span> — {}</li>"#,
            escape_html(&format_timestamp(&item.time, tz)),
            escape_html(&item.text)
        ));
    }
    html.push_str("</ul>");
    container.set_inner_html(html);
}

/// Format the document's `lastUpdated`, falling back to `now`, and write it into the slot.
///
/// `now` also fixes the display zone. The formatted text is returned whether or not the slot
/// exists.
pub fn format_last_updated<Tz: TimeZone>(
    doc: &ProgressDocument,
    target: Option<&mut TextSlot>,
    now: &DateTime<Tz>,
) -> String
where
    Tz::Offset: Display,
{
    let formatted = match &doc.last_updated {
        Some(raw) => format_timestamp(raw, &now.timezone()),
        None => format_instant(now),
    };
    if let Some(slot) = target {
        slot.set_text(formatted.clone());
    }
    formatted
}
