//! Startup flow: load the document once, render every view, then apply the filter.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::client::{LoadError, ProgressClient, Source};
use crate::filter;
use crate::models::ProgressDocument;
use crate::page::Page;
use crate::render;

/// Shown in the last-updated slot when the document cannot be loaded.
pub const LOAD_FAILED: &str = "Failed to load progress data";

/// Result of one startup run. Load failures are already handled when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupOutcome {
    Rendered { rows: usize, visible_rows: usize },
    LoadFailed,
}

/// Loads the progress document and renders it into a page.
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: ProgressClient,
    source: Source,
}

impl Dashboard {
    pub fn new(client: ProgressClient, source: Source) -> Self {
        Self { client, source }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Run the startup sequence against `page` in the local time zone.
    ///
    /// The page's control values are honored by the initial filter pass.
    pub async fn start(&self, page: &mut Page) -> StartupOutcome {
        match self.client.load(&self.source).await {
            Ok(doc) => populate(page, &doc, &Local::now()),
            Err(e) => show_load_failure(page, &e),
        }
    }
}

/// Render a loaded document into `page` and apply the current filter once.
pub fn populate<Tz: TimeZone>(
    page: &mut Page,
    doc: &ProgressDocument,
    now: &DateTime<Tz>,
) -> StartupOutcome
where
    Tz::Offset: Display,
{
    render::format_last_updated(doc, page.last_updated.as_mut(), now);
    render::render_status_table(&doc.status_rows, page.status_table.as_mut());
    render::render_agents(&doc.agents, page.agents.as_mut());
    render::render_activity(&doc.activity, page.activity.as_mut(), &now.timezone());

    let visible_rows = filter::refresh(page);
    tracing::info!(
        rows = doc.status_rows.len(),
        visible_rows,
        agents = doc.agents.len(),
        activity = doc.activity.len(),
        "Rendered dashboard"
    );

    StartupOutcome::Rendered {
        rows: doc.status_rows.len(),
        visible_rows,
    }
}

/// Log the failure and put the fallback text in the last-updated slot. Nothing else is
/// touched.
pub fn show_load_failure(page: &mut Page, error: &LoadError) -> StartupOutcome {
    tracing::error!("Failed to load progress document: {}", error);
    if let Some(slot) = page.last_updated.as_mut() {
        slot.set_text(LOAD_FAILED);
    }
    StartupOutcome::LoadFailed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RowStatus, StatusRow};
    use crate::page::Control;
    use chrono::Utc;

    fn doc() -> ProgressDocument {
        ProgressDocument {
            last_updated: Some("2024-05-01T08:30:00Z".to_string()),
            status_rows: vec![
                StatusRow {
                    area: "X".to_string(),
                    status: RowStatus::Done,
                    ..StatusRow::default()
                },
                StatusRow {
                    area: "Y".to_string(),
                    ..StatusRow::default()
                },
            ],
            ..ProgressDocument::default()
        }
    }

    #[test]
    fn populate_renders_and_filters_once() {
        let mut page = Page::new("Board");
        page.status_filter = Some(Control::new("done"));

        let outcome = populate(&mut page, &doc(), &Utc::now());

        assert_eq!(
            outcome,
            StartupOutcome::Rendered {
                rows: 2,
                visible_rows: 1
            }
        );
        assert_eq!(
            page.last_updated.as_ref().map(|s| s.text()),
            Some("2024/05/01 08:30:00")
        );
        assert!(page
            .activity
            .as_ref()
            .is_some_and(|c| c.inner_html().contains("目前還沒有活動紀錄。")));
    }

    #[test]
    fn populate_tolerates_a_bare_page() {
        let mut page = Page::bare("Board");
        let outcome = populate(&mut page, &doc(), &Utc::now());
        assert_eq!(
            outcome,
            StartupOutcome::Rendered {
                rows: 2,
                visible_rows: 0
            }
        );
        assert_eq!(page, Page::bare("Board"));
    }

    #[test]
    fn load_failure_only_touches_last_updated() {
        let mut page = Page::new("Board");
        let untouched = page.clone();
        let err = LoadError::Parse(serde_json::from_str::<ProgressDocument>("nope").unwrap_err());

        assert_eq!(show_load_failure(&mut page, &err), StartupOutcome::LoadFailed);
        assert_eq!(page.last_updated.as_ref().map(|s| s.text()), Some(LOAD_FAILED));
        assert_eq!(page.status_table, untouched.status_table);
        assert_eq!(page.agents, untouched.agents);
        assert_eq!(page.activity, untouched.activity);
    }
}
