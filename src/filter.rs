//! Row filtering by status and free-text query.
//!
//! The controller holds no state between events. Each event writes the control value and
//! then re-reads both controls from the page. It then re-evaluates every rendered row
//! synchronously. Rows are only shown or hidden, never removed.

use crate::models::RowStatus;
use crate::page::{Page, StatusTableBody, TableRow, ALL_STATUSES};

/// Status filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RowStatus),
    /// A value outside the known statuses; it matches no row.
    Unknown(String),
}

impl StatusFilter {
    /// Parse a control value. Empty means `all`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_STATUSES {
            return Self::All;
        }
        match RowStatus::from_str(raw) {
            Some(status) => Self::Only(status),
            None => Self::Unknown(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_STATUSES,
            Self::Only(status) => status.as_str(),
            Self::Unknown(raw) => raw,
        }
    }

    pub fn matches(&self, status: RowStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
            Self::Unknown(_) => false,
        }
    }
}

/// The two filter inputs, captured fresh for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterController {
    status: StatusFilter,
    query: String,
}

impl FilterController {
    pub fn new(status: &str, query: &str) -> Self {
        Self {
            status: StatusFilter::parse(status),
            query: query.trim().to_lowercase(),
        }
    }

    /// Read both inputs from the page controls. Absent controls act as "show all".
    pub fn read(page: &Page) -> Self {
        let status = page.status_filter.as_ref().map_or("", |c| c.value());
        let query = page.query.as_ref().map_or("", |c| c.value());
        Self::new(status, query)
    }

    pub fn status(&self) -> &StatusFilter {
        &self.status
    }

    /// Normalized (trimmed, lowercased) query.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_visible(&self, row: &TableRow) -> bool {
        let status_ok = self.status.matches(row.status());
        let query_ok =
            self.query.is_empty() || row.text_content().to_lowercase().contains(&self.query);
        status_ok && query_ok
    }

    /// Toggle every row's visibility and return how many remain visible.
    pub fn apply(&self, body: &mut StatusTableBody) -> usize {
        let mut visible = 0;
        for row in body.rows_mut() {
            let show = self.is_visible(row);
            row.set_visible(show);
            if show {
                visible += 1;
            }
        }
        visible
    }
}

/// Re-evaluate the filter over the page's status table, if it has one.
pub fn refresh(page: &mut Page) -> usize {
    let controller = FilterController::read(page);
    let Some(body) = page.status_table.as_mut() else {
        return 0;
    };
    let visible = controller.apply(body);
    tracing::debug!(
        status = controller.status().as_str(),
        query = controller.query(),
        visible,
        "Applied status table filter"
    );
    visible
}

/// Selection change on the status control. `None` when the page has no such control.
pub fn on_status_change(page: &mut Page, value: &str) -> Option<usize> {
    page.status_filter.as_mut()?.set_value(value);
    Some(refresh(page))
}

/// Input on the query control. `None` when the page has no such control.
pub fn on_query_input(page: &mut Page, value: &str) -> Option<usize> {
    page.query.as_mut()?.set_value(value);
    Some(refresh(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatusRow;
    use crate::render::render_status_table;

    fn page_with_rows(rows: &[(&str, RowStatus)]) -> Page {
        let rows: Vec<StatusRow> = rows
            .iter()
            .map(|(area, status)| StatusRow {
                area: area.to_string(),
                status: *status,
                ..StatusRow::default()
            })
            .collect();
        let mut page = Page::new("Board");
        render_status_table(&rows, page.status_table.as_mut());
        page
    }

    fn visible_areas(page: &Page) -> Vec<String> {
        page.status_table
            .as_ref()
            .map(|b| {
                b.visible_rows()
                    .map(|r| r.text_content().lines().next().unwrap_or("").to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn parse_status_filter() {
        assert_eq!(StatusFilter::parse(""), StatusFilter::All);
        assert_eq!(StatusFilter::parse("all"), StatusFilter::All);
        assert_eq!(StatusFilter::parse("done"), StatusFilter::Only(RowStatus::Done));
        assert_eq!(
            StatusFilter::parse("someday"),
            StatusFilter::Unknown("someday".to_string())
        );
    }

    #[test]
    fn status_filter_shows_only_matching_rows() {
        let mut page = page_with_rows(&[("X", RowStatus::Done), ("Y", RowStatus::Todo)]);
        assert_eq!(on_status_change(&mut page, "done"), Some(1));
        assert_eq!(visible_areas(&page), vec!["X"]);
    }

    #[test]
    fn query_is_case_insensitive() {
        let mut page = page_with_rows(&[("X", RowStatus::Done), ("Y", RowStatus::Todo)]);
        assert_eq!(on_query_input(&mut page, "y"), Some(1));
        assert_eq!(visible_areas(&page), vec!["Y"]);
    }

    #[test]
    fn query_is_trimmed_and_matches_badge_label() {
        let mut page = page_with_rows(&[("X", RowStatus::Blocked), ("Y", RowStatus::Todo)]);
        on_query_input(&mut page, "  卡住 ");
        assert_eq!(visible_areas(&page), vec!["X"]);
    }

    #[test]
    fn both_predicates_must_hold() {
        let mut page = page_with_rows(&[
            ("Alpha", RowStatus::Done),
            ("Beta", RowStatus::Done),
            ("alpine", RowStatus::Todo),
        ]);
        on_status_change(&mut page, "done");
        on_query_input(&mut page, "AL");
        assert_eq!(visible_areas(&page), vec!["Alpha"]);

        on_status_change(&mut page, "all");
        assert_eq!(visible_areas(&page), vec!["Alpha", "alpine"]);
    }

    #[test]
    fn unknown_status_hides_everything() {
        let mut page = page_with_rows(&[("X", RowStatus::Done)]);
        assert_eq!(on_status_change(&mut page, "archived"), Some(0));
    }

    #[test]
    fn clearing_filters_shows_all_rows_again() {
        let mut page = page_with_rows(&[("X", RowStatus::Done), ("Y", RowStatus::Todo)]);
        on_status_change(&mut page, "todo");
        on_query_input(&mut page, "zzz");
        assert!(visible_areas(&page).is_empty());

        on_query_input(&mut page, "");
        on_status_change(&mut page, "all");
        assert_eq!(visible_areas(&page), vec!["X", "Y"]);
        assert_eq!(page.status_table.as_ref().map(|b| b.rows().len()), Some(2));
    }

    #[test]
    fn missing_controls_do_not_fire() {
        let mut page = page_with_rows(&[("X", RowStatus::Done)]);
        page.status_filter = None;
        page.query = None;
        assert_eq!(on_status_change(&mut page, "todo"), None);
        assert_eq!(on_query_input(&mut page, "nope"), None);
        assert_eq!(refresh(&mut page), 1);
    }

    #[test]
    fn missing_table_is_a_no_op() {
        let mut page = Page::new("Board");
        page.status_table = None;
        assert_eq!(on_status_change(&mut page, "done"), Some(0));
    }
}
