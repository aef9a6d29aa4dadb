//! The host page: a set of optional slots addressed by stable identifiers.
//!
//! Renderers write into the slots and the filter toggles row visibility. [`Page::to_html`]
//! serializes the whole thing into one HTML document. A slot that is `None` is left out of
//! the document, and every step that targets it is skipped.

use crate::models::RowStatus;
use crate::render::escape_html;

/// Stable element identifiers.
pub mod ids {
    pub const STATUS_TABLE: &str = "statusTable";
    pub const AGENTS: &str = "agentsDynamic";
    pub const ACTIVITY: &str = "activityLog";
    pub const LAST_UPDATED: &str = "lastUpdated";
    pub const STATUS_FILTER: &str = "statusFilter";
    pub const QUERY: &str = "q";
}

/// Value of the status filter control that shows every row.
pub const ALL_STATUSES: &str = "all";

/// A rendered status-table row, tagged with its resolved status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    status: RowStatus,
    html: String,
    text: String,
    hidden: bool,
}

impl TableRow {
    pub fn new(status: RowStatus, html: String, text: String) -> Self {
        Self {
            status,
            html,
            text,
            hidden: false,
        }
    }

    pub fn status(&self) -> RowStatus {
        self.status
    }

    /// Inner markup (the `<td>` cells).
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Text content of all cells, as a reader would see it.
    pub fn text_content(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.hidden = !visible;
    }

    fn to_html(&self) -> String {
        let style = if self.hidden {
            r#" style="display:none""#
        } else {
            ""
        };
        format!(
            r#"<tr data-status="{}"{}>{}</tr>"#,
            self.status.as_str(),
            style,
            self.html
        )
    }
}

/// Body of the status table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTableBody {
    rows: Vec<TableRow>,
}

impl StatusTableBody {
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [TableRow] {
        &mut self.rows
    }

    pub fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|r| r.is_visible())
    }
}

/// A region whose content is replaced wholesale with rendered markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    inner_html: String,
}

impl Container {
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.inner_html = html.into();
    }
}

/// A plain-text slot. Its content is escaped on output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSlot {
    text: String,
}

impl TextSlot {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// An input control holding its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Control {
    value: String,
}

impl Control {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// The dashboard page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub status_table: Option<StatusTableBody>,
    pub agents: Option<Container>,
    pub activity: Option<Container>,
    pub last_updated: Option<TextSlot>,
    pub status_filter: Option<Control>,
    pub query: Option<Control>,
}

impl Page {
    /// A page carrying every slot, with the filter showing all rows.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status_table: Some(StatusTableBody::default()),
            agents: Some(Container::default()),
            activity: Some(Container::default()),
            last_updated: Some(TextSlot::default()),
            status_filter: Some(Control::new(ALL_STATUSES)),
            query: Some(Control::default()),
        }
    }

    /// A page with no slots at all.
    pub fn bare(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Serialize the page into a complete HTML document.
    pub fn to_html(&self) -> String {
        let title = escape_html(&self.title);
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html lang=\"zh-Hant\">\n<head>\n");
        out.push_str("<meta charset=\"UTF-8\">\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        out.push_str(&format!("<title>{}</title>\n", title));
        out.push_str(STYLE);
        out.push_str("</head>\n<body>\n");

        out.push_str(&format!("<header><h1>{}</h1>", title));
        if let Some(slot) = &self.last_updated {
            out.push_str(&format!(
                r#"<p class="small">最後更新：<span id="{}">{}</span></p>"#,
                ids::LAST_UPDATED,
                escape_html(slot.text())
            ));
        }
        out.push_str("</header>\n");

        out.push_str("<section>\n<h2>進度</h2>\n");
        self.push_filters(&mut out);
        if let Some(body) = &self.status_table {
            out.push_str(&format!(r#"<table id="{}">"#, ids::STATUS_TABLE));
            out.push_str(
                "<thead><tr><th>區塊</th><th>任務</th><th>負責</th><th>狀態</th><th>備註</th></tr></thead>",
            );
            out.push_str("<tbody>");
            for row in body.rows() {
                out.push_str(&row.to_html());
            }
            out.push_str("</tbody></table>\n");
        }
        out.push_str("</section>\n");

        if let Some(container) = &self.agents {
            out.push_str("<section>\n<h2>Agents</h2>\n");
            out.push_str(&format!(
                r#"<div id="{}" class="agents">{}</div>"#,
                ids::AGENTS,
                container.inner_html()
            ));
            out.push_str("\n</section>\n");
        }

        if let Some(container) = &self.activity {
            out.push_str("<section>\n<h2>活動紀錄</h2>\n");
            out.push_str(&format!(
                r#"<div id="{}">{}</div>"#,
                ids::ACTIVITY,
                container.inner_html()
            ));
            out.push_str("\n</section>\n");
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn push_filters(&self, out: &mut String) {
        if self.status_filter.is_none() && self.query.is_none() {
            return;
        }

        out.push_str(r#"<form class="filters" method="get">"#);
        if let Some(control) = &self.status_filter {
            out.push_str(&format!(
                r#"<select id="{}" name="status">"#,
                ids::STATUS_FILTER
            ));
            push_option(out, ALL_STATUSES, "全部", control.value());
            for status in RowStatus::ALL {
                push_option(out, status.as_str(), status.label(), control.value());
            }
            out.push_str("</select>");
        }
        if let Some(control) = &self.query {
            out.push_str(&format!(
                r#"<input id="{}" name="q" type="search" placeholder="搜尋" value="{}">"#,
                ids::QUERY,
                escape_html(control.value())
            ));
        }
        out.push_str(r#"<button type="submit">篩選</button></form>"#);
        out.push('\n');
    }
}

fn push_option(out: &mut String, value: &str, label: &str, selected: &str) {
    let selected = if value == selected.trim() {
        " selected"
    } else {
        ""
    };
    out.push_str(&format!(
        r#"<option value="{}"{}>{}</option>"#,
        value, selected, label
    ));
}

const STYLE: &str = r#"<style>
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 24px; color: #1f2933; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #e4e7eb; padding: 6px 8px; text-align: left; }
.small { font-size: 13px; color: #616e7c; }
.status { padding: 2px 8px; border-radius: 10px; background: #e4e7eb; font-size: 12px; }
.status.done { background: #c6f7e2; }
.status.inprogress { background: #fff3c4; }
.status.blocked { background: #ffd0d0; }
.agents { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 12px; }
.agent { border: 1px solid #e4e7eb; border-radius: 8px; padding: 12px; }
.agent-head { display: flex; gap: 10px; align-items: center; }
.agent-key { font-weight: 700; background: #1f2933; color: #fff; border-radius: 6px; padding: 4px 8px; }
.agent-name { font-weight: 600; }
.filters { display: flex; gap: 8px; margin-bottom: 12px; }
</style>
"#;
