//! Generic list view: search, pagination, selection, and row actions.
//!
//! DESIGN
//! ======
//! `ListView` holds only view state (query, page, selection, flags). The
//! collection is passed in on every `render`, and the filtered/paged result
//! is recomputed each time, so there is no cached copy to go stale after a
//! re-fetch.
//!
//! Search serializes each record and matches the query, case-insensitively,
//! against the string form of every top-level field. Nulls never match.
//!
//! Changing the query resets to page 1, and a page past the end is clamped to
//! the last page at render time.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::error::ErrorCode;
use crate::model::{Id, Record};
use crate::util::render::text_table;

pub const PAGE_SIZE: usize = 10;
pub const DEFAULT_EMPTY_MESSAGE: &str = "No hay datos disponibles";
pub const ACTIONS_LABEL: &str = "Acciones";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("acción desconocida: {0}")]
    UnknownAction(String),
    #[error("la acción '{0}' no está disponible en esta vista")]
    ActionDisabled(&'static str),
    #[error("no se encontró el registro con ID {0}")]
    RowNotFound(Id),
}

impl ErrorCode for TableError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAction(_) => "E_UNKNOWN_ACTION",
            Self::ActionDisabled(_) => "E_ACTION_DISABLED",
            Self::RowNotFound(_) => "E_ROW_NOT_FOUND",
        }
    }
}

// =============================================================================
// COLUMNS & ACTIONS
// =============================================================================

type CellRenderer<'a, T> = Box<dyn Fn(&T) -> String + 'a>;

/// One column: the record field it reads, its header, and an optional
/// custom renderer that replaces the default field display.
pub struct Column<'a, T> {
    pub key: &'static str,
    pub label: &'static str,
    /// Carried to the header model only; rows are never reordered.
    pub sortable: bool,
    render: Option<CellRenderer<'a, T>>,
}

impl<'a, T> Column<'a, T> {
    #[must_use]
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label, sortable: false, render: None }
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn render(mut self, f: impl Fn(&T) -> String + 'a) -> Self {
        self.render = Some(Box::new(f));
        self
    }

    fn cell(&self, row: &T, fields: Option<&serde_json::Map<String, Value>>) -> String {
        if let Some(render) = &self.render {
            return render(row);
        }
        fields.and_then(|f| f.get(self.key)).map(cell_text).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    View,
    Edit,
    Delete,
    Adjust,
}

impl RowAction {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Adjust => "adjust",
        }
    }

    /// Parse a dispatch tag.
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnknownAction` for any other tag.
    pub fn from_tag(tag: &str) -> Result<Self, TableError> {
        match tag {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            "adjust" => Ok(Self::Adjust),
            other => Err(TableError::UnknownAction(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    None,
    Single,
    Multiple,
}

/// A dispatched row action with the record it targets.
#[derive(Debug, PartialEq)]
pub struct RowEvent<'t, T> {
    pub action: RowAction,
    pub record: &'t T,
}

// =============================================================================
// VIEW STATE
// =============================================================================

#[derive(Debug, Clone)]
pub struct ListView {
    query: String,
    page: usize,
    selected: BTreeSet<Id>,
    pub selection_mode: SelectionMode,
    pub actions: Vec<RowAction>,
    pub loading: bool,
    pub empty_message: String,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            selected: BTreeSet::new(),
            selection_mode: SelectionMode::None,
            actions: Vec::new(),
            loading: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_owned(),
        }
    }
}

impl ListView {
    #[must_use]
    pub fn with_actions(mut self, actions: &[RowAction]) -> Self {
        self.actions = actions.to_vec();
        self
    }

    #[must_use]
    pub fn with_selection(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self.selected.clear();
        self
    }

    #[must_use]
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the search query and go back to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 1;
        }
    }

    /// Requested page (1-based); `render` clamps it to the page count.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self, page_count: usize) {
        self.page = (self.page + 1).min(page_count.max(1));
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    // -------------------------------------------------------------------------
    // selection
    // -------------------------------------------------------------------------

    /// Toggle `id` according to the selection mode. Returns whether it is
    /// selected afterwards.
    pub fn toggle_select(&mut self, id: Id) -> bool {
        match self.selection_mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if self.selected.contains(&id) {
                    self.selected.clear();
                    false
                } else {
                    self.selected.clear();
                    self.selected.insert(id);
                    true
                }
            }
            SelectionMode::Multiple => {
                if self.selected.remove(&id) {
                    false
                } else {
                    self.selected.insert(id);
                    true
                }
            }
        }
    }

    #[must_use]
    pub fn selected(&self) -> Vec<Id> {
        self.selected.iter().copied().collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    // -------------------------------------------------------------------------
    // actions
    // -------------------------------------------------------------------------

    /// Resolve a row action by tag against the current collection.
    ///
    /// # Errors
    ///
    /// - `UnknownAction` for an unrecognized tag
    /// - `ActionDisabled` when this view does not offer the action
    /// - `RowNotFound` when no record has `id`
    pub fn dispatch<'t, T: Record>(&self, tag: &str, id: Id, items: &'t [T]) -> Result<RowEvent<'t, T>, TableError> {
        let action = RowAction::from_tag(tag)?;
        if !self.actions.contains(&action) {
            return Err(TableError::ActionDisabled(action.tag()));
        }
        let record = items.iter().find(|r| r.id() == id).ok_or(TableError::RowNotFound(id))?;
        Ok(RowEvent { action, record })
    }

    // -------------------------------------------------------------------------
    // render
    // -------------------------------------------------------------------------

    /// Filter, paginate, and render the collection into a display model.
    #[must_use]
    pub fn render<T: Serialize + Record>(&self, items: Option<&[T]>, columns: &[Column<'_, T>]) -> TableView {
        let mut headers: Vec<Header> = columns
            .iter()
            .map(|c| Header { key: c.key, label: c.label, sortable: c.sortable })
            .collect();
        if !self.actions.is_empty() {
            headers.push(Header { key: "actions", label: ACTIONS_LABEL, sortable: false });
        }

        let filtered = search(items.unwrap_or_default(), &self.query);
        let total_matches = filtered.len();
        let page_count = page_count(total_matches);
        let page = self.page.clamp(1, page_count);

        if self.loading {
            return TableView {
                headers,
                rows: Vec::new(),
                page,
                page_count,
                total_matches,
                show_pagination: false,
                loading: true,
                empty_message: None,
            };
        }

        let action_tags = self.actions.iter().map(|a| a.tag()).collect::<Vec<_>>().join(" ");
        let rows: Vec<RowView> = page_slice(&filtered, page)
            .iter()
            .map(|record| {
                let value = serde_json::to_value(record).unwrap_or(Value::Null);
                let fields = value.as_object();
                let mut cells: Vec<String> = columns.iter().map(|c| c.cell(record, fields)).collect();
                if !self.actions.is_empty() {
                    cells.push(action_tags.clone());
                }
                RowView { id: record.id(), cells, selected: self.selected.contains(&record.id()) }
            })
            .collect();

        TableView {
            headers,
            empty_message: rows.is_empty().then(|| self.empty_message.clone()),
            rows,
            page,
            page_count,
            total_matches,
            show_pagination: page_count > 1,
            loading: false,
        }
    }
}

// =============================================================================
// DISPLAY MODEL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: Id,
    pub cells: Vec<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<Header>,
    pub rows: Vec<RowView>,
    pub page: usize,
    pub page_count: usize,
    pub total_matches: usize,
    pub show_pagination: bool,
    pub loading: bool,
    pub empty_message: Option<String>,
}

impl TableView {
    /// Render as plain text: the table, then the empty state or the
    /// pagination footer when applicable.
    #[must_use]
    pub fn to_text(&self) -> String {
        if self.loading {
            return "Cargando...\n".to_owned();
        }
        let headers: Vec<String> = self.headers.iter().map(|h| h.label.to_owned()).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                let mut cells = r.cells.clone();
                if r.selected {
                    if let Some(first) = cells.first_mut() {
                        first.insert_str(0, "* ");
                    }
                }
                cells
            })
            .collect();
        let mut out = text_table(&headers, &rows);
        if let Some(message) = &self.empty_message {
            out.push_str(message);
            out.push('\n');
        }
        if self.show_pagination {
            out.push_str(&format!(
                "Página {} de {} ({} registros)\n",
                self.page, self.page_count, self.total_matches
            ));
        }
        out
    }
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// `max(1, ceil(n / PAGE_SIZE))`.
#[must_use]
pub fn page_count(n: usize) -> usize {
    n.div_ceil(PAGE_SIZE).max(1)
}

/// The slice of `items` on 1-based `page`; empty past the end.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Records whose fields contain `query` (trimmed, case-insensitive).
/// An empty query returns every record.
#[must_use]
pub fn search<'t, T: Serialize>(items: &'t [T], query: &str) -> Vec<&'t T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| record_matches(*item, &needle)).collect()
}

fn record_matches<T: Serialize>(record: &T, needle: &str) -> bool {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => fields
            .values()
            .filter_map(search_text)
            .any(|text| text.to_lowercase().contains(needle)),
        Ok(other) => search_text(&other).is_some_and(|t| t.to_lowercase().contains(needle)),
        Err(_) => false,
    }
}

fn search_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Sí".to_owned(),
        Value::Bool(false) => "No".to_owned(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
