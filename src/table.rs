//! Table rendering
//!
//! [`render`] maps a record list to rows. Hosts draw the resulting
//! [`TableView`]; each row carries the edit/delete actions for its own record
//! so no host has to look ids up again.

use std::fmt;

use crate::model::Record;

/// Column headers, in display order
pub const COLUMNS: [&str; 4] = ["ID", "Name", "Mail", "Actions"];

/// Text of the single row shown for an empty list
pub const EMPTY_PLACEHOLDER: &str = "No users found";

/// An action button attached to a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Load the row into the form
    Edit { id: u64, name: String, mail: String },
    /// Ask for confirmation, then delete
    Delete { id: u64 },
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit { .. } => "Edit",
            RowAction::Delete { .. } => "Delete",
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            RowAction::Edit { id, .. } | RowAction::Delete { id } => *id,
        }
    }
}

/// One rendered record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub id: u64,
    /// id, name, mail
    pub cells: [String; 3],
    /// edit, delete
    pub actions: [RowAction; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Placeholder { text: &'static str, colspan: usize },
    Record(RecordRow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: [&'static str; 4],
    pub rows: Vec<TableRow>,
}

impl Default for TableView {
    fn default() -> Self {
        render(&[])
    }
}

/// Render records into table rows
pub fn render(records: &[Record]) -> TableView {
    let rows = if records.is_empty() {
        vec![TableRow::Placeholder {
            text: EMPTY_PLACEHOLDER,
            colspan: COLUMNS.len(),
        }]
    } else {
        records.iter().map(|r| TableRow::Record(record_row(r))).collect()
    };

    TableView {
        columns: COLUMNS,
        rows,
    }
}

fn record_row(record: &Record) -> RecordRow {
    RecordRow {
        id: record.id,
        cells: [
            record.id.to_string(),
            record.name.clone(),
            record.mail.clone(),
        ],
        actions: [
            RowAction::Edit {
                id: record.id,
                name: record.name.clone(),
                mail: record.mail.clone(),
            },
            RowAction::Delete { id: record.id },
        ],
    }
}

impl TableView {
    pub fn record_rows(&self) -> impl Iterator<Item = &RecordRow> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Record(r) => Some(r),
            TableRow::Placeholder { .. } => None,
        })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [TableRow::Placeholder { .. }])
    }
}

/// Plain-text table for terminals
impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actions: Vec<String> = self
            .record_rows()
            .map(|r| {
                r.actions
                    .iter()
                    .map(|a| format!("[{} {}]", a.label(), a.id()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        let mut widths = [0usize; 4];
        for (i, col) in self.columns.iter().enumerate() {
            widths[i] = col.chars().count();
        }
        for row in self.record_rows() {
            for (i, cell) in row.cells.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        for a in &actions {
            widths[3] = widths[3].max(a.len());
        }
        let total = widths.iter().sum::<usize>() + 6;

        writeln!(
            f,
            "{:<w0$}  {:<w1$}  {:<w2$}  {}",
            self.columns[0],
            self.columns[1],
            self.columns[2],
            self.columns[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        )?;
        writeln!(f, "{}", "-".repeat(total))?;

        let mut actions = actions.iter();
        for row in &self.rows {
            match row {
                TableRow::Placeholder { text, .. } => writeln!(f, "{:^total$}", text)?,
                TableRow::Record(r) => writeln!(
                    f,
                    "{:<w0$}  {:<w1$}  {:<w2$}  {}",
                    r.cells[0],
                    r.cells[1],
                    r.cells[2],
                    actions.next().map(String::as_str).unwrap_or_default(),
                    w0 = widths[0],
                    w1 = widths[1],
                    w2 = widths[2],
                )?,
            }
        }
        Ok(())
    }
}
