//! CSV export of tasks, counsel and settlement offers.
//!
//! The header row is plain; every data cell is double-quoted with inner
//! quotes doubled. Rows are separated by `\n`.

use crate::model::{Counsel, SettlementOffer, Task};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_HEADERS: &[&str] = &[
    "Title",
    "Status",
    "Priority",
    "Jurisdiction",
    "Category",
    "DueDate",
    "AssignedCounsel",
];
const COUNSEL_HEADERS: &[&str] = &[
    "Name",
    "Firm",
    "State",
    "Email",
    "Phone",
    "Status",
    "TasksAssigned",
    "LastContact",
];
const SETTLEMENT_HEADERS: &[&str] = &[
    "Date",
    "Party",
    "Amount",
    "Terms",
    "Status",
    "CounterAmount",
    "Notes",
];

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportError {
    NothingToExport,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingToExport => write!(f, "no data to export"),
        }
    }
}

impl Error for ExportError {}

/// Exports tasks, resolving the assignee name from `counsel`.
pub fn export_tasks_csv(tasks: &[Task], counsel: &[Counsel]) -> Result<String, ExportError> {
    write_csv("tasks", TASK_HEADERS, tasks, |task| {
        let assignee = task
            .assigned_counsel_id
            .as_deref()
            .and_then(|id| counsel.iter().find(|entry| entry.id == id))
            .map_or("Unassigned", |entry| entry.name.as_str());
        vec![
            task.title.clone(),
            task.status.to_string(),
            task.priority
                .map_or("MEDIUM", |priority| priority.as_str())
                .to_string(),
            task.jurisdiction
                .map_or(NOT_AVAILABLE, |jurisdiction| jurisdiction.as_str())
                .to_string(),
            task.category.to_string(),
            task.due_date
                .map_or_else(|| NOT_AVAILABLE.to_string(), |date| date.to_string()),
            assignee.to_string(),
        ]
    })
}

pub fn export_counsel_csv(counsel: &[Counsel]) -> Result<String, ExportError> {
    write_csv("counsel", COUNSEL_HEADERS, counsel, |entry| {
        vec![
            entry.name.clone(),
            entry.firm.clone(),
            entry.state.to_string(),
            entry.email.clone(),
            entry
                .phone
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            entry.status.to_string(),
            entry.tasks_assigned.len().to_string(),
            entry.last_contact.to_string(),
        ]
    })
}

pub fn export_settlements_csv(offers: &[SettlementOffer]) -> Result<String, ExportError> {
    write_csv("settlements", SETTLEMENT_HEADERS, offers, |offer| {
        vec![
            offer.date.to_string(),
            offer.party.clone(),
            offer.amount.to_string(),
            offer.terms.clone(),
            offer.status.to_string(),
            offer
                .counter_amount
                .map_or_else(|| NOT_AVAILABLE.to_string(), |amount| amount.to_string()),
            offer.notes.clone().unwrap_or_default(),
        ]
    })
}

fn write_csv<T>(
    kind: &str,
    headers: &[&str],
    rows: &[T],
    cells: impl Fn(&T) -> Vec<String>,
) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        let quoted: Vec<String> = cells(row).iter().map(|cell| quote(cell)).collect();
        lines.push(quoted.join(","));
    }
    info!(
        "event=csv_export module=collab status=ok kind={} rows={}",
        kind,
        rows.len()
    );
    Ok(lines.join("\n"))
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
