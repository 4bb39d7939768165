//! Page-level list filters.
//!
//! Each filter field is optional; `None` means "all". Search terms match
//! case-insensitively against the fields the corresponding page searches.

use super::search::contains_ci;
use crate::model::{
    CaseFile, Counsel, CounselStatus, EmailLog, EmailType, FileType, Jurisdiction, Party,
    Task, TaskCategory,
};
use crate::store::CaseData;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounselFilter {
    pub state: Option<Jurisdiction>,
    pub status: Option<CounselStatus>,
    /// Matched against name and firm.
    pub term: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailFilter {
    pub jurisdiction: Option<Jurisdiction>,
    pub kind: Option<EmailType>,
    /// Matched against subject, summary and sender.
    pub term: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    pub jurisdiction: Option<Jurisdiction>,
    pub file_type: Option<FileType>,
    /// Matched against title and notes.
    pub term: Option<String>,
}

/// Lowercased search term, or `None` when the term is absent or blank.
fn normalized(term: &Option<String>) -> Option<String> {
    term.as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

fn matches<T: PartialEq>(wanted: Option<T>, actual: T) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}

pub fn filter_counsel<'a>(data: &'a CaseData, filter: &CounselFilter) -> Vec<&'a Counsel> {
    let term = normalized(&filter.term);
    data.counsel
        .iter()
        .filter(|counsel| matches(filter.state, counsel.state))
        .filter(|counsel| matches(filter.status, counsel.status))
        .filter(|counsel| {
            term.as_deref().is_none_or(|term| {
                contains_ci(&counsel.name, term) || contains_ci(&counsel.firm, term)
            })
        })
        .collect()
}

pub fn filter_emails<'a>(data: &'a CaseData, filter: &EmailFilter) -> Vec<&'a EmailLog> {
    let term = normalized(&filter.term);
    data.emails
        .iter()
        .filter(|email| {
            filter
                .jurisdiction
                .is_none_or(|wanted| email.jurisdiction == Some(wanted))
        })
        .filter(|email| matches(filter.kind, email.kind))
        .filter(|email| {
            term.as_deref().is_none_or(|term| {
                contains_ci(&email.subject, term)
                    || contains_ci(&email.summary, term)
                    || contains_ci(&email.from, term)
            })
        })
        .collect()
}

pub fn filter_files<'a>(data: &'a CaseData, filter: &FileFilter) -> Vec<&'a CaseFile> {
    let term = normalized(&filter.term);
    data.files
        .iter()
        .filter(|file| {
            filter
                .jurisdiction
                .is_none_or(|wanted| file.jurisdiction == Some(wanted))
        })
        .filter(|file| matches(filter.file_type, file.file_type))
        .filter(|file| {
            term.as_deref().is_none_or(|term| {
                contains_ci(&file.title, term)
                    || file
                        .notes
                        .as_deref()
                        .is_some_and(|notes| contains_ci(notes, term))
            })
        })
        .collect()
}

/// Board filter: all tasks, or only those in `jurisdiction`.
pub fn filter_tasks_by_jurisdiction(
    data: &CaseData,
    jurisdiction: Option<Jurisdiction>,
) -> Vec<&Task> {
    data.tasks
        .iter()
        .filter(|task| jurisdiction.is_none_or(|wanted| task.jurisdiction == Some(wanted)))
        .collect()
}

/// Tasks in `jurisdiction`, optionally narrowed to one category.
pub fn tasks_for_jurisdiction(
    data: &CaseData,
    jurisdiction: Jurisdiction,
    category: Option<TaskCategory>,
) -> Vec<&Task> {
    data.tasks
        .iter()
        .filter(|task| task.jurisdiction == Some(jurisdiction))
        .filter(|task| matches(category, task.category))
        .collect()
}

pub fn parties_for_jurisdiction(data: &CaseData, jurisdiction: Jurisdiction) -> Vec<&Party> {
    data.parties
        .iter()
        .filter(|party| party.jurisdiction == Some(jurisdiction))
        .collect()
}
