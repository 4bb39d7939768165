//! Naive free-text search across every collection.
//!
//! Matching is a case-insensitive substring scan; there is no index and no
//! ranking. Results keep collection order.

use crate::model::{CaseFile, Counsel, EmailLog, Party, Task};
use crate::store::CaseData;

/// Queries shorter than this many characters return no results.
pub const MIN_SEARCH_LEN: usize = 2;

/// Matches grouped by collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults<'a> {
    pub tasks: Vec<&'a Task>,
    pub files: Vec<&'a CaseFile>,
    pub emails: Vec<&'a EmailLog>,
    pub parties: Vec<&'a Party>,
    pub counsel: Vec<&'a Counsel>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
            + self.files.len()
            + self.emails.len()
            + self.parties.len()
            + self.counsel.len()
    }
}

/// Searches task title/description, file title/notes/text/excerpt, email
/// subject/summary, party name/notes and counsel name/firm/email.
pub fn search<'a>(data: &'a CaseData, query: &str) -> SearchResults<'a> {
    if query.chars().count() < MIN_SEARCH_LEN {
        return SearchResults::default();
    }
    let needle = query.to_lowercase();
    let hit = |text: &str| text.to_lowercase().contains(&needle);
    let hit_opt = |text: &Option<String>| text.as_deref().is_some_and(|text| hit(text));

    SearchResults {
        tasks: data
            .tasks
            .iter()
            .filter(|task| hit(&task.title) || hit_opt(&task.description))
            .collect(),
        files: data
            .files
            .iter()
            .filter(|file| {
                hit(&file.title)
                    || hit_opt(&file.notes)
                    || hit_opt(&file.text)
                    || hit_opt(&file.excerpt)
            })
            .collect(),
        emails: data
            .emails
            .iter()
            .filter(|email| hit(&email.subject) || hit(&email.summary))
            .collect(),
        parties: data
            .parties
            .iter()
            .filter(|party| hit(&party.name) || hit_opt(&party.notes))
            .collect(),
        counsel: data
            .counsel
            .iter()
            .filter(|counsel| hit(&counsel.name) || hit(&counsel.firm) || hit(&counsel.email))
            .collect(),
    }
}

/// Case-insensitive containment used by the page filters.
pub(super) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::search;
    use crate::seed::seed_case_data;
    use chrono::Utc;

    #[test]
    fn short_queries_return_nothing() {
        let data = seed_case_data(Utc::now());
        assert!(search(&data, "").is_empty());
        assert!(search(&data, "j").is_empty());
        assert!(!search(&data, "ju").is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        let data = seed_case_data(Utc::now());
        let upper = search(&data, "MSH");
        let lower = search(&data, "msh");
        assert_eq!(upper, lower);
        assert!(!upper.parties.is_empty());
    }

    #[test]
    fn counsel_match_on_email_address() {
        let data = seed_case_data(Utc::now());
        let results = search(&data, "uslegalteam");
        let ids: Vec<_> = results.counsel.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1"]);
    }
}
