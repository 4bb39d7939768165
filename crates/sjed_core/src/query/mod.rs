//! Read-only views derived from a case document.
//!
//! # Responsibility
//! - Bucket and rank tasks for the board and dashboard.
//! - Aggregate per-jurisdiction progress and settlement figures.
//! - Resolve denormalized id links and run free-text search.
//!
//! # Invariants
//! - Every function is pure over `&CaseData` (plus `today` where dates matter).
//! - Results preserve collection insertion order unless a sort is documented.
//! - Dangling link ids are skipped, never reported as errors.
//!
//! # See also
//! - `crate::store` for the mutation side.

mod filters;
mod links;
mod search;
mod stats;

pub use filters::{
    filter_counsel, filter_emails, filter_files, filter_tasks_by_jurisdiction,
    parties_for_jurisdiction, tasks_for_jurisdiction, CounselFilter, EmailFilter, FileFilter,
};
pub use links::{
    emails_for_counsel, linked_items_for_email, linked_tasks_for_counsel, linked_tasks_for_file,
    LinkedItems,
};
pub use search::{search, SearchResults, MIN_SEARCH_LEN};
pub use stats::{
    best_offer, calculate_interest, jurisdiction_stats, settlement_summary, task_summary,
    JurisdictionPhase, JurisdictionStat, SettlementSummary, TaskSummary,
};

use crate::model::{Priority, Task, TaskStatus};
use crate::persist::BlobStore;
use crate::store::{CaseData, CaseStore};
use chrono::NaiveDate;

/// Number of priority tasks shown on the dashboard.
pub const DEFAULT_PRIORITY_LIMIT: usize = 3;

pub fn tasks_by_status(data: &CaseData, status: TaskStatus) -> Vec<&Task> {
    data.tasks.iter().filter(|task| task.status == status).collect()
}

/// Open high-priority tasks, most urgent column first.
///
/// Ordering is `THIS_WEEK < IN_PROGRESS < WAITING < BACKLOG`; ties keep
/// insertion order. At most `limit` tasks are returned.
pub fn priority_tasks(data: &CaseData, limit: usize) -> Vec<&Task> {
    let mut tasks: Vec<&Task> = data
        .tasks
        .iter()
        .filter(|task| task.priority == Some(Priority::High) && task.is_open())
        .collect();
    tasks.sort_by_key(|task| task.status.urgency_rank());
    tasks.truncate(limit);
    tasks
}

/// Open tasks whose due date is strictly before `today`.
pub fn overdue_tasks(data: &CaseData, today: NaiveDate) -> Vec<&Task> {
    data.tasks
        .iter()
        .filter(|task| task.is_overdue(today))
        .collect()
}

pub fn this_week_tasks(data: &CaseData) -> Vec<&Task> {
    tasks_by_status(data, TaskStatus::ThisWeek)
}

/// Query shortcuts that read the store's snapshot and clock.
impl<B: BlobStore> CaseStore<B> {
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        tasks_by_status(self.snapshot(), status)
    }

    pub fn priority_tasks(&self, limit: usize) -> Vec<&Task> {
        priority_tasks(self.snapshot(), limit)
    }

    pub fn overdue_tasks(&self) -> Vec<&Task> {
        overdue_tasks(self.snapshot(), self.clock().today())
    }

    pub fn this_week_tasks(&self) -> Vec<&Task> {
        this_week_tasks(self.snapshot())
    }

    pub fn jurisdiction_stats(&self) -> Vec<JurisdictionStat> {
        jurisdiction_stats(self.snapshot())
    }

    pub fn best_offer(&self) -> f64 {
        best_offer(self.snapshot())
    }

    /// Post-judgment interest accrued as of the store's today.
    pub fn calculate_interest(&self) -> f64 {
        calculate_interest(self.case_config(), self.clock().today())
    }

    pub fn task_summary(&self) -> TaskSummary {
        task_summary(self.snapshot())
    }

    pub fn settlement_summary(&self) -> SettlementSummary {
        settlement_summary(self.snapshot(), self.clock().today())
    }

    pub fn search(&self, query: &str) -> SearchResults<'_> {
        search(self.snapshot(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::{overdue_tasks, priority_tasks, tasks_by_status, this_week_tasks};
    use crate::model::{Priority, TaskStatus};
    use crate::seed::seed_case_data;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn priority_tasks_rank_this_week_before_in_progress() {
        let data = seed_case_data(Utc::now());
        let ids: Vec<_> = priority_tasks(&data, 10)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t2", "t3", "t1", "t5"]);
        assert_eq!(priority_tasks(&data, 3).len(), 3);
    }

    #[test]
    fn priority_tasks_skip_done_and_non_high() {
        let mut data = seed_case_data(Utc::now());
        data.tasks[1].status = TaskStatus::Done;
        data.tasks[2].priority = Some(Priority::Low);
        let ids: Vec<_> = priority_tasks(&data, 10)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t1", "t5"]);
    }

    #[test]
    fn overdue_excludes_done_and_undated_tasks() {
        let mut data = seed_case_data(Utc::now());
        let after_due = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
        assert_eq!(overdue_tasks(&data, after_due).len(), 1);

        let on_due = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert!(overdue_tasks(&data, on_due).is_empty());

        data.tasks[0].status = TaskStatus::Done;
        assert!(overdue_tasks(&data, after_due).is_empty());
    }

    #[test]
    fn status_buckets_match_seed() {
        let data = seed_case_data(Utc::now());
        assert_eq!(this_week_tasks(&data).len(), 2);
        assert_eq!(tasks_by_status(&data, TaskStatus::Backlog).len(), 5);
        assert!(tasks_by_status(&data, TaskStatus::Done).is_empty());
    }
}
