//! Id-membership joins between records.
//!
//! Links are denormalized id lists, so every join is a filter over the
//! target collection. Ids that no longer resolve are skipped.

use crate::model::{CaseFile, Counsel, EmailLog, Task};
use crate::store::CaseData;

/// Tasks and files an email references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedItems<'a> {
    pub tasks: Vec<&'a Task>,
    pub files: Vec<&'a CaseFile>,
}

/// Tasks whose `linkedFileIds` include `file`.
pub fn linked_tasks_for_file<'a>(data: &'a CaseData, file: &CaseFile) -> Vec<&'a Task> {
    data.tasks
        .iter()
        .filter(|task| task.linked_file_ids.contains(&file.id))
        .collect()
}

/// Tasks listed in the counsel's `tasksAssigned`, in task collection order.
pub fn linked_tasks_for_counsel<'a>(data: &'a CaseData, counsel: &Counsel) -> Vec<&'a Task> {
    data.tasks
        .iter()
        .filter(|task| counsel.tasks_assigned.contains(&task.id))
        .collect()
}

pub fn linked_items_for_email<'a>(data: &'a CaseData, email: &EmailLog) -> LinkedItems<'a> {
    LinkedItems {
        tasks: data
            .tasks
            .iter()
            .filter(|task| email.linked_task_ids.contains(&task.id))
            .collect(),
        files: data
            .files
            .iter()
            .filter(|file| email.linked_file_ids.contains(&file.id))
            .collect(),
    }
}

/// Emails listed in the counsel's `emailLog`.
pub fn emails_for_counsel<'a>(data: &'a CaseData, counsel: &Counsel) -> Vec<&'a EmailLog> {
    data.emails
        .iter()
        .filter(|email| counsel.email_log.contains(&email.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{linked_items_for_email, linked_tasks_for_counsel, linked_tasks_for_file};
    use crate::seed::seed_case_data;
    use chrono::Utc;

    #[test]
    fn file_join_finds_every_referencing_task() {
        let data = seed_case_data(Utc::now());
        let file = data.file("f4").unwrap();
        let ids: Vec<_> = linked_tasks_for_file(&data, file)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t2", "t3"]);
    }

    #[test]
    fn dangling_ids_are_skipped() {
        let mut data = seed_case_data(Utc::now());
        let mut counsel = data.counsel_by_id("c1").unwrap().clone();
        counsel.tasks_assigned.push("t-missing".to_string());
        data.tasks.retain(|task| task.id != "t1");

        let ids: Vec<_> = linked_tasks_for_counsel(&data, &counsel)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t2"]);
    }

    #[test]
    fn email_join_returns_tasks_and_files() {
        let data = seed_case_data(Utc::now());
        let email = data.email("e1").unwrap();
        let linked = linked_items_for_email(&data, email);
        assert_eq!(linked.tasks.len(), 2);
        assert_eq!(linked.files.len(), 1);
        assert_eq!(linked.files[0].id, "f4");
    }
}
