//! First-run fixture dataset for Good Dogg Beverage Co. v. MSH.
//!
//! # Invariants
//! - Fixture ids are short and stable (`p1`, `t3`, `f4`, ...) so links
//!   between fixtures resolve.
//! - All timestamped fixtures share the `now` passed in.

use crate::model::{
    CaseConfig, CaseFile, Counsel, CounselStatus, EmailLog, EmailType, FileType, Jurisdiction,
    Party, PartyRole, Priority, Task, TaskCategory, TaskStatus, Timestamp,
};
use crate::store::CaseData;
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Builds the full seed document, marked initialized.
pub fn seed_case_data(now: Timestamp) -> CaseData {
    CaseData {
        parties: seed_parties(),
        tasks: seed_tasks(now),
        files: seed_files(now),
        emails: seed_emails(),
        counsel: seed_counsel(now),
        settlements: Vec::new(),
        case_config: seed_case_config(),
        initialized: true,
        dark_mode: false,
    }
}

pub fn seed_case_config() -> CaseConfig {
    CaseConfig {
        judgment_amount: 2_378_443.28,
        judgment_date: date(2025, 11, 25),
        // Florida statutory rate.
        interest_rate: 10.0,
        floor_amount: 1_800_000.0,
        case_number: Some("05-2024-CA-050807".to_string()),
    }
}

fn party(
    id: &str,
    name: &str,
    role: PartyRole,
    jurisdiction: Jurisdiction,
    notes: &str,
) -> Party {
    Party {
        id: id.to_string(),
        name: name.to_string(),
        role,
        jurisdiction: Some(jurisdiction),
        notes: Some(notes.to_string()),
    }
}

fn seed_parties() -> Vec<Party> {
    vec![
        party(
            "p1",
            "Good Dogg Beverage Company, LLC",
            PartyRole::Plaintiff,
            Jurisdiction::Fl,
            "Judgment creditor - Florida entity",
        ),
        party(
            "p2",
            "Management Services Holdings, LLC",
            PartyRole::Defendant,
            Jurisdiction::Tn,
            "Judgment debtor - Tennessee entity, defaulted",
        ),
        party(
            "p3",
            "MSH Principal - Indiana",
            PartyRole::Principal,
            Jurisdiction::In,
            "Potential alter-ego liability",
        ),
        party(
            "p4",
            "MSH Principal - Colorado",
            PartyRole::Principal,
            Jurisdiction::Co,
            "Secondary enforcement target",
        ),
    ]
}

fn seed_counsel(now: Timestamp) -> Vec<Counsel> {
    vec![Counsel {
        id: "c1".to_string(),
        name: "Josh A. Porteous".to_string(),
        firm: "Widerman Malek, PL".to_string(),
        address: Some("Melbourne, FL".to_string()),
        state: Jurisdiction::Fl,
        email: "jporteous@uslegalteam.com".to_string(),
        phone: Some("(321) 255-2332".to_string()),
        status: CounselStatus::Active,
        case_number: Some("05-2024-CA-050807".to_string()),
        tasks_assigned: ids(&["t1", "t2"]),
        email_log: ids(&["e1", "e2"]),
        last_contact: date(2025, 11, 26),
        notes: Some("Lead counsel on FL enforcement".to_string()),
        created_at: now,
        updated_at: now,
    }]
}

struct FileFixture {
    id: &'static str,
    title: &'static str,
    file_type: FileType,
    jurisdiction: Jurisdiction,
    date: NaiveDate,
    notes: &'static str,
    excerpt: Option<&'static str>,
}

fn seed_files(now: Timestamp) -> Vec<CaseFile> {
    let fixtures = [
        FileFixture {
            id: "f1",
            title: "2024-10-15_Complaint.pdf",
            file_type: FileType::Complaint,
            jurisdiction: Jurisdiction::Fl,
            date: date(2024, 10, 15),
            notes: "Original complaint filed in Brevard County, FL",
            excerpt: Some(
                "Breach of settlement agreement between Good Dogg Beverage Company and MSH...",
            ),
        },
        FileFixture {
            id: "f2",
            title: "225667853-Order.pdf",
            file_type: FileType::Order,
            jurisdiction: Jurisdiction::Fl,
            date: date(2025, 6, 19),
            notes: "Court order on discovery compliance",
            excerpt: None,
        },
        FileFixture {
            id: "f3",
            title: "2025-05-22_Ltr-to-Client-re-NOH.pdf",
            file_type: FileType::Letter,
            jurisdiction: Jurisdiction::Fl,
            date: date(2025, 5, 22),
            notes: "Notice of Hearing correspondence",
            excerpt: None,
        },
        FileFixture {
            id: "f4",
            title: "2025-11-26_Ltr-to-Client-re-Default-FJ.pdf",
            file_type: FileType::Judgment,
            jurisdiction: Jurisdiction::Fl,
            date: date(2025, 11, 25),
            notes: "Default Final Judgment - $2,378,443.28",
            excerpt: Some(
                "Default Final Judgment awarding $2,378,443.28 to Plaintiff Good Dogg Beverage Company...",
            ),
        },
        FileFixture {
            id: "f5",
            title: "MSH-Letter-and-Affidavit-11.16.2023.pdf",
            file_type: FileType::Affidavit,
            jurisdiction: Jurisdiction::In,
            date: date(2023, 11, 16),
            notes: "Affidavit related to Indiana principal",
            excerpt: Some("McClung control and ownership of MSH operations..."),
        },
    ];

    fixtures
        .into_iter()
        .map(|fixture| CaseFile {
            id: fixture.id.to_string(),
            title: fixture.title.to_string(),
            file_type: fixture.file_type,
            jurisdiction: Some(fixture.jurisdiction),
            party_id: None,
            date: Some(fixture.date),
            storage_hint: None,
            url: None,
            notes: Some(fixture.notes.to_string()),
            size: None,
            pages: None,
            text: None,
            excerpt: fixture.excerpt.map(str::to_string),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

struct TaskFixture {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    jurisdiction: Jurisdiction,
    category: TaskCategory,
    status: TaskStatus,
    priority: Priority,
    due_date: Option<NaiveDate>,
    linked_file_ids: &'static [&'static str],
    linked_party_ids: &'static [&'static str],
    assigned_counsel_id: Option<&'static str>,
}

fn seed_tasks(now: Timestamp) -> Vec<Task> {
    let fixtures = [
        TaskFixture {
            id: "t1",
            title: "Motion to compel Form 1.977 compliance",
            description: "File motion to compel defendant compliance with Florida Form 1.977 post-judgment discovery",
            jurisdiction: Jurisdiction::Fl,
            category: TaskCategory::Motion,
            status: TaskStatus::InProgress,
            priority: Priority::High,
            due_date: Some(date(2026, 1, 15)),
            linked_file_ids: &["f2"],
            linked_party_ids: &[],
            assigned_counsel_id: Some("c1"),
        },
        TaskFixture {
            id: "t2",
            title: "File judgment lien certificate with FL Sec. of State",
            description: "Record judgment lien with Florida Secretary of State for asset protection",
            jurisdiction: Jurisdiction::Fl,
            category: TaskCategory::Execution,
            status: TaskStatus::ThisWeek,
            priority: Priority::High,
            due_date: None,
            linked_file_ids: &["f4"],
            linked_party_ids: &[],
            assigned_counsel_id: Some("c1"),
        },
        TaskFixture {
            id: "t3",
            title: "Domesticate FL judgment in Tennessee",
            description: "File domestication action in Tennessee to enforce against MSH assets",
            jurisdiction: Jurisdiction::Tn,
            category: TaskCategory::Domestication,
            status: TaskStatus::ThisWeek,
            priority: Priority::High,
            due_date: None,
            linked_file_ids: &["f4"],
            linked_party_ids: &["p2"],
            assigned_counsel_id: None,
        },
        TaskFixture {
            id: "t4",
            title: "Serve post-judgment discovery on MSH (TN)",
            description: "Serve interrogatories and document requests on MSH in Tennessee",
            jurisdiction: Jurisdiction::Tn,
            category: TaskCategory::Discovery,
            status: TaskStatus::Backlog,
            priority: Priority::Medium,
            due_date: None,
            linked_file_ids: &[],
            linked_party_ids: &["p2"],
            assigned_counsel_id: None,
        },
        TaskFixture {
            id: "t5",
            title: "ID IN principal + evaluate alter-ego claim",
            description: "Research Indiana principal identity and assess alter-ego/veil piercing claim viability",
            jurisdiction: Jurisdiction::In,
            category: TaskCategory::Research,
            status: TaskStatus::Backlog,
            priority: Priority::High,
            due_date: None,
            linked_file_ids: &["f5"],
            linked_party_ids: &["p3"],
            assigned_counsel_id: None,
        },
        TaskFixture {
            id: "t6",
            title: "Domesticate judgment in Indiana",
            description: "File domestication action in Indiana once principal is identified",
            jurisdiction: Jurisdiction::In,
            category: TaskCategory::Domestication,
            status: TaskStatus::Backlog,
            priority: Priority::Medium,
            due_date: None,
            linked_file_ids: &[],
            linked_party_ids: &["p3"],
            assigned_counsel_id: None,
        },
        TaskFixture {
            id: "t7",
            title: "Confirm CO principal domicile + assets",
            description: "Investigate Colorado principal location and potential assets for collection",
            jurisdiction: Jurisdiction::Co,
            category: TaskCategory::Research,
            status: TaskStatus::Backlog,
            priority: Priority::Medium,
            due_date: None,
            linked_file_ids: &[],
            linked_party_ids: &["p4"],
            assigned_counsel_id: None,
        },
        TaskFixture {
            id: "t8",
            title: "Domesticate judgment in Colorado",
            description: "File domestication action in Colorado",
            jurisdiction: Jurisdiction::Co,
            category: TaskCategory::Domestication,
            status: TaskStatus::Backlog,
            priority: Priority::Medium,
            due_date: None,
            linked_file_ids: &[],
            linked_party_ids: &["p4"],
            assigned_counsel_id: None,
        },
    ];

    fixtures
        .into_iter()
        .map(|fixture| Task {
            id: fixture.id.to_string(),
            title: fixture.title.to_string(),
            description: Some(fixture.description.to_string()),
            jurisdiction: Some(fixture.jurisdiction),
            category: fixture.category,
            status: fixture.status,
            priority: Some(fixture.priority),
            due_date: fixture.due_date,
            linked_file_ids: ids(fixture.linked_file_ids),
            linked_party_ids: ids(fixture.linked_party_ids),
            assigned_counsel_id: fixture.assigned_counsel_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

fn seed_emails() -> Vec<EmailLog> {
    vec![
        EmailLog {
            id: "e1".to_string(),
            subject: "Re: Default Final Judgment Entered - Good Dogg v. MSH".to_string(),
            summary: "Notification to client regarding entry of default final judgment for $2,378,443.28".to_string(),
            from: "jporteous@uslegalteam.com".to_string(),
            to: "client@gooddogg.com".to_string(),
            date: date(2025, 11, 26),
            kind: EmailType::Client,
            jurisdiction: Some(Jurisdiction::Fl),
            linked_task_ids: ids(&["t1", "t2"]),
            linked_file_ids: ids(&["f4"]),
            linked_party_ids: Vec::new(),
        },
        EmailLog {
            id: "e2".to_string(),
            subject: "Domestication Strategy - TN/IN/CO".to_string(),
            summary: "Strategy memo outlining multi-state domestication and enforcement approach".to_string(),
            from: "jporteous@uslegalteam.com".to_string(),
            to: "client@gooddogg.com".to_string(),
            date: date(2025, 12, 15),
            kind: EmailType::Client,
            jurisdiction: None,
            linked_task_ids: ids(&["t3", "t6", "t8"]),
            linked_file_ids: Vec::new(),
            linked_party_ids: Vec::new(),
        },
        EmailLog {
            id: "e3".to_string(),
            subject: "MSH Principal Investigation Update".to_string(),
            summary: "Update on investigation into MSH principals in Indiana and Colorado".to_string(),
            from: "investigator@vendor.com".to_string(),
            to: "jporteous@uslegalteam.com".to_string(),
            date: date(2025, 12, 20),
            kind: EmailType::Vendor,
            jurisdiction: Some(Jurisdiction::In),
            linked_task_ids: ids(&["t5", "t7"]),
            linked_file_ids: Vec::new(),
            linked_party_ids: ids(&["p3", "p4"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::seed_case_data;
    use chrono::Utc;
    use std::collections::HashSet;

    #[test]
    fn seed_is_initialized_and_ids_are_unique() {
        let data = seed_case_data(Utc::now());
        assert!(data.initialized);
        assert_eq!(data.tasks.len(), 8);
        assert_eq!(data.files.len(), 5);
        assert!(data.settlements.is_empty());

        let task_ids: HashSet<_> = data.tasks.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(task_ids.len(), data.tasks.len());
    }

    #[test]
    fn seed_links_resolve() {
        let data = seed_case_data(Utc::now());
        let file_ids: HashSet<_> = data.files.iter().map(|file| file.id.as_str()).collect();
        for task in &data.tasks {
            for file_id in &task.linked_file_ids {
                assert!(file_ids.contains(file_id.as_str()), "dangling {file_id}");
            }
        }
    }
}
