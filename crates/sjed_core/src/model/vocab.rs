//! Closed vocabularies used across the case model.
//!
//! Wire strings are part of the persisted document format and must not change.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

macro_rules! vocab {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$variant_meta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// Every value in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire string for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Parses a wire string, ignoring ASCII case and surrounding whitespace.
            pub fn parse(value: &str) -> Option<Self> {
                let value = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(value))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocab! {
    /// US state where the judgment is being enforced.
    pub enum Jurisdiction {
        Fl => "FL",
        Tn => "TN",
        In => "IN",
        Co => "CO",
    }
}

impl Jurisdiction {
    /// Full state name for display.
    pub fn state_name(self) -> &'static str {
        match self {
            Self::Fl => "Florida",
            Self::Tn => "Tennessee",
            Self::In => "Indiana",
            Self::Co => "Colorado",
        }
    }
}

vocab! {
    pub enum PartyRole {
        Plaintiff => "Plaintiff",
        Defendant => "Defendant",
        Principal => "Principal",
        Counsel => "Counsel",
    }
}

vocab! {
    /// Kanban column of a task.
    ///
    /// Any status may move to any other; there is no terminal state.
    #[derive(Default)]
    pub enum TaskStatus {
        #[default]
        Backlog => "BACKLOG",
        ThisWeek => "THIS_WEEK",
        InProgress => "IN_PROGRESS",
        Waiting => "WAITING",
        Done => "DONE",
    }
}

impl TaskStatus {
    /// Sort rank used by the priority list: this week first, done last.
    pub fn urgency_rank(self) -> u8 {
        match self {
            Self::ThisWeek => 0,
            Self::InProgress => 1,
            Self::Waiting => 2,
            Self::Backlog => 3,
            Self::Done => 4,
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

vocab! {
    pub enum TaskCategory {
        Domestication => "DOMESTICATION",
        Discovery => "DISCOVERY",
        Motion => "MOTION",
        Execution => "EXECUTION",
        Communication => "COMMUNICATION",
        Research => "RESEARCH",
    }
}

vocab! {
    pub enum Priority {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

vocab! {
    pub enum FileType {
        Complaint => "COMPLAINT",
        Order => "ORDER",
        Judgment => "JUDGMENT",
        Affidavit => "AFFIDAVIT",
        Letter => "LETTER",
        Notice => "NOTICE",
        EmailExport => "EMAIL_EXPORT",
        Other => "OTHER",
    }
}

vocab! {
    pub enum EmailType {
        Client => "CLIENT",
        OpposingCounsel => "OPPOSING_COUNSEL",
        Court => "COURT",
        Vendor => "VENDOR",
        Other => "OTHER",
    }
}

vocab! {
    pub enum CounselStatus {
        Active => "Active",
        Pending => "Pending",
        Inactive => "Inactive",
    }
}

vocab! {
    /// Suggested workflow `Review -> {Countered, Accepted, Rejected}`; not enforced.
    pub enum SettlementStatus {
        Review => "Review",
        Countered => "Countered",
        Accepted => "Accepted",
        Rejected => "Rejected",
    }
}

#[cfg(test)]
mod tests {
    use super::{EmailType, Jurisdiction, SettlementStatus, TaskStatus};

    #[test]
    fn new_tasks_default_to_backlog() {
        assert_eq!(TaskStatus::default(), TaskStatus::Backlog);
    }

    #[test]
    fn wire_strings_match_serde_names() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(
            serde_json::to_string(&EmailType::OpposingCounsel).unwrap(),
            "\"OPPOSING_COUNSEL\""
        );
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(TaskStatus::parse(" this_week "), Some(TaskStatus::ThisWeek));
        assert_eq!(Jurisdiction::parse("co"), Some(Jurisdiction::Co));
        assert_eq!(SettlementStatus::parse("REJECTED"), Some(SettlementStatus::Rejected));
        assert_eq!(TaskStatus::parse("archived"), None);
    }

    #[test]
    fn urgency_rank_orders_columns() {
        let mut statuses = TaskStatus::ALL.to_vec();
        statuses.sort_by_key(|status| status.urgency_rank());
        assert_eq!(
            statuses,
            vec![
                TaskStatus::ThisWeek,
                TaskStatus::InProgress,
                TaskStatus::Waiting,
                TaskStatus::Backlog,
                TaskStatus::Done,
            ]
        );
    }
}
