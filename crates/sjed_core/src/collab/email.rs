//! Outgoing email: validation, simulated send, templates and `mailto:` fallback.
//!
//! No mail is delivered. A successful send yields a [`SentEmail`] that the
//! caller records in the email log.

use crate::clock::Clock;
use crate::model::validation::is_email_shaped;
use crate::model::{CaseConfig, EmailType, EntityId, Jurisdiction, NewEmailLog};
use chrono::NaiveDate;
use log::{info, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Characters of the summary kept from the body before `...` is appended.
pub const SUMMARY_CHARS: usize = 200;
pub const DEFAULT_FROM_ADDRESS: &str = "dashboard@gooddogg.com";
const SIGNATURE: &str = "Best regards,\nGood Dogg Beverage Co.";

const MAILTO_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Names of the required fields that were blank.
    MissingFields(Vec<&'static str>),
    InvalidAddress(String),
}

impl Display for EmailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
            Self::InvalidAddress(address) => write!(f, "invalid email address `{address}`"),
        }
    }
}

impl Error for EmailError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub from_address: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Counsel the email is addressed to, if any.
    pub counsel_id: Option<EntityId>,
    pub task_ids: Vec<EntityId>,
}

impl SendRequest {
    pub fn new(to: impl Into<String>, draft: EmailDraft) -> Self {
        Self {
            to: to.into(),
            subject: draft.subject,
            body: draft.body,
            ..Self::default()
        }
    }
}

/// Metadata of a simulated send, ready for the email log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub summary: String,
    pub date: NaiveDate,
    pub kind: EmailType,
    pub linked_task_ids: Vec<EntityId>,
    pub linked_party_ids: Vec<EntityId>,
}

impl SentEmail {
    pub fn into_new_email_log(self) -> NewEmailLog {
        let mut email = NewEmailLog::new(self.subject, self.from, self.to, self.date, self.kind);
        email.summary = self.summary;
        email.linked_task_ids = self.linked_task_ids;
        email.linked_party_ids = self.linked_party_ids;
        email
    }
}

/// Validates `request` and simulates sending it.
///
/// # Errors
/// - `MissingFields` when `to`, `subject` or `body` is blank.
/// - `InvalidAddress` when `to` is not address-shaped.
pub fn send_email(
    request: &SendRequest,
    settings: &EmailSettings,
    clock: &dyn Clock,
) -> Result<SentEmail, EmailError> {
    let missing: Vec<&'static str> = [
        ("to", &request.to),
        ("subject", &request.subject),
        ("body", &request.body),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();
    if !missing.is_empty() {
        warn!(
            "event=email_send module=collab status=rejected reason=missing_fields count={}",
            missing.len()
        );
        return Err(EmailError::MissingFields(missing));
    }

    let to = request.to.trim();
    if !is_email_shaped(to) {
        warn!("event=email_send module=collab status=rejected reason=invalid_address");
        return Err(EmailError::InvalidAddress(to.to_string()));
    }

    let kind = if request.counsel_id.is_some() {
        EmailType::OpposingCounsel
    } else {
        EmailType::Client
    };
    info!(
        "event=email_send module=collab status=ok kind={} tasks={}",
        kind,
        request.task_ids.len()
    );
    Ok(SentEmail {
        to: to.to_string(),
        from: settings.from_address.clone(),
        subject: request.subject.clone(),
        summary: summarize(&request.body),
        date: clock.today(),
        kind,
        linked_task_ids: request.task_ids.clone(),
        linked_party_ids: request.counsel_id.iter().cloned().collect(),
    })
}

/// First [`SUMMARY_CHARS`] characters of `body`, with `...` when cut.
pub fn summarize(body: &str) -> String {
    if body.chars().count() <= SUMMARY_CHARS {
        return body.to_string();
    }
    let mut summary: String = body.chars().take(SUMMARY_CHARS).collect();
    summary.push_str("...");
    summary
}

/// `mailto:` URL for sending the request from the user's own mail client.
pub fn mailto_link(request: &SendRequest) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        request.to.trim(),
        utf8_percent_encode(&request.subject, MAILTO_ENCODE_SET),
        utf8_percent_encode(&request.body, MAILTO_ENCODE_SET)
    )
}

/// Subject and body produced by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn counsel_assignment(counsel_name: &str, task_title: &str) -> Self {
        Self {
            subject: format!("Task Assignment: {task_title}"),
            body: format!(
                "Dear {counsel_name},\n\n\
                 You have been assigned the following task in the Good Dogg Beverage Co. v. MSH enforcement matter:\n\n\
                 Task: {task_title}\n\n\
                 Please review and advise on next steps at your earliest convenience.\n\n\
                 {SIGNATURE}"
            ),
        }
    }

    pub fn settlement_counter(offer_amount: f64, counter_amount: f64) -> Self {
        Self {
            subject: "Re: Settlement Proposal - Good Dogg v. MSH".to_string(),
            body: format!(
                "Thank you for your settlement offer of ${}.\n\n\
                 After careful consideration, we are prepared to counter at ${}, payable as follows:\n\n\
                 [Proposed payment terms]\n\n\
                 Please advise if these terms are acceptable.\n\n\
                 {SIGNATURE}",
                format_amount(offer_amount),
                format_amount(counter_amount)
            ),
        }
    }

    /// Request for local counsel to domesticate the judgment in `jurisdiction`.
    pub fn domestication_request(
        jurisdiction: Jurisdiction,
        counsel_name: &str,
        config: &CaseConfig,
    ) -> Self {
        let state = jurisdiction.state_name();
        Self {
            subject: format!("Domestication Request - {state}"),
            body: format!(
                "Dear {counsel_name},\n\n\
                 We are seeking local counsel representation to domesticate a Florida default judgment in {state}.\n\n\
                 Case Details:\n\
                 - Judgment Amount: ${}\n\
                 - Judgment Date: {}\n\
                 - Case Number: {}\n\
                 - Debtor: Management Services Holdings, LLC\n\n\
                 Please advise on:\n\
                 1. Your availability and retainer requirements\n\
                 2. Estimated timeline for domestication\n\
                 3. Any known debtor assets in your jurisdiction\n\n\
                 Thank you for your consideration.\n\n\
                 {SIGNATURE}",
                format_amount(config.judgment_amount),
                config.judgment_date.format("%B %-d, %Y"),
                config.case_number.as_deref().unwrap_or("N/A")
            ),
        }
    }

    pub fn status_update(recipient_name: &str, updates: &[&str]) -> Self {
        let lines: Vec<String> = updates
            .iter()
            .enumerate()
            .map(|(index, update)| format!("{}. {update}", index + 1))
            .collect();
        Self {
            subject: "Status Update - Good Dogg v. MSH Enforcement".to_string(),
            body: format!(
                "Dear {recipient_name},\n\n\
                 Please find below the current status of enforcement efforts:\n\n\
                 {}\n\n\
                 Please let me know if you have any questions or require additional information.\n\n\
                 {SIGNATURE}",
                lines.join("\n")
            ),
        }
    }
}

/// Dollar amount with thousands separators; cents only when non-zero.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let mut grouped = String::new();
    let whole = (cents / 100).to_string();
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    match cents % 100 {
        0 => format!("{sign}{grouped}"),
        fraction => format!("{sign}{grouped}.{fraction:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_amount, mailto_link, summarize, EmailDraft, SendRequest};
    use crate::model::Jurisdiction;
    use crate::seed::seed_case_config;

    #[test]
    fn summary_is_cut_at_two_hundred_chars() {
        assert_eq!(summarize("short"), "short");
        let long = "x".repeat(250);
        let summary = summarize(&long);
        assert_eq!(summary.chars().count(), 203);
        assert!(summary.ends_with("..."));
        assert_eq!(summarize(&"y".repeat(200)), "y".repeat(200));
    }

    #[test]
    fn amounts_group_thousands() {
        assert_eq!(format_amount(2_378_443.28), "2,378,443.28");
        assert_eq!(format_amount(1_800_000.0), "1,800,000");
        assert_eq!(format_amount(999.5), "999.50");
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let request = SendRequest {
            to: "a@b.co".to_string(),
            subject: "Hi & bye".to_string(),
            body: "line 1\nline 2".to_string(),
            ..SendRequest::default()
        };
        assert_eq!(
            mailto_link(&request),
            "mailto:a@b.co?subject=Hi%20%26%20bye&body=line%201%0Aline%202"
        );
    }

    #[test]
    fn domestication_template_uses_case_config() {
        let draft =
            EmailDraft::domestication_request(Jurisdiction::Tn, "Jane Roe", &seed_case_config());
        assert_eq!(draft.subject, "Domestication Request - Tennessee");
        assert!(draft.body.contains("$2,378,443.28"));
        assert!(draft.body.contains("November 25, 2025"));
        assert!(draft.body.contains("05-2024-CA-050807"));
    }

    #[test]
    fn status_update_numbers_items() {
        let draft = EmailDraft::status_update("Client", &["Filed lien", "Served discovery"]);
        assert!(draft.body.contains("1. Filed lien\n2. Served discovery"));
    }
}
