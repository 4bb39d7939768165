//! Aggregate figures for the dashboard, enforcement and settlement views.

use crate::model::{CaseConfig, Jurisdiction, TaskStatus};
use crate::store::CaseData;
use chrono::NaiveDate;
use serde::Serialize;

/// Coarse enforcement phase of one jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JurisdictionPhase {
    /// Has tasks and none are open.
    Complete,
    /// At least one task is in progress.
    Active,
    /// At least one task is scheduled this week.
    Planning,
    Backlog,
}

impl JurisdictionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::Active => "Active",
            Self::Planning => "Planning",
            Self::Backlog => "Backlog",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionStat {
    pub jurisdiction: Jurisdiction,
    pub open_tasks: usize,
    pub total_tasks: usize,
    pub files: usize,
    /// Share of done tasks, rounded to a whole percent in `0..=100`.
    pub progress: u8,
    pub phase: JurisdictionPhase,
}

/// One entry per jurisdiction, in `Jurisdiction::ALL` order.
pub fn jurisdiction_stats(data: &CaseData) -> Vec<JurisdictionStat> {
    Jurisdiction::ALL
        .iter()
        .map(|&jurisdiction| {
            let tasks: Vec<_> = data
                .tasks
                .iter()
                .filter(|task| task.jurisdiction == Some(jurisdiction))
                .collect();
            let total_tasks = tasks.len();
            let open_tasks = tasks.iter().filter(|task| task.is_open()).count();
            let files = data
                .files
                .iter()
                .filter(|file| file.jurisdiction == Some(jurisdiction))
                .count();
            let has_status = |status: TaskStatus| tasks.iter().any(|task| task.status == status);

            let phase = if total_tasks > 0 && open_tasks == 0 {
                JurisdictionPhase::Complete
            } else if has_status(TaskStatus::InProgress) {
                JurisdictionPhase::Active
            } else if has_status(TaskStatus::ThisWeek) {
                JurisdictionPhase::Planning
            } else {
                JurisdictionPhase::Backlog
            };

            JurisdictionStat {
                jurisdiction,
                open_tasks,
                total_tasks,
                files,
                progress: percent(total_tasks - open_tasks, total_tasks),
                phase,
            }
        })
        .collect()
}

fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u8
}

/// Highest amount among offers that are not `Rejected`; `0.0` when none.
pub fn best_offer(data: &CaseData) -> f64 {
    data.settlements
        .iter()
        .filter(|offer| offer.is_live())
        .map(|offer| offer.amount)
        .fold(0.0, f64::max)
}

/// Simple post-judgment interest accrued through `today`.
///
/// `amount * rate / 100 / 365 * days`, where `days` counts whole days since
/// the judgment date. Dates before the judgment accrue nothing.
pub fn calculate_interest(config: &CaseConfig, today: NaiveDate) -> f64 {
    let days = (today - config.judgment_date).num_days().max(0);
    let daily_rate = config.interest_rate / 100.0 / 365.0;
    config.judgment_amount * daily_rate * days as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub open: usize,
    pub this_week: usize,
    pub done: usize,
    /// Done share of all tasks, whole percent.
    pub completion_rate: u8,
}

pub fn task_summary(data: &CaseData) -> TaskSummary {
    let total = data.tasks.len();
    let done = data.tasks.iter().filter(|task| task.status.is_done()).count();
    let this_week = data
        .tasks
        .iter()
        .filter(|task| task.status == TaskStatus::ThisWeek)
        .count();
    TaskSummary {
        total,
        open: total - done,
        this_week,
        done,
        completion_rate: percent(done, total),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementSummary {
    pub interest: f64,
    /// Judgment amount plus accrued interest.
    pub total_owed: f64,
    pub best_offer: f64,
    /// Best offer as a percentage of the judgment amount.
    pub recovery_percent: f64,
    pub floor_amount: f64,
    pub meets_floor: bool,
}

pub fn settlement_summary(data: &CaseData, today: NaiveDate) -> SettlementSummary {
    let config = &data.case_config;
    let interest = calculate_interest(config, today);
    let best = best_offer(data);
    let recovery_percent = if best > 0.0 && config.judgment_amount > 0.0 {
        best / config.judgment_amount * 100.0
    } else {
        0.0
    };
    SettlementSummary {
        interest,
        total_owed: config.judgment_amount + interest,
        best_offer: best,
        recovery_percent,
        floor_amount: config.floor_amount,
        meets_floor: best > 0.0 && best >= config.floor_amount,
    }
}
