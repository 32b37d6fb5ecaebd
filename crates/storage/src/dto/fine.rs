use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Participant, Week};
use crate::services::fine_ledger::{self, FINE_PER_SHORTAGE, MIN_SUBMISSIONS};

/// One participant's submissions, shortage and fine for a single week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParticipantFine {
    pub participant_id: i32,
    pub name: String,
    pub emoji: String,
    pub count: u32,
    pub shortage: u32,
    pub fine: i64,
}

impl ParticipantFine {
    pub fn new(participant: &Participant, count: u32) -> Self {
        Self {
            participant_id: participant.id,
            name: participant.name.clone(),
            emoji: participant.emoji.clone(),
            count,
            shortage: fine_ledger::shortage(count),
            fine: fine_ledger::fine(count),
        }
    }
}

/// Fine totals for one week with a per-participant breakdown
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklyFineSummary {
    /// `MM.DD` of the week's Sunday
    pub label: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_fine: i64,
    pub participants: Vec<ParticipantFine>,
}

impl WeeklyFineSummary {
    pub fn new(week: Week, participants: Vec<ParticipantFine>) -> Self {
        let total_fine = participants.iter().map(|p| p.fine).sum();
        Self {
            label: week.label(),
            week_start: week.start(),
            week_end: week.end(),
            total_fine,
            participants,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekTotal {
    pub label: String,
    pub week_start: NaiveDate,
    pub total_fine: i64,
}

impl From<&WeeklyFineSummary> for WeekTotal {
    fn from(summary: &WeeklyFineSummary) -> Self {
        Self {
            label: summary.label.clone(),
            week_start: summary.week_start,
            total_fine: summary.total_fine,
        }
    }
}

/// Aggregates over a sequence of weeks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FineStatistics {
    pub total_fines: i64,
    pub average_fine: i64,
    pub max_week: Option<WeekTotal>,
    pub min_week: Option<WeekTotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FineHistoryResponse {
    pub weeks: Vec<WeeklyFineSummary>,
    pub statistics: FineStatistics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CumulativeFine {
    pub participant_id: i32,
    pub name: String,
    pub emoji: String,
    pub total_fine: i64,
}

/// Fines summed from the history start through the last completed week
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CumulativeFinesResponse {
    pub history_start: NaiveDate,
    pub through: NaiveDate,
    pub total_fine: i64,
    pub participants: Vec<CumulativeFine>,
}

impl CumulativeFinesResponse {
    pub fn new(
        participants: &[Participant],
        totals: &BTreeMap<i32, i64>,
        history_start: NaiveDate,
        through: NaiveDate,
    ) -> Self {
        let participants: Vec<CumulativeFine> = participants
            .iter()
            .map(|p| CumulativeFine {
                participant_id: p.id,
                name: p.name.clone(),
                emoji: p.emoji.clone(),
                total_fine: totals.get(&p.id).copied().unwrap_or(0),
            })
            .collect();

        Self {
            history_start,
            through,
            total_fine: participants.iter().map(|p| p.total_fine).sum(),
            participants,
        }
    }
}

/// Last week's fines alongside the running totals
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FineStatusResponse {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_fine: i64,
    pub total_shortage: u32,
    pub participants: Vec<ParticipantFine>,
    pub cumulative: CumulativeFinesResponse,
    pub rules: FineRules,
}

/// A week that can be picked on the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekOption {
    /// Weeks back from the current week
    pub offset: u32,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub label: String,
    /// Ordered by submission count, highest first
    pub entries: Vec<ParticipantFine>,
    pub total_fine: i64,
    pub average_count: f64,
    pub cumulative: CumulativeFinesResponse,
    pub weeks: Vec<WeekOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParticipantWeekFine {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub submissions: u32,
    pub shortage: u32,
    pub fine: i64,
}

/// A participant's week-by-week fines, newest week first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantFineHistory {
    pub participant_id: i32,
    pub total_fine: i64,
    pub total_submissions: i64,
    pub weeks: Vec<ParticipantWeekFine>,
}

/// The fixed rules fines are computed with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FineRules {
    pub min_submissions: u32,
    pub fine_per_shortage: i64,
    pub utc_offset_hours: i64,
}

impl Default for FineRules {
    fn default() -> Self {
        Self {
            min_submissions: MIN_SUBMISSIONS,
            fine_per_shortage: FINE_PER_SHORTAGE,
            utc_offset_hours: crate::models::week::KST_OFFSET_HOURS,
        }
    }
}

fn check_today(today: Option<NaiveDate>, history_start: NaiveDate) -> Result<(), String> {
    match today {
        Some(anchor) => fine_ledger::check_anchor(history_start, anchor),
        None => Ok(()),
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FineQuery {
    /// Anchor date (YYYY-MM-DD, KST). Defaults to today.
    pub today: Option<NaiveDate>,
}

impl FineQuery {
    pub fn validate(&self, history_start: NaiveDate) -> Result<(), String> {
        check_today(self.today, history_start)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FineHistoryQuery {
    /// Anchor date (YYYY-MM-DD, KST). Defaults to today.
    pub today: Option<NaiveDate>,
    /// Number of completed weeks to include
    pub weeks: Option<u32>,
}

impl FineHistoryQuery {
    pub const MAX_WEEKS: u32 = 52;

    pub fn validate(&self, history_start: NaiveDate) -> Result<(), String> {
        if let Some(weeks) = self.weeks
            && !(1..=Self::MAX_WEEKS).contains(&weeks)
        {
            return Err(format!("weeks must be between 1 and {}", Self::MAX_WEEKS));
        }
        check_today(self.today, history_start)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// Anchor date (YYYY-MM-DD, KST). Defaults to today.
    pub today: Option<NaiveDate>,
    /// Weeks back from the current week; clamped to the history start
    #[serde(default)]
    pub week_offset: u32,
}

impl LeaderboardQuery {
    pub fn validate(&self, history_start: NaiveDate) -> Result<(), String> {
        check_today(self.today, history_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()
    }

    #[test]
    fn test_history_query_accepts_missing_weeks() {
        assert!(FineHistoryQuery::default().validate(history_start()).is_ok());
    }

    #[test]
    fn test_history_query_rejects_out_of_range_weeks() {
        let zero = FineHistoryQuery {
            today: None,
            weeks: Some(0),
        };
        assert!(zero.validate(history_start()).is_err());

        let too_many = FineHistoryQuery {
            today: None,
            weeks: Some(53),
        };
        assert!(too_many.validate(history_start()).is_err());

        let twelve = FineHistoryQuery {
            today: None,
            weeks: Some(12),
        };
        assert!(twelve.validate(history_start()).is_ok());
    }

    #[test]
    fn test_queries_reject_far_away_anchor() {
        let far: FineQuery = serde_json::from_str(r#"{"today": "+262142-12-31"}"#).unwrap();
        assert!(far.validate(history_start()).is_err());

        let leaderboard = LeaderboardQuery {
            today: NaiveDate::from_ymd_opt(200000, 1, 1),
            week_offset: 0,
        };
        assert!(leaderboard.validate(history_start()).is_err());

        let history = FineHistoryQuery {
            today: NaiveDate::from_ymd_opt(-5000, 1, 1),
            weeks: Some(12),
        };
        assert!(history.validate(history_start()).is_err());
    }

    #[test]
    fn test_queries_accept_nearby_anchor() {
        let query = FineQuery {
            today: NaiveDate::from_ymd_opt(2026, 2, 12),
        };
        assert!(query.validate(history_start()).is_ok());
        assert!(FineQuery::default().validate(history_start()).is_ok());
    }

    #[test]
    fn test_default_rules() {
        let rules = FineRules::default();
        assert_eq!(rules.min_submissions, 4);
        assert_eq!(rules.fine_per_shortage, 5000);
        assert_eq!(rules.utc_offset_hours, 9);
    }
}
