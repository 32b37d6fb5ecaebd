use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{DateRange, Submission};

/// Response containing a single submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub id: i32,
    pub participant_id: i32,
    pub link: String,
    pub submission_date: DateTime<Utc>,
    /// KST calendar day the submission counts toward
    pub local_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        let local_date = submission.local_date();
        Self {
            id: submission.id,
            participant_id: submission.participant_id,
            link: submission.link,
            submission_date: submission.submission_date,
            local_date,
            created_at: submission.created_at,
        }
    }
}

/// A submission joined with the name and emoji of its participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionWithParticipant {
    pub id: i32,
    pub participant_id: i32,
    pub participant_name: String,
    pub participant_emoji: String,
    pub link: String,
    pub submission_date: DateTime<Utc>,
    pub local_date: NaiveDate,
}

/// Request payload for logging a TIL link
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSubmissionRequest {
    #[validate(range(min = 1, message = "participant_id must be positive"))]
    pub participant_id: i32,

    #[validate(url(message = "link must be a valid URL"))]
    #[validate(length(max = 500))]
    pub link: String,

    /// RFC 3339 timestamp; any offset is accepted and normalized to UTC
    pub submission_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubmissionRangeQuery {
    /// First KST date, inclusive
    pub start_date: NaiveDate,
    /// Last KST date, inclusive
    pub end_date: NaiveDate,
}

impl SubmissionRangeQuery {
    pub fn validate(&self) -> Result<(), String> {
        if self.end_date < self.start_date {
            return Err("end_date must not be before start_date".to_string());
        }
        Ok(())
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LatestSubmissionsQuery {
    #[serde(default = "default_latest_limit")]
    pub limit: u32,
}

fn default_latest_limit() -> u32 {
    5
}

impl LatestSubmissionsQuery {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 || self.limit > 50 {
            return Err("limit must be between 1 and 50".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    pub year: i32,
    /// 1 through 12
    pub month: u32,
    /// Only include this participant's submissions
    pub participant_id: Option<i32>,
}

impl CalendarQuery {
    /// First through last day of the requested month, or an error when
    /// `year` and `month` do not name one.
    pub fn range(&self) -> Result<DateRange, String> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .and_then(|first| {
                let next_month = first.checked_add_months(Months::new(1))?;
                let last = next_month.checked_sub_days(Days::new(1))?;
                Some(DateRange::new(first, last))
            })
            .ok_or_else(|| "year and month must denote a valid month".to_string())
    }
}

/// Submissions of one KST calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub submissions: Vec<SubmissionWithParticipant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}
