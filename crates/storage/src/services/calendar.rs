use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::dto::submission::{CalendarDay, SubmissionWithParticipant};
use crate::models::{DEFAULT_EMOJI, Participant, Submission};

const UNKNOWN_PARTICIPANT: &str = "Unknown";

pub fn with_participant(
    submission: Submission,
    participant: Option<&Participant>,
) -> SubmissionWithParticipant {
    let local_date = submission.local_date();
    SubmissionWithParticipant {
        id: submission.id,
        participant_id: submission.participant_id,
        participant_name: participant
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_PARTICIPANT.to_string()),
        participant_emoji: participant
            .map(|p| p.emoji.clone())
            .unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
        link: submission.link,
        submission_date: submission.submission_date,
        local_date,
    }
}

/// Groups submissions by KST calendar day, days in ascending order and
/// submissions within a day by time. With `participant_id` set, only that
/// participant's submissions are kept.
pub fn group_by_day(
    submissions: Vec<Submission>,
    participants: &[Participant],
    participant_id: Option<i32>,
) -> Vec<CalendarDay> {
    let by_id: HashMap<i32, &Participant> = participants.iter().map(|p| (p.id, p)).collect();
    let mut days: BTreeMap<NaiveDate, Vec<SubmissionWithParticipant>> = BTreeMap::new();

    for submission in submissions {
        if participant_id.is_some_and(|id| id != submission.participant_id) {
            continue;
        }

        let participant = by_id.get(&submission.participant_id).copied();
        let entry = with_participant(submission, participant);
        days.entry(entry.local_date).or_default().push(entry);
    }

    days.into_iter()
        .map(|(date, mut submissions)| {
            submissions.sort_by_key(|s| s.submission_date);
            CalendarDay { date, submissions }
        })
        .collect()
}
