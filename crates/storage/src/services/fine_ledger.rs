//! Weekly fine computation.
//!
//! Everything here is a pure function of the submissions and participants
//! passed in. Nothing reads the clock: trailing and cumulative rollups take
//! the anchor date ("today") as an argument.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::dto::fine::{
    FineStatistics, ParticipantFine, ParticipantWeekFine, WeekOption, WeekTotal,
    WeeklyFineSummary,
};
use crate::models::{DateRange, Participant, Submission, Week};

/// Submissions each participant owes per week.
pub const MIN_SUBMISSIONS: u32 = 4;

/// Fine charged for every missing submission, in won.
pub const FINE_PER_SHORTAGE: i64 = 5000;

/// Number of submissions below the weekly minimum. Never negative.
pub fn shortage(count: u32) -> u32 {
    MIN_SUBMISSIONS.saturating_sub(count)
}

pub fn fine(count: u32) -> i64 {
    i64::from(shortage(count)) * FINE_PER_SHORTAGE
}

pub fn week_of(date: NaiveDate) -> Week {
    Week::containing(date)
}

/// Largest distance, in weeks, between an anchor date and the history start.
pub const MAX_ANCHOR_DISTANCE_WEEKS: i64 = 520;

/// Checks that `anchor` lies close enough to `history_start` for every
/// rollup to cover a bounded number of weeks.
pub fn check_anchor(history_start: NaiveDate, anchor: NaiveDate) -> Result<(), String> {
    let distance = (anchor - history_start).num_weeks().abs();
    if distance > MAX_ANCHOR_DISTANCE_WEEKS {
        return Err(format!(
            "today must be within {MAX_ANCHOR_DISTANCE_WEEKS} weeks of {history_start}"
        ));
    }
    Ok(())
}

/// Last day of the most recently completed week relative to `anchor`.
pub fn last_completed_day(anchor: NaiveDate) -> NaiveDate {
    Week::containing(anchor).previous().end()
}

/// Submission counts keyed by participant and week.
///
/// Lookups for any participant/week pair covered by the range succeed, with
/// zero for pairs that had no submissions.
#[derive(Debug, Clone)]
pub struct WeeklyCounts {
    weeks: Vec<Week>,
    participant_ids: Vec<i32>,
    counts: HashMap<(i32, Week), u32>,
}

impl WeeklyCounts {
    pub fn get(&self, participant_id: i32, week: Week) -> u32 {
        self.counts
            .get(&(participant_id, week))
            .copied()
            .unwrap_or(0)
    }

    /// Weeks covered, oldest first.
    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Every participant/week combination, zeros included, week by week.
    pub fn iter(&self) -> impl Iterator<Item = (i32, Week, u32)> + '_ {
        self.weeks.iter().flat_map(move |&week| {
            self.participant_ids
                .iter()
                .map(move |&id| (id, week, self.get(id, week)))
        })
    }
}

/// Buckets submissions into Monday-start weeks.
///
/// Submissions whose local date falls outside `range` are dropped, as are
/// submissions for participants not in `participant_ids` (the latter with a
/// warning). The covered weeks run from the week containing `range.start`
/// through the week containing `range.end`.
pub fn count_by_week(
    submissions: &[Submission],
    participant_ids: &[i32],
    range: DateRange,
) -> WeeklyCounts {
    let known: HashSet<i32> = participant_ids.iter().copied().collect();
    let mut counts: HashMap<(i32, Week), u32> = HashMap::new();

    for submission in submissions {
        let date = submission.local_date();
        if !range.contains(date) {
            continue;
        }

        if !known.contains(&submission.participant_id) {
            tracing::warn!(
                submission_id = submission.id,
                participant_id = submission.participant_id,
                "Skipping submission for unknown participant"
            );
            continue;
        }

        *counts
            .entry((submission.participant_id, Week::containing(date)))
            .or_insert(0) += 1;
    }

    let weeks = if range.is_empty() {
        Vec::new()
    } else {
        Week::containing(range.start)
            .through(Week::containing(range.end))
            .collect()
    };

    WeeklyCounts {
        weeks,
        participant_ids: participant_ids.to_vec(),
        counts,
    }
}

fn participant_ids(participants: &[Participant]) -> Vec<i32> {
    participants.iter().map(|p| p.id).collect()
}

/// Per-participant fines for one week, in participant order.
pub fn compute_week_fines(
    submissions: &[Submission],
    participants: &[Participant],
    week: Week,
) -> Vec<ParticipantFine> {
    let counts = count_by_week(submissions, &participant_ids(participants), week.as_range());

    participants
        .iter()
        .map(|p| ParticipantFine::new(p, counts.get(p.id, week)))
        .collect()
}

/// The week's fines ordered by submission count, highest first. Equal counts
/// keep participant order.
pub fn compute_leaderboard(
    submissions: &[Submission],
    participants: &[Participant],
    week: Week,
) -> Vec<ParticipantFine> {
    let mut entries = compute_week_fines(submissions, participants, week);
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Dates spanned by the `weeks` completed weeks before the anchor's week.
pub fn trailing_range(anchor: NaiveDate, weeks: u32) -> Option<DateRange> {
    if weeks == 0 {
        return None;
    }

    let last = Week::containing(anchor).previous();
    let first = last.offset(-(i64::from(weeks) - 1));
    Some(DateRange::new(first.start(), last.end()))
}

/// The `weeks` most recently completed weeks before the anchor's week,
/// oldest first. The anchor's own week is still open and never included.
pub fn compute_trailing_weeks(
    submissions: &[Submission],
    participants: &[Participant],
    anchor: NaiveDate,
    weeks: u32,
) -> Vec<WeeklyFineSummary> {
    let Some(range) = trailing_range(anchor, weeks) else {
        return Vec::new();
    };
    let counts = count_by_week(submissions, &participant_ids(participants), range);

    counts
        .weeks()
        .iter()
        .map(|&week| {
            let fines = participants
                .iter()
                .map(|p| ParticipantFine::new(p, counts.get(p.id, week)))
                .collect();
            WeeklyFineSummary::new(week, fines)
        })
        .collect()
}

/// Totals, rounded average and extreme weeks over `weeks`.
///
/// Ties for the largest or smallest total go to the week encountered first.
pub fn summarize(weeks: &[WeeklyFineSummary]) -> FineStatistics {
    let total_fines: i64 = weeks.iter().map(|w| w.total_fine).sum();

    let average_fine = if weeks.is_empty() {
        0
    } else {
        (Decimal::from(total_fines) / Decimal::from(weeks.len()))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or_default()
    };

    let mut max_week: Option<&WeeklyFineSummary> = None;
    let mut min_week: Option<&WeeklyFineSummary> = None;
    for week in weeks {
        if max_week.is_none_or(|max| week.total_fine > max.total_fine) {
            max_week = Some(week);
        }
        if min_week.is_none_or(|min| week.total_fine < min.total_fine) {
            min_week = Some(week);
        }
    }

    FineStatistics {
        total_fines,
        average_fine,
        max_week: max_week.map(WeekTotal::from),
        min_week: min_week.map(WeekTotal::from),
    }
}

/// Fines per participant summed over every week from the week containing
/// `history_start` through the week containing `through`.
///
/// Submissions dated before `history_start` or after `through` are ignored.
/// Pass [`last_completed_day`] as `through` to leave out the open week.
/// Every participant appears in the result, with zero if nothing is owed.
pub fn compute_cumulative_fines(
    submissions: &[Submission],
    participants: &[Participant],
    history_start: NaiveDate,
    through: NaiveDate,
) -> BTreeMap<i32, i64> {
    let mut totals: BTreeMap<i32, i64> = participants.iter().map(|p| (p.id, 0)).collect();

    let counts = count_by_week(
        submissions,
        &participant_ids(participants),
        DateRange::new(history_start, through),
    );
    for (participant_id, _, count) in counts.iter() {
        *totals.entry(participant_id).or_insert(0) += fine(count);
    }

    totals
}

/// One participant's week-by-week fines from the history start through the
/// last completed week, newest first.
pub fn compute_participant_history(
    submissions: &[Submission],
    participant_id: i32,
    history_start: NaiveDate,
    anchor: NaiveDate,
) -> Vec<ParticipantWeekFine> {
    let range = DateRange::new(history_start, last_completed_day(anchor));
    let counts = count_by_week(submissions, &[participant_id], range);

    let mut weeks: Vec<ParticipantWeekFine> = counts
        .iter()
        .map(|(_, week, count)| ParticipantWeekFine {
            week_start: week.start(),
            week_end: week.end(),
            submissions: count,
            shortage: shortage(count),
            fine: fine(count),
        })
        .collect();
    weeks.reverse();
    weeks
}

/// Weeks that may be picked for display, from the anchor's week back to the
/// week containing `history_start`, newest first.
pub fn selectable_weeks(history_start: NaiveDate, anchor: NaiveDate) -> Vec<WeekOption> {
    let first = Week::containing(history_start);
    let current = Week::containing(anchor);

    first
        .through(current)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .enumerate()
        .map(|(offset, week)| WeekOption {
            offset: u32::try_from(offset).unwrap_or(u32::MAX),
            week_start: week.start(),
            week_end: week.end(),
            label: week.range_label(),
        })
        .collect()
}

/// The week `offset` weeks before the anchor's week, never earlier than the
/// week containing `history_start`.
/// The week `offset` weeks back from the anchor's week, never earlier than
/// the week containing `history_start`.
pub fn select_week(history_start: NaiveDate, anchor: NaiveDate, offset: u32) -> Week {
    let first = Week::containing(history_start);
    let current = Week::containing(anchor);
    if current <= first {
        return first;
    }

    let available = (current.start() - first.start()).num_weeks();
    current.offset(-i64::from(offset).min(available))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::week::local_to_utc;
    use chrono::{NaiveTime, TimeDelta, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn participant(id: i32, name: &str) -> Participant {
        Participant {
            id,
            name: name.to_string(),
            emoji: "👤".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn submission_at(id: i32, participant_id: i32, local: chrono::NaiveDateTime) -> Submission {
        let at = local_to_utc(local);
        Submission {
            id,
            participant_id,
            link: format!("https://example.com/til/{id}"),
            submission_date: at,
            created_at: at,
            updated_at: at,
        }
    }

    fn submission_on(id: i32, participant_id: i32, day: NaiveDate) -> Submission {
        submission_at(
            id,
            participant_id,
            day.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        )
    }

    /// `count` submissions for `participant_id`, spread over the given week.
    fn submissions_in_week(
        next_id: &mut i32,
        participant_id: i32,
        week: Week,
        count: u32,
    ) -> Vec<Submission> {
        (0..count)
            .map(|i| {
                *next_id += 1;
                let day = week.start() + chrono::Days::new(u64::from(i % 7));
                submission_on(*next_id, participant_id, day)
            })
            .collect()
    }

    #[test]
    fn test_shortage_and_fine() {
        assert_eq!(shortage(0), 4);
        assert_eq!(fine(0), 20000);
        assert_eq!(shortage(2), 2);
        assert_eq!(fine(2), 10000);
        assert_eq!(shortage(4), 0);
        assert_eq!(fine(4), 0);
        assert_eq!(shortage(9), 0);
        assert_eq!(fine(9), 0);
    }

    #[test]
    fn test_fine_is_non_increasing() {
        for count in 0..20 {
            assert!(fine(count + 1) <= fine(count));
            assert_eq!(
                fine(count),
                i64::from(MIN_SUBMISSIONS.saturating_sub(count)) * FINE_PER_SHORTAGE
            );
        }
    }

    #[test]
    fn test_week_total_for_mixed_counts() {
        let week = week_of(date(2026, 2, 4));
        let participants = vec![
            participant(1, "Alice"),
            participant(2, "Bob"),
            participant(3, "Charlie"),
        ];
        let mut id = 0;
        let mut submissions = submissions_in_week(&mut id, 1, week, 2);
        submissions.extend(submissions_in_week(&mut id, 2, week, 4));
        submissions.extend(submissions_in_week(&mut id, 3, week, 1));

        let fines = compute_week_fines(&submissions, &participants, week);
        let counts: Vec<u32> = fines.iter().map(|f| f.count).collect();
        assert_eq!(counts, vec![2, 4, 1]);

        let summary = WeeklyFineSummary::new(week, fines);
        assert_eq!(summary.total_fine, 25000);
        assert_eq!(
            summary.total_fine,
            summary.participants.iter().map(|p| p.fine).sum::<i64>()
        );
    }

    #[test]
    fn test_everyone_meeting_minimum_owes_nothing() {
        let week = week_of(date(2026, 2, 4));
        let participants = vec![participant(1, "Alice"), participant(2, "Bob")];
        let mut id = 0;
        let mut submissions = submissions_in_week(&mut id, 1, week, 4);
        submissions.extend(submissions_in_week(&mut id, 2, week, 5));

        let fines = compute_week_fines(&submissions, &participants, week);
        assert!(fines.iter().all(|f| f.fine == 0 && f.shortage == 0));
    }

    #[test]
    fn test_empty_inputs_produce_zero_results() {
        let week = week_of(date(2026, 2, 4));
        assert!(compute_week_fines(&[], &[], week).is_empty());

        let participants = vec![participant(1, "Alice")];
        let fines = compute_week_fines(&[], &participants, week);
        assert_eq!(fines.len(), 1);
        assert_eq!(fines[0].count, 0);
        assert_eq!(fines[0].fine, 20000);

        let stats = summarize(&[]);
        assert_eq!(stats.total_fines, 0);
        assert_eq!(stats.average_fine, 0);
        assert!(stats.max_week.is_none());
        assert!(stats.min_week.is_none());
    }

    #[test]
    fn test_week_boundaries_to_the_millisecond() {
        let week = week_of(date(2026, 2, 2));
        let participants = vec![participant(1, "Alice")];
        let submissions = vec![
            submission_at(1, 1, week.starts_at()),
            submission_at(2, 1, week.ends_at()),
            submission_at(3, 1, week.next().starts_at()),
            submission_at(4, 1, week.starts_at() - TimeDelta::milliseconds(1)),
        ];

        let range = DateRange::new(week.previous().start(), week.next().end());
        let counts = count_by_week(&submissions, &[1], range);
        assert_eq!(counts.get(1, week), 2);
        assert_eq!(counts.get(1, week.next()), 1);
        assert_eq!(counts.get(1, week.previous()), 1);

        let fines = compute_week_fines(&submissions, &participants, week);
        assert_eq!(fines[0].count, 2);
    }

    #[test]
    fn test_count_by_week_includes_zero_weeks() {
        let first = week_of(date(2026, 1, 5));
        let submissions = vec![submission_on(1, 1, first.start())];
        let range = DateRange::new(first.start(), first.offset(2).end());

        let counts = count_by_week(&submissions, &[1, 2], range);
        assert_eq!(counts.weeks().len(), 3);

        let all: Vec<_> = counts.iter().collect();
        assert_eq!(all.len(), 6);
        assert!(all.contains(&(1, first, 1)));
        assert!(all.contains(&(2, first, 0)));
        assert!(all.contains(&(1, first.offset(2), 0)));
    }

    #[test]
    fn test_count_by_week_starts_from_monday_on_or_before_range_start() {
        // Thursday start still covers the whole week it falls in
        let range = DateRange::new(date(2026, 1, 1), date(2026, 1, 11));
        let counts = count_by_week(&[], &[1], range);
        assert_eq!(counts.weeks()[0].start(), date(2025, 12, 29));
        assert_eq!(counts.weeks().len(), 2);
    }

    #[test]
    fn test_count_by_week_drops_out_of_range_and_unknown() {
        let week = week_of(date(2026, 2, 4));
        let submissions = vec![
            submission_on(1, 1, date(2026, 2, 4)),
            submission_on(2, 1, date(2026, 3, 4)),
            submission_on(3, 99, date(2026, 2, 4)),
        ];

        let counts = count_by_week(&submissions, &[1], week.as_range());
        assert_eq!(counts.get(1, week), 1);
        assert_eq!(counts.get(99, week), 0);
        assert_eq!(counts.iter().count(), 1);
    }

    #[test]
    fn test_trailing_weeks_are_completed_and_ordered() {
        // Thursday 2026-02-12: last completed week is 02.02 ~ 02.08
        let anchor = date(2026, 2, 12);
        let participants = vec![participant(1, "Alice")];
        let submissions = vec![
            submission_on(1, 1, date(2026, 2, 3)),
            // current week, must not show up
            submission_on(2, 1, date(2026, 2, 10)),
        ];

        let weeks = compute_trailing_weeks(&submissions, &participants, anchor, 12);
        assert_eq!(weeks.len(), 12);

        let last = weeks.last().unwrap();
        assert_eq!(last.label, "02.08");
        assert_eq!(last.week_start, date(2026, 2, 2));
        assert_eq!(last.participants[0].count, 1);
        assert_eq!(last.total_fine, 15000);

        let first = &weeks[0];
        assert_eq!(first.week_start, date(2025, 11, 17));
        assert_eq!(first.total_fine, 20000);

        for pair in weeks.windows(2) {
            assert_eq!(pair[1].week_start, pair[0].week_start + TimeDelta::weeks(1));
        }
    }

    #[test]
    fn test_trailing_zero_weeks() {
        let participants = vec![participant(1, "Alice")];
        assert!(compute_trailing_weeks(&[], &participants, date(2026, 2, 12), 0).is_empty());
        assert!(trailing_range(date(2026, 2, 12), 0).is_none());
    }

    #[test]
    fn test_trailing_range_on_sunday_anchor() {
        // Sunday still belongs to the open week
        let range = trailing_range(date(2026, 2, 15), 2).unwrap();
        assert_eq!(range.start, date(2026, 1, 26));
        assert_eq!(range.end, date(2026, 2, 8));
    }

    fn summary(label: &str, start: NaiveDate, total_fine: i64) -> WeeklyFineSummary {
        WeeklyFineSummary {
            label: label.to_string(),
            week_start: start,
            week_end: start + chrono::Days::new(6),
            total_fine,
            participants: Vec::new(),
        }
    }

    #[test]
    fn test_summarize_totals_and_average() {
        let weeks = vec![
            summary("01.11", date(2026, 1, 5), 25000),
            summary("01.18", date(2026, 1, 12), 20000),
            summary("01.25", date(2026, 1, 19), 5000),
        ];

        let stats = summarize(&weeks);
        assert_eq!(stats.total_fines, 50000);
        assert_eq!(stats.average_fine, 16667);
    }

    #[test]
    fn test_summarize_max_and_min() {
        let weeks = vec![
            summary("01.11", date(2026, 1, 5), 25000),
            summary("01.18", date(2026, 1, 12), 20000),
            summary("01.25", date(2026, 1, 19), 5000),
            summary("02.01", date(2026, 1, 26), 30000),
        ];

        let stats = summarize(&weeks);
        assert_eq!(stats.max_week.unwrap().label, "02.01");
        let min = stats.min_week.unwrap();
        assert_eq!(min.label, "01.25");
        assert_eq!(min.total_fine, 5000);
    }

    #[test]
    fn test_summarize_ties_go_to_first_week() {
        let weeks = vec![
            summary("01.11", date(2026, 1, 5), 10000),
            summary("01.18", date(2026, 1, 12), 30000),
            summary("01.25", date(2026, 1, 19), 10000),
            summary("02.01", date(2026, 1, 26), 30000),
        ];

        let stats = summarize(&weeks);
        assert_eq!(stats.max_week.unwrap().label, "01.18");
        assert_eq!(stats.min_week.unwrap().label, "01.11");
    }

    #[test]
    fn test_cumulative_excludes_open_week() {
        let history_start = date(2025, 12, 29);
        let anchor = date(2026, 1, 14); // Wednesday of the third week
        let participants = vec![participant(1, "Alice"), participant(2, "Bob")];

        let mut id = 0;
        let mut submissions =
            submissions_in_week(&mut id, 1, week_of(date(2025, 12, 29)), 4);
        submissions.extend(submissions_in_week(&mut id, 1, week_of(date(2026, 1, 5)), 2));
        // the open week: Alice has a shortfall here already
        submissions.extend(submissions_in_week(&mut id, 1, week_of(anchor), 1));

        let totals = compute_cumulative_fines(
            &submissions,
            &participants,
            history_start,
            last_completed_day(anchor),
        );

        assert_eq!(totals[&1], 10000);
        assert_eq!(totals[&2], 40000);
    }

    #[test]
    fn test_cumulative_ignores_submissions_before_history_start() {
        let participants = vec![participant(1, "Alice")];
        let submissions = vec![submission_on(1, 1, date(2025, 12, 28))];

        let totals = compute_cumulative_fines(
            &submissions,
            &participants,
            date(2025, 12, 29),
            date(2026, 1, 4),
        );
        assert_eq!(totals[&1], 20000);
    }

    #[test]
    fn test_cumulative_before_history_start_is_zero() {
        let participants = vec![participant(1, "Alice")];
        let totals =
            compute_cumulative_fines(&[], &participants, date(2026, 3, 2), date(2026, 2, 1));
        assert_eq!(totals[&1], 0);
    }

    #[test]
    fn test_removing_only_submission_restores_full_fine() {
        let week = week_of(date(2026, 2, 4));
        let participants = vec![participant(1, "Alice")];
        let mut submissions = vec![submission_on(1, 1, date(2026, 2, 4))];

        let before = compute_week_fines(&submissions, &participants, week);
        assert_eq!(before[0].fine, 15000);

        submissions.retain(|s| s.id != 1);
        let after = compute_week_fines(&submissions, &participants, week);
        assert_eq!(after[0].count, 0);
        assert_eq!(after[0].fine, 20000);
    }

    #[test]
    fn test_leaderboard_orders_by_count() {
        let week = week_of(date(2026, 2, 4));
        let participants = vec![
            participant(1, "Alice"),
            participant(2, "Bob"),
            participant(3, "Charlie"),
            participant(4, "Dana"),
        ];
        let mut id = 0;
        let mut submissions = submissions_in_week(&mut id, 1, week, 1);
        submissions.extend(submissions_in_week(&mut id, 2, week, 5));
        submissions.extend(submissions_in_week(&mut id, 4, week, 1));

        let entries = compute_leaderboard(&submissions, &participants, week);
        let ids: Vec<i32> = entries.iter().map(|e| e.participant_id).collect();
        assert_eq!(ids, vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_participant_history_newest_first() {
        let history_start = date(2025, 12, 29);
        let anchor = date(2026, 1, 21); // fourth week is open
        let mut id = 0;
        let submissions = submissions_in_week(&mut id, 7, week_of(date(2026, 1, 5)), 3);

        let weeks = compute_participant_history(&submissions, 7, history_start, anchor);
        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[0].week_start, date(2026, 1, 12));
        assert_eq!(weeks[1].submissions, 3);
        assert_eq!(weeks[1].fine, 5000);
        assert_eq!(weeks[2].week_start, date(2025, 12, 29));
        assert_eq!(weeks.iter().map(|w| w.fine).sum::<i64>(), 45000);
    }

    #[test]
    fn test_selectable_weeks_and_clamping() {
        let history_start = date(2025, 12, 29);
        let anchor = date(2026, 1, 14);

        let options = selectable_weeks(history_start, anchor);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].offset, 0);
        assert_eq!(options[0].week_start, date(2026, 1, 12));
        assert_eq!(options[2].label, "2025. 12. 29. ~ 2026. 1. 4.");

        assert_eq!(select_week(history_start, anchor, 1).start(), date(2026, 1, 5));
        assert_eq!(select_week(history_start, anchor, 10).start(), date(2025, 12, 29));
    }

    #[test]
    fn test_select_week_clamps_huge_offsets() {
        let history_start = date(2025, 12, 29);
        let anchor = date(2026, 2, 12);

        assert_eq!(
            select_week(history_start, anchor, u32::MAX).start(),
            date(2025, 12, 29)
        );
        assert_eq!(select_week(history_start, anchor, 6).start(), date(2025, 12, 29));
        assert_eq!(select_week(history_start, anchor, 5).start(), date(2026, 1, 5));
    }

    #[test]
    fn test_select_week_before_history_start() {
        let history_start = date(2026, 3, 4);
        let week = select_week(history_start, date(2026, 2, 1), u32::MAX);
        assert_eq!(week.start(), date(2026, 3, 2));
    }

    #[test]
    fn test_check_anchor_window() {
        let history_start = date(2025, 12, 29);

        assert!(check_anchor(history_start, date(2026, 2, 12)).is_ok());
        assert!(check_anchor(history_start, date(2025, 6, 1)).is_ok());
        assert!(check_anchor(history_start, history_start + chrono::Days::new(7 * 520)).is_ok());
        assert!(check_anchor(history_start, history_start + chrono::Days::new(7 * 521)).is_err());
        assert!(check_anchor(history_start, date(200000, 1, 1)).is_err());
        assert!(check_anchor(history_start, NaiveDate::MAX).is_err());
        assert!(check_anchor(history_start, NaiveDate::MIN).is_err());
    }

    #[test]
    fn test_statistics_over_twelve_computed_weeks() {
        let anchor = date(2026, 3, 25); // Wednesday
        let participants = vec![participant(1, "Alice"), participant(2, "Bob")];

        // Alice meets the minimum every week; Bob's counts vary
        let bob_counts = [3, 3, 3, 3, 0, 3, 3, 3, 4, 3, 3, 3];
        let first = Week::containing(anchor).offset(-12);
        let mut id = 0;
        let mut submissions = Vec::new();
        for (i, &count) in bob_counts.iter().enumerate() {
            let week = first.offset(i as i64);
            submissions.extend(submissions_in_week(&mut id, 1, week, 4));
            submissions.extend(submissions_in_week(&mut id, 2, week, count));
        }

        let weeks = compute_trailing_weeks(&submissions, &participants, anchor, 12);
        assert_eq!(weeks.len(), 12);
        assert_eq!(weeks[0].week_start, first.start());

        let stats = summarize(&weeks);
        // ten weeks at 5000, one at 20000, one at 0
        assert_eq!(stats.total_fines, 70000);
        assert_eq!(stats.average_fine, 5833);

        let max = stats.max_week.unwrap();
        assert_eq!(max.week_start, first.offset(4).start());
        assert_eq!(max.total_fine, 20000);

        let min = stats.min_week.unwrap();
        assert_eq!(min.week_start, first.offset(8).start());
        assert_eq!(min.total_fine, 0);
    }

    #[test]
    fn test_selectable_weeks_empty_before_history() {
        assert!(selectable_weeks(date(2026, 3, 2), date(2026, 2, 1)).is_empty());
    }
}
