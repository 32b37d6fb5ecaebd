//! Fine endpoints load one snapshot of participants and submissions per
//! request and hand it to the calculator in `storage::services::fine_ledger`.

use chrono::NaiveDate;
use sqlx::PgPool;
use storage::{
    dto::fine::{
        CumulativeFinesResponse, FineHistoryResponse, FineRules, FineStatusResponse,
        LeaderboardResponse, ParticipantFineHistory,
    },
    error::Result,
    models::{DateRange, Participant, Submission, Week},
    repository::{participant::ParticipantRepository, submission::SubmissionRepository},
    services::fine_ledger,
};

use crate::config::LedgerSettings;

struct Snapshot {
    participants: Vec<Participant>,
    submissions: Vec<Submission>,
}

async fn load_snapshot(pool: &PgPool, range: DateRange) -> Result<Snapshot> {
    let participants = ParticipantRepository::new(pool).list().await?;
    let submissions = if range.is_empty() {
        Vec::new()
    } else {
        SubmissionRepository::new(pool).list_in_range(range).await?
    };

    tracing::debug!(
        participants = participants.len(),
        submissions = submissions.len(),
        start = %range.start,
        end = %range.end,
        "Loaded fine snapshot"
    );

    Ok(Snapshot {
        participants,
        submissions,
    })
}

fn cumulative(
    snapshot: &Snapshot,
    history_start: NaiveDate,
    anchor: NaiveDate,
) -> CumulativeFinesResponse {
    let through = fine_ledger::last_completed_day(anchor);
    let totals = fine_ledger::compute_cumulative_fines(
        &snapshot.submissions,
        &snapshot.participants,
        history_start,
        through,
    );
    CumulativeFinesResponse::new(&snapshot.participants, &totals, history_start, through)
}

/// Fines for the last completed week plus running totals
pub async fn fine_status(
    pool: &PgPool,
    settings: LedgerSettings,
    anchor: NaiveDate,
) -> Result<FineStatusResponse> {
    let last_week = Week::containing(anchor).previous();
    let range = DateRange::new(
        settings.history_start.min(last_week.start()),
        last_week.end(),
    );
    let snapshot = load_snapshot(pool, range).await?;

    let participants =
        fine_ledger::compute_week_fines(&snapshot.submissions, &snapshot.participants, last_week);

    Ok(FineStatusResponse {
        week_start: last_week.start(),
        week_end: last_week.end(),
        total_fine: participants.iter().map(|p| p.fine).sum(),
        total_shortage: participants.iter().map(|p| p.shortage).sum(),
        cumulative: cumulative(&snapshot, settings.history_start, anchor),
        participants,
        rules: FineRules::default(),
    })
}

/// Per-participant totals from the history start through the last completed week
pub async fn cumulative_fines(
    pool: &PgPool,
    settings: LedgerSettings,
    anchor: NaiveDate,
) -> Result<CumulativeFinesResponse> {
    let range = DateRange::new(
        settings.history_start,
        fine_ledger::last_completed_day(anchor),
    );
    let snapshot = load_snapshot(pool, range).await?;

    Ok(cumulative(&snapshot, settings.history_start, anchor))
}

/// The trailing completed weeks, oldest first, with aggregate statistics
pub async fn fine_history(
    pool: &PgPool,
    anchor: NaiveDate,
    weeks: u32,
) -> Result<FineHistoryResponse> {
    let Some(range) = fine_ledger::trailing_range(anchor, weeks) else {
        return Ok(FineHistoryResponse {
            weeks: Vec::new(),
            statistics: fine_ledger::summarize(&[]),
        });
    };
    let snapshot = load_snapshot(pool, range).await?;

    let weeks = fine_ledger::compute_trailing_weeks(
        &snapshot.submissions,
        &snapshot.participants,
        anchor,
        weeks,
    );
    let statistics = fine_ledger::summarize(&weeks);

    Ok(FineHistoryResponse { weeks, statistics })
}

/// Ranking of a selected week, `week_offset` weeks back from the anchor's week
pub async fn leaderboard(
    pool: &PgPool,
    settings: LedgerSettings,
    anchor: NaiveDate,
    week_offset: u32,
) -> Result<LeaderboardResponse> {
    let week = fine_ledger::select_week(settings.history_start, anchor, week_offset);
    let range = DateRange::new(
        settings.history_start.min(week.start()),
        fine_ledger::last_completed_day(anchor).max(week.end()),
    );
    let snapshot = load_snapshot(pool, range).await?;

    let entries =
        fine_ledger::compute_leaderboard(&snapshot.submissions, &snapshot.participants, week);
    let total_fine = entries.iter().map(|e| e.fine).sum();
    let average_count = if entries.is_empty() {
        0.0
    } else {
        entries.iter().map(|e| f64::from(e.count)).sum::<f64>() / entries.len() as f64
    };

    Ok(LeaderboardResponse {
        week_start: week.start(),
        week_end: week.end(),
        label: week.range_label(),
        entries,
        total_fine,
        average_count,
        cumulative: cumulative(&snapshot, settings.history_start, anchor),
        weeks: fine_ledger::selectable_weeks(settings.history_start, anchor),
    })
}

/// Week-by-week fines of a single participant, newest first
pub async fn participant_fines(
    pool: &PgPool,
    settings: LedgerSettings,
    participant_id: i32,
    anchor: NaiveDate,
) -> Result<ParticipantFineHistory> {
    ParticipantRepository::new(pool)
        .find_by_id(participant_id)
        .await?;

    let repo = SubmissionRepository::new(pool);
    let range = DateRange::new(
        settings.history_start,
        fine_ledger::last_completed_day(anchor),
    );
    let submissions = if range.is_empty() {
        Vec::new()
    } else {
        repo.list_for_participant_in_range(participant_id, range)
            .await?
    };
    let total_submissions = repo.count_for_participant(participant_id).await?;

    let weeks = fine_ledger::compute_participant_history(
        &submissions,
        participant_id,
        settings.history_start,
        anchor,
    );

    Ok(ParticipantFineHistory {
        participant_id,
        total_fine: weeks.iter().map(|w| w.fine).sum(),
        total_submissions,
        weeks,
    })
}
