use utoipa::OpenApi;

use crate::features::{fines, participants, submissions};

#[derive(OpenApi)]
#[openapi(
    paths(
        participants::handlers::list_participants,
        participants::handlers::get_participant,
        participants::handlers::create_participant,
        participants::handlers::update_emoji,
        participants::handlers::delete_participant,
        participants::handlers::list_participant_submissions,
        fines::handlers::get_participant_fines,
        submissions::handlers::create_submission,
        submissions::handlers::list_submissions,
        submissions::handlers::latest_submissions,
        submissions::handlers::month_calendar,
        submissions::handlers::delete_submission,
        fines::handlers::get_status,
        fines::handlers::get_history,
        fines::handlers::get_cumulative,
        fines::handlers::get_leaderboard,
        fines::handlers::get_rules,
    ),
    components(
        schemas(
            storage::dto::participant::ParticipantResponse,
            storage::dto::participant::CreateParticipantRequest,
            storage::dto::participant::UpdateEmojiRequest,
            storage::dto::submission::SubmissionResponse,
            storage::dto::submission::SubmissionWithParticipant,
            storage::dto::submission::CreateSubmissionRequest,
            storage::dto::submission::CalendarDay,
            storage::dto::submission::CalendarResponse,
            storage::dto::common::PaginationMeta,
            storage::dto::fine::ParticipantFine,
            storage::dto::fine::WeeklyFineSummary,
            storage::dto::fine::WeekTotal,
            storage::dto::fine::FineStatistics,
            storage::dto::fine::FineHistoryResponse,
            storage::dto::fine::CumulativeFine,
            storage::dto::fine::CumulativeFinesResponse,
            storage::dto::fine::FineStatusResponse,
            storage::dto::fine::WeekOption,
            storage::dto::fine::LeaderboardResponse,
            storage::dto::fine::ParticipantWeekFine,
            storage::dto::fine::ParticipantFineHistory,
            storage::dto::fine::FineRules,
        )
    ),
    tags(
        (name = "participants", description = "Study group members"),
        (name = "submissions", description = "TIL links logged by participants"),
        (name = "fines", description = "Weekly fines for missed submissions"),
    )
)]
pub struct ApiDoc;
