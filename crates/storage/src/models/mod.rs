mod participant;
mod submission;
pub mod week;

pub use participant::{DEFAULT_EMOJI, Participant};
pub use submission::Submission;
pub use week::{DateRange, Week};
