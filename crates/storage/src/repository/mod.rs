pub mod participant;
pub mod submission;
