pub mod common;
pub mod fine;
pub mod participant;
pub mod submission;
