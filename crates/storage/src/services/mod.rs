pub mod calendar;
pub mod fine_ledger;
