mod aggregate;
mod repository;
mod value_objects;


pub use aggregate::{DailyLedger, LedgerState};
pub use repository::LedgerRepository;
pub use value_objects::{CreditOutcome, ProgressSnapshot};
