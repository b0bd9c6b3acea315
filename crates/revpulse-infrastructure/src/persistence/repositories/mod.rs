pub mod affiliate_repo;
pub mod ledger_repo;
pub mod subscriber_repo;

pub use affiliate_repo::{SqliteAffiliateClickRepository, SqlitePageViewRepository};
pub use ledger_repo::SqliteLedgerRepository;
pub use subscriber_repo::SqliteSubscriberRepository;
