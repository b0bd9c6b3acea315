mod click;
mod repository;

pub use click::AffiliateClick;
pub use repository::{AffiliateClickRepository, PageViewRepository};
