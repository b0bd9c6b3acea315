mod gateway;
mod repository;
mod subscriber;

pub use gateway::{SubmissionGateway, SubmissionReceipt, SubmissionRequest};
pub use repository::SubscriberRepository;
pub use subscriber::Subscriber;
