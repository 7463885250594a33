mod movie;
mod rating;
mod response;

pub use movie::{Movie, MovieDraft};
pub use rating::{RatingAggregate, RatingSubmission, MAX_SCORE, MIN_SCORE};
pub use response::{HealthStatus, RefreshOutcome};
