pub mod catalog;
pub mod gateway;
pub mod listing;
pub mod rating;

pub use catalog::CatalogService;
pub use gateway::{MovieApi, MovieGateway};
pub use listing::{FetchTicket, MovieListing};
pub use rating::{FormState, RatingForm};
