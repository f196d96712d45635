//! SQLite storage implementation for behavioral events.

mod model;
mod repository;

pub use model::AnalyticsEventDB;
pub use repository::AnalyticsEventRepository;
