//! SQLite storage implementation for tenant content.

mod model;
mod repository;

pub use model::{ContentItemDB, ContentItemUpdateDB};
pub use repository::ContentRepository;
