pub mod query;
pub mod story;

pub use query::{OrderBy, QueryParams, DEFAULT_SECTION};
pub use story::Story;
