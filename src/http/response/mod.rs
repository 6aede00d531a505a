pub mod builder;
pub mod headers;
pub mod types;

pub use builder::Response;
pub use types::{HttpStatusCode, ResponseStatusLine};
