//! Fixture handlers served by the test server.

pub mod old_page;

pub use old_page::old_page;
