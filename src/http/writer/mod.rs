pub mod standard;
pub mod types;

pub use standard::HttpWriter;
pub use types::WriterError;
