pub mod errors;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;
pub mod writer;
