pub mod backend;
pub mod http;
pub mod reports;
pub mod resources;
pub mod response;

pub use backend::{Attachment, Backend, RequestBody};
pub use http::HttpBackend;
