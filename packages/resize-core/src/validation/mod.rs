pub mod request;

pub use request::{is_thumbnail, validate_request};
