pub mod error;
pub mod etag;
pub mod response;

pub use error::ApiError;
