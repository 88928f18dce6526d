pub mod auth;
pub mod cors;
pub mod request_id;
pub mod security;

pub use auth::{AuthContext, JwtAuth};
pub use cors::create_cors;
pub use request_id::{RequestId, RequestIdMiddleware};
pub use security::SecurityMiddleware;
