//! Account lifecycle: registration, email verification, login, token
//! refresh, logout and password recovery.

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::{validate_password_strength, PasswordHasher, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use service::{AuthService, AuthSession, ChangePassword, RegisterUser, Registration};
