//! Authentication route handlers
//!
//! - Registration and email verification
//! - Login, token refresh, logout and the current profile
//! - Password reset and change

mod password;
mod registration;
mod session;

use actix_web::web;

use crate::middleware::JwtAuth;

pub use password::{change_password, forgot_password, reset_password};
pub use registration::{register, resend_code, verify_email};
pub use session::{login, logout, me, refresh};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/verify-email", web::post().to(verify_email))
        .route("/resend-code", web::post().to(resend_code))
        .route("/login", web::post().to(login))
        .route("/refresh", web::post().to(refresh))
        .route("/logout", web::post().to(logout).wrap(JwtAuth::new()))
        .route("/forgot-password", web::post().to(forgot_password))
        .route("/reset-password", web::post().to(reset_password))
        .route(
            "/change-password",
            web::post().to(change_password).wrap(JwtAuth::new()),
        )
        .route("/me", web::get().to(me).wrap(JwtAuth::new()));
}
