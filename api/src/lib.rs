//! # VeriMail API
//!
//! HTTP surface for issuing and checking email verification codes.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
