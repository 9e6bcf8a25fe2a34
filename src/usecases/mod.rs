//! Use case layer: application workflows and orchestration.

pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod export;
pub mod guided_auth;
pub mod logout;
pub mod reply_dispatch;
pub mod send_message;
pub mod session_store;
pub mod shell;
pub mod theme_store;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
