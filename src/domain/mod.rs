//! Domain layer: core entities and business rules.

pub mod chat_session;
pub mod composer_state;
pub mod events;
pub mod identity;
pub mod message;
pub mod prompt_templates;
pub mod reply;
pub mod shell_state;
pub mod theme;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
