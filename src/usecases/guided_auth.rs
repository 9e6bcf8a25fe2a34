use std::io;

use thiserror::Error;

use crate::{
    infra::kv_store::KeyValueStore,
    usecases::session_store::{AuthError, SessionStore},
};

pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub choice_attempts: usize,
    pub form_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            choice_attempts: 3,
            form_attempts: 3,
        }
    }
}

pub trait AuthTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()>;
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
    fn prompt_secret(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

pub struct StdTerminal;

impl AuthTerminal for StdTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        println!("{line}");
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        use std::io::Write;

        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }

    fn prompt_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match rpassword::prompt_password(prompt) {
            Ok(password) => Ok(Some(password)),
            Err(source) if source.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(source) => Err(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuidedAuthOutcome {
    Authenticated,
    ExitWithGuidance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn validate_login(email: &str, password: &str) -> Result<(), FormError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(FormError::MissingFields);
    }

    Ok(())
}

pub fn validate_registration(form: &RegistrationForm) -> Result<(), FormError> {
    let fields = [
        &form.name,
        &form.email,
        &form.password,
        &form.confirm_password,
    ];
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(FormError::MissingFields);
    }
    if form.password != form.confirm_password {
        return Err(FormError::PasswordMismatch);
    }
    if form.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(FormError::PasswordTooShort);
    }

    Ok(())
}

/// Interactive login/register on the plain terminal before the chat shell
/// takes over the screen.
pub async fn run_guided_auth<S: KeyValueStore>(
    terminal: &mut dyn AuthTerminal,
    sessions: &mut SessionStore<S>,
    retry_policy: &RetryPolicy,
) -> io::Result<GuidedAuthOutcome> {
    terminal.print_line("No saved session found. Sign in to start chatting.")?;

    let Some(mode) = collect_mode(terminal, retry_policy.choice_attempts)? else {
        return Ok(GuidedAuthOutcome::ExitWithGuidance);
    };

    let authenticated = match mode {
        AuthMode::Login => login_flow(terminal, sessions, retry_policy.form_attempts).await?,
        AuthMode::Register => {
            register_flow(terminal, sessions, retry_policy.form_attempts).await?
        }
    };

    let Some(display_name) = authenticated else {
        return Ok(GuidedAuthOutcome::ExitWithGuidance);
    };

    terminal.print_line(&format!("Welcome, {display_name}!"))?;
    Ok(GuidedAuthOutcome::Authenticated)
}

fn collect_mode(terminal: &mut dyn AuthTerminal, attempts: usize) -> io::Result<Option<AuthMode>> {
    for attempt in 1..=attempts {
        let Some(choice) = terminal.prompt_line("[l]ogin or [r]egister: ")? else {
            return cancelled(terminal);
        };

        match choice.to_ascii_lowercase().as_str() {
            "l" | "login" => return Ok(Some(AuthMode::Login)),
            "r" | "register" => return Ok(Some(AuthMode::Register)),
            _ => terminal.print_line(&format!(
                "Please type 'l' or 'r'. Attempts left: {}",
                attempts.saturating_sub(attempt)
            ))?,
        }
    }

    too_many_attempts(terminal)
}

async fn login_flow<S: KeyValueStore>(
    terminal: &mut dyn AuthTerminal,
    sessions: &mut SessionStore<S>,
    attempts: usize,
) -> io::Result<Option<String>> {
    for attempt in 1..=attempts {
        terminal.print_line("Sign in to your account.")?;
        let Some(email) = terminal.prompt_line("Email: ")? else {
            return cancelled(terminal);
        };
        let Some(password) = terminal.prompt_secret("Password: ")? else {
            return cancelled(terminal);
        };

        let failure = match validate_login(&email, &password) {
            Err(form_error) => form_error.to_string(),
            Ok(()) => match sessions.login(&email, &password).await {
                Ok(identity) => return Ok(Some(identity.display_name.clone())),
                Err(error) => {
                    log_auth_failure("login", &error);
                    "Invalid email or password".to_owned()
                }
            },
        };

        report_failure(terminal, &failure, attempts.saturating_sub(attempt))?;
    }

    too_many_attempts(terminal)
}

async fn register_flow<S: KeyValueStore>(
    terminal: &mut dyn AuthTerminal,
    sessions: &mut SessionStore<S>,
    attempts: usize,
) -> io::Result<Option<String>> {
    for attempt in 1..=attempts {
        terminal.print_line("Create a new account.")?;
        let Some(form) = collect_registration(terminal)? else {
            return cancelled(terminal);
        };

        let failure = match validate_registration(&form) {
            Err(form_error) => form_error.to_string(),
            Ok(()) => match sessions
                .register(&form.name, &form.email, &form.password)
                .await
            {
                Ok(identity) => return Ok(Some(identity.display_name.clone())),
                Err(error) => {
                    log_auth_failure("register", &error);
                    "Registration failed. Please try again.".to_owned()
                }
            },
        };

        report_failure(terminal, &failure, attempts.saturating_sub(attempt))?;
    }

    too_many_attempts(terminal)
}

fn collect_registration(terminal: &mut dyn AuthTerminal) -> io::Result<Option<RegistrationForm>> {
    let Some(name) = terminal.prompt_line("Name: ")? else {
        return Ok(None);
    };
    let Some(email) = terminal.prompt_line("Email: ")? else {
        return Ok(None);
    };
    let Some(password) = terminal.prompt_secret("Password: ")? else {
        return Ok(None);
    };
    let Some(confirm_password) = terminal.prompt_secret("Confirm password: ")? else {
        return Ok(None);
    };

    Ok(Some(RegistrationForm {
        name,
        email,
        password,
        confirm_password,
    }))
}

fn report_failure(
    terminal: &mut dyn AuthTerminal,
    message: &str,
    attempts_left: usize,
) -> io::Result<()> {
    terminal.print_line(&format!("{message} Attempts left: {attempts_left}"))
}

fn log_auth_failure(action: &'static str, error: &AuthError) {
    match error {
        AuthError::Storage(_) => {
            tracing::warn!(action, error = %error, "auth succeeded but session was not saved")
        }
        _ => tracing::info!(action, error = %error, "auth attempt failed"),
    }
}

fn cancelled<T>(terminal: &mut dyn AuthTerminal) -> io::Result<Option<T>> {
    terminal.print_line("Input cancelled (EOF). Run chatterm again to sign in.")?;
    Ok(None)
}

fn too_many_attempts<T>(terminal: &mut dyn AuthTerminal) -> io::Result<Option<T>> {
    terminal.print_line("Too many failed attempts. Run chatterm again to retry.")?;
    Ok(None)
}
