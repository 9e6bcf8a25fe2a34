use std::{path::Path, sync::mpsc, sync::Arc, time::Duration};

use anyhow::Result;
use tokio::runtime::Runtime;

use crate::{
    cli::{Cli, Command},
    domain::{self, shell_state::ShellExit},
    infra::{self, error::AppError, kv_store::FileStore, storage_layout::StorageLayout},
    ui::{self, CrosstermEventSource},
    usecases::{
        self, bootstrap,
        guided_auth::{run_guided_auth, GuidedAuthOutcome, RetryPolicy, StdTerminal},
        logout::logout_and_reset,
        reply_dispatch::TokioReplyDispatcher,
        send_message::{MockReplyGenerator, ReplyGenerator},
        session_store::{MockAuthenticator, SessionStore},
        shell::DefaultShellOrchestrator,
        theme_store::ThemeStore,
    },
};

const CHAT_TUI_START_FAILED: &str = "CHAT_TUI_START_FAILED";
const REPLY_WORKER_THREADS: usize = 2;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => run_chat(cli.config.as_deref()),
        Command::Logout => run_logout(cli.config.as_deref()),
    }
}

fn run_chat(config_path: Option<&Path>) -> Result<()> {
    let (context, _log_guard) = bootstrap::bootstrap(config_path)?;
    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let runtime = build_runtime()?;
    let storage = FileStore::new(context.layout.state_file());
    tracing::debug!(state_file = %storage.path().display(), "using state file");
    let authenticator = Arc::new(MockAuthenticator::new(Duration::from_millis(
        context.config.auth.request_delay_ms,
    )));
    let mut sessions = SessionStore::new(storage.clone(), authenticator);
    let mut themes = ThemeStore::new(storage);
    themes.restore();

    let mut just_authenticated = false;
    if sessions.restore().is_none() {
        tracing::info!("starting guided CLI authentication");

        let mut terminal = StdTerminal;
        let outcome = runtime.block_on(run_guided_auth(
            &mut terminal,
            &mut sessions,
            &RetryPolicy::default(),
        ))?;
        if outcome == GuidedAuthOutcome::ExitWithGuidance {
            return Ok(());
        }
        just_authenticated = true;
    }

    let (reply_tx, reply_rx) = mpsc::channel();
    let generator: Arc<dyn ReplyGenerator> =
        Arc::new(MockReplyGenerator::from_config(&context.config.chat));
    let dispatcher = TokioReplyDispatcher::new(runtime.handle().clone(), generator, reply_tx);
    let mut orchestrator =
        DefaultShellOrchestrator::new(sessions, themes, dispatcher, context.export_dir());
    let mut event_source = CrosstermEventSource::new(reply_rx);

    match ui::shell::start(&mut event_source, &mut orchestrator) {
        Ok(ShellExit::LoggedOut) => println!("Logged out. Run chatterm to sign in again."),
        Ok(ShellExit::Quit) => {}
        Err(error) if just_authenticated => report_post_auth_tui_failure(&error),
        Err(error) => return Err(error),
    }

    Ok(())
}

fn run_logout(config_path: Option<&Path>) -> Result<()> {
    let (layout, _log_guard) = match bootstrap::bootstrap(config_path) {
        Ok((context, guard)) => (context.layout, Some(guard)),
        Err(error) => {
            tracing::warn!(
                error = ?error,
                "logout fallback: bootstrap failed, continuing with local cleanup"
            );
            (StorageLayout::resolve()?, None)
        }
    };

    let mut sessions = SessionStore::new(
        FileStore::new(layout.state_file()),
        Arc::new(MockAuthenticator::new(Duration::ZERO)),
    );
    let outcome = logout_and_reset(&mut sessions);
    tracing::info!(was_signed_in = outcome.was_signed_in, "logout completed");

    if outcome.was_signed_in {
        println!("Logged out. Saved session removed.");
    } else {
        println!("No saved session found. Nothing to do.");
    }

    Ok(())
}

fn build_runtime() -> Result<Runtime, AppError> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(REPLY_WORKER_THREADS)
        .thread_name("chatterm-reply")
        .enable_time()
        .build()
        .map_err(AppError::RuntimeStart)
}

fn report_post_auth_tui_failure(error: &anyhow::Error) {
    tracing::error!(
        code = CHAT_TUI_START_FAILED,
        error = ?error,
        "chat TUI failed to start after successful sign-in"
    );

    for line in post_auth_tui_fallback_lines(CHAT_TUI_START_FAILED) {
        eprintln!("{line}");
    }
}

fn post_auth_tui_fallback_lines(error_code: &str) -> [String; 3] {
    [
        "Signed in successfully. Session is saved.".to_owned(),
        format!("{error_code}: chat screen failed to start in this run."),
        "Please restart chatterm to open the chat with the saved session.".to_owned(),
    ]
}
