use anyhow::Result;

use crate::{
    domain::shell_state::ShellExit,
    usecases::contracts::{AppEventSource, ShellOrchestrator},
};

use super::{terminal::TerminalSession, view};

/// Runs the chat screen until the user quits or logs out.
pub fn start(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
) -> Result<ShellExit> {
    tracing::info!(
        user = orchestrator.state().display_name(),
        theme = orchestrator.state().theme().as_label(),
        "starting chat shell"
    );

    let mut terminal = TerminalSession::new()?;
    run_loop(event_source, orchestrator, |state| {
        terminal.draw(|frame| view::render(frame, state))
    })
}

fn run_loop<D>(
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn ShellOrchestrator,
    mut draw: D,
) -> Result<ShellExit>
where
    D: FnMut(&crate::domain::shell_state::ShellState) -> Result<()>,
{
    while orchestrator.state().is_running() {
        draw(orchestrator.state())?;

        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event)?;
        }
    }

    let exit = orchestrator.state().exit().unwrap_or(ShellExit::Quit);
    tracing::info!(exit = ?exit, "chat shell stopped");
    Ok(exit)
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        domain::{
            chat_session::ReplyTicket,
            events::{AppEvent, KeyInput, ReplyDelivery},
        },
        infra::kv_store::MemoryStore,
        ui::event_source::MockEventSource,
        usecases::{
            contracts::ReplyDispatcher,
            session_store::{MockAuthenticator, SessionStore},
            shell::DefaultShellOrchestrator,
            theme_store::ThemeStore,
        },
    };

    #[derive(Default)]
    struct NoopDispatcher;

    impl ReplyDispatcher for NoopDispatcher {
        fn dispatch(&mut self, _ticket: ReplyTicket) {}
    }

    fn orchestrator() -> DefaultShellOrchestrator<MemoryStore, NoopDispatcher> {
        let storage = MemoryStore::default();
        let dir = std::env::temp_dir().join("chatterm-shell-loop-test");
        DefaultShellOrchestrator::new(
            SessionStore::new(
                storage.clone(),
                Arc::new(MockAuthenticator::new(Duration::ZERO)),
            ),
            ThemeStore::new(storage),
            NoopDispatcher,
            dir,
        )
    }

    #[test]
    fn mock_source_produces_quit_event() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let event = source.next_event().expect("must read mock event");

        assert_eq!(event, Some(AppEvent::QuitRequested));
    }

    #[test]
    fn loop_draws_until_quit() {
        let mut source = MockEventSource::from(vec![
            AppEvent::Tick,
            AppEvent::InputKey(KeyInput::new("h", false)),
            AppEvent::QuitRequested,
        ]);
        let mut orchestrator = orchestrator();
        let mut frames = 0;

        let exit = run_loop(&mut source, &mut orchestrator, |_| {
            frames += 1;
            Ok(())
        })
        .expect("loop should finish");

        assert_eq!(exit, ShellExit::Quit);
        assert_eq!(frames, 3);
        assert_eq!(orchestrator.state().composer().text(), "h");
    }

    #[test]
    fn loop_reports_logout() {
        let mut source =
            MockEventSource::from(vec![AppEvent::InputKey(KeyInput::new("o", true))]);
        let mut orchestrator = orchestrator();

        let exit = run_loop(&mut source, &mut orchestrator, |_| Ok(()))
            .expect("loop should finish");

        assert_eq!(exit, ShellExit::LoggedOut);
    }

    #[test]
    fn stale_reply_is_ignored_by_loop() {
        let mut other = crate::domain::chat_session::ChatSession::default();
        let ticket = other.begin_send("elsewhere").expect("send should start");
        let mut source = MockEventSource::from(vec![
            AppEvent::ReplyReady(ReplyDelivery {
                ticket,
                text: "late".to_owned(),
            }),
            AppEvent::QuitRequested,
        ]);
        let mut orchestrator = orchestrator();

        run_loop(&mut source, &mut orchestrator, |_| Ok(())).expect("loop should finish");

        assert_eq!(orchestrator.state().chat().messages().len(), 1);
    }
}
