//! Session task: serializes commands, factory events and timers onto one
//! owner.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::factory::QuestionSource;
use crate::protocol::{FactoryEvent, SessionCommand, ViewUpdate};
use crate::stats::StatisticService;

use super::state::{FeedbackTicket, QuizSession, SessionConfig};

/// Presentation-side handle to a running session.
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn send(&self, command: SessionCommand) {
        // Closed once the session has shut down; later commands are moot.
        let _ = self.commands.send(command);
    }

    pub fn start(&self) {
        self.send(SessionCommand::Start);
    }

    pub fn answer(&self, yes: bool) {
        self.send(SessionCommand::Answer { yes });
    }

    pub fn retry(&self) {
        self.send(SessionCommand::Retry);
    }

    pub fn restart(&self) {
        self.send(SessionCommand::Restart);
    }

    /// Stop the session and wait for its task to finish.
    pub async fn shutdown(self) {
        self.send(SessionCommand::Shutdown);
        if let Err(e) = self.task.await {
            tracing::error!("Session task failed: {}", e);
        }
    }
}

/// Spawn a session.
///
/// `make_source` receives the sender its question source must report to.
/// Returns the command handle and the stream of view updates.
pub fn spawn<S, F>(
    make_source: F,
    statistics: StatisticService,
    config: SessionConfig,
) -> (SessionHandle, mpsc::UnboundedReceiver<ViewUpdate>)
where
    S: QuestionSource + 'static,
    F: FnOnce(mpsc::UnboundedSender<FactoryEvent>) -> S,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = mpsc::unbounded_channel();
    let (timer_tx, timer_rx) = mpsc::unbounded_channel();

    let source = make_source(event_tx);
    let session = QuizSession::new(source, statistics, config, view_tx, timer_tx);
    let task = tokio::spawn(run(session, command_rx, event_rx, timer_rx));

    (
        SessionHandle {
            commands: command_tx,
            task,
        },
        view_rx,
    )
}

async fn run<S: QuestionSource>(
    mut session: QuizSession<S>,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    mut events: mpsc::UnboundedReceiver<FactoryEvent>,
    mut timers: mpsc::UnboundedReceiver<FeedbackTicket>,
) {
    tracing::info!("Quiz session started");
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => {
                    if !session.handle_command(command) {
                        break;
                    }
                }
                // Every handle is gone.
                None => break,
            },
            Some(event) = events.recv() => session.handle_factory_event(event),
            Some(ticket) = timers.recv() => session.handle_feedback_elapsed(ticket),
        }
    }
    tracing::info!("Quiz session stopped");
}
