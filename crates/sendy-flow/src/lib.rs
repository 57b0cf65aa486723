//! sendy-flow — the line-driven login shell.
//!
//! [`run`] reads commands from any async reader, feeds them to an [`App`] and
//! writes one status line per step. Gateway requests run on spawned tasks;
//! their results come back over an mpsc channel and are handled like any
//! other event, so the loop never blocks on the network.

pub mod app;
pub mod commands;
pub mod event;
pub mod fields;

pub use app::{status_line, App, AppState, Screen};
pub use event::{AppEvent, Direction, Effect};

use commands::Command;
use sendy_core::config::Config;
use sendy_gateway::WalletGateway;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// Drive the login flow from `input` until `quit` or end of input.
///
/// End of input does not abandon a request in flight: the loop keeps
/// waiting for completions before it returns. Returns the final app so
/// callers can inspect where the flow ended.
pub async fn run<R, W>(
    config: &Config,
    gateway: Arc<dyn WalletGateway>,
    input: R,
    output: W,
) -> anyhow::Result<App>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut completions) = mpsc::channel(8);
    let mut shell = Shell::new(App::new(config), gateway, output, tx);
    let mut lines = input.lines();
    let mut input_open = true;
    // `wait` parks the input until the pending requests complete
    let mut waiting = false;

    shell.print_status().await?;

    loop {
        if shell.app.state().quit || (!input_open && shell.in_flight == 0) {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open && !waiting => {
                match line? {
                    None => {
                        tracing::debug!(in_flight = shell.in_flight, "input closed");
                        input_open = false;
                    }
                    Some(line) => match Command::parse(&line) {
                        Ok(Command::Wait) => waiting = shell.in_flight > 0,
                        Ok(Command::Status) => shell.print_status().await?,
                        Ok(Command::Help) => shell.print(commands::HELP).await?,
                        Ok(cmd) => {
                            for event in cmd.into_events() {
                                shell.dispatch(event);
                            }
                            shell.print_status().await?;
                        }
                        Err(msg) if msg.is_empty() => {}
                        Err(msg) => shell.print(&format!("error: {msg}")).await?,
                    },
                }
            }
            Some(event) = completions.recv(), if shell.in_flight > 0 => {
                shell.in_flight -= 1;
                if shell.in_flight == 0 {
                    waiting = false;
                }
                shell.dispatch(event);
                shell.print_status().await?;
            }
            else => break,
        }
    }

    shell.output.flush().await?;
    Ok(shell.app)
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

struct Shell<W> {
    app: App,
    gateway: Arc<dyn WalletGateway>,
    output: W,
    tx: mpsc::Sender<AppEvent>,
    in_flight: usize,
}

impl<W: AsyncWrite + Unpin> Shell<W> {
    fn new(
        app: App,
        gateway: Arc<dyn WalletGateway>,
        output: W,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            app,
            gateway,
            output,
            tx,
            in_flight: 0,
        }
    }

    fn dispatch(&mut self, event: AppEvent) {
        if let Some(effect) = self.app.handle(event) {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: Effect) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        self.in_flight += 1;
        tracing::debug!(?effect, in_flight = self.in_flight, "issuing request");

        tokio::spawn(async move {
            let event = match effect {
                Effect::Activate(phone) => AppEvent::Activated(gateway.activate(&phone).await),
                Effect::Confirm { code, phone } => {
                    AppEvent::Confirmed(gateway.confirm(&code, &phone).await)
                }
            };
            if tx.send(event).await.is_err() {
                tracing::debug!("shell gone, dropping gateway result");
            }
        });
    }

    async fn print(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await
    }

    async fn print_status(&mut self) -> std::io::Result<()> {
        let line = status_line(self.app.state());
        self.print(&line).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
