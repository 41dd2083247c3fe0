//! The interactive shell: maps commands onto `TodoApp` operations and runs
//! the event loop that owns the controller.
//!
//! # Design
//! [`Shell`] is synchronous and performs no I/O, so it is tested directly by
//! feeding it lines and completions. [`run`] is the async loop around it: it
//! selects over input lines and request completions, so the terminal stays
//! usable while requests are outstanding. Only the loop task touches the
//! shell; request tasks communicate back through a channel.

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use todo_core::{ApiError, HttpResponse, Outgoing, Ticket, TodoApp, TodoId};

use crate::commands::{self, Command, HELP};
use crate::render::render;
use crate::transport::Transport;

/// What the loop should do after a line has been handled.
#[derive(Debug, Default)]
pub struct Reply {
    /// Request to execute, if the command issued one.
    pub outgoing: Option<Outgoing>,
    /// Text to print.
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Self::default()
        }
    }
}

/// Command interpreter around a single `TodoApp`.
#[derive(Debug)]
pub struct Shell {
    app: TodoApp,
    /// Set after `delete <n>`; the next line answers the prompt.
    confirming: Option<TodoId>,
}

impl Shell {
    pub fn new(app: TodoApp) -> Self {
        Self {
            app,
            confirming: None,
        }
    }

    pub fn app(&self) -> &TodoApp {
        &self.app
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming.is_some()
    }

    /// Initial fetch plus the first render.
    pub fn start(&mut self) -> Reply {
        let outgoing = self.app.refresh();
        Reply {
            outgoing,
            output: render(&self.app),
            quit: false,
        }
    }

    pub fn complete(&mut self, ticket: Ticket, result: Result<HttpResponse, ApiError>) -> String {
        self.app.complete(ticket, result);
        render(&self.app)
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        if let Some(id) = self.confirming.take() {
            return self.answer_delete(&id, line);
        }

        match commands::parse(line) {
            Command::Empty => Reply::default(),
            Command::Refresh => self.issue(|app| app.refresh()),
            Command::List => Reply::text(render(&self.app)),
            Command::Title { text } => {
                self.app.set_title(text);
                Reply::text(render(&self.app))
            }
            Command::Description { text } => {
                self.app.set_description(text);
                Reply::text(render(&self.app))
            }
            Command::Submit => self.issue(TodoApp::submit),
            Command::Add { title, description } => {
                self.app.cancel_edit();
                self.app.set_title(title);
                self.app.set_description(description);
                self.issue(TodoApp::submit)
            }
            Command::Edit { index } => match self.resolve(index) {
                Ok(id) => {
                    self.app.edit(&id);
                    Reply::text(render(&self.app))
                }
                Err(reply) => reply,
            },
            Command::Cancel => {
                self.app.cancel_edit();
                Reply::text(render(&self.app))
            }
            Command::Toggle { index } => match self.resolve(index) {
                Ok(id) => self.issue(|app| app.toggle(&id)),
                Err(reply) => reply,
            },
            Command::Delete { index } => match self.resolve(index) {
                Ok(id) => {
                    let title = self.app.get(&id).map(|t| t.title.clone()).unwrap_or_default();
                    self.confirming = Some(id);
                    Reply::text(format!("Delete \"{title}\"? [y/N] "))
                }
                Err(reply) => reply,
            },
            Command::Help => Reply::text(HELP),
            Command::Quit => Reply {
                quit: true,
                ..Reply::default()
            },
            Command::Unknown { input } => {
                Reply::text(format!("unknown command: {input} (try `help`)\n"))
            }
            Command::InvalidArgs { error, .. } => Reply::text(format!("{error}\n")),
        }
    }

    fn answer_delete(&mut self, id: &TodoId, line: &str) -> Reply {
        let answer = line.trim().to_ascii_lowercase();
        let confirmed = matches!(answer.as_str(), "y" | "yes");
        if confirmed && self.app.get(id).is_none() {
            return Reply::text("item no longer exists, nothing deleted\n");
        }
        match self.app.delete(id, |_| confirmed) {
            Some(outgoing) => Reply {
                outgoing: Some(outgoing),
                output: render(&self.app),
                quit: false,
            },
            None => Reply::text("not deleted\n"),
        }
    }

    fn issue(&mut self, op: impl FnOnce(&mut TodoApp) -> Option<Outgoing>) -> Reply {
        let outgoing = op(&mut self.app);
        Reply {
            outgoing,
            output: render(&self.app),
            quit: false,
        }
    }

    /// Map a displayed 1-based position to an id. Positions are meaningless
    /// while a list fetch is outstanding.
    fn resolve(&self, index: usize) -> Result<TodoId, Reply> {
        if self.app.is_loading() {
            return Err(Reply::text("still loading, try again shortly\n"));
        }
        let view = self.app.view();
        index
            .checked_sub(1)
            .and_then(|i| view.items().get(i).map(|todo| todo.id.clone()))
            .ok_or_else(|| Reply::text(format!("no item {index}\n")))
    }
}

type Completion = (Ticket, Result<HttpResponse, ApiError>);

/// Drive `shell` from `input` until `quit` or end of input, writing
/// everything to `output`. Requests still in flight at exit are awaited so
/// their results are not lost.
pub async fn run<R, W>(
    mut shell: Shell,
    transport: Transport,
    input: R,
    mut output: W,
) -> anyhow::Result<Shell>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = input.lines();

    let reply = shell.start();
    dispatch(&transport, &tx, reply.outgoing);
    write(&mut output, &reply.output).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading input")? else {
                    debug!("end of input");
                    break;
                };
                let reply = shell.handle_line(&line);
                dispatch(&transport, &tx, reply.outgoing);
                write(&mut output, &reply.output).await?;
                if reply.quit {
                    break;
                }
            }
            Some((ticket, result)) = rx.recv() => {
                let text = shell.complete(ticket, result);
                write(&mut output, &text).await?;
            }
        }
    }

    while shell.app().pending() > 0 {
        info!(pending = shell.app().pending(), "waiting for outstanding requests");
        let Some((ticket, result)) = rx.recv().await else {
            break;
        };
        let text = shell.complete(ticket, result);
        write(&mut output, &text).await?;
    }
    Ok(shell)
}

fn dispatch(transport: &Transport, tx: &mpsc::UnboundedSender<Completion>, outgoing: Option<Outgoing>) {
    let Some(Outgoing { ticket, request }) = outgoing else {
        return;
    };
    let transport = transport.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = transport.send(request).await;
        // The receiver only goes away when the loop has exited.
        let _ = tx.send((ticket, result));
    });
}

async fn write<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> anyhow::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    output.write_all(text.as_bytes()).await.context("writing output")?;
    output.flush().await.context("flushing output")?;
    Ok(())
}
