//! The interactive event loop.
//!
//! User actions arrive as lines on the input. Fetches run as spawned tasks
//! and report back over a channel, so completions are handled as later
//! events in the same loop that owns all state. There is no cancellation:
//! superseded requests run to completion and the cache drops their results.

use crate::actions::{Action, HELP};
use crate::api::Fetcher;
use crate::app::{FetchRequest, NewsApp};
use crate::error::FetchError;
use crate::models::ArticlesPage;
use crate::outputs::page::render_page;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, instrument};

struct Completion {
    request: FetchRequest,
    result: Result<ArticlesPage, FetchError>,
}

/// Drives a [`NewsApp`] from `input` until `quit`, or until the input ends and
/// every outstanding fetch has completed. With `once` the input is not read:
/// the initial page is loaded, rendered, and the loop returns.
#[instrument(level = "info", skip_all, fields(once = once))]
pub async fn run<F, R, W>(mut app: NewsApp, fetcher: F, input: R, mut out: W, once: bool) -> io::Result<NewsApp>
where
    F: Fetcher,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = input.lines();
    let mut input_open = !once;
    let mut pending = 0usize;

    pending += dispatch(&fetcher, &tx, app.refresh());
    render(&app, &mut out)?;

    loop {
        if !input_open && pending == 0 {
            break;
        }
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    debug!(pending, "Input closed");
                    input_open = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Action>() {
                    Ok(Action::Quit) => break,
                    Ok(Action::Help) => {
                        app.dismiss_notice();
                        writeln!(out, "{HELP}")?;
                    }
                    Ok(action) => {
                        pending += dispatch(&fetcher, &tx, apply(&mut app, action));
                        pending += dispatch(&fetcher, &tx, app.refresh());
                        render(&app, &mut out)?;
                    }
                    Err(hint) => writeln!(out, "{hint}")?,
                }
            }
            Some(done) = rx.recv(), if pending > 0 => {
                pending -= 1;
                if app.complete(done.request, done.result) {
                    pending += dispatch(&fetcher, &tx, app.refresh());
                    render(&app, &mut out)?;
                }
            }
        }
    }

    info!(page = app.page(), "Session finished");
    Ok(app)
}

fn apply(app: &mut NewsApp, action: Action) -> Option<FetchRequest> {
    match action {
        Action::AllNews => {
            app.show_all();
            None
        }
        Action::Category(category) => Some(app.select_category(category)),
        Action::Search(text) => {
            app.set_search_input(&text);
            app.submit_search()
        }
        Action::Next => app.next_page(),
        Action::Previous => app.previous_page(),
        Action::Page(n) => app.change_page(n),
        Action::Help | Action::Quit => None,
    }
}

/// Spawn `request`, returning how many fetches were started.
fn dispatch<F: Fetcher>(fetcher: &F, tx: &UnboundedSender<Completion>, request: Option<FetchRequest>) -> usize {
    let Some(request) = request else {
        return 0;
    };
    debug!(target_key = %request.target, seq = request.ticket.seq, "Dispatching fetch");
    let fetcher = fetcher.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = fetcher.fetch(&request.target).await;
        let _ = tx.send(Completion { request, result });
    });
    1
}

fn render<W: Write>(app: &NewsApp, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", render_page(&app.view(), app.search_input(), app.notice()))?;
    out.flush()
}
