//! Fetch/render driver for one-shot and interactive sessions.
//!
//! The interactive loop runs on a single task: it waits on the next input
//! line and on every in-flight fetch at once, so commands keep being
//! accepted while requests are outstanding. Each completion is handed to
//! [`ViewState::complete`], which drops anything but the latest request.

use crate::api::{ArticleSource, NewsError};
use crate::models::{Article, Category};
use crate::outputs::{self, OutputTargets, text};
use crate::state::{FetchRequest, ViewState};
use futures::stream::{FuturesUnordered, StreamExt};
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  category <id>, c <id>   list a section (world, technology, business, sport, culture, science)
  search <text>, s <text> search all sections
  type <text>             edit the search box without submitting
  show                    print the current listing
  help                    print this help
  quit, q                 exit";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Category(Category),
    Search(String),
    Type(String),
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse an input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "category" | "c" => Command::Category(rest.parse()?),
            "search" | "s" => Command::Search(rest.to_string()),
            "type" => Command::Type(rest.to_string()),
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(cmd))
    }
}

/// Decode one raw input line, replacing invalid UTF-8 so that a single
/// mangled line cannot end the session.
fn decode_line(raw: &[u8]) -> String {
    let line = String::from_utf8_lossy(raw);
    if let std::borrow::Cow::Owned(_) = line {
        warn!(bytes = raw.len(), "Input line was not valid UTF-8; invalid bytes replaced");
    }
    line.into_owned()
}

async fn run_fetch<S: ArticleSource>(
    source: &S,
    req: FetchRequest,
) -> (u64, Result<Vec<Article>, NewsError>) {
    let result = source.fetch(&req.query).await;
    (req.seq, result)
}

/// Print the listing and refresh the output files. Write failures are
/// logged by [`outputs::publish`] and do not end the session.
async fn show<W: Write>(state: &ViewState, targets: &OutputTargets, out: &mut W) {
    if let Err(e) = write!(out, "{}", text::render_listing(state)).and_then(|_| out.flush()) {
        warn!(error = %e, "Failed writing listing to terminal");
    }
    let _ = outputs::publish(state, targets).await;
}

/// Issue `req`, wait for it, and render the result once.
#[instrument(level = "info", skip_all, fields(query = %req.query))]
pub async fn run_once<S, W>(
    source: &S,
    state: &mut ViewState,
    req: FetchRequest,
    targets: &OutputTargets,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    S: ArticleSource,
    W: Write,
{
    let (seq, result) = run_fetch(source, req).await;
    state.complete(seq, result);
    write!(out, "{}", text::render_listing(state))?;
    outputs::publish(state, targets).await
}

/// Run the command loop until `quit` or end of input.
///
/// `initial` is the startup fetch; it is in flight while the first commands
/// are read. On end of input the loop waits for outstanding fetches to
/// settle before returning.
#[instrument(level = "info", skip_all)]
pub async fn run_interactive<S, R, W>(
    source: &S,
    state: &mut ViewState,
    initial: FetchRequest,
    targets: &OutputTargets,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    S: ArticleSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut in_flight = FuturesUnordered::new();
    in_flight.push(run_fetch(source, initial));
    writeln!(out, "{HELP}\n")?;
    show(state, targets, out).await;

    let mut input = input;
    // Kept across iterations: `read_until` leaves partial reads here when
    // the fetch branch wins the select.
    let mut buf = Vec::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            read = input.read_until(b'\n', &mut buf), if input_open => {
                if read? == 0 && buf.is_empty() {
                    debug!(pending = in_flight.len(), "End of input");
                    input_open = false;
                    continue;
                }
                let line = decode_line(&buf);
                buf.clear();
                let cmd = match Command::parse(&line) {
                    Ok(Some(cmd)) => cmd,
                    Ok(None) => continue,
                    Err(msg) => {
                        writeln!(out, "{msg}")?;
                        continue;
                    }
                };
                match cmd {
                    Command::Quit => break,
                    Command::Help => writeln!(out, "{HELP}")?,
                    Command::Show => show(state, targets, out).await,
                    Command::Type(text) => {
                        state.set_search_term(text);
                        show(state, targets, out).await;
                    }
                    Command::Category(category) => match state.set_category(category) {
                        Some(req) => {
                            in_flight.push(run_fetch(source, req));
                            show(state, targets, out).await;
                        }
                        None => writeln!(out, "Already showing {}.", category.label())?,
                    },
                    Command::Search(text) => {
                        if let Some(req) = state.submit_search(&text) {
                            in_flight.push(run_fetch(source, req));
                            show(state, targets, out).await;
                        } else {
                            writeln!(out, "Enter some text to search for.")?;
                        }
                    }
                }
            }
            Some((seq, result)) = in_flight.next(), if !in_flight.is_empty() => {
                if state.complete(seq, result) {
                    show(state, targets, out).await;
                }
            }
            else => break,
        }
    }

    info!(abandoned = in_flight.len(), "Session finished");
    Ok(())
}
