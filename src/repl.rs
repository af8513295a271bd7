//! Read-Eval-Print Loop
//!
//! Reads command lines from an async source, dispatches them through the
//! command registry and writes results to a sink.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::commands::{self, Flow};
use crate::error::Result;
use crate::session::Session;

pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it into words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Runs the loop until `exit` or end of input.
///
/// Command failures are reported on `out` and the loop keeps going; only
/// I/O errors on `input` or `out` end it early.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            return Ok(());
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = commands::lookup(name) else {
            writeln!(out, "Unknown command")?;
            continue;
        };

        match command.run(session, args, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(err) => {
                warn!(command = command.name, error = %err, "Command failed");
                writeln!(out, "Error calling {}: {}", command.name, err)?;
            }
        }
    }
}
