//! Commands Module
//!
//! Static registry of REPL commands and their dispatch.
//!
//! # Commands
//! - `help` - Usage message
//! - `exit` - Leave the REPL
//! - `map` / `mapb` - Page forward / back through location areas
//! - `explore <area>` - List creatures in a location area
//! - `catch <name>` - Try to catch a creature
//! - `inspect <name>` - Show a caught creature
//! - `pokedex` - List caught creatures

mod collection;
mod navigation;

use std::io::Write;

use crate::error::{PokedexError, Result};
use crate::session::Session;

/// What the REPL should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

/// A registered command.
#[derive(Debug)]
pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    action: Action,
}

/// Every command, in the order `help` lists them.
pub const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        description: "Displays a help message",
        action: Action::Help,
    },
    Command {
        name: "exit",
        description: "Exit the Pokedex",
        action: Action::Exit,
    },
    Command {
        name: "map",
        description: "Displays the names of the next page of location areas in the Pokemon world.",
        action: Action::Map,
    },
    Command {
        name: "mapb",
        description: "Displays the names of the previous page of location areas in the Pokemon world.",
        action: Action::MapBack,
    },
    Command {
        name: "explore",
        description: "Lists the Pokemon found in a location area: explore <area-name>",
        action: Action::Explore,
    },
    Command {
        name: "catch",
        description: "Throws a Pokeball at a Pokemon: catch <pokemon-name>",
        action: Action::Catch,
    },
    Command {
        name: "inspect",
        description: "Shows the details of a caught Pokemon: inspect <pokemon-name>",
        action: Action::Inspect,
    },
    Command {
        name: "pokedex",
        description: "Lists every Pokemon you have caught",
        action: Action::Pokedex,
    },
];

/// Finds a command by name.
pub fn lookup(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|command| command.name == name)
}

impl Command {
    /// Runs the command with `args` (the words after the command name).
    pub async fn run<W: Write>(
        &self,
        session: &mut Session,
        args: &[String],
        out: &mut W,
    ) -> Result<Flow> {
        match self.action {
            Action::Help => help(out)?,
            Action::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Action::Map => navigation::map(session, out).await?,
            Action::MapBack => navigation::map_back(session, out).await?,
            Action::Explore => navigation::explore(session, args, out).await?,
            Action::Catch => collection::catch(session, args, out).await?,
            Action::Inspect => collection::inspect(session, args, out)?,
            Action::Pokedex => collection::pokedex(session, out)?,
        }
        Ok(Flow::Continue)
    }
}

fn help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    for command in COMMANDS {
        writeln!(out, "{}: {}", command.name, command.description)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Returns the first argument, or an error carrying `missing` when there is none.
fn first_arg<'a>(args: &'a [String], missing: &str) -> Result<&'a str> {
    args.first()
        .map(String::as_str)
        .filter(|arg| !arg.is_empty())
        .ok_or_else(|| PokedexError::InvalidArguments(missing.to_string()))
}
