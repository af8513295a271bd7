//! Location area commands: `map`, `mapb`, `explore`

use std::io::Write;

use crate::error::{PokedexError, Result};
use crate::models::NamedApiResourceList;
use crate::session::Session;

pub(super) async fn map<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    match session.next_page().await? {
        Some(page) => print_page(&page, out),
        None => {
            writeln!(out, "you're on the last page.")?;
            Ok(())
        }
    }
}

pub(super) async fn map_back<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    match session.previous_page().await? {
        Some(page) => print_page(&page, out),
        None => {
            writeln!(out, "you're on the first page.")?;
            Ok(())
        }
    }
}

fn print_page<W: Write>(page: &NamedApiResourceList, out: &mut W) -> Result<()> {
    for area in &page.results {
        writeln!(out, "{}", area.name)?;
    }
    Ok(())
}

pub(super) async fn explore<W: Write>(
    session: &mut Session,
    args: &[String],
    out: &mut W,
) -> Result<()> {
    let area = match args {
        [area] if !area.is_empty() => area,
        [_] => {
            return Err(PokedexError::InvalidArguments(
                "blank location-area name supplied".to_string(),
            ))
        }
        _ => {
            return Err(PokedexError::InvalidArguments(
                "only one argument, the location-area name, should be supplied".to_string(),
            ))
        }
    };

    writeln!(out, "Exploring {area}...")?;
    let location = session.explore(area).await?;

    writeln!(out, "Found Pokemon:")?;
    for name in location.pokemon_names() {
        writeln!(out, " - {name}")?;
    }
    Ok(())
}
