//! Pokedex commands: `catch`, `inspect`, `pokedex`

use std::io::Write;

use rand::Rng;

use super::first_arg;
use crate::error::Result;
use crate::models::Pokemon;
use crate::session::Session;

pub(super) async fn catch<W: Write>(
    session: &mut Session,
    args: &[String],
    out: &mut W,
) -> Result<()> {
    let name = first_arg(args, "must supply a pokemon name")?;
    let pokemon = session.find_pokemon(name).await?;
    let roll = rand::thread_rng().gen_range(0..100);

    throw(session, pokemon, roll, out)
}

fn throw<W: Write>(session: &mut Session, pokemon: Pokemon, roll: u32, out: &mut W) -> Result<()> {
    let name = pokemon.name.clone();
    writeln!(out, "Throwing a Pokeball at {name}...")?;
    if session.has_caught(&name) {
        writeln!(out, "{name} is already in your Pokedex.")?;
    }

    if session.throw_pokeball(pokemon, roll) {
        writeln!(out, "{name} was caught!")?;
        writeln!(out, "You may now inspect it with the inspect command.")?;
    } else {
        writeln!(out, "{name} escaped!")?;
    }
    Ok(())
}

pub(super) fn inspect<W: Write>(session: &Session, args: &[String], out: &mut W) -> Result<()> {
    let name = first_arg(args, "you must supply a pokemon to inspect")?;
    let pokemon = session.inspect(name)?;

    writeln!(out, "Name: {}", pokemon.name)?;
    writeln!(out, "Height: {}", pokemon.height)?;
    writeln!(out, "Weight: {}", pokemon.weight)?;
    writeln!(out, "Stats:")?;
    for stat in &pokemon.stats {
        writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
    }
    writeln!(out, "Types:")?;
    for kind in &pokemon.types {
        writeln!(out, "  - {}", kind.kind.name)?;
    }
    Ok(())
}

pub(super) fn pokedex<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    writeln!(out, "Your Pokedex:")?;
    for pokemon in session.pokedex() {
        writeln!(out, "  - {}", pokemon.name)?;
    }
    Ok(())
}
