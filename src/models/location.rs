//! Location area models

use serde::{Deserialize, Serialize};

use super::NamedApiResource;

/// A location area and the creatures that can be encountered there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

/// A creature that can be encountered in a location area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedApiResource,
}

impl LocationArea {
    /// Names of every encounterable creature, in API order.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}
