//! PokeAPI resource models
//!
//! Serde representations of the PokeAPI responses the explorer reads.
//! Fields the explorer does not use are ignored on decode.

pub mod location;
pub mod pokemon;
pub mod resource;

// Re-export commonly used types
pub use location::{LocationArea, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
pub use resource::{NamedApiResource, NamedApiResourceList};
