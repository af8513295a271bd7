//! Pokedex - A command-line PokeAPI explorer
//!
//! Lists location areas, explores them and keeps a pokedex of caught
//! creatures. API responses go through a time-expiring cache whose
//! background reaper lives as long as the cache.

pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod pokeapi;
pub mod repl;
pub mod session;
pub mod tasks;

pub use cache::Cache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use pokeapi::PokeApiClient;
pub use session::Session;
