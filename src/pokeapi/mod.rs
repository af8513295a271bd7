//! PokeAPI Module
//!
//! The resource fetcher sitting between the commands and the network.

mod client;

pub use client::PokeApiClient;
