//! Explorer Session
//!
//! Per-run state shared by the commands: the API client, the location-area
//! pagination cursor and the pokedex of caught creatures.

use std::collections::BTreeMap;

use tracing::info;
use url::Url;

use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, NamedApiResourceList, Pokemon};
use crate::pokeapi::PokeApiClient;

/// Chance out of 100 of catching a creature with the given base experience.
///
/// `100 - base_experience / 5`, floored at 0.
pub fn catch_chance(base_experience: u32) -> u32 {
    100u32.saturating_sub(base_experience / 5)
}

/// Explorer state for one REPL run.
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    next: Option<Url>,
    previous: Option<Url>,
    started: bool,
    pokedex: BTreeMap<String, Pokemon>,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self {
            client,
            next: None,
            previous: None,
            started: false,
            pokedex: BTreeMap::new(),
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Ends the session, handing back the client.
    pub fn into_client(self) -> PokeApiClient {
        self.client
    }

    // == Pagination ==
    /// Fetches the next page of location areas.
    ///
    /// The first call fetches the first page. Returns `None` once the last
    /// page has been shown.
    pub async fn next_page(&mut self) -> Result<Option<NamedApiResourceList>> {
        let url = if self.started {
            match self.next.clone() {
                Some(url) => url,
                None => return Ok(None),
            }
        } else {
            self.client.first_page_url()
        };

        self.load_page(&url).await.map(Some)
    }

    /// Fetches the previous page of location areas, or `None` on the first page.
    pub async fn previous_page(&mut self) -> Result<Option<NamedApiResourceList>> {
        let Some(url) = self.previous.clone() else {
            return Ok(None);
        };

        self.load_page(&url).await.map(Some)
    }

    async fn load_page(&mut self, url: &Url) -> Result<NamedApiResourceList> {
        let page = self.client.location_areas(url).await?;
        self.update_pagination(&page)?;
        Ok(page)
    }

    /// Moves the cursor to the links carried by `page`.
    pub fn update_pagination(&mut self, page: &NamedApiResourceList) -> Result<()> {
        let next = page.next.as_deref().map(Url::parse).transpose()?;
        let previous = page.previous.as_deref().map(Url::parse).transpose()?;

        self.next = next;
        self.previous = previous;
        self.started = true;
        Ok(())
    }

    pub fn next_url(&self) -> Option<&Url> {
        self.next.as_ref()
    }

    pub fn previous_url(&self) -> Option<&Url> {
        self.previous.as_ref()
    }

    // == Exploring ==
    pub async fn explore(&self, area: &str) -> Result<LocationArea> {
        self.client.location_area(area).await
    }

    pub async fn find_pokemon(&self, name: &str) -> Result<Pokemon> {
        self.client.pokemon(name).await
    }

    // == Pokedex ==
    /// Resolves a throw: `roll` in `0..100` catches when below the chance.
    ///
    /// A caught creature is added to the pokedex, replacing any earlier
    /// catch of the same name. Returns whether it was caught.
    pub fn throw_pokeball(&mut self, pokemon: Pokemon, roll: u32) -> bool {
        let chance = catch_chance(pokemon.base_experience.unwrap_or(0));
        if roll >= chance {
            return false;
        }

        info!(pokemon = %pokemon.name, "Caught");
        self.pokedex.insert(pokemon.name.clone(), pokemon);
        true
    }

    pub fn has_caught(&self, name: &str) -> bool {
        self.pokedex.contains_key(name)
    }

    /// Returns a caught creature.
    ///
    /// # Errors
    /// [`PokedexError::NotCaught`] if `name` is not in the pokedex.
    pub fn inspect(&self, name: &str) -> Result<&Pokemon> {
        self.pokedex
            .get(name)
            .ok_or_else(|| PokedexError::NotCaught(name.to_string()))
    }

    /// Caught creatures, ordered by name.
    pub fn pokedex(&self) -> impl Iterator<Item = &Pokemon> {
        self.pokedex.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::cache::Cache;
    use crate::models::NamedApiResource;

    fn session() -> Session {
        let cache = Cache::new(Duration::from_secs(3600)).unwrap();
        let client =
            PokeApiClient::new("http://192.0.2.1:12345", Duration::from_millis(200), 20, cache)
                .unwrap();
        Session::new(client)
    }

    fn pokemon(name: &str, base_experience: u32) -> Pokemon {
        Pokemon {
            id: 1,
            name: name.to_string(),
            base_experience: Some(base_experience),
            height: 7,
            weight: 69,
            stats: Vec::new(),
            types: Vec::new(),
        }
    }

    fn page(next: Option<&str>, previous: Option<&str>) -> NamedApiResourceList {
        NamedApiResourceList {
            count: None,
            next: next.map(str::to_string),
            previous: previous.map(str::to_string),
            results: vec![NamedApiResource {
                name: "area".to_string(),
                url: "https://pokeapi.co/api/v2/location-area/1/".to_string(),
            }],
        }
    }

    #[test]
    fn test_catch_chance() {
        assert_eq!(catch_chance(0), 100);
        assert_eq!(catch_chance(64), 88);
        assert_eq!(catch_chance(185), 63);
        assert_eq!(catch_chance(608), 0);
    }

    #[tokio::test]
    async fn test_update_pagination_first_page() {
        let mut session = session();
        let next = "https://pokeapi.co/api/v2/location-area/?offset=20&limit=20";

        session.update_pagination(&page(Some(next), None)).unwrap();

        assert_eq!(session.next_url().map(Url::as_str), Some(next));
        assert!(session.previous_url().is_none());
    }

    #[tokio::test]
    async fn test_update_pagination_second_page() {
        let mut session = session();
        let next = "https://pokeapi.co/api/v2/location-area/?offset=40&limit=20";
        let previous = "https://pokeapi.co/api/v2/location-area/?offset=0&limit=20";

        session
            .update_pagination(&page(Some(next), Some(previous)))
            .unwrap();

        assert_eq!(session.next_url().map(Url::as_str), Some(next));
        assert_eq!(session.previous_url().map(Url::as_str), Some(previous));
    }

    #[tokio::test]
    async fn test_update_pagination_rejects_bad_link() {
        let mut session = session();

        let result = session.update_pagination(&page(Some("/location-area/?offset=0"), None));

        assert!(matches!(result, Err(PokedexError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_last_page_returns_none() {
        let mut session = session();
        session.update_pagination(&page(None, None)).unwrap();

        assert!(session.next_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_first_page_has_no_previous() {
        let mut session = session();
        assert!(session.previous_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_throw_pokeball_catches_below_chance() {
        let mut session = session();

        assert!(session.throw_pokeball(pokemon("pidgey", 50), 89));
        assert!(session.has_caught("pidgey"));
        assert_eq!(session.inspect("pidgey").unwrap().name, "pidgey");
    }

    #[tokio::test]
    async fn test_throw_pokeball_escapes_at_chance() {
        let mut session = session();

        assert!(!session.throw_pokeball(pokemon("mewtwo", 340), 32));
        assert!(!session.has_caught("mewtwo"));
    }

    #[tokio::test]
    async fn test_inspect_uncaught() {
        let session = session();

        let result = session.inspect("pikachu");

        assert!(matches!(result, Err(PokedexError::NotCaught(_))));
    }

    #[tokio::test]
    async fn test_pokedex_sorted_by_name() {
        let mut session = session();
        session.throw_pokeball(pokemon("zubat", 0), 0);
        session.throw_pokeball(pokemon("abra", 0), 0);

        let names: Vec<_> = session.pokedex().map(|p| p.name.as_str()).collect();

        assert_eq!(names, ["abra", "zubat"]);
    }
}
