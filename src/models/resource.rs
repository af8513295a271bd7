//! Shared resource references and paginated lists

use serde::{Deserialize, Serialize};

/// A named link to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResource {
    /// Resource name, e.g. `canalave-city-area`
    pub name: String,
    /// Fully-qualified URL of the resource
    pub url: String,
}

/// One page of a paginated resource listing.
///
/// `next` and `previous` are null on the last and first page respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResourceList {
    /// Total number of resources across all pages
    #[serde(default)]
    pub count: Option<u32>,
    /// URL of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// Resources on this page
    pub results: Vec<NamedApiResource>,
}
