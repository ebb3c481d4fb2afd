use serde::{Deserialize, Serialize};

/// Search term used for the startup search when the config does not set one.
pub const DEFAULT_SEARCH_TERM: &str = "star";

/// Why a search is being run.
///
/// An initial load falls back to the stored favorites when the catalog
/// returns nothing, so the list is not empty on a first launch without
/// network. A user search never falls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadKind {
    InitialLoad,
    UserSearch,
}

impl LoadKind {
    pub fn is_initial(self) -> bool {
        matches!(self, LoadKind::InitialLoad)
    }
}
