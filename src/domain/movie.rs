use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Catalog track id, stable across searches.
    pub id: i64,
    pub title: String,
    pub artwork_url: String,
    pub price: f64,
    pub genre: String,
    pub description: String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl MovieRecord {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artwork_url: String::new(),
            price: 0.0,
            genre: String::new(),
            description: String::new(),
            is_favorite: false,
        }
    }

    /// Copy of this record with the favorite flag set to `is_favorite`.
    pub fn with_favorite(&self, is_favorite: bool) -> Self {
        Self {
            is_favorite,
            ..self.clone()
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    pub fn favorite_marker(&self) -> &'static str {
        if self.is_favorite {
            "★"
        } else {
            " "
        }
    }
}
