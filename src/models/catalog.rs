use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LangQuery {
    /// Catalog language (default `pt`)
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Card name to search for
    pub name: String,
    pub lang: Option<String>,
}
