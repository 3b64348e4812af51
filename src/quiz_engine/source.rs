//! Country data sources.
//!
//! Providers hand over a `code -> display name` mapping in the flagcdn
//! `codes.json` shape:
//!
//! ```json
//! { "ar": "Argentina", "mx": "México", "gb-eng": "Inglaterra" }
//! ```
//!
//! [`build_countries`] turns that mapping into [`Country`] records: codes
//! with a `-` are subdivisions (`gb-eng`, `us-ca`) and are dropped, and every
//! flag locator comes from the configured URL template.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::quiz_engine::{
    config::QuizConfig,
    error::{QuizError, Result},
    models::Country,
};

/// Anything that can produce the raw `code -> name` mapping.
pub trait CountrySource {
    fn country_names(&self) -> Result<BTreeMap<String, String>>;
}

/// A mapping already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    names: BTreeMap<String, String>,
}

impl StaticSource {
    pub fn from_pairs<I, C, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        StaticSource {
            names: pairs.into_iter().map(|(c, n)| (c.into(), n.into())).collect(),
        }
    }
}

impl CountrySource for StaticSource {
    fn country_names(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.names.clone())
    }
}

/// A `codes.json` document, parsed on demand.
#[derive(Debug, Clone)]
pub struct JsonCodesSource {
    json: String,
}

impl JsonCodesSource {
    pub fn new(json: impl Into<String>) -> Self {
        JsonCodesSource { json: json.into() }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| QuizError::DataSource(format!("{}: {e}", path.display())))?;
        Ok(Self::new(json))
    }
}

impl CountrySource for JsonCodesSource {
    fn country_names(&self) -> Result<BTreeMap<String, String>> {
        serde_json::from_str(&self.json).map_err(|e| QuizError::DataSource(e.to_string()))
    }
}

/// Codes like `gb-eng` or `us-ca` name a subdivision, not a country.
pub fn is_subdivision(code: &str) -> bool {
    code.contains('-')
}

/// Build pool-ready countries from a provider mapping.
///
/// Codes are lowercased; blank names and subdivision codes are skipped.
/// Output is ordered by code.
pub fn build_countries(names: &BTreeMap<String, String>, config: &QuizConfig) -> Vec<Country> {
    let countries: Vec<Country> = names
        .iter()
        .filter(|(code, _)| !is_subdivision(code))
        .filter(|(_, name)| !name.trim().is_empty())
        .map(|(code, name)| {
            let code = code.trim().to_lowercase();
            let image_ref = config.flag_url(&code);
            Country::new(code, name.trim(), image_ref)
        })
        .collect();
    debug!("built {} countries from {} entries", countries.len(), names.len());
    countries
}
