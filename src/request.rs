//! Extraction requests: what to open and how to label the batch
//!
//! A request is a label plus a target URL. The three kinds mirror the menu:
//! a storefront pass, a keyword search, and a genre browse.

use rand::seq::IndexedRandom;
use std::fmt;
use url::Url;

use crate::config::HarvestConfig;
use crate::error::{HarvestError, HarvestResult};
use crate::utils::{RANDOM_KEYWORDS, sanitize_label};

/// Browseable genre catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    SciFi,
    Documentary,
}

impl Genre {
    /// Catalogue in menu order
    pub const ALL: [Genre; 5] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::SciFi,
        Genre::Documentary,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::SciFi => "Sci-Fi",
            Genre::Documentary => "Documentary",
        }
    }

    /// Path segment under `/storefront/`
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Comedy => "comedy",
            Genre::Drama => "drama",
            Genre::SciFi => "scifi",
            Genre::Documentary => "documentary",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of parsing a 1-based numeric menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionParse {
    /// Zero-based index into the offered options
    Ok(usize),
    OutOfRange,
    NotANumber,
}

/// Parse a 1-based selection among `option_count` options.
#[must_use]
pub fn parse_selection(input: &str, option_count: usize) -> SelectionParse {
    match input.trim().parse::<i64>() {
        Ok(n) if n >= 1 && (n as u64) <= option_count as u64 => SelectionParse::Ok((n - 1) as usize),
        Ok(_) => SelectionParse::OutOfRange,
        Err(_) => SelectionParse::NotANumber,
    }
}

/// Parse a 1-based genre choice against [`Genre::ALL`].
pub fn parse_genre_choice(input: &str) -> HarvestResult<Genre> {
    match parse_selection(input, Genre::ALL.len()) {
        SelectionParse::Ok(index) => Ok(Genre::ALL[index]),
        SelectionParse::OutOfRange => Err(HarvestError::InvalidSelection(format!(
            "genre choice '{}' is not between 1 and {}",
            input.trim(),
            Genre::ALL.len()
        ))),
        SelectionParse::NotANumber => Err(HarvestError::InvalidSelection(format!(
            "genre choice '{}' is not a number",
            input.trim()
        ))),
    }
}

/// Pick a search keyword at random from the built-in list
#[must_use]
pub fn random_keyword() -> &'static str {
    RANDOM_KEYWORDS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(RANDOM_KEYWORDS[0])
}

/// One logical extraction: a batch label and the page to harvest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub label: String,
    pub url: String,
}

impl ExtractionRequest {
    #[must_use]
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    fn region_root(config: &HarvestConfig) -> String {
        format!("{}/region/{}", config.base_url(), config.region())
    }

    /// The region's storefront landing page
    #[must_use]
    pub fn storefront(config: &HarvestConfig) -> Self {
        Self::new(
            "storefront",
            format!("{}/storefront/", Self::region_root(config)),
        )
    }

    /// Keyword search. The keyword is URL-encoded in the query and sanitized in the label.
    pub fn search(config: &HarvestConfig, keyword: &str) -> HarvestResult<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(HarvestError::InvalidSelection(
                "search keyword is empty".to_string(),
            ));
        }

        let mut url = Url::parse(&format!(
            "{}/search/ref=atv_nb_sr",
            Self::region_root(config)
        ))
        .map_err(|e| HarvestError::Config(format!("Invalid search URL: {e}")))?;
        url.query_pairs_mut().append_pair("phrase", keyword);

        Ok(Self::new(
            sanitize_label(&format!("search_{keyword}")),
            url.to_string(),
        ))
    }

    /// Genre storefront page
    #[must_use]
    pub fn genre(config: &HarvestConfig, genre: Genre) -> Self {
        Self::new(
            format!("genre_{}", genre.name().to_lowercase()),
            format!("{}/storefront/{}", Self::region_root(config), genre.slug()),
        )
    }
}
