use std::collections::HashMap;

use scraper::Html;

use crate::domain::DrawRecord;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unexpected page markup: {0}")]
    Markup(String),
}

/// Turns one parsed lottery homepage into draw records.
pub trait ResultExtractor: Send + Sync {
    fn extract(&self, page: &Html) -> Result<Vec<DrawRecord>, ExtractError>;
}

/*
 Record layout for these sites is still undecided: each one has to be mapped
 against its live markup first. Until then they find nothing.
*/
macro_rules! unmapped_extractor {
    ($name:ident) => {
        pub struct $name;

        impl ResultExtractor for $name {
            fn extract(&self, _page: &Html) -> Result<Vec<DrawRecord>, ExtractError> {
                Ok(Vec::new())
            }
        }
    };
}

unmapped_extractor!(LotekaExtractor);
unmapped_extractor!(RealExtractor);
unmapped_extractor!(PrimeraExtractor);
unmapped_extractor!(NacionalExtractor);
unmapped_extractor!(LeidsaExtractor);

// Used for configured sites that have no strategy of their own
struct EmptyExtractor;

impl ResultExtractor for EmptyExtractor {
    fn extract(&self, _page: &Html) -> Result<Vec<DrawRecord>, ExtractError> {
        Ok(Vec::new())
    }
}

static EMPTY_EXTRACTOR: EmptyExtractor = EmptyExtractor;

pub struct ExtractorRegistry {
    extractors: HashMap<String, Box<dyn ResultExtractor>>,
}

impl ExtractorRegistry {
    pub fn empty() -> Self {
        ExtractorRegistry {
            extractors: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        ExtractorRegistry::empty()
            .with("loteka", LotekaExtractor)
            .with("real", RealExtractor)
            .with("primera", PrimeraExtractor)
            .with("nacional", NacionalExtractor)
            .with("leidsa", LeidsaExtractor)
    }

    pub fn with(mut self, site_id: &str, extractor: impl ResultExtractor + 'static) -> Self {
        self.register(site_id, extractor);
        self
    }

    /// Adds or replaces the strategy for `site_id`.
    pub fn register(&mut self, site_id: &str, extractor: impl ResultExtractor + 'static) {
        self.extractors
            .insert(site_id.to_string(), Box::new(extractor));
    }

    pub fn contains(&self, site_id: &str) -> bool {
        self.extractors.contains_key(site_id)
    }

    pub fn get(&self, site_id: &str) -> &dyn ResultExtractor {
        match self.extractors.get(site_id) {
            Some(extractor) => extractor.as_ref(),
            None => &EMPTY_EXTRACTOR,
        }
    }

    pub fn extract(&self, site_id: &str, page: &Html) -> Result<Vec<DrawRecord>, ExtractError> {
        if !self.contains(site_id) {
            log::debug!("No extractor registered for {}, using empty one", site_id);
        }
        self.get(site_id).extract(page)
    }
}
