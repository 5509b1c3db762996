use std::collections::HashSet;

use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub url: Url,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SiteRegistryError {
    #[error("site registry is empty")]
    Empty,
    #[error("site identifier `{0}` is configured more than once")]
    DuplicateId(String),
    #[error("site identifier `{0}` must be non-empty ascii letters, digits, '-' or '_'")]
    InvalidId(String),
    #[error("site `{id}` has an invalid url: {reason}")]
    InvalidUrl { id: String, reason: String },
}

/// Ordered set of sites scraped in one run. Order is registry order and is
/// kept all the way into the results document.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRegistry {
    sites: Vec<Site>,
}

impl SiteRegistry {
    pub fn new(sites: Vec<Site>) -> Result<Self, SiteRegistryError> {
        if sites.is_empty() {
            return Err(SiteRegistryError::Empty);
        }

        let mut seen_ids = HashSet::new();
        for site in sites.iter() {
            if !is_valid_site_id(&site.id) {
                return Err(SiteRegistryError::InvalidId(site.id.clone()));
            }
            if !seen_ids.insert(site.id.as_str()) {
                return Err(SiteRegistryError::DuplicateId(site.id.clone()));
            }
            match site.url.scheme() {
                "http" | "https" => {}
                other => {
                    return Err(SiteRegistryError::InvalidUrl {
                        id: site.id.clone(),
                        reason: format!("unsupported scheme `{}`", other),
                    })
                }
            }
        }

        Ok(SiteRegistry { sites })
    }

    /// Builds a registry from raw `(id, name, url)` triples, parsing each url.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, SiteRegistryError>
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let sites = entries
            .into_iter()
            .map(|(id, name, url)| {
                let id = id.into();
                let url: String = url.into();
                match Url::parse(&url) {
                    Ok(url) => Ok(Site {
                        id,
                        name: name.into(),
                        url,
                    }),
                    Err(e) => Err(SiteRegistryError::InvalidUrl {
                        id,
                        reason: e.to_string(),
                    }),
                }
            })
            .collect::<Result<Vec<Site>, SiteRegistryError>>()?;

        SiteRegistry::new(sites)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sites.iter().map(|site| site.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        SiteRegistry::from_entries(DEFAULT_SITES)
            .expect("built-in lottery sites form a valid registry")
    }
}

pub const DEFAULT_SITES: [(&str, &str, &str); 5] = [
    ("loteka", "Loteka", "https://www.loteka.com.do/"),
    ("real", "Real", "https://www.real.com.do/"),
    ("primera", "La Primera", "https://www.laprimera.com.do/"),
    ("nacional", "Nacional", "https://www.loterianacional.com.do/"),
    ("leidsa", "Leidsa", "https://www.leidsa.com/"),
];

// Identifiers end up in file names, keep them to a safe alphabet
fn is_valid_site_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
