use std::path::{Path, PathBuf};

use scraper::Html;

use crate::{
    configuration::ScrapeConfig,
    dal::page_capture_store,
    domain::{DrawRecord, ResultAggregate, Site},
};

use super::{ExtractError, ExtractorRegistry, FetchError, LotteryFetcher};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("could not fetch {site}: {source}")]
    Fetch {
        site: String,
        #[source]
        source: FetchError,
    },
    #[error("could not save page capture for {site}: {source}")]
    Capture {
        site: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not extract results for {site}: {source}")]
    Extract {
        site: String,
        #[source]
        source: ExtractError,
    },
}

impl ScrapeError {
    pub fn site(&self) -> &str {
        match self {
            ScrapeError::Fetch { site, .. }
            | ScrapeError::Capture { site, .. }
            | ScrapeError::Extract { site, .. } => site,
        }
    }
}

#[derive(Debug)]
pub enum SiteOutcome {
    Scraped(Vec<DrawRecord>),
    Failed(ScrapeError),
}

impl SiteOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, SiteOutcome::Failed(_))
    }

    /// Failed sites contribute an empty list to the results document.
    pub fn records(&self) -> &[DrawRecord] {
        match self {
            SiteOutcome::Scraped(records) => records,
            SiteOutcome::Failed(_) => &[],
        }
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub outcomes: Vec<(String, SiteOutcome)>,
    pub results_path: PathBuf,
}

impl RunReport {
    pub fn outcome(&self, site_id: &str) -> Option<&SiteOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| id == site_id)
            .map(|(_, outcome)| outcome)
    }

    pub fn scraped_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| !o.is_failed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failed()).count()
    }
}

pub fn aggregate_outcomes(outcomes: &[(String, SiteOutcome)]) -> ResultAggregate {
    let mut aggregate = ResultAggregate::new();
    for (site_id, outcome) in outcomes {
        aggregate.insert(site_id.clone(), outcome.records().to_vec());
    }
    aggregate
}

/// Visits every configured site in registry order, one at a time, pausing
/// between sites. A failing site never stops the loop.
pub async fn scrape_sites(
    config: &ScrapeConfig,
    fetcher: &LotteryFetcher,
    extractors: &ExtractorRegistry,
) -> Vec<(String, SiteOutcome)> {
    let sites = config.registry.sites();
    let mut outcomes = Vec::with_capacity(sites.len());

    for (index, site) in sites.iter().enumerate() {
        log::info!("Scraping {}...", site.id);

        let outcome = match scrape_site(site, &config.output_dir, fetcher, extractors).await {
            Ok(records) => {
                log::info!("Found {} results for {}", records.len(), site.name);
                SiteOutcome::Scraped(records)
            }
            Err(e) => {
                log::error!("Error scraping {}: {}", site.id, e);
                SiteOutcome::Failed(e)
            }
        };
        outcomes.push((site.id.clone(), outcome));

        if index + 1 < sites.len() {
            config.delay.pause().await;
        }
    }

    outcomes
}

async fn scrape_site(
    site: &Site,
    output_dir: &Path,
    fetcher: &LotteryFetcher,
    extractors: &ExtractorRegistry,
) -> Result<Vec<DrawRecord>, ScrapeError> {
    let body = fetcher
        .fetch_page(&site.url)
        .await
        .map_err(|source| ScrapeError::Fetch {
            site: site.id.clone(),
            source,
        })?;

    page_capture_store::save_page_capture(output_dir, &site.id, &body)
        .await
        .map_err(|source| ScrapeError::Capture {
            site: site.id.clone(),
            source,
        })?;

    let page = Html::parse_document(&body);
    extractors
        .extract(&site.id, &page)
        .map_err(|source| ScrapeError::Extract {
            site: site.id.clone(),
            source,
        })
}
