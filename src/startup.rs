use crate::{
    configuration::ScrapeConfig,
    dal::results_store,
    services::{aggregate_outcomes, scrape_sites, ExtractorRegistry, LotteryFetcher, RunReport},
};

/// One full scrape: every site in turn, then the results document.
/// Site failures end up in the report; only a failure to build the client or
/// to write the results document is returned as an error.
pub async fn run(config: &ScrapeConfig, extractors: &ExtractorRegistry) -> anyhow::Result<RunReport> {
    /*
     1. Build one http client with the request timeout
     2. Fetch, capture and extract each site in registry order
     3. Fold outcomes into the aggregate, failed sites as empty lists
     4. Write lottery_results.json
    */
    log::info!(
        "Starting scrape of {} sites into {}",
        config.registry.len(),
        config.output_dir.display()
    );

    let fetcher = LotteryFetcher::new(config.request_timeout)?;
    let outcomes = scrape_sites(config, &fetcher, extractors).await;

    let aggregate = aggregate_outcomes(&outcomes);
    let results_path = results_store::save_results(&config.output_dir, &aggregate).await?;

    let report = RunReport {
        outcomes,
        results_path,
    };

    log::info!(
        "{} sites scraped, {} failed, {} results written to {}",
        report.scraped_count(),
        report.failed_count(),
        aggregate.total_records(),
        report.results_path.display()
    );
    if report.failed_count() > 0 {
        let failed: Vec<&str> = report
            .outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_failed())
            .map(|(id, _)| id.as_str())
            .collect();
        log::warn!("Sites without results this run: {}", failed.join(", "));
    }

    Ok(report)
}
