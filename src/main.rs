use env_logger::Env;
use lottery_scraper::{
    configuration::get_scrape_config, services::ExtractorRegistry, startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_scrape_config()?;
    let extractors = ExtractorRegistry::with_defaults();

    run(&configuration, &extractors).await?;

    log::info!("Scraping completed!");
    Ok(())
}
