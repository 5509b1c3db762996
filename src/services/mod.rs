pub mod extractors;
pub mod headers;
pub mod lottery_fetcher;
pub mod lottery_scraper;
pub mod pacing;

pub use extractors::*;
pub use headers::*;
pub use lottery_fetcher::*;
pub use lottery_scraper::*;
pub use pacing::*;
