use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use super::random_headers;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("server answered with status {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

pub struct LotteryFetcher {
    client: Client,
    timeout: Duration,
}

impl LotteryFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(LotteryFetcher { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Downloads one page with freshly randomised headers. Anything but a
    /// 2xx answer is an error; there is no retry.
    pub async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        let res = self
            .client
            .get(url.clone())
            .headers(random_headers())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = res.text().await.map_err(|e| self.classify(e))?;
        log::debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(body)
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        match e.is_timeout() {
            true => FetchError::Timeout(self.timeout),
            false => FetchError::Transport(e),
        }
    }
}
