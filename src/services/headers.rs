use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};

pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
];

pub const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.5";
pub const CONNECTION_VALUE: &str = "keep-alive";

pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Headers for a single request: a random browser user agent plus the static
/// accept/connection headers.
pub fn random_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(random_user_agent()));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
    );
    headers.insert(CONNECTION, HeaderValue::from_static(CONNECTION_VALUE));
    headers
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn user_agent_is_always_from_the_fixed_set() {
        for _ in 0..100 {
            let headers = random_headers();
            let user_agent = headers.get(USER_AGENT).unwrap().to_str().unwrap();
            assert!(USER_AGENTS.contains(&user_agent), "{}", user_agent);
        }
    }

    #[test]
    fn static_headers_never_change() {
        for _ in 0..100 {
            let headers = random_headers();
            assert_eq!(headers.get(ACCEPT).unwrap(), ACCEPT_VALUE);
            assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), ACCEPT_LANGUAGE_VALUE);
            assert_eq!(headers.get(CONNECTION).unwrap(), CONNECTION_VALUE);
            assert_eq!(headers.len(), 4);
        }
    }

    #[test]
    fn user_agent_choice_varies() {
        // 200 draws over 3 values; all landing on one is ~1e-95
        let seen: HashSet<&str> = (0..200).map(|_| random_user_agent()).collect();
        assert!(seen.len() > 1);
    }
}
