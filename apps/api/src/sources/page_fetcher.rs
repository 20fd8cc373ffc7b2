//! Page fetching — downloads a job posting and reduces it to readable text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, info};

use crate::sources::cookies::{CookieJar, LINKEDIN_REQUIRED_COOKIES};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Elements that carry posting content. Navigation, scripts and styling are skipped.
const CONTENT_SELECTOR: &str = "h1, h2, h3, p, li";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid job URL '{0}'")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Job page returned HTTP {0}")]
    Status(u16),

    #[error("Session cookies missing for {host}: {missing:?}")]
    MissingSessionCookies { host: String, missing: Vec<String> },

    #[error("Job page contained no readable text")]
    Empty,
}

/// The page-fetch capability consumed by the pipeline.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches pages over HTTP and extracts their text with an HTML parser.
pub struct HttpPageFetcher {
    client: Client,
    cookies: CookieJar,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration, cookies: CookieJar) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, cookies })
    }

    /// Session cookies are only sent to hosts that need them.
    fn cookie_header_for(&self, url: &Url) -> Result<Option<String>, FetchError> {
        let host = url.host_str().unwrap_or_default();
        if !is_linkedin(host) {
            return Ok(None);
        }

        let missing = self.cookies.missing(LINKEDIN_REQUIRED_COOKIES);
        if !missing.is_empty() {
            return Err(FetchError::MissingSessionCookies {
                host: host.to_string(),
                missing: missing.into_iter().map(String::from).collect(),
            });
        }

        Ok(self.cookies.header_value())
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = parse_job_url(url)?;
        info!("Fetching job page: {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(cookie) = self.cookie_header_for(&url)? {
            debug!("Attaching session cookies for {}", url.host_str().unwrap_or_default());
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let html = response.text().await?;
        let text = extract_page_text(&html);
        if text.is_empty() {
            return Err(FetchError::Empty);
        }

        info!("Fetched {} chars of page text", text.len());
        Ok(text)
    }
}

pub fn parse_job_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|_| FetchError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(FetchError::InvalidUrl(raw.to_string())),
    }
}

fn is_linkedin(host: &str) -> bool {
    host == "linkedin.com" || host.ends_with(".linkedin.com")
}

/// Collects heading, paragraph and list-item text, whitespace-normalised and
/// joined with single spaces. List items nested inside other list items are
/// visited once each, so nested text may repeat.
pub fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = match Selector::parse(CONTENT_SELECTOR) {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    document
        .select(&selector)
        .map(|element| clean_text(&element.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTING_HTML: &str = r#"<!DOCTYPE html>
        <html>
          <head><title>Careers</title><style>p { color: red; }</style></head>
          <body>
            <nav><a href="/">Home</a></nav>
            <h1>Backend Engineer</h1>
            <p>Acme Corp is
               hiring.</p>
            <script>var tracking = "do not include";</script>
            <ul>
              <li>Go</li>
              <li>Postgres</li>
            </ul>
            <footer>© Acme</footer>
          </body>
        </html>"#;

    #[test]
    fn test_extract_page_text_keeps_content_elements() {
        let text = extract_page_text(POSTING_HTML);
        assert_eq!(text, "Backend Engineer Acme Corp is hiring. Go Postgres");
    }

    #[test]
    fn test_extract_page_text_empty_document() {
        assert_eq!(extract_page_text("<html><body><div>   </div></body></html>"), "");
    }

    #[test]
    fn test_parse_job_url_accepts_http_and_https() {
        assert!(parse_job_url("https://job-boards.greenhouse.io/genies/jobs/6506648003").is_ok());
        assert!(parse_job_url("  http://example.com/job  ").is_ok());
    }

    #[test]
    fn test_parse_job_url_rejects_other_input() {
        assert!(matches!(parse_job_url("not a url"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(
            parse_job_url("file:///etc/passwd"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_linkedin_requires_session_cookies() {
        let fetcher = HttpPageFetcher::new(Duration::from_secs(5), CookieJar::parse("li_at=abc"))
            .unwrap();
        let url = parse_job_url("https://www.linkedin.com/jobs/view/4182056028").unwrap();

        match fetcher.cookie_header_for(&url) {
            Err(FetchError::MissingSessionCookies { host, missing }) => {
                assert_eq!(host, "www.linkedin.com");
                assert_eq!(missing, vec!["JSESSIONID".to_string()]);
            }
            other => panic!("expected missing cookies, got {other:?}"),
        }
    }

    #[test]
    fn test_cookies_only_sent_to_linkedin() {
        let fetcher = HttpPageFetcher::new(
            Duration::from_secs(5),
            CookieJar::parse("li_at=abc\nJSESSIONID=def"),
        )
        .unwrap();

        let linkedin = parse_job_url("https://www.linkedin.com/jobs/view/1").unwrap();
        assert_eq!(
            fetcher.cookie_header_for(&linkedin).unwrap().as_deref(),
            Some("li_at=abc; JSESSIONID=def")
        );

        let other = parse_job_url("https://chghealthcare.wd1.myworkdayjobs.com/job/1").unwrap();
        assert!(fetcher.cookie_header_for(&other).unwrap().is_none());
    }

    #[test]
    fn test_is_linkedin_matches_subdomains_only() {
        assert!(is_linkedin("linkedin.com"));
        assert!(is_linkedin("www.linkedin.com"));
        assert!(!is_linkedin("notlinkedin.com"));
    }
}
