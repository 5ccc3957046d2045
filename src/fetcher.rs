use std::time::{Duration, Instant};

use scraper::{Html, Selector};
use thirtyfour::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, FETCH_RETRIES, READY_POLL_INTERVAL_MS, WAIT_DELAY_SECS};
use crate::error::Result;

/// Per-product fetch failure. Logged as a network error for that product;
/// the run moves on to the next entry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("element {selector:?} never appeared after {attempts} attempts")]
    NeverReady { selector: String, attempts: u32 },
}

/// One browser session, reused for every product in the run.
///
/// Failing to reach the WebDriver endpoint at startup is fatal; failures
/// while fetching an individual page are not.
pub struct PageFetcher {
    driver: WebDriver,
}

impl PageFetcher {
    pub async fn connect(cfg: &Config) -> Result<Self> {
        let mut caps = DesiredCapabilities::firefox();
        if cfg.headless {
            caps.set_headless()?;
        }
        let driver = WebDriver::new(&cfg.webdriver_url, caps).await?;
        debug!("WebDriver session open at {}", cfg.webdriver_url);
        Ok(Self { driver })
    }

    /// Navigate to `url` and return the rendered page source.
    ///
    /// With a readiness selector the fetch re-navigates up to `FETCH_RETRIES`
    /// times, each attempt polling the rendered source for up to
    /// `WAIT_DELAY_SECS` until the selector matches. The retry budget is per
    /// product, never shared across the run.
    pub async fn fetch(
        &self,
        url: &str,
        ready: Option<&str>,
    ) -> std::result::Result<String, FetchError> {
        let Some(selector) = ready else {
            self.driver.goto(url).await?;
            return Ok(self.driver.source().await?);
        };

        for attempt in 1..=FETCH_RETRIES {
            self.driver.goto(url).await?;
            let deadline = Instant::now() + Duration::from_secs(WAIT_DELAY_SECS);
            loop {
                let source = self.driver.source().await?;
                if page_has(&source, selector) {
                    return Ok(source);
                }
                if Instant::now() >= deadline {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(READY_POLL_INTERVAL_MS)).await;
            }
            debug!("attempt {attempt}/{FETCH_RETRIES}: {selector:?} not yet present on {url}");
        }

        Err(FetchError::NeverReady {
            selector: selector.to_string(),
            attempts: FETCH_RETRIES,
        })
    }

    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

/// Whether the rendered source contains a match for `css`.
fn page_has(html: &str, css: &str) -> bool {
    let Ok(selector) = Selector::parse(css) else {
        return false;
    };
    Html::parse_document(html).select(&selector).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_has_matches_rendered_nodes() {
        let html = r#"<div class="price-dollars">8</div>"#;
        assert!(page_has(html, ".price-dollars"));
        assert!(!page_has(html, ".price-cents"));
    }

    #[test]
    fn invalid_selector_never_matches() {
        assert!(!page_has("<div></div>", "[[["));
    }
}
