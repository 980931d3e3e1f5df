//! Pricing resolution from configured external sources.

mod jsonld;
mod seed;

pub use seed::seed_price;

use chrono::Utc;
use tracing::{debug, info};

use crate::config::Settings;
use crate::models::{PriceRequest, PriceResult, PricingSource, SourceMeta};

/// Identifying User-Agent sent with every pricing fetch.
pub const USER_AGENT: &str = "EstimarkBot/1.0";

const NO_SOURCES: &str = "No sources configured.";
const NO_PRICE: &str = "No price detected from sources.";

/// Build the shared HTTP client for pricing fetches.
///
/// Every fetch carries the bot User-Agent and the configured timeout; a
/// timed-out fetch is treated the same as a failed status, skip and move
/// on.
pub fn build_client(settings: &Settings) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(settings.request_timeout)
        .gzip(true)
        .brotli(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Resolve a unit price by scraping sources in order.
///
/// Sources come from the request when supplied, otherwise from
/// configuration. Iteration is strictly sequential and the first source
/// yielding a positive price wins; prices are never merged across sources.
/// Per-source failures (transport errors, bad status, unparseable pages)
/// are skipped silently so one flaky source cannot sink the scan. Expected
/// misses come back as `PriceResult::Error` values, never as Err.
pub async fn resolve_price(
    request: &PriceRequest,
    fallback_sources: &[PricingSource],
    client: &reqwest::Client,
) -> PriceResult {
    let sources: Vec<PricingSource> = request
        .sources
        .clone()
        .unwrap_or_else(|| fallback_sources.to_vec());

    let item_key = match request.item_key.as_deref().filter(|key| !key.is_empty()) {
        Some(key) => key,
        None => return PriceResult::error(NO_SOURCES),
    };
    if sources.is_empty() {
        return PriceResult::error(NO_SOURCES);
    }

    for source in &sources {
        let Some(url) = source.source_url.as_deref().filter(|url| !url.is_empty()) else {
            continue;
        };

        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(error) => {
                debug!(url, %error, "pricing fetch failed, skipping source");
                continue;
            }
        };
        if !response.status().is_success() {
            debug!(url, status = %response.status(), "non-success status, skipping source");
            continue;
        }
        let html = match response.text().await {
            Ok(html) => html,
            Err(error) => {
                debug!(url, %error, "failed to read body, skipping source");
                continue;
            }
        };

        if let Some(price) = jsonld::extract_price(&html) {
            info!(item_key, url, price, "price resolved");
            return PriceResult::Price {
                item_key: item_key.to_string(),
                unit_price: price,
                unit: request
                    .unit
                    .clone()
                    .filter(|unit| !unit.is_empty())
                    .unwrap_or_else(|| "ea".to_string()),
                source_meta: SourceMeta {
                    provider: "scrape".to_string(),
                    source_name: Some(
                        source
                            .source_name
                            .clone()
                            .unwrap_or_else(|| "unknown".to_string()),
                    ),
                    url: Some(url.to_string()),
                    location_zip: request.location_zip.clone(),
                    scraped_at: Some(Utc::now()),
                },
            };
        }
        debug!(url, "no price found on page");
    }

    PriceResult::error(NO_PRICE)
}
