use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header;

const REQUEST_TIMEOUT_SECS: u64 = 30;
// Retries beyond the initial request.
const MAX_RETRIES: u32 = 4;
const BACKOFF_BASE_MS: u64 = 1_000;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_CS: &str = "cs-CZ,cs;q=0.9,en-US;q=0.8,en;q=0.7";

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// The wiki throttles with 403 as well as the usual transient statuses.
fn retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || matches!(status.as_u16(), 403 | 408 | 429)
}

/// Fetch a document body, retrying transient failures with exponential
/// backoff. Exhausting the attempt budget is a hard error for the caller.
pub fn fetch_text(url: &str) -> Result<String> {
    let client = http_client()?;
    info!("Fetching {url}");

    let mut last_err = None;
    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let backoff = Duration::from_millis(BACKOFF_BASE_MS << (attempt - 1));
            warn!(
                "Retrying {url} in {}ms (retry {attempt}/{MAX_RETRIES})",
                backoff.as_millis()
            );
            thread::sleep(backoff);
        }

        let response = client
            .get(url)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header(header::ACCEPT, ACCEPT_HTML)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_CS)
            .send();

        match response {
            Ok(response) => {
                let status = response.status();
                info!("HTTP {status} for {url}");
                if status.is_success() {
                    return response.text().context("failed reading body");
                }
                let err = anyhow!("http {status} for {url}");
                if !retryable_status(status) {
                    return Err(err);
                }
                last_err = Some(err);
            }
            Err(err) => {
                last_err = Some(anyhow!("request error for {url}: {err}"));
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow!("request failed for {url}")))
}
