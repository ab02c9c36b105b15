//! Event feed fetcher using the browser's fetch API

use gaia_shared::{GaiaError, GaiaResult};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::{parse_feed, Timeline};

/// Fetches the event feed and builds the timeline from it
pub struct DataFetcher {
    url: String,
}

impl DataFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Fetch, parse and validate the feed
    pub async fn fetch_timeline(&self) -> GaiaResult<Timeline> {
        let body = self.fetch_text().await?;
        let timeline = parse_feed(&body)?;

        let range = timeline.range();
        log::info!(
            "Loaded {} events from {} spanning {}..{} ({} ms)",
            timeline.len(),
            self.url,
            range.start,
            range.end,
            range.duration()
        );
        Ok(timeline)
    }

    async fn fetch_text(&self) -> GaiaResult<String> {
        let window = web_sys::window().ok_or_else(|| GaiaError::DataFetch {
            message: "No window object available".to_string(),
        })?;

        let opts = RequestInit::new();
        opts.set_method("GET");

        let headers = Headers::new().map_err(|e| self.fetch_error("Failed to create headers", e))?;
        headers
            .set("Accept", "application/json")
            .map_err(|e| self.fetch_error("Failed to set headers", e))?;
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(&self.url, &opts)
            .map_err(|e| self.fetch_error("Failed to create request", e))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| self.fetch_error("Fetch failed", e))?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|e| self.fetch_error("Invalid response type", e))?;

        if !resp.ok() {
            return Err(GaiaError::DataFetch {
                message: format!("HTTP {} (URL: {})", resp.status(), self.url),
            });
        }

        let text = JsFuture::from(
            resp.text()
                .map_err(|e| self.fetch_error("Failed to read body", e))?,
        )
        .await
        .map_err(|e| self.fetch_error("Failed to read body", e))?;

        text.as_string().ok_or_else(|| GaiaError::DataFetch {
            message: format!("Response body is not text (URL: {})", self.url),
        })
    }

    fn fetch_error(&self, what: &str, err: wasm_bindgen::JsValue) -> GaiaError {
        GaiaError::DataFetch {
            message: format!("{what}: {err:?} (URL: {})", self.url),
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_missing_feed_is_a_fetch_error() {
        let fetcher = DataFetcher::new("/definitely/not/here.json");
        match fetcher.fetch_timeline().await {
            Err(GaiaError::DataFetch { message }) => assert!(message.contains("not/here")),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }
}
