//! In-memory transport and HTML builders for crawler unit tests

use crate::crawler::fetcher::{FetchResult, PageFetcher};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Serves canned bodies by URL and records every request, in order
///
/// Unknown URLs answer with HTTP 404.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested(&self, url: &str) -> bool {
        self.requests.lock().unwrap().iter().any(|u| u == url)
    }
}

impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        self.requests.lock().unwrap().push(url.to_string());

        match self.pages.get(url.as_str()) {
            Some(body) => FetchResult::Success {
                final_url: url.to_string(),
                status_code: 200,
                body: body.clone(),
            },
            None => FetchResult::HttpError { status_code: 404 },
        }
    }
}

/// Builds a listing page with one product block per `(href, title)` pair
pub fn listing_html(items: &[(&str, &str)]) -> String {
    let mut html = String::from("<html><body><ol class=\"row\">");
    for (href, title) in items {
        html.push_str(&format!(
            r#"<li><article class="product_pod">
                <p class="star-rating Two"></p>
                <h3><a href="{href}" title="{title}">{title}</a></h3>
                <p class="price_color">£10.00</p>
                <p class="instock availability">In stock (5 available)</p>
            </article></li>"#
        ));
    }
    html.push_str("</ol></body></html>");
    html
}
