use anyhow::Context;
use serde_json::Value;

/// data.gov.in resource id for the national hospital directory.
const DATA_GOV_BASE: &str =
    "https://api.data.gov.in/resource/98fa254e-c5f8-4910-a19b-4828939b477d";

/// One page of results; the upstream caps what a single request returns,
/// and we never paginate past the first page.
const PAGE_LIMIT: &str = "100";

pub struct UpstreamClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DATA_GOV_BASE.to_string(),
        }
    }

    pub fn request_url(&self, pincode: Option<&str>) -> anyhow::Result<reqwest::Url> {
        let mut params: Vec<(&str, &str)> = vec![
            ("api-key", self.api_key.as_str()),
            ("format", "json"),
            ("limit", PAGE_LIMIT),
            ("offset", "0"),
        ];
        if let Some(pincode) = pincode {
            params.push(("filters[_pincode]", pincode));
        }
        reqwest::Url::parse_with_params(&self.base_url, &params)
            .with_context(|| format!("build upstream URL from {}", self.base_url))
    }

    /// Fetch one page of hospital records, optionally filtered by pincode.
    /// The pincode is forwarded as-is; upstream decides what it matches.
    pub async fn fetch_hospitals(&self, pincode: Option<&str>) -> anyhow::Result<Value> {
        let url = self.request_url(pincode)?;

        tracing::info!("Fetching {}", url);
        if let Some(pincode) = pincode {
            tracing::info!("Searching for pincode {}", pincode);
        }

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let data: Value = resp.json().await.context("parse upstream JSON")?;

        let record_count = data
            .get("records")
            .and_then(|r| r.as_array())
            .map(|a| a.len())
            .unwrap_or(0);
        tracing::info!("Total records found: {}", record_count);

        Ok(data)
    }
}
