//! Signed HTTP client for the Binance REST APIs.
//!
//! Makes exactly one attempt per call. Retrying idempotent queries is the
//! dispatcher's decision, and order placement must never be repeated here.

use reqwest::{Client, Method, Url};
use serde_json::Value;

use super::api_types::{BinanceErrorResponse, Params};
use super::config::BinanceConfig;
use super::error::BinanceError;
use super::signing::RequestSigner;

/// Which Binance API a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiBase {
    /// USDⓈ-M futures (`/fapi`).
    Futures,
    /// Spot (`/api`), used for OCO order lists.
    Spot,
}

/// HTTP client for the Binance API.
#[derive(Debug, Clone)]
pub struct BinanceHttpClient {
    client: Client,
    api_key: String,
    signer: RequestSigner,
    futures_base_url: Url,
    spot_base_url: Url,
    recv_window_ms: u64,
}

impl BinanceHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(BinanceError::InvalidConfig(
                "API key and secret are required".to_string(),
            ));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            signer: RequestSigner::new(config.api_secret.clone()),
            futures_base_url: parse_base_url(config.futures_base_url())?,
            spot_base_url: parse_base_url(config.spot_base_url())?,
            recv_window_ms: config.recv_window_ms,
        })
    }

    /// Unsigned GET.
    pub async fn get_public(&self, base: ApiBase, path: &str) -> Result<Value, BinanceError> {
        let url = self.url(base, path);
        tracing::debug!(%url, "GET (public)");
        self.send(self.client.get(url)).await
    }

    /// Signed request; every parameter travels in the query string.
    pub async fn signed(
        &self,
        method: Method,
        base: ApiBase,
        path: &str,
        params: &Params,
    ) -> Result<Value, BinanceError> {
        let url = self.signed_url(base, path, params, chrono::Utc::now().timestamp_millis())?;
        tracing::debug!(%method, path, "Signed request");

        let request = self
            .client
            .request(method, url)
            .header("X-MBX-APIKEY", &self.api_key);
        self.send(request).await
    }

    fn url(&self, base: ApiBase, path: &str) -> Url {
        let mut url = match base {
            ApiBase::Futures => self.futures_base_url.clone(),
            ApiBase::Spot => self.spot_base_url.clone(),
        };
        url.set_path(path);
        url
    }

    /// Append `timestamp`, `recvWindow` and the signature of the whole
    /// query string.
    fn signed_url(
        &self,
        base: ApiBase,
        path: &str,
        params: &Params,
        timestamp_ms: i64,
    ) -> Result<Url, BinanceError> {
        let mut url = self.url(base, path);
        url.query_pairs_mut()
            .extend_pairs(params.iter())
            .append_pair("recvWindow", &self.recv_window_ms.to_string())
            .append_pair("timestamp", &timestamp_ms.to_string());

        let signature = self.signer.sign(url.query().unwrap_or_default())?;
        url.query_pairs_mut().append_pair("signature", &signature);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, BinanceError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            if body.is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&body).map_err(|e| BinanceError::JsonParse(e.to_string()));
        }

        let (code, message) = match serde_json::from_str::<BinanceErrorResponse>(&body) {
            Ok(err) => (Some(err.code), err.msg),
            Err(_) if body.is_empty() => (None, status.to_string()),
            Err(_) => (None, body),
        };

        tracing::debug!(status = status.as_u16(), code, %message, "Binance error response");
        Err(BinanceError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, BinanceError> {
    Url::parse(raw).map_err(|e| BinanceError::InvalidConfig(format!("invalid base URL '{raw}': {e}")))
}
