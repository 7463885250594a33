use reqwest::{Client, RequestBuilder, Response, Url};
use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use tracing::{error, debug};

/// Owns the base URL and default headers shared by every API call.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&api.base_url).map_err(|e| Error::InvalidBaseUrl {
            url: api.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (key, value) in api.headers.iter() {
            if let (Ok(header_name), Ok(header_value)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value)
            ) {
                headers.insert(header_name, header_value);
                debug!(
                    header_key = key,
                    header_value = value,
                    "Adding header"
                );
            } else {
                error!(
                    header_key = key,
                    header_value = value,
                    "Invalid header value"
                );
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(api.timeout())
            .build()?;

        debug!(base_url = %base_url, "Created catalog HTTP client");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `path` is appended verbatim to the base URL, which may carry a prefix.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(url = %url, "Creating GET request");
        self.client.get(url)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!(url = %url, "Creating POST request");
        self.client.post(url)
    }

    /// Sends the request; anything outside 2xx becomes [`Error::Http`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            debug!(error = %e, "Transport failure");
            Error::Network(e)
        })?;

        let status = response.status();
        debug!(
            status = status.as_u16(),
            url = %response.url(),
            "Response received"
        );

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(
                    status = status.as_u16(),
                    url = %url,
                    error = %e,
                    "Could not read error body"
                );
                String::new()
            }
        };
        debug!(
            status = status.as_u16(),
            url = %url,
            body = %body,
            "Non-success status"
        );
        Err(Error::Http { status, body })
    }

    /// Reads the body and decodes it, logging the raw body when it does not parse.
    pub async fn json<T: DeserializeOwned>(&self, response: Response, what: &str) -> Result<T> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            let body_str = String::from_utf8_lossy(&body);
            error!(
                error = %e,
                body = %body_str,
                response = what,
                "Failed to parse response"
            );
            Error::from(e)
        })
    }
}
