//! Typed HTTP client for the message center API.

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use msgcenter_core::{
    Message, MessageFilter, MessageId, MessageQuery, MessageTemplate, NewMessage, QueryResult,
    Vendor,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Vec<String>,
}

/// Client for the message center HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or
    /// the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL with each segment appended, percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.url(segments))
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
        let resp = builder.send().await?;
        Self::parse(resp).await
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let bytes = resp.bytes().await.unwrap_or_default();
            let (error, details) = match serde_json::from_slice::<ErrorBody>(&bytes) {
                Ok(body) => (body.error, body.details),
                Err(_) => (
                    status.canonical_reason().unwrap_or("Request failed").to_string(),
                    Vec::new(),
                ),
            };
            debug!(status = status.as_u16(), %error, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                error,
                details,
            });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// List messages. `all` filters and empty searches are left off the URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get_messages(&self, query: &MessageQuery) -> Result<QueryResult> {
        let mut params = vec![("type", query.kind.as_str().to_string())];
        if query.filter != MessageFilter::All {
            params.push(("filter", query.filter.as_str().to_string()));
        }
        if !query.search.is_empty() {
            params.push(("search", query.search.clone()));
        }
        Self::send(self.request(Method::GET, &["messages"]).query(&params)).await
    }

    /// Fetch one message.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 for unknown ids.
    pub async fn get_message(&self, id: &MessageId) -> Result<Message> {
        Self::send(self.request(Method::GET, &["messages", id.as_str()])).await
    }

    async fn patch(&self, id: &MessageId, op: &str) -> Result<Message> {
        Self::send(self.request(Method::PATCH, &["messages", id.as_str(), op])).await
    }

    /// Mark a message read.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the id is unknown.
    pub async fn mark_read(&self, id: &MessageId) -> Result<Message> {
        self.patch(id, "read").await
    }

    /// Mark a message unread.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the id is unknown.
    pub async fn mark_unread(&self, id: &MessageId) -> Result<Message> {
        self.patch(id, "unread").await
    }

    /// Mark a sent message acknowledged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the id is unknown, or the
    /// message is not a sent message.
    pub async fn mark_acknowledged(&self, id: &MessageId) -> Result<Message> {
        self.patch(id, "acknowledged").await
    }

    /// Mark a sent message unacknowledged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the id is unknown, or the
    /// message is not a sent message.
    pub async fn mark_unacknowledged(&self, id: &MessageId) -> Result<Message> {
        self.patch(id, "unacknowledged").await
    }

    /// Compose and send a message.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with validation details when the server
    /// rejects the input.
    pub async fn send_message(&self, message: &NewMessage) -> Result<Message> {
        Self::send(self.request(Method::POST, &["messages"]).json(message)).await
    }

    /// Delete a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the id is unknown.
    pub async fn delete_message(&self, id: &MessageId) -> Result<()> {
        let _: serde_json::Value =
            Self::send(self.request(Method::DELETE, &["messages", id.as_str()])).await?;
        Ok(())
    }

    /// Vendors available as recipients.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_vendors(&self) -> Result<Vec<Vendor>> {
        Self::send(self.request(Method::GET, &["vendors"])).await
    }

    /// Compose templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_templates(&self) -> Result<Vec<MessageTemplate>> {
        Self::send(self.request(Method::GET, &["templates"])).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_single_path_segments() {
        let client = ApiClient::new(&ClientConfig::default()).unwrap();
        let url = client.url(&["messages", "a/b?c#d", "read"]);
        assert_eq!(
            url.as_str(),
            "http://localhost:3001/api/messages/a%2Fb%3Fc%23d/read"
        );
    }

    #[test]
    fn test_root_base_url() {
        let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:3001")).unwrap();
        assert_eq!(client.url(&["vendors"]).as_str(), "http://127.0.0.1:3001/vendors");
    }

    #[test]
    fn test_rejects_relative_base_url() {
        let err = ApiClient::new(&ClientConfig::new("localhost/api")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
