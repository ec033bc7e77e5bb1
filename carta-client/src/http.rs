// carta-client/src/http.rs
// HTTP client for the menu backend

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::session::{COMMERCE_HEADER, Session};
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// Body-less POST; any response body is discarded
    async fn post_empty(&self, path: &str) -> ClientResult<()>;
    /// DELETE; any response body is discarded
    async fn delete(&self, path: &str) -> ClientResult<()>;
    fn session(&self) -> &Session;
}

/// Network HTTP client (reqwest)
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .default_headers(session_headers(&config.session)?)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: config.session.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, req: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = req.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "[Http] response");
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ClientError::from_status(status, text));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = self.send(req).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

fn session_headers(session: &Session) -> ClientResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(auth) = session.auth_header() {
        let value = HeaderValue::from_str(&auth)
            .map_err(|e| ClientError::Internal(format!("Invalid token header: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
    }
    if let Some(commerce) = &session.commerce {
        let value = HeaderValue::from_str(commerce)
            .map_err(|e| ClientError::Internal(format!("Invalid commerce header: {}", e)))?;
        headers.insert(COMMERCE_HEADER, value);
    }
    Ok(headers)
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send_json(self.client.get(self.url(path))).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(self.client.post(self.url(path)).json(body))
            .await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(self.client.put(self.url(path)).json(body))
            .await
    }

    async fn post_empty(&self, path: &str) -> ClientResult<()> {
        self.send(self.client.post(self.url(path))).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    fn session(&self) -> &Session {
        &self.session
    }
}
