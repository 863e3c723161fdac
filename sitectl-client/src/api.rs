//! HTTP access to `GET /api/sanity`

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use sitectl_core::{Menu, SiteSettings};
use url::Url;

use crate::error::ClientError;

/// What the hooks need from the content endpoint
#[async_trait]
pub trait SiteApi: Send + Sync {
    async fn site_settings(&self) -> Result<SiteSettings, ClientError>;

    /// `None` when no menu carries `title`
    async fn menu_by_title(&self, title: &str) -> Result<Option<Menu>, ClientError>;
}

/// Error body the endpoint answers with
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: Option<u16>,
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: Url,
}

impl ApiClient {
    /// `base` is the site origin, e.g. `http://localhost:3000`
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(concat!("sitectl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: base.join("api/sanity")?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Raw query: pass the endpoint's parameters through, get its JSON back
    pub async fn query(&self, params: &[(&str, &str)]) -> Result<Value, ClientError> {
        self.get(params).await
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, ClientError> {
        tracing::debug!(endpoint = %self.endpoint, ?params, "content request");
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(params)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        return Err(error_from_body(status.as_u16(), &bytes));
    }
    Ok(serde_json::from_slice(&bytes)?)
}

fn error_from_body(status: u16, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => ClientError::Http {
            status: parsed.status_code.unwrap_or(status),
            message: parsed.message.unwrap_or_default(),
        },
        Err(_) => ClientError::Http {
            status,
            message: String::from_utf8_lossy(body).trim().to_string(),
        },
    }
}

#[async_trait]
impl SiteApi for ApiClient {
    async fn site_settings(&self) -> Result<SiteSettings, ClientError> {
        self.get(&[("type", "siteSettings")]).await
    }

    async fn menu_by_title(&self, title: &str) -> Result<Option<Menu>, ClientError> {
        self.get(&[("type", "menu"), ("menuTitle", title)]).await
    }
}
