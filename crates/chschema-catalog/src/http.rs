use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::options::ApiSettings;
use crate::source::{CatalogSource, PageRequest};
use crate::wire::RawPage;

const USER_AGENT: &str = concat!("chschema/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for the Content Hub REST API.
#[derive(Debug, Clone)]
pub struct ContentHubClient {
    client: Client,
    base_url: Url,
    access_token: String,
    include_conditional_members: bool,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ContentHubClient {
    /// Build an HTTP client and obtain an access token with the OAuth
    /// password grant.
    pub async fn connect(settings: &ApiSettings) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        let base_url = parse_base_url(&settings.url)?;

        let access_token = authenticate(&client, &base_url, settings).await?;
        tracing::info!(event = "authenticated", host = base_url.host_str().unwrap_or_default());

        Ok(Self {
            client,
            base_url,
            access_token,
            include_conditional_members: settings.include_conditional_members,
        })
    }

    /// URL of the first entity-definition page.
    pub fn definitions_url(&self) -> CatalogResult<Url> {
        definitions_url(&self.base_url, self.include_conditional_members)
    }
}

#[async_trait]
impl CatalogSource for ContentHubClient {
    fn kind(&self) -> &'static str {
        "content-hub"
    }

    async fn fetch_page(&self, request: &PageRequest) -> CatalogResult<RawPage> {
        let url = match request {
            PageRequest::First => self.definitions_url()?,
            PageRequest::Next(href) => self
                .base_url
                .join(href)
                .map_err(|err| CatalogError::InvalidUrl(format!("{href}: {err}")))?,
        };

        tracing::debug!(event = "page_requested", url = %url);
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<RawPage>().await?)
    }
}

async fn authenticate(
    client: &Client,
    base_url: &Url,
    settings: &ApiSettings,
) -> CatalogResult<String> {
    let token_url = base_url
        .join("oauth/token")
        .map_err(|err| CatalogError::InvalidUrl(err.to_string()))?;
    let form = [
        ("grant_type", "password"),
        ("client_id", settings.client_id.as_str()),
        ("client_secret", settings.client_secret.as_str()),
        ("username", settings.username.as_str()),
        ("password", settings.password.as_str()),
    ];

    let response = client.post(token_url).form(&form).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::Auth(format!("HTTP {}: {body}", status.as_u16())));
    }

    let token: TokenResponse = response.json().await?;
    if token.access_token.is_empty() {
        return Err(CatalogError::Auth("empty access token".to_string()));
    }
    Ok(token.access_token)
}

async fn ensure_success(response: Response) -> CatalogResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(CatalogError::Status {
        status: status.as_u16(),
        url,
        body,
    })
}

/// Parse the configured base URL, forcing a trailing slash so relative joins
/// append to its path.
fn parse_base_url(raw: &str) -> CatalogResult<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|err| CatalogError::InvalidUrl(format!("{raw}: {err}")))
}

fn definitions_url(base_url: &Url, include_conditional_members: bool) -> CatalogResult<Url> {
    let mut url = base_url
        .join("api/entitydefinitions")
        .map_err(|err| CatalogError::InvalidUrl(err.to_string()))?;
    let flag = if include_conditional_members {
        "True"
    } else {
        "False"
    };
    url.query_pairs_mut()
        .append_pair("includeConditionalMembers", flag);
    Ok(url)
}
