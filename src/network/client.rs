//! Dataverse Web API client - executes gateway calls over HTTP

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::constants::{ACCOUNTS_ENTITY_SET, ACCOUNT_COLUMNS};
use crate::error::GatewayError;
use crate::models::{Account, AccountFields};
use crate::network::gateway::{AccountGateway, SessionInitializer};

/// One page of an OData collection response
#[derive(Debug, Deserialize)]
struct ODataPage<T> {
    value: Vec<T>,
    #[serde(rename = "@odata.nextLink", default)]
    next_link: Option<String>,
}

/// Platform error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Gateway and session initializer backed by the Dataverse Web API
#[derive(Clone)]
pub struct DataverseClient {
    http: reqwest::Client,
    api_root: String,
    token: Option<String>,
}

impl DataverseClient {
    pub fn new(
        base_url: &str,
        api_version: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Self {
        DataverseClient {
            http: create_client(timeout),
            api_root: api_root(base_url, api_version),
            token,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.base_url, &config.api_version, config.token.clone(), config.timeout)
    }

    /// Absolute URL for a path relative to the API root
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    fn build_request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut req_builder = self
            .http
            .request(method, url)
            .header("Accept", "application/json")
            .header("OData-Version", "4.0")
            .header("OData-MaxVersion", "4.0");

        if let Some(token) = &self.token {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", token));
        }

        req_builder
    }

    /// Send a request and map non-success statuses to `GatewayError::Api`
    async fn send(
        &self,
        req_builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GatewayError> {
        let start = Instant::now();
        let resp = req_builder.send().await?;
        let status = resp.status();
        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            url = %resp.url(),
            "Gateway response"
        );

        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(api_error(status, &body))
        }
    }

    fn record_url(&self, id: &str) -> String {
        self.endpoint(&format!("{}({})", ACCOUNTS_ENTITY_SET, id))
    }
}

#[async_trait]
impl SessionInitializer for DataverseClient {
    async fn initialize(&self) -> Result<(), GatewayError> {
        let url = self.endpoint("WhoAmI");
        let resp = self.send(self.build_request(Method::GET, &url)).await?;
        let who: serde_json::Value = resp.json().await?;
        let user_id = who.get("UserId").and_then(|v| v.as_str()).unwrap_or("?");
        tracing::info!(user_id = %user_id, "Session initialized");
        Ok(())
    }
}

#[async_trait]
impl AccountGateway for DataverseClient {
    async fn list_all(&self) -> Result<Vec<Account>, GatewayError> {
        let query = format!("{}?$select={}", ACCOUNTS_ENTITY_SET, ACCOUNT_COLUMNS);
        let mut url = self.endpoint(&query);
        let mut accounts = Vec::new();

        loop {
            let resp = self.send(self.build_request(Method::GET, &url)).await?;
            let page: ODataPage<Account> = resp.json().await?;
            accounts.extend(page.value);
            match page.next_link {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(accounts)
    }

    async fn create(&self, fields: &AccountFields) -> Result<Account, GatewayError> {
        let url = self.endpoint(ACCOUNTS_ENTITY_SET);
        let req_builder = self
            .build_request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(fields);
        let resp = self.send(req_builder).await?;
        Ok(resp.json().await?)
    }

    async fn update(&self, id: &str, fields: &AccountFields) -> Result<Account, GatewayError> {
        let url = self.record_url(id);
        let req_builder = self
            .build_request(Method::PATCH, &url)
            .header("Prefer", "return=representation")
            .header("If-Match", "*")
            .json(fields);
        let resp = self.send(req_builder).await?;
        Ok(resp.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let url = self.record_url(id);
        self.send(self.build_request(Method::DELETE, &url)).await?;
        Ok(())
    }
}

/// `https://org.crm.dynamics.com` + `9.2` -> `https://org.crm.dynamics.com/api/data/v9.2`
fn api_root(base_url: &str, api_version: &str) -> String {
    format!(
        "{}/api/data/v{}",
        base_url.trim_end_matches('/'),
        api_version.trim_start_matches('v')
    )
}

/// Turn an error response into a gateway error, preferring the platform's message
fn api_error(status: StatusCode, body: &str) -> GatewayError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) => body.trim().to_string(),
    };
    GatewayError::api(status.as_u16(), message)
}

/// Create an HTTP client with the given timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DataverseClient {
        DataverseClient::new("https://org.crm.dynamics.com/", "9.2", None, Duration::from_secs(5))
    }

    #[test]
    fn test_endpoint_building() {
        let c = client();
        assert_eq!(c.endpoint("WhoAmI"), "https://org.crm.dynamics.com/api/data/v9.2/WhoAmI");
        assert_eq!(c.record_url("abc"), "https://org.crm.dynamics.com/api/data/v9.2/accounts(abc)");
    }

    #[test]
    fn test_api_root_strips_version_prefix() {
        assert_eq!(api_root("https://x.test", "v9.1"), "https://x.test/api/data/v9.1");
    }

    #[test]
    fn test_api_error_uses_platform_message() {
        let body = r#"{"error":{"code":"0x80040217","message":"account With Id = 42 Does Not Exist"}}"#;
        let err = api_error(StatusCode::NOT_FOUND, body);
        assert_eq!(err, GatewayError::api(404, "account With Id = 42 Does Not Exist"));
    }

    #[test]
    fn test_api_error_falls_back_to_body_or_reason() {
        assert_eq!(
            api_error(StatusCode::BAD_GATEWAY, "upstream down"),
            GatewayError::api(502, "upstream down")
        );
        assert_eq!(
            api_error(StatusCode::UNAUTHORIZED, ""),
            GatewayError::api(401, "Unauthorized")
        );
    }

    #[test]
    fn test_odata_page_parsing() {
        let body = r#"{
            "@odata.context": "$metadata#accounts",
            "value": [
                {"accountid": "1", "name": "Fabrikam", "accountnumber": "AC-1"},
                {"accountid": "2", "name": "Contoso"}
            ],
            "@odata.nextLink": "https://org.crm.dynamics.com/api/data/v9.2/accounts?$skiptoken=x"
        }"#;
        let page: ODataPage<Account> = serde_json::from_str(body).unwrap();
        assert_eq!(page.value.len(), 2);
        assert_eq!(page.value[0].account_number.as_deref(), Some("AC-1"));
        assert!(page.next_link.is_some());

        let last: ODataPage<Account> = serde_json::from_str(r#"{"value": []}"#).unwrap();
        assert!(last.next_link.is_none());
    }
}
