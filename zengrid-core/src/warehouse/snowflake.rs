//! Snowflake client over the HTTPS session API.
//!
//! Logs in with the credentials from the secrets file, runs query-requests
//! with the session token, and deletes the session when the client is
//! dropped. One client serves one refresh pass; there is no retry and no
//! caching — every call re-executes the fetch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use serde::Deserialize;
use serde_json::json;

use super::{QueryResult, Warehouse, WarehouseConfig, WarehouseError};

const CLIENT_APP_ID: &str = "zengrid";
const CLIENT_APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
struct LoginResponse {
    success: bool,
    message: Option<String>,
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    success: bool,
    message: Option<String>,
    data: Option<QueryData>,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    rowtype: Option<Vec<ColumnType>>,
    rowset: Option<Vec<Vec<Option<String>>>>,
}

#[derive(Debug, Deserialize)]
struct ColumnType {
    name: String,
}

/// A live warehouse session.
pub struct SnowflakeClient {
    client: reqwest::blocking::Client,
    base_url: String,
    token: Option<String>,
    sequence_id: AtomicU64,
}

impl SnowflakeClient {
    /// Open a session. The returned client must be dropped (or `close`d)
    /// at the end of the refresh pass; Drop deletes the session.
    pub fn connect(config: &WarehouseConfig) -> Result<Self, WarehouseError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WarehouseError::ConnectionFailed(e.to_string()))?;

        let base_url = format!("https://{}.snowflakecomputing.com", config.account);
        let login_url = format!(
            "{base_url}/session/v1/login-request?databaseName={}&schemaName={}&warehouse={}",
            config.database, config.schema, config.warehouse
        );

        let body = json!({
            "data": {
                "ACCOUNT_NAME": config.account,
                "LOGIN_NAME": config.user,
                "PASSWORD": config.password,
                "CLIENT_APP_ID": CLIENT_APP_ID,
                "CLIENT_APP_VERSION": CLIENT_APP_VERSION,
            }
        });

        let resp = client
            .post(&login_url)
            .json(&body)
            .send()
            .map_err(|e| WarehouseError::ConnectionFailed(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(WarehouseError::AuthenticationFailed(format!(
                "login rejected with HTTP {status}"
            )));
        }
        if !status.is_success() {
            return Err(WarehouseError::ConnectionFailed(format!(
                "login returned HTTP {status}"
            )));
        }

        let login: LoginResponse = resp
            .json()
            .map_err(|e| WarehouseError::ResponseFormat(format!("login response: {e}")))?;

        if !login.success {
            return Err(WarehouseError::AuthenticationFailed(
                login.message.unwrap_or_else(|| "login refused".into()),
            ));
        }
        let token = login
            .data
            .ok_or_else(|| WarehouseError::ResponseFormat("login response had no data".into()))?
            .token;

        Ok(Self {
            client,
            base_url,
            token: Some(token),
            sequence_id: AtomicU64::new(1),
        })
    }

    /// Delete the session. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(token) = self.token.take() {
            let url = format!("{}/session?delete=true", self.base_url);
            // Session cleanup is best-effort; the server also expires idle
            // sessions on its own.
            let _ = self
                .client
                .post(&url)
                .header("Authorization", format!("Snowflake Token=\"{token}\""))
                .send();
        }
    }

    fn request_id() -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill(&mut bytes);
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl Warehouse for SnowflakeClient {
    fn name(&self) -> &str {
        "snowflake"
    }

    fn query(&self, sql: &str) -> Result<QueryResult, WarehouseError> {
        let token = self.token.as_ref().ok_or(WarehouseError::SessionClosed)?;

        let url = format!(
            "{}/queries/v1/query-request?requestId={}",
            self.base_url,
            Self::request_id()
        );
        let body = json!({
            "sqlText": sql,
            "sequenceId": self.sequence_id.fetch_add(1, Ordering::Relaxed),
        });

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Snowflake Token=\"{token}\""))
            .json(&body)
            .send()
            .map_err(|e| WarehouseError::ConnectionFailed(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(WarehouseError::AuthenticationFailed(
                "session token rejected".into(),
            ));
        }
        if !status.is_success() {
            return Err(WarehouseError::QueryFailed(format!("HTTP {status}")));
        }

        let parsed: QueryResponse = resp
            .json()
            .map_err(|e| WarehouseError::ResponseFormat(format!("query response: {e}")))?;

        if !parsed.success {
            return Err(WarehouseError::QueryFailed(
                parsed.message.unwrap_or_else(|| "query refused".into()),
            ));
        }
        let data = parsed
            .data
            .ok_or_else(|| WarehouseError::ResponseFormat("query response had no data".into()))?;

        Ok(QueryResult {
            columns: data
                .rowtype
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.name)
                .collect(),
            rows: data.rowset.unwrap_or_default(),
        })
    }

    fn is_available(&self) -> bool {
        self.token.is_some()
    }
}

impl Drop for SnowflakeClient {
    fn drop(&mut self) {
        self.close();
    }
}
