use crate::core::{UserId, UserRecord, UserStore};
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 透過 HTTP 存取遠端使用者服務
///
/// - `GET {endpoint}/users/{id}` 取得使用者，404 代表不存在
/// - `PUT {endpoint}/users/{id}` 以 `{"categories": [...]}` 覆寫分類並回傳更新後的資料
#[derive(Debug, Clone)]
pub struct RestUserStore {
    client: Client,
    base: Url,
}

impl RestUserStore {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(endpoint).map_err(|e| AppError::InvalidConfigValueError {
            field: "store.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base })
    }

    fn user_url(&self, id: &UserId) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::StoreError {
                message: format!("endpoint cannot be a base URL: {}", self.base),
            })?
            .pop_if_empty()
            .push("users")
            .push(id.as_str());
        Ok(url)
    }

    async fn read_record(response: reqwest::Response) -> Result<Option<UserRecord>> {
        let status = response.status();
        tracing::debug!("User store response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(AppError::StoreError {
                message: format!("user service responded with {}", status),
            });
        }

        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl UserStore for RestUserStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>> {
        let url = self.user_url(id)?;
        tracing::debug!("Fetching user record from: {}", url);

        let response = self.client.get(url).send().await?;
        Self::read_record(response).await
    }

    async fn update_categories(
        &self,
        id: &UserId,
        categories: Vec<String>,
    ) -> Result<Option<UserRecord>> {
        let url = self.user_url(id)?;
        tracing::debug!("Replacing categories at: {}", url);

        let response = self
            .client
            .put(url)
            .json(&json!({ "categories": categories }))
            .send()
            .await?;
        Self::read_record(response).await
    }
}
