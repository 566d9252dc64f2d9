use crate::core::{Authenticator, UserId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// 以設定檔中的固定 token 對應使用者，取代外部的登入服務
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenAuthenticator {
    pub fn new(tokens: impl IntoIterator<Item = (String, UserId)>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Option<UserId>> {
        Ok(self.tokens.get(token).cloned())
    }
}

/// 解析 `Authorization: Bearer <token>`，格式不符時回傳 `None`
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
