use crate::core::{UserId, UserRecord, UserStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// 行程內的使用者資料，啟動時由設定檔的 `[[users]]` 填入
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = users
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn update_categories(
        &self,
        id: &UserId,
        categories: Vec<String>,
    ) -> Result<Option<UserRecord>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(id).map(|record| {
            record.categories = categories;
            record.clone()
        }))
    }
}
