use crate::core::{UserId, UserStore};
use crate::utils::error::{AppError, Result};
use std::sync::Arc;

/// 使用者偏好的讀寫，只做整批覆寫，不合併
#[derive(Clone)]
pub struct PreferenceStore {
    store: Arc<dyn UserStore>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// 找不到使用者時回傳空清單
    pub async fn load(&self, user_id: &UserId) -> Result<Vec<String>> {
        let record = self.store.find_by_id(user_id).await?;
        Ok(record.map(|r| r.categories).unwrap_or_default())
    }

    pub async fn replace(&self, user_id: &UserId, names: Vec<String>) -> Result<Vec<String>> {
        match self.store.update_categories(user_id, names).await? {
            Some(record) => Ok(record.categories),
            None => Err(AppError::UserNotFound {
                user_id: user_id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::InMemoryUserStore;
    use crate::core::UserRecord;

    fn store_with(user: &str, categories: &[&str]) -> PreferenceStore {
        let mut record = UserRecord::new(UserId::new(user));
        record.categories = categories.iter().map(|c| c.to_string()).collect();
        PreferenceStore::new(Arc::new(InMemoryUserStore::with_users(vec![record])))
    }

    #[test]
    fn test_load_existing_and_missing_user() {
        let prefs = store_with("u1", &["Books"]);

        tokio_test::block_on(async {
            assert_eq!(prefs.load(&UserId::new("u1")).await.unwrap(), vec!["Books"]);
            assert!(prefs.load(&UserId::new("ghost")).await.unwrap().is_empty());
        });
    }

    #[test]
    fn test_replace_overwrites_instead_of_merging() {
        let prefs = store_with("u1", &["Books", "Toys"]);
        let user = UserId::new("u1");

        tokio_test::block_on(async {
            let stored = prefs.replace(&user, vec!["Garden".to_string()]).await.unwrap();
            assert_eq!(stored, vec!["Garden"]);
            assert_eq!(prefs.load(&user).await.unwrap(), vec!["Garden"]);
        });
    }

    #[test]
    fn test_replace_missing_user_is_not_found() {
        let prefs = store_with("u1", &[]);

        let result = tokio_test::block_on(prefs.replace(&UserId::new("ghost"), vec![]));
        assert!(matches!(result, Err(AppError::UserNotFound { .. })));
    }
}
