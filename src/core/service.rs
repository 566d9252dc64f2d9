use crate::core::catalog::Catalog;
use crate::core::pagination::{paginate, PageRequest};
use crate::core::preferences::PreferenceStore;
use crate::core::reconcile::{annotate, extract_candidates, validate_selection};
use crate::core::{CategoryPageResponse, UpdatePreferencesResponse, UserId};
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;

pub const UPDATE_SUCCESS_MESSAGE: &str = "Categories updated successfully";

/// 串接目錄、分頁、偏好存取三個元件
#[derive(Clone)]
pub struct CategoryService {
    catalog: Arc<Catalog>,
    preferences: PreferenceStore,
    page_size: usize,
}

impl CategoryService {
    pub fn new(catalog: Arc<Catalog>, preferences: PreferenceStore, page_size: usize) -> Self {
        Self {
            catalog,
            preferences,
            page_size,
        }
    }

    #[cfg(test)]
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn list_page(&self, user_id: &UserId, page: i64) -> Result<CategoryPageResponse> {
        let selected = self.preferences.load(user_id).await?;
        let page = paginate(self.catalog.items(), PageRequest::new(page, self.page_size));

        tracing::debug!(
            "User {} requested page {} ({} items of {})",
            user_id,
            page.current_page,
            page.items.len(),
            page.total
        );

        Ok(CategoryPageResponse {
            categories: annotate(page.items, &selected),
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_categories: page.total,
            has_more: page.has_more,
            selected_categories: selected,
        })
    }

    pub async fn update_preferences(
        &self,
        user_id: &UserId,
        body: &Value,
    ) -> Result<UpdatePreferencesResponse> {
        let candidates = extract_candidates(body)?;
        let validated = validate_selection(candidates, &self.catalog);

        let stored = self.preferences.replace(user_id, validated.accepted).await?;
        tracing::info!(
            "Updated preferences for user {}: {} stored, {} dropped",
            user_id,
            stored.len(),
            validated.dropped.len()
        );

        Ok(UpdatePreferencesResponse {
            message: UPDATE_SUCCESS_MESSAGE.to_string(),
            categories: stored,
            dropped: validated.dropped,
        })
    }

    pub async fn user_preferences(&self, user_id: &UserId) -> Result<Vec<String>> {
        self.preferences.load(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_store::InMemoryUserStore;
    use crate::core::fixture::FixtureGenerator;
    use crate::core::UserRecord;
    use crate::utils::error::AppError;
    use serde_json::json;

    fn service() -> (CategoryService, UserId) {
        let user = UserId::new("user-1");
        let store = InMemoryUserStore::with_users(vec![UserRecord::new(user.clone())]);
        let catalog = Arc::new(FixtureGenerator::new(100, Some(11)).generate());
        let service = CategoryService::new(catalog, PreferenceStore::new(Arc::new(store)), 6);
        (service, user)
    }

    #[tokio::test]
    async fn test_list_page_metadata() {
        let (service, user) = service();

        let response = service.list_page(&user, 17).await.unwrap();
        assert_eq!(response.categories.len(), 4);
        assert_eq!(response.current_page, 17);
        assert_eq!(response.total_pages, 17);
        assert_eq!(response.total_categories, 100);
        assert!(!response.has_more);
        assert!(response.selected_categories.is_empty());
    }

    #[tokio::test]
    async fn test_update_then_list_reflects_selection() {
        let (service, user) = service();
        let first = service.catalog().items()[0].name.clone();

        let update = service
            .update_preferences(&user, &json!({"categories": [first.clone(), "Nope"]}))
            .await
            .unwrap();
        assert_eq!(update.message, UPDATE_SUCCESS_MESSAGE);
        assert_eq!(update.categories, vec![first.clone()]);
        assert_eq!(update.dropped, vec!["Nope"]);

        let page = service.list_page(&user, 1).await.unwrap();
        assert!(page.categories[0].selected);
        assert!(page.categories[1..].iter().all(|c| !c.selected));
        assert_eq!(page.selected_categories, vec![first]);
    }

    #[tokio::test]
    async fn test_selection_survives_paging() {
        let (service, user) = service();
        let last = service.catalog().items()[99].name.clone();

        service
            .update_preferences(&user, &json!({ "categories": [last.clone()] }))
            .await
            .unwrap();

        let page = service.list_page(&user, 1).await.unwrap();
        assert!(page.categories.iter().all(|c| !c.selected));
        assert_eq!(page.selected_categories, vec![last]);
    }

    #[tokio::test]
    async fn test_empty_update_clears_selection() {
        let (service, user) = service();
        let name = service.catalog().items()[2].name.clone();

        service
            .update_preferences(&user, &json!({ "categories": [name] }))
            .await
            .unwrap();
        service
            .update_preferences(&user, &json!({ "categories": [] }))
            .await
            .unwrap();

        let page = service.list_page(&user, 1).await.unwrap();
        assert!(page.categories.iter().all(|c| !c.selected));
        assert!(service.user_preferences(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_payload_leaves_preferences_unchanged() {
        let (service, user) = service();
        let name = service.catalog().items()[5].name.clone();

        service
            .update_preferences(&user, &json!({ "categories": [name.clone()] }))
            .await
            .unwrap();

        let result = service
            .update_preferences(&user, &json!({ "categories": name.clone() }))
            .await;
        assert!(matches!(result, Err(AppError::InvalidCategories)));
        assert_eq!(service.user_preferences(&user).await.unwrap(), vec![name]);
    }

    #[tokio::test]
    async fn test_update_for_unknown_user() {
        let (service, _) = service();

        let result = service
            .update_preferences(&UserId::new("ghost"), &json!({ "categories": [] }))
            .await;
        assert!(matches!(result, Err(AppError::UserNotFound { .. })));
    }
}
