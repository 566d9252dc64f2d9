use crate::core::catalog::Catalog;
use crate::core::{Category, CategoryView};
use crate::utils::error::{AppError, Result};
use serde_json::Value;
use std::collections::HashSet;

/// 驗證後的選取結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validated {
    pub accepted: Vec<String>,
    pub dropped: Vec<String>,
}

pub fn annotate(items: &[Category], selected: &[String]) -> Vec<CategoryView> {
    let selected: HashSet<&str> = selected.iter().map(String::as_str).collect();

    items
        .iter()
        .map(|category| CategoryView {
            selected: selected.contains(category.name.as_str()),
            category: category.clone(),
        })
        .collect()
}

/// 取出請求中的 `categories` 陣列；缺少或不是陣列時視為用戶端錯誤
pub fn extract_candidates(body: &Value) -> Result<&[Value]> {
    match body.get("categories") {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        _ => Err(AppError::InvalidCategories),
    }
}

/// Keeps candidates that name a catalog entry, collapsing repeats.
pub fn validate_selection(candidates: &[Value], catalog: &Catalog) -> Validated {
    let mut seen = HashSet::new();
    let mut validated = Validated::default();

    for candidate in candidates {
        match candidate {
            Value::String(name) if catalog.contains(name) => {
                if seen.insert(name.as_str()) {
                    validated.accepted.push(name.clone());
                }
            }
            Value::String(name) => validated.dropped.push(name.clone()),
            other => validated.dropped.push(other.to_string()),
        }
    }

    if !validated.dropped.is_empty() {
        tracing::debug!("Dropped categories not in catalog: {:?}", validated.dropped);
    }

    validated
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn catalog() -> Catalog {
        let created_at = Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap();
        Catalog::from_categories(
            ["Books", "Garden", "Toys"]
                .iter()
                .enumerate()
                .map(|(i, name)| Category {
                    id: format!("cat-{}", i),
                    name: name.to_string(),
                    product_count: 100,
                    created_at,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_annotate_marks_selected_items() {
        let catalog = catalog();
        let views = annotate(catalog.items(), &["Garden".to_string(), "Stale".to_string()]);

        let flags: Vec<(&str, bool)> = views
            .iter()
            .map(|v| (v.category.name.as_str(), v.selected))
            .collect();
        assert_eq!(flags, vec![("Books", false), ("Garden", true), ("Toys", false)]);
    }

    #[test]
    fn test_annotate_with_no_selection() {
        let catalog = catalog();
        assert!(annotate(catalog.items(), &[]).iter().all(|v| !v.selected));
    }

    #[test]
    fn test_validate_drops_unknown_names() {
        let candidates = [json!("Books"), json!("Not A Category")];
        let validated = validate_selection(&candidates, &catalog());

        assert_eq!(validated.accepted, vec!["Books"]);
        assert_eq!(validated.dropped, vec!["Not A Category"]);
    }

    #[test]
    fn test_validate_drops_non_strings_and_repeats() {
        let candidates = [json!("Toys"), json!(42), json!(null), json!("Toys"), json!({"name": "Books"})];
        let validated = validate_selection(&candidates, &catalog());

        assert_eq!(validated.accepted, vec!["Toys"]);
        assert_eq!(validated.dropped, vec!["42", "null", "{\"name\":\"Books\"}"]);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let candidates = [json!("Toys"), json!("Books")];
        let first = validate_selection(&candidates, &catalog());
        let again: Vec<Value> = first.accepted.iter().map(|n| json!(n)).collect();

        assert_eq!(validate_selection(&again, &catalog()), first);
    }

    #[test]
    fn test_extract_candidates_requires_array() {
        assert_eq!(extract_candidates(&json!({"categories": []})).unwrap().len(), 0);
        assert!(matches!(
            extract_candidates(&json!({"categories": "Books"})),
            Err(AppError::InvalidCategories)
        ));
        assert!(matches!(extract_candidates(&json!({})), Err(AppError::InvalidCategories)));
        assert!(matches!(extract_candidates(&json!(["Books"])), Err(AppError::InvalidCategories)));
    }
}
