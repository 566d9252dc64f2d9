use crate::core::fixture::FixtureGenerator;
use crate::core::snapshot::CatalogSnapshot;
use crate::core::{Category, ConfigProvider, Storage};
use crate::utils::error::{AppError, Result};
use std::cmp::Ordering;
use std::collections::HashSet;

/// 依名稱排序、啟動後唯讀的分類目錄
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Category>,
    names: HashSet<String>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sorts by name and rejects duplicate names.
    pub fn from_categories(mut items: Vec<Category>) -> Result<Self> {
        let mut names = HashSet::with_capacity(items.len());
        for item in &items {
            if !names.insert(item.name.clone()) {
                return Err(AppError::CatalogError {
                    message: format!("duplicate category name: {}", item.name),
                });
            }
        }

        items.sort_by(|a, b| compare_names(&a.name, &b.name));

        Ok(Self { items, names })
    }

    pub fn items(&self) -> &[Category] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// 不分大小寫比較，相同時再依原始字串排序，確保順序穩定
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// 有設定快照路徑時優先讀取快照，否則產生新目錄並寫回快照
pub async fn load_catalog<C: ConfigProvider, S: Storage>(config: &C, storage: S) -> Result<Catalog> {
    let generator = FixtureGenerator::new(config.catalog_size(), config.catalog_seed());

    let Some(path) = config.snapshot_path() else {
        return Ok(generator.generate());
    };

    let snapshot = CatalogSnapshot::new(storage, path);
    if let Some(catalog) = snapshot.load().await? {
        tracing::info!("Loaded {} categories from snapshot {}", catalog.len(), path);
        return Ok(catalog);
    }

    let catalog = generator.generate();
    match snapshot.save(&catalog).await {
        Ok(()) => tracing::info!("Wrote catalog snapshot to {}", path),
        Err(e) => tracing::warn!("Failed to write catalog snapshot {}: {}", path, e),
    }

    Ok(catalog)
}

/// 目錄建立失敗時退回空目錄，只記錄錯誤不往外拋
pub async fn init_catalog<C: ConfigProvider, S: Storage>(config: &C, storage: S) -> Catalog {
    match load_catalog(config, storage).await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("Failed to build category catalog, serving an empty one: {}", e);
            Catalog::empty()
        }
    }
}
