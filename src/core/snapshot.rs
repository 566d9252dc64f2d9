//! 目錄快照：將產生的目錄存成檔案，重新啟動時沿用同一份名稱，
//! 避免使用者已存的偏好名稱在重啟後失效。
//!
//! 支援兩種格式，依副檔名決定：
//! - `.json`：分類物件陣列
//! - `.csv`：標頭為 `id,name,productCount,createdAt`

use crate::core::catalog::Catalog;
use crate::core::{Category, Storage};
use crate::utils::error::{AppError, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    pub fn from_path(path: &str) -> Result<Self> {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("csv") => Ok(SnapshotFormat::Csv),
            _ => Err(AppError::CatalogError {
                message: format!("unsupported snapshot format: {}", path),
            }),
        }
    }
}

pub struct CatalogSnapshot<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> CatalogSnapshot<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    /// Returns `None` when no snapshot has been written yet.
    pub async fn load(&self) -> Result<Option<Catalog>> {
        if !self.storage.exists(&self.path).await? {
            return Ok(None);
        }

        let data = self.storage.read_file(&self.path).await?;
        let categories = decode(SnapshotFormat::from_path(&self.path)?, &data)?;

        Catalog::from_categories(categories).map(Some)
    }

    pub async fn save(&self, catalog: &Catalog) -> Result<()> {
        let data = encode(SnapshotFormat::from_path(&self.path)?, catalog.items())?;
        self.storage.write_file(&self.path, &data).await
    }
}

pub fn encode(format: SnapshotFormat, categories: &[Category]) -> Result<Vec<u8>> {
    match format {
        SnapshotFormat::Json => Ok(serde_json::to_vec_pretty(categories)?),
        SnapshotFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for category in categories {
                writer.serialize(category)?;
            }
            writer.into_inner().map_err(|e| AppError::CatalogError {
                message: format!("failed to flush CSV snapshot: {}", e),
            })
        }
    }
}

pub fn decode(format: SnapshotFormat, data: &[u8]) -> Result<Vec<Category>> {
    match format {
        SnapshotFormat::Json => Ok(serde_json::from_slice(data)?),
        SnapshotFormat::Csv => {
            let mut reader = csv::Reader::from_reader(data);
            let mut categories: Vec<Category> = Vec::new();
            for row in reader.deserialize::<Category>() {
                categories.push(row?);
            }
            Ok(categories)
        }
    }
}
