use crate::domain::model::{UserId, UserRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 使用者資料的持久化介面，只需要依 id 查詢與覆寫分類欄位
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>>;

    /// 整批覆寫分類；使用者不存在時回傳 `None`
    async fn update_categories(
        &self,
        id: &UserId,
        categories: Vec<String>,
    ) -> Result<Option<UserRecord>>;
}

/// 將 bearer token 解析為使用者身分
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<Option<UserId>>;
}

/// 建立目錄所需的設定
pub trait ConfigProvider: Send + Sync {
    fn catalog_size(&self) -> usize;
    fn catalog_seed(&self) -> Option<u64>;
    fn snapshot_path(&self) -> Option<&str>;
}
