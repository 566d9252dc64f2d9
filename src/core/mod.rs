pub mod catalog;
pub mod fixture;
pub mod pagination;
pub mod preferences;
pub mod reconcile;
pub mod service;
pub mod snapshot;

pub use crate::domain::model::{
    Category, CategoryPageResponse, CategoryView, UpdatePreferencesResponse, UserId, UserRecord,
};
pub use crate::domain::ports::{Authenticator, ConfigProvider, Storage, UserStore};
pub use crate::utils::error::Result;
