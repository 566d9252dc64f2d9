// Adapters layer: concrete implementations of the domain ports (users, auth, file storage).

pub mod auth;
pub mod memory_store;
pub mod rest_store;
pub mod storage;
