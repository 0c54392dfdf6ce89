//! 用户业务服务

use std::sync::Arc;
use uuid::Uuid;

use super::model::{NewUser, User, UserPatch};
use super::store::{StoreError, UserStore};
use crate::core::error::CoreError;

/// 用户服务：包装存储层，把存储错误翻译为带操作上下文的核心错误
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        self.store
            .find_all()
            .await
            .map_err(|e| map_store_error("Error fetching users", e))
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, CoreError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| map_store_error("Error fetching user", e))
    }

    pub async fn create_user(&self, new_user: NewUser) -> Result<User, CoreError> {
        self.store
            .insert(new_user)
            .await
            .map_err(|e| map_store_error("Error creating user", e))
    }

    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, CoreError> {
        self.store
            .update(id, patch)
            .await
            .map_err(|e| map_store_error("Error updating user", e))
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), CoreError> {
        self.store
            .delete(id)
            .await
            .map_err(|e| map_store_error("Error deleting user", e))
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub async fn user_count(&self) -> Result<u64, CoreError> {
        self.store
            .count()
            .await
            .map_err(|e| map_store_error("Error fetching users", e))
    }
}

fn map_store_error(context: &str, err: StoreError) -> CoreError {
    match err {
        StoreError::NotFound => CoreError::NotFound("User not found".to_string()),
        StoreError::Backend(detail) => CoreError::store(context, detail),
    }
}
