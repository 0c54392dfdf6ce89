//! 用户接口处理器与路由

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::info;
use uuid::Uuid;

use super::model::{CreateUserRequest, UpdateUserRequest, User};
use super::service::UserService;
use crate::core::error::CoreError;
use crate::core::response::MessageResponse;

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

/// 目录服务的全部路由
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/health", get(health_check))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, CoreError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, CoreError> {
    // 结构非法的 id 视作不存在
    let id = parse_lookup_id(&id)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), CoreError> {
    let new_user = payload.validate().map_err(CoreError::Validation)?;
    let user = state.user_service.create_user(new_user).await?;
    info!("已创建用户 {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, CoreError> {
    // 更新要求路径 id 结构合法，否则按校验错误返回
    let id = Uuid::parse_str(&id)
        .map_err(|_| CoreError::invalid_field("id", "Invalid user ID"))?;
    let patch = payload.validate().map_err(CoreError::Validation)?;
    let user = state.user_service.update_user(id, patch).await?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, CoreError> {
    let id = parse_lookup_id(&id)?;
    state.user_service.delete_user(id).await?;
    info!("已删除用户 {}", id);
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

fn parse_lookup_id(id: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(id).map_err(|_| CoreError::NotFound("User not found".to_string()))
}

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let users_count = state.user_service.user_count().await.unwrap_or(0);

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "database": {
            "status": "connected",
            "type": state.user_service.store_kind(),
            "users_count": users_count
        }
    }))
}
