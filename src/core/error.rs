//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::core::response::{FieldError, MessageResponse, StoreErrorResponse, ValidationErrorResponse};

/// 核心错误类型
///
/// 错误分三类：请求校验失败（400）、目标不存在（404）、存储层失败（500）。
/// 邮箱唯一性冲突不单独区分，与其他存储层失败一样按 500 返回。
#[derive(Debug)]
pub enum CoreError {
    /// 字段校验失败，存储层不会被触达
    Validation(Vec<FieldError>),
    NotFound(String),
    /// 存储层失败：操作上下文消息 + 底层错误文本
    Store { message: String, detail: String },
}

impl CoreError {
    /// 单字段校验错误的便捷构造
    pub fn invalid_field(field: &str, message: &str) -> Self {
        CoreError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn store(message: &str, detail: String) -> Self {
        CoreError::Store {
            message: message.to_string(),
            detail,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::Validation(errors) => write!(f, "校验失败: {} 个字段错误", errors.len()),
            CoreError::NotFound(msg) => write!(f, "未找到: {}", msg),
            CoreError::Store { message, detail } => write!(f, "存储层失败: {} ({})", message, detail),
        }
    }
}

impl std::error::Error for CoreError {}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        match self {
            CoreError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                axum::Json(ValidationErrorResponse {
                    message: "Validation failed".to_string(),
                    errors,
                }),
            )
                .into_response(),
            CoreError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                axum::Json(MessageResponse { message }),
            )
                .into_response(),
            CoreError::Store { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(StoreErrorResponse {
                    message,
                    error: detail,
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_400() {
        let err = CoreError::invalid_field("name", "Name is required");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = CoreError::NotFound("User not found".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_error_maps_to_500() {
        let err = CoreError::store("Error creating user", "connection refused".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
