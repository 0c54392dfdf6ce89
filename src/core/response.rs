//! 核心响应类型
//!
//! 成功响应直接返回 JSON 值（用户数组、单个用户），不做额外包装；
//! 错误响应统一携带 `message` 字段。

use serde::{Deserialize, Serialize};

/// 单字段错误，对应校验失败时的字段级错误列表项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// 纯消息响应（删除确认、404 等）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// 校验失败响应：message + 字段级错误列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: Vec<FieldError>,
}

/// 存储层错误响应：message + 底层错误回显
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreErrorResponse {
    pub message: String,
    pub error: String,
}
