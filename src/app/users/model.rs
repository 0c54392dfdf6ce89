//! 用户数据模型与请求校验

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::core::response::FieldError;

/// 用户实体，时间戳字段在 JSON 中为 camelCase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub mobile: String,
    pub email: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 校验通过后的新建用户数据，id 和时间戳由存储层分配
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
    pub mobile: String,
    pub email: String,
    pub interests: Vec<String>,
}

/// 校验通过后的更新补丁，None 字段保持原值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}

/// 创建用户请求体，所有字段先按可缺失接收，再逐字段校验
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub age: Option<Value>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub interests: Option<Vec<String>>,
}

/// 更新用户请求体，所有字段可选
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub age: Option<Value>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub interests: Option<Vec<String>>,
}

/// 年龄字段接受 JSON 数字或数字文本，统一解析为整数
fn parse_age(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn is_blank(value: &Option<String>) -> bool {
    match value {
        Some(s) => s.is_empty(),
        None => true,
    }
}

impl CreateUserRequest {
    /// 入库前校验，失败返回字段级错误列表
    ///
    /// 规则与消息：name/mobile 必填非空，age 必须是数字，email 必须是合法邮箱。
    pub fn validate(self) -> Result<NewUser, Vec<FieldError>> {
        let mut errors = Vec::new();

        if is_blank(&self.name) {
            errors.push(FieldError::new("name", "Name is required"));
        }

        let age = self.age.as_ref().and_then(parse_age);
        if age.is_none() {
            errors.push(FieldError::new("age", "Age must be a number"));
        }

        if is_blank(&self.mobile) {
            errors.push(FieldError::new("mobile", "Mobile is required"));
        }

        let email_valid = self
            .email
            .as_deref()
            .map(|e| e.validate_email())
            .unwrap_or(false);
        if !email_valid {
            errors.push(FieldError::new("email", "Email is required"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewUser {
            name: self.name.unwrap_or_default(),
            age: age.unwrap_or_default(),
            mobile: self.mobile.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            interests: self.interests.unwrap_or_default(),
        })
    }
}

impl UpdateUserRequest {
    /// 更新校验：字段都可缺失，但给出的字段必须合法
    pub fn validate(self) -> Result<UserPatch, Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Some(name) = &self.name {
            if name.is_empty() {
                errors.push(FieldError::new("name", "Name is required"));
            }
        }

        let mut age = None;
        if let Some(value) = &self.age {
            age = parse_age(value);
            if age.is_none() {
                errors.push(FieldError::new("age", "Age must be a number"));
            }
        }

        if let Some(mobile) = &self.mobile {
            if mobile.is_empty() {
                errors.push(FieldError::new("mobile", "Mobile is required"));
            }
        }

        if let Some(email) = &self.email {
            if !email.validate_email() {
                errors.push(FieldError::new("email", "Email is required"));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UserPatch {
            name: self.name,
            age,
            mobile: self.mobile,
            email: self.email,
            interests: self.interests,
        })
    }
}
