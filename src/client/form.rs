//! 表单草稿与字段归一化
//!
//! 草稿里的 age 和 interests 都以文本形式保存，提交时才转换：
//! interests 按逗号拆分、去空白、丢弃空项；age 解析失败直接中止提交。

use crate::app::users::model::{NewUser, User, UserPatch};

/// 提交前的本地校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    InvalidAge,
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::InvalidAge => write!(f, "Age must be a valid number."),
        }
    }
}

impl std::error::Error for FormError {}

/// 把逗号分隔的 interests 文本拆成标签序列
pub fn split_interests(text: &str) -> Vec<String> {
    text.split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}

/// 用户表单草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub age: String,
    pub mobile: String,
    pub interests: String,
}

impl UserForm {
    /// 用已有用户填充草稿：age 渲染回文本，interests 用 ", " 连接
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age.to_string(),
            mobile: user.mobile.clone(),
            interests: user.interests.join(", "),
        }
    }

    fn parse_age(&self) -> Result<u32, FormError> {
        self.age.trim().parse().map_err(|_| FormError::InvalidAge)
    }

    /// 转为创建请求载荷，age 非数字则失败
    pub fn to_new_user(&self) -> Result<NewUser, FormError> {
        Ok(NewUser {
            name: self.name.clone(),
            age: self.parse_age()?,
            mobile: self.mobile.clone(),
            email: self.email.clone(),
            interests: split_interests(&self.interests),
        })
    }

    /// 转为更新载荷：编辑页提交整份表单，所有字段都带值
    pub fn to_patch(&self) -> Result<UserPatch, FormError> {
        Ok(UserPatch {
            name: Some(self.name.clone()),
            age: Some(self.parse_age()?),
            mobile: Some(self.mobile.clone()),
            email: Some(self.email.clone()),
            interests: Some(split_interests(&self.interests)),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
