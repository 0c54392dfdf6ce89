//! 页面流程：列表、新增、编辑
//!
//! 对应原系统的三个页面。每个流程只做一件事：调服务、维护本地状态、
//! 把失败转成人类可读的消息。没有重试，没有自动恢复。

use tracing::error;

use super::api::{ClientError, DirectoryClient};
use super::form::{FormError, UserForm};
use crate::app::users::model::User;

/// 列表页：先调服务端删除，成功后才移除本地行
pub struct ListPage {
    users: Vec<User>,
}

impl ListPage {
    pub async fn load(client: &DirectoryClient) -> Result<Self, ClientError> {
        let users = client.fetch_users().await?;
        Ok(Self { users })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// 删除一行：服务端失败时本地状态保持不变
    pub async fn delete(
        &mut self,
        client: &DirectoryClient,
        id: &str,
    ) -> Result<(), ClientError> {
        client.delete_user(id).await?;
        self.users.retain(|u| u.id.to_string() != id);
        Ok(())
    }
}

/// 新增页
pub struct AddPage {
    pub form: UserForm,
    message: Option<String>,
    submitting: bool,
}

impl Default for AddPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AddPage {
    pub fn new() -> Self {
        Self {
            form: UserForm::default(),
            message: None,
            submitting: false,
        }
    }

    /// 页面上显示的提示消息（成功确认或错误）
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// 提交表单：age 非数字时不发请求；成功后清空表单并留下确认消息。
    /// 成功与否都不自动跳转。
    pub async fn submit(&mut self, client: &DirectoryClient) -> Option<User> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.message = None;

        let payload = match self.form.to_new_user() {
            Ok(payload) => payload,
            Err(FormError::InvalidAge) => {
                self.message = Some(format!("Error: {}", FormError::InvalidAge));
                self.submitting = false;
                return None;
            }
        };

        let result = client.create_user(&payload).await;
        self.submitting = false;
        match result {
            Ok(user) => {
                self.form.clear();
                self.message = Some("User added successfully!".to_string());
                Some(user)
            }
            Err(err) => {
                error!("创建用户失败: {}", err);
                let message = err
                    .server_message()
                    .unwrap_or("Failed to add user. Please try again later.");
                self.message = Some(format!("Error: {}", message));
                None
            }
        }
    }
}

/// 编辑页状态机
///
/// Idle → LoadingUser → UserLoaded → Submitting → Submitted，
/// 加载失败进入 Error；提交失败退回 UserLoaded 以便重试。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStatus {
    Idle,
    LoadingUser,
    UserLoaded,
    Submitting,
    Submitted,
    Error,
}

/// 编辑页
pub struct EditPage {
    user_id: String,
    pub form: UserForm,
    status: EditStatus,
    error_message: Option<String>,
    loaded_name: String,
}

impl EditPage {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            form: UserForm::default(),
            status: EditStatus::Idle,
            error_message: None,
            loaded_name: String::new(),
        }
    }

    pub fn status(&self) -> EditStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// 加载时取到的用户名，供页面标题显示
    pub fn loaded_name(&self) -> &str {
        &self.loaded_name
    }

    /// 表单是否可编辑：加载中和提交中都禁用
    pub fn fields_enabled(&self) -> bool {
        self.status == EditStatus::UserLoaded
    }

    /// 按路径 id 拉取用户并填充表单
    pub async fn load(&mut self, client: &DirectoryClient) {
        self.status = EditStatus::LoadingUser;
        self.error_message = None;

        match client.fetch_user(&self.user_id).await {
            Ok(user) => {
                self.form = UserForm::from_user(&user);
                self.loaded_name = user.name;
                self.status = EditStatus::UserLoaded;
            }
            Err(err) => {
                error!("加载用户失败: {}", err);
                self.error_message = Some(
                    "Failed to fetch user data. The user might not exist or there was a network issue."
                        .to_string(),
                );
                self.status = EditStatus::Error;
            }
        }
    }

    /// 提交整份表单。只有 UserLoaded 状态可以提交，天然挡住重复提交。
    pub async fn submit(&mut self, client: &DirectoryClient) {
        if self.status != EditStatus::UserLoaded {
            return;
        }
        self.error_message = None;

        let payload = match self.form.to_patch() {
            Ok(payload) => payload,
            Err(FormError::InvalidAge) => {
                // 不发请求，停留在可编辑状态
                self.error_message = Some(FormError::InvalidAge.to_string());
                return;
            }
        };

        self.status = EditStatus::Submitting;
        match client.update_user(&self.user_id, &payload).await {
            Ok(_) => {
                self.status = EditStatus::Submitted;
            }
            Err(err) => {
                error!("更新用户失败: {}", err);
                // 优先用服务端 message，否则用通用兜底文案，然后退回可编辑状态
                let message = err
                    .server_message()
                    .unwrap_or("Failed to update user. Please check your input or try again later.")
                    .to_string();
                self.error_message = Some(message);
                self.status = EditStatus::UserLoaded;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_page_starts_idle_with_disabled_fields() {
        let page = EditPage::new("some-id");
        assert_eq!(page.status(), EditStatus::Idle);
        assert!(!page.fields_enabled());
        assert!(page.error_message().is_none());
    }

    #[tokio::test]
    async fn edit_submit_is_ignored_outside_user_loaded() {
        // Idle 状态下提交不应发请求，这里用无法连接的地址验证不会出错
        let client = DirectoryClient::new("http://127.0.0.1:1");
        let mut page = EditPage::new("some-id");
        page.submit(&client).await;
        assert_eq!(page.status(), EditStatus::Idle);
    }
}
