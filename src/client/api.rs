//! 目录服务 API 客户端

use serde::Deserialize;
use tracing::error;

use crate::app::users::model::{NewUser, User, UserPatch};
use crate::core::response::MessageResponse;

/// 客户端错误：服务端返回的业务错误或传输层失败
#[derive(Debug)]
pub enum ClientError {
    /// 非 2xx 响应，携带状态码和服务端的 message
    Api { status: u16, message: String },
    Transport(String),
}

impl ClientError {
    /// 服务端给出的消息；传输层失败时为 None
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            ClientError::Transport(_) => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Api { status, message } => write!(f, "[{}] {}", status, message),
            ClientError::Transport(msg) => write!(f, "请求失败: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

/// 错误响应体按宽松结构解码，只关心 message
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// 目录服务的类型化客户端
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self.http.get(self.url("/users")).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn fetch_user(&self, id: &str) -> Result<User, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/users/{}", id)))
            .send()
            .await?;
        let response = Self::check(response).await?;
        // interests 缺失时反序列化为默认空列表
        Ok(response.json().await?)
    }

    pub async fn create_user(&self, payload: &NewUser) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/users"))
            .json(payload)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn update_user(&self, id: &str, payload: &UserPatch) -> Result<User, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/users/{}", id)))
            .json(payload)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_user(&self, id: &str) -> Result<MessageResponse, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/users/{}", id)))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// 非 2xx 响应转为 ClientError::Api，并尽量取出服务端 message
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .message
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
        error!("目录服务返回错误 {}: {}", status.as_u16(), message);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
