//! 配置基础设施
//!
//! 全部配置取自环境变量，属于部署层面的胶水：
//! - `PORT`：服务监听端口，默认 5000
//! - `DATABASE_URL`：文档存储连接串，缺省时使用内存存储
//! - `DIRECTORY_API_URL`：客户端访问的服务地址

use std::env;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// 服务端配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        Self { port, database_url }
    }
}

/// 客户端访问的服务基地址
pub fn client_api_url() -> String {
    env::var("DIRECTORY_API_URL")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
