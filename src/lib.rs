//! # 用户目录 CRUD 应用
//!
//! 这个库提供用户目录应用的两个组成部分：
//! - 目录服务：基于 Axum 的 REST API，在文档存储上提供用户的增删改查
//! - 目录客户端：调用目录服务的类型化客户端，包含列表/新增/编辑三个页面流程
//!
//! 二进制入口：`directory-server`（服务端）和 `directory-client`（客户端）。

pub mod app;
pub mod client;
pub mod core;
pub mod infrastructure;
