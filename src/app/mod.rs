//! 应用层：各功能模块

pub mod users;
