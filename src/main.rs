//! 目录服务入口
//!
//! 启动流程与原系统一致：先连接存储，再开始监听。
//! 存储连接和路由都挂在显式的应用状态上，不依赖全局变量。

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use user_directory::app::users::handler::{routes, AppState};
use user_directory::app::users::service::UserService;
use user_directory::app::users::store::{MemoryStore, UserStore};
use user_directory::core::middleware::request_logging_middleware;
use user_directory::infrastructure::config::AppConfig;
use user_directory::infrastructure::logger::Logger;

#[tokio::main]
async fn main() {
    Logger::init();

    let config = AppConfig::from_env();
    let store = build_store(&config).await;
    let state = AppState {
        user_service: UserService::new(store),
    };

    let app = routes()
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap_or_else(|e| panic!("无法绑定到端口 {}: {}", config.port, e));

    info!("🚀 目录服务运行在 http://0.0.0.0:{}", config.port);
    info!("📖 API 端点:");
    info!("   GET    /users      - 获取所有用户");
    info!("   POST   /users      - 创建新用户");
    info!("   GET    /users/:id  - 获取特定用户");
    info!("   PUT    /users/:id  - 更新用户");
    info!("   DELETE /users/:id  - 删除用户");
    info!("   GET    /health     - 健康检查");

    axum::serve(listener, app).await.expect("服务器启动失败");
}

/// 按配置选择存储后端：配置了 DATABASE_URL 用 PostgreSQL，否则用内存存储
async fn build_store(config: &AppConfig) -> Arc<dyn UserStore> {
    #[cfg(feature = "database")]
    if let Some(url) = &config.database_url {
        use user_directory::app::users::store::PgStore;
        use user_directory::infrastructure::database::DatabaseManager;

        let manager = DatabaseManager::new(url).await.expect("文档存储连接失败");
        let store = PgStore::new(manager.get_pool().clone());
        store.ensure_schema().await.expect("初始化用户表失败");
        info!("✅ 已连接 PostgreSQL 文档存储");
        return Arc::new(store);
    }

    info!("✅ 使用内存存储 (未配置 DATABASE_URL)");
    Arc::new(MemoryStore::new())
}
