use product_api::{
    build_router, infrastructure::logger::Logger, AppConfig, AppState, ProductService,
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    Logger::init(&config.log_level)?;

    let service = ProductService::with_seed_data();
    info!("✅ 已初始化 {} 个示例产品", service.count()?);
    let state = AppState::new(service);
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.socket_addr()?).await?;

    info!("🚀 Server is running on http://localhost:{}", config.port);
    info!("📖 API 端点:");
    info!("   GET    /api/products      - 获取所有产品");
    info!("   GET    /api/products/:id  - 获取特定产品");
    info!("   POST   /api/products      - 创建新产品 (需要认证)");
    info!("   PUT    /api/products/:id  - 更新产品 (需要认证)");
    info!("   DELETE /api/products/:id  - 删除产品 (需要认证)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务器已停止");
    Ok(())
}

/// 等待 Ctrl-C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("无法监听 Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到关闭信号，正在停止...");
}
