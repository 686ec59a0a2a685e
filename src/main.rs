use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use webscout::{
    app::product::gateway::ProductGateway,
    config::AppConfig,
    create_app,
    infrastructure::{logger::Logger, memory_store::MemoryProductGateway},
    AppState, ProductService,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("加载配置失败")?;

    Logger::init(&config.service.log_level);
    info!(service = %config.service.name, "启动商品服务...");

    let gateway = build_gateway(&config).await?;
    info!(backend = gateway.backend(), "存储已就绪");

    let state = AppState {
        product_service: ProductService::new(gateway),
    };
    let app = create_app(state, config.request_timeout());

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("无法绑定到 {}", config.bind_addr()))?;
    let addr = listener.local_addr()?;

    info!("🚀 商品服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   POST   /system/product               - 新增商品");
    info!("   GET    /system/product/list          - 查询商品列表");
    info!("   POST   /system/product/receiveJson   - 批量导入 JSON");
    info!("   POST   /system/product/receiveCsv    - 批量导入 CSV");
    info!("   POST   /system/product/receiveString - 连通性测试");
    info!("   GET    /health                       - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务已停止");
    Ok(())
}

#[cfg(feature = "database")]
async fn build_gateway(config: &AppConfig) -> Result<Arc<dyn ProductGateway>> {
    use webscout::infrastructure::{database::DatabaseManager, product_store::PgProductGateway};

    let Some(url) = config.database.url.as_deref() else {
        warn!("未配置 database.url，使用内存存储");
        return Ok(Arc::new(MemoryProductGateway::new()));
    };

    let manager = DatabaseManager::new(url, &config.database)
        .await
        .context("连接数据库失败")?;

    if config.database.run_migrations {
        manager
            .run_migrations()
            .await
            .context("执行数据库迁移失败")?;
    }

    Ok(Arc::new(PgProductGateway::new(manager.get_pool().clone())))
}

#[cfg(not(feature = "database"))]
async fn build_gateway(config: &AppConfig) -> Result<Arc<dyn ProductGateway>> {
    if config.database.url.is_some() {
        warn!("未启用 database 特性，忽略 database.url，使用内存存储");
    }
    Ok(Arc::new(MemoryProductGateway::new()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "无法监听 Ctrl+C 信号");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "无法监听 SIGTERM 信号");
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

    info!("收到停止信号，正在关闭...");
}
