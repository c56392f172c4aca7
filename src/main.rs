use anyhow::Context;
use demo_api::{
    app::state::AppState,
    build_router,
    infrastructure::{config::load_config, logger::Logger},
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config().context("加载配置失败")?;

    Logger::init(&config.logging.level);
    Logger::install_panic_hook();

    match &source {
        Some(path) => info!(path = %path, "从配置文件加载"),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let state = AppState::with_seed_data(config.service.server_name.as_str());
    let app = build_router(state);

    let addr = config.http.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {addr}"))?;

    info!("Demo API server running on port {}", config.http.port);
    info!("Health check: http://localhost:{}/health", config.http.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已停止");
    Ok(())
}

/// 收到 Ctrl-C 或 SIGTERM 后返回，停止接收新连接并等待在途请求完成
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("无法监听 Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("无法监听 SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("收到停止信号，等待在途请求完成");
}
