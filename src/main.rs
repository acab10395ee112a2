use std::sync::Arc;

use cycle_quiz::config::QuizConfig;
use cycle_quiz::quiz::{LogRegistrar, QuizSessions, Registrar, quiz_routes, spawn_expiry_task};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = QuizConfig::from_env();

    eprintln!("🌙 Cycle Quiz v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Quiz API: http://0.0.0.0:{}/api/quiz", config.port);
    eprintln!("   Quiz WS:  ws://0.0.0.0:{}/api/quiz/<session>/ws", config.port);
    eprintln!("   Auto-advance delay: {:?}", config.advance_delay);
    eprintln!("   Session TTL: {:?}\n", config.session_ttl);

    let registrar: Arc<dyn Registrar> = Arc::new(LogRegistrar);
    let sessions = QuizSessions::new(config.clone(), registrar);
    spawn_expiry_task(Arc::clone(&sessions));
    let app = quiz_routes(sessions);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Quiz server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
