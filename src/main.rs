mod config;
mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");
    let port = config.port;

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    if let Some(key) = services::keys::ensure_initial_key(&pool)
        .await
        .expect("master key bootstrap failed")
    {
        tracing::info!(master_key = %key, "generated initial master key; store it now, it is shown once");
    }

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("failed to create upload directory");

    let state = state::AppState::new(pool, config);

    // Background sweep of expired files and channels.
    let _cleanup = services::cleanup::spawn_cleanup_task(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chanbox listening");
    axum::serve(listener, app).await.expect("server failed");
}
