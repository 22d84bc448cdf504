use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::settings::load_settings;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = load_settings()?;
    let pool = db::establish_connection(&settings.db_path).await?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    run_server(pool, &settings).await
}
