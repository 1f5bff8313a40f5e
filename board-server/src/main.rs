use board_server::infrastructure::config::AppConfig;
use board_server::infrastructure::logging::init_logging;
use board_server::server::{build_services, start_rest_server};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let services = build_services(&config).await?;

    start_rest_server(config, services).await
}
