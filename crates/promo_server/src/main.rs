use clap::Parser;
use promo_server::{logging, server, Cli, Settings};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.debug, cli.log_level.as_deref());

    let settings = Settings::from_cli(cli)?;
    tracing::info!(
        operator = %settings.operator_id,
        code_prefix = %settings.code_prefix,
        timezone = %settings.timezone,
        "Promo bot configured"
    );

    server::run(settings).await?;
    Ok(())
}
