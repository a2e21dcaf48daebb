use clap::Parser;
use tracing::info;

use insight::app_state::AppState;
use insight::http::setup_http_server;
use insight::init_telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Backend for the iNsight CRM dashboard")]
#[clap(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
enum Commands {
    /// Show current configuration and exit
    Config,
    /// Start the insight server (default)
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Config => {
            let settings = insight::settings::Settings::new()?;
            println!("{:#?}", &settings);
            return Ok(());
        }
        Commands::Run => {
            // Continue with the normal server startup
        }
    }

    let app_state = AppState::new().await?;
    init_tracing(app_state.settings.debug);

    info!("Insight backend {} starting", insight_core::version::version());
    info!("Environment: {}", app_state.settings.environment);
    info!(
        "Supabase: {}",
        if app_state.settings.supabase.is_configured() {
            "configured"
        } else {
            "not configured"
        }
    );
    info!(
        "AI provider: {}",
        if app_state.settings.ai.is_configured() {
            "configured"
        } else {
            "missing"
        }
    );

    let bind_address = app_state.settings.api.bind_address.clone();
    let handle = setup_http_server(app_state, &bind_address).await?;

    handle.await??;
    info!("All tasks are done");

    Ok(())
}
