use category_prefs::utils::error::ErrorCategory;
use category_prefs::utils::{logger, validation::Validate};
use category_prefs::{AppState, CliConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 先讀設定，日誌格式取決於設定內容
    let config = match cli.load_server_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let level = config.logging.level.as_deref();
    if config.logging.json {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::info!("Starting category-prefs");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("Initializing state...");
    let state = AppState::new(config).await?;

    if let Err(e) = category_prefs::serve(state).await {
        tracing::error!("❌ Server stopped: {} (Category: {:?})", e, e.category());

        let exit_code = match e.category() {
            ErrorCategory::Configuration => 1,
            _ => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
