use clap::Parser;
use region_store_finder::domain::ports::ConfigProvider;
use region_store_finder::utils::error::ErrorSeverity;
use region_store_finder::utils::{logger, validation::Validate};
use region_store_finder::{CliConfig, LocalStorage, ReportEngine, ScoutError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting region-store-finder");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.validate().and_then(|_| cli.resolve()) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };
    if let Err(e) = config.validate() {
        exit_with(e);
    }

    let region = cli.region();
    let pipeline = match config.build_pipeline() {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with(e),
    };

    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = ReportEngine::new(pipeline, storage, config.output_path());

    if cli.stdout {
        let outcome = match engine.collect(&region).await {
            Ok(outcome) => outcome,
            Err(e) => exit_with(e),
        };
        println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        return Ok(());
    }

    match engine.run(&region).await {
        Ok(output_path) => {
            println!("✅ Report for {} saved to: {}", region, output_path);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(e: ScoutError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
