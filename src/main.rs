use clap::Parser;
use form_scaffold::utils::error::ErrorSeverity;
use form_scaffold::utils::{logger, validation::Validate};
use form_scaffold::{CliConfig, FileScaffold, LocalStorage, ScaffoldEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting form-scaffold CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let dry_run = config.dry_run;
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ScaffoldEngine::new(FileScaffold::new(storage, config));

    let outcome = if dry_run {
        engine.preview().await.map(|html| {
            println!("{}", html);
        })
    } else {
        engine.run().await.map(|output_path| {
            println!("✅ Form rendered successfully!");
            println!("📁 Output saved to: {}", output_path);
        })
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Rendering failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
