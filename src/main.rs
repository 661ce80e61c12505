use clap::Parser;
use gift_draw::utils::{logger, validation::Validate};
use gift_draw::{AppError, CliConfig, DrawConfig, DrawEngine, DrawReport, OutputFormat};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting gift-draw");
    tracing::debug!("CLI config: {:?}", cli);

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Draw failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: &CliConfig) -> Result<String, AppError> {
    tracing::info!("📁 Loading draw file from: {}", cli.config);
    let mut config = DrawConfig::from_file(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    tracing::info!(
        "Drawing '{}' for {} participants with {} exclusions",
        config.draw.name,
        config.participants.len(),
        config.exclusions.len()
    );

    let engine = DrawEngine::new(config.draw_options());
    let outcome = engine.draw(&config.participants, &config.exclusions)?;
    tracing::info!("✅ Draw completed after {} attempt(s)", outcome.attempts);

    let report = DrawReport::new(
        config.draw.name.clone(),
        &config.participants,
        &outcome.assignment,
        outcome.attempts,
    );

    match cli.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Ok(report.to_text()),
    }
}
