use clap::Parser;
use docreader::app::uploads::{read_upload, upload_name};
use docreader::app::{BatchReport, BatchSummary, TerminalPresenter};
use docreader::core::temp_store::TemporaryFileStore;
use docreader::domain::ports::ConfigProvider;
use docreader::utils::error::ErrorSeverity;
use docreader::utils::{logger, validation::Validate};
use docreader::{
    CliConfig, FileOutcome, FileProcessor, LocalStorage, MarkdownConverter, ReaderEngine,
    ReaderError, Settings, TomlConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (可選)
    let toml_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let mut settings = toml_config
        .as_ref()
        .map(Settings::from_toml)
        .unwrap_or_default();
    settings.apply_cli(&cli);

    // 初始化日誌
    if settings.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting docreader");
    tracing::debug!("Effective settings: {:?}", settings);

    // 驗證配置
    let validation = toml_config
        .as_ref()
        .map_or(Ok(()), |config| config.validate())
        .and_then(|_| settings.validate());
    if let Err(e) = validation {
        exit_with(&e);
    }

    let monitor_enabled = settings.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 共用單一轉換引擎
    let temp_store = match settings.temp_dir() {
        Some(dir) => TemporaryFileStore::in_dir(dir),
        None => TemporaryFileStore::new(),
    };
    let converter = Arc::new(
        MarkdownConverter::new()
            .with_temp_store(temp_store)
            .with_max_archive_depth(settings.max_archive_depth()),
    );

    let storage = LocalStorage::new(settings.output_path());
    let preview_chars = settings.preview_chars;
    let processor = FileProcessor::new(converter, storage, settings);
    let engine = ReaderEngine::new_with_monitoring(processor, monitor_enabled);

    let mut entries = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match read_upload(path).await {
            Ok(upload) => entries.push(Ok(upload)),
            Err(e) => {
                tracing::error!("❌ Could not read {}: {}", path.display(), e);
                entries.push(Err(FileOutcome::Aborted {
                    name: upload_name(path),
                    error: e.to_string(),
                }));
            }
        }
    }

    let outcomes = engine
        .run_entries(entries.iter().map(|entry| match entry {
            Ok(upload) => Ok(upload),
            Err(unreadable) => Err(unreadable.clone()),
        }))
        .await;

    let mut presenter = TerminalPresenter::new(std::io::stdout().lock(), preview_chars);
    for outcome in &outcomes {
        presenter.render(outcome)?;
    }

    let summary = BatchSummary::from_outcomes(&outcomes);
    tracing::info!(
        "🏁 {} converted, {} failed, {} skipped",
        summary.converted,
        summary.failed,
        summary.aborted
    );

    if let Some(report_path) = &cli.report {
        let json = BatchReport::new(&outcomes).to_json()?;
        tokio::fs::write(report_path, json).await?;
        tracing::info!("📁 Report saved to: {}", report_path.display());
    }

    if !summary.all_converted() {
        std::process::exit(2);
    }

    Ok(())
}

fn exit_with(e: &ReaderError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
