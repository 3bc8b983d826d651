use capture_range::adapters::{DirectorySource, ListSource, StdinSource};
use capture_range::core::ItemSource;
use capture_range::utils::error::ErrorSeverity;
use capture_range::utils::{logger, validation::Validate};
use capture_range::{
    render, time_range_from_config, CliConfig, Result, TimeRangeSelector, TomlConfig,
};
use clap::Parser;

fn main() {
    let mut config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        match TomlConfig::from_file(&path).and_then(|file| file.validate().map(|_| file)) {
            Ok(file) => config.merge_file(file),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Selection failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(config: &CliConfig) -> Result<()> {
    let selector = TimeRangeSelector::from_config(config)?;
    let items = gather_items(config)?;

    if config.dry_run {
        perform_dry_run(config, &selector, &items);
        return Ok(());
    }

    let range = time_range_from_config(config)?;
    tracing::info!(
        "🔍 Selecting from {} items for {} .. {}",
        items.len(),
        range.start().to_rfc3339(),
        range.end().to_rfc3339()
    );

    let buckets = selector.select_buckets(&items, &range);
    let output = render(&buckets, config.output_format())?;

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

/// 命令列項目優先，其次為目錄，最後讀取 stdin
fn gather_items(config: &CliConfig) -> Result<Vec<String>> {
    if !config.items.is_empty() {
        return ListSource::new(config.items.clone()).items();
    }

    if let Some(dir) = &config.dir {
        return DirectorySource::new(dir).items();
    }

    tracing::debug!("Reading items from stdin");
    StdinSource.items()
}

fn perform_dry_run(config: &CliConfig, selector: &TimeRangeSelector, items: &[String]) {
    let extractor = selector.extractor();

    println!("📋 Configuration Summary:");
    println!("  Pattern: {}", extractor.pattern());
    println!("  Time format: {}", extractor.format());
    println!("  Numeric timestamps: {}", extractor.is_numeric());
    println!("  Start: {}", config.start.as_deref().unwrap_or("(missing)"));
    println!("  End: {}", config.end.as_deref().unwrap_or("(missing)"));
    println!("  Output: {}", config.output_format());
    println!();

    let mut keyed = 0;
    println!("🔍 Items ({}):", items.len());
    for item in items {
        match extractor.extract(item) {
            Ok(key) => {
                keyed += 1;
                println!("  {} -> {}", item, key);
            }
            Err(reason) => println!("  {} (skipped: {})", item, reason.as_str()),
        }
    }

    println!();
    println!("✅ {} of {} items carry a timestamp key", keyed, items.len());
}
