use anyhow::Result;
use capture_range::adapters::DirectorySource;
use capture_range::core::ItemSource;
use capture_range::{
    render, time_range_from_config, OutputFormat, TimeRangeSelector, TomlConfig,
};
use tempfile::TempDir;

fn write_rotation(dir: &std::path::Path) -> Result<()> {
    let mut ts = 1677468390;
    for _ in 0..12 {
        std::fs::write(dir.join(format!("eth0-{}.pcap", ts)), b"")?;
        ts += 121;
    }
    std::fs::write(dir.join("capture.lock"), b"")?;
    Ok(())
}

/// 從 TOML 設定與目錄清單完成一次選取
#[test]
fn test_select_from_directory_with_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let capture_dir = temp_dir.path().join("pcap");
    std::fs::create_dir(&capture_dir)?;
    write_rotation(&capture_dir)?;

    let normalized_path = capture_dir.to_str().unwrap().replace('\\', "/");
    let config_content = format!(
        r#"
[range]
start = "2023-02-27T03:30:20Z"
end = "1677468633"

[source]
directory = "{}"

[output]
format = "json"
"#,
        normalized_path
    );

    let config_path = temp_dir.path().join("capture-range.toml");
    std::fs::write(&config_path, config_content)?;
    let config = TomlConfig::from_file(&config_path)?;
    config.validate_config()?;

    let items = DirectorySource::new(config.source.directory.as_deref().unwrap()).items()?;
    assert_eq!(items.len(), 13);

    let selector = TimeRangeSelector::from_config(&config)?;
    let range = time_range_from_config(&config)?;
    let buckets = selector.select_buckets(&items, &range);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].items, vec!["eth0-1677468511.pcap"]);
    assert_eq!(buckets[1].items, vec!["eth0-1677468632.pcap"]);

    let output = render(&buckets, config.output_format())?;
    let value: serde_json::Value = serde_json::from_str(&output)?;
    assert_eq!(value[0]["key"], "1677468511");
    assert_eq!(value[1]["items"][0], "eth0-1677468632.pcap");
    Ok(())
}

#[test]
fn test_plain_output_lists_items_in_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_rotation(temp_dir.path())?;

    let config = TomlConfig::from_toml_str(
        r#"
[range]
start = "1677469000"
end = "1677469200"
"#,
    )?;

    let items = DirectorySource::new(temp_dir.path()).items()?;
    let selector = TimeRangeSelector::from_config(&config)?;
    let range = time_range_from_config(&config)?;
    let buckets = selector.select_buckets(&items, &range);

    let output = render(&buckets, OutputFormat::Plain)?;
    assert_eq!(output, "eth0-1677468995.pcap\neth0-1677469116.pcap");
    Ok(())
}

#[test]
fn test_missing_range_end_is_an_error() -> Result<()> {
    let config = TomlConfig::from_toml_str("[range]\nstart = \"now\"\n")?;
    let err = time_range_from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        capture_range::SelectError::InvalidRange { .. }
    ));
    Ok(())
}
