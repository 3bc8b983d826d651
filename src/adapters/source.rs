use crate::domain::ports::ItemSource;
use crate::utils::error::Result;
use std::fs;
use std::io::BufRead;
use std::path::PathBuf;

/// 以目錄中的檔名作為項目（不含路徑），依名稱排序
#[derive(Debug, Clone)]
pub struct DirectorySource {
    base_path: PathBuf,
}

impl DirectorySource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl ItemSource for DirectorySource {
    fn items(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => tracing::debug!("Skipping non UTF-8 file name: {:?}", name),
            }
        }

        names.sort();
        tracing::debug!("Listed {} files in {}", names.len(), self.base_path.display());
        Ok(names)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListSource {
    items: Vec<String>,
}

impl ListSource {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }
}

impl ItemSource for ListSource {
    fn items(&self) -> Result<Vec<String>> {
        Ok(self.items.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl ItemSource for StdinSource {
    fn items(&self) -> Result<Vec<String>> {
        read_lines(std::io::stdin().lock())
    }
}

/// One item per non-empty line, surrounding whitespace trimmed.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut items = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            items.push(trimmed.to_string());
        }
    }

    Ok(items)
}
