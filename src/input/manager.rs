//! Input manager for loading answer batches from disk

use crate::error::{Result, ScorerError};
use crate::input::batch_parser::{parse_batch, parse_json_lines};
use crate::input::file_detector::FileType;
use crate::processing::evaluator::RawQaItem;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, Vec<RawQaItem>>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn load_batch(&mut self, path: &Path) -> Result<Vec<RawQaItem>> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached batch for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(ScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let items = match file_type {
            FileType::Json => {
                info!("Reading JSON answer batch: {}", path.display());
                parse_batch(&fs::read_to_string(path).await?)
            }
            FileType::JsonLines => {
                info!("Reading JSON Lines answer batch: {}", path.display());
                parse_json_lines(&fs::read_to_string(path).await?)
            }
            FileType::Unknown => {
                return Err(ScorerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, items.clone());
        }

        Ok(items)
    }

    /// Read a plain text file, such as a generated question list
    pub async fn read_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ScorerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        Ok(fs::read_to_string(path).await?)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ScorerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
