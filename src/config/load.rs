use crate::config::types::{OptionOverrides, VideoExtensionTable};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 工作目錄中的選用設定檔
pub const SETTINGS_FILE: &str = "cinegrid.json";

/// 編譯時嵌入的影片副檔名表（不需要外部檔案）
const VIDEO_EXTENSIONS_JSON: &str = include_str!("../data/video_extensions.json");

impl VideoExtensionTable {
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(VIDEO_EXTENSIONS_JSON).context("無法解析嵌入的影片副檔名設定")
    }
}

pub fn load_settings() -> Result<OptionOverrides> {
    load_settings_from(Path::new(SETTINGS_FILE))
}

/// 設定檔不存在時回傳空設定層；存在但無法讀取或解析則回報錯誤
pub fn load_settings_from(path: &Path) -> Result<OptionOverrides> {
    if !path.exists() {
        return Ok(OptionOverrides::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))
}
