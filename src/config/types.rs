use crate::config::template::Template;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct VideoExtensionTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
}

impl VideoExtensionTable {
    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        self.video_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        let video_extensions = self.video_extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| video_extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

/// 擷取張數：固定張數，或依寬度預算算出的最大張數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "CapsValue")]
pub enum Caps {
    Count(i64),
    Maximum,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CapsValue {
    Count(i64),
    Keyword(String),
}

impl TryFrom<CapsValue> for Caps {
    type Error = String;

    fn try_from(value: CapsValue) -> Result<Self, Self::Error> {
        match value {
            CapsValue::Count(count) => Ok(Self::Count(count)),
            CapsValue::Keyword(keyword) => keyword.parse(),
        }
    }
}

impl FromStr for Caps {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("maximum") {
            return Ok(Self::Maximum);
        }
        s.parse::<i64>()
            .map(Self::Count)
            .map_err(|_| format!("caps 必須是整數或 \"maximum\"，收到: {s}"))
    }
}

impl fmt::Display for Caps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Maximum => f.write_str("maximum"),
        }
    }
}

/// 只供外部合成工具使用的外觀設定，擷取計畫不讀取這些欄位
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationOptions {
    pub header: bool,
    pub timestamp: bool,
    pub shadow: bool,
    pub spacing: u32,
    pub border: u32,
    pub bgcolor: String,
    pub border_color: String,
    pub timestamp_font: String,
    pub timestamp_font_size: u32,
    pub header_font_size: u32,
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self {
            header: false,
            timestamp: false,
            shadow: false,
            spacing: 0,
            border: 0,
            bgcolor: "#EAEAEA".to_string(),
            border_color: "black".to_string(),
            timestamp_font: default_timestamp_font().to_string(),
            timestamp_font_size: 64,
            header_font_size: 32,
        }
    }
}

#[cfg(windows)]
const fn default_timestamp_font() -> &'static str {
    "c\\\\:/windows/fonts/arial.ttf"
}

#[cfg(not(windows))]
const fn default_timestamp_font() -> &'static str {
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf"
}

/// 合併預設值、設定檔、樣板與命令列參數後的有效設定
///
/// 建立後即為唯讀輸入，擷取計畫另外產生新的值。
#[derive(Debug, Clone, PartialEq)]
pub struct CapturePlanOptions {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub start_percent: Option<f64>,
    pub end_percent: Option<f64>,
    pub caps: Option<Caps>,
    pub columns: i64,
    pub interval: Option<f64>,
    pub max_width: u32,
    pub max_height: u32,
    pub max_file_size_kb: f64,
    pub overwrite: bool,
    pub output_dir: PathBuf,
    pub template: Template,
    pub presentation: PresentationOptions,
}

impl Default for CapturePlanOptions {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            start_percent: Some(0.0),
            end_percent: Some(90.0),
            caps: Some(Caps::Count(9)),
            columns: 3,
            interval: Some(30.0),
            max_width: 5000,
            max_height: 5000,
            max_file_size_kb: 3072.0,
            overwrite: false,
            output_dir: PathBuf::from("~/Pictures"),
            template: Template::ThreeByThree,
            presentation: PresentationOptions::default(),
        }
    }
}

/// 單一設定層（設定檔、樣板或命令列），未指定的欄位沿用較低層的值
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionOverrides {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub start_percent: Option<f64>,
    pub end_percent: Option<f64>,
    pub caps: Option<Caps>,
    pub columns: Option<i64>,
    pub interval: Option<f64>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub max_filesize: Option<f64>,
    pub overwrite: Option<bool>,
    pub output: Option<PathBuf>,
    pub template: Option<Template>,
    pub header: Option<bool>,
    pub timestamp: Option<bool>,
    pub shadow: Option<bool>,
    pub spacing: Option<u32>,
    pub border: Option<u32>,
    pub bgcolor: Option<String>,
    pub b_color: Option<String>,
    pub t_font: Option<String>,
    pub t_fontsize: Option<u32>,
    pub h_fontsize: Option<u32>,
}

impl CapturePlanOptions {
    /// 依序套用：預設值 → 設定檔 → 樣板 → 命令列
    ///
    /// 樣板取最高層指定的名稱。設定檔只給 interval 時，樣板的 caps 不套用。
    #[must_use]
    pub fn layered(settings: &OptionOverrides, cli: &OptionOverrides) -> Self {
        let template = cli
            .template
            .or(settings.template)
            .unwrap_or(Template::ThreeByThree);

        let mut template_layer = template.overrides();
        if settings.caps.is_none() && settings.interval.is_some() {
            template_layer.caps = None;
        }

        let mut options = Self::default();
        options.apply(settings);
        options.apply(&template_layer);
        options.apply(cli);
        options.template = template;
        options.output_dir = expand_home(&options.output_dir);
        options
    }

    fn apply(&mut self, layer: &OptionOverrides) {
        fn set<T: Clone>(target: &mut T, value: Option<&T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        if layer.start.is_some() {
            self.start = layer.start;
        }
        if layer.end.is_some() {
            self.end = layer.end;
        }
        if layer.start_percent.is_some() {
            self.start_percent = layer.start_percent;
        }
        if layer.end_percent.is_some() {
            self.end_percent = layer.end_percent;
        }

        // 同一層只給 interval 時，捨棄較低層的 caps，否則 caps 永遠優先
        match (layer.caps, layer.interval) {
            (Some(caps), interval) => {
                self.caps = Some(caps);
                if interval.is_some() {
                    self.interval = interval;
                }
            }
            (None, Some(interval)) => {
                self.caps = None;
                self.interval = Some(interval);
            }
            (None, None) => {}
        }

        set(&mut self.columns, layer.columns.as_ref());
        set(&mut self.max_width, layer.max_width.as_ref());
        set(&mut self.max_height, layer.max_height.as_ref());
        set(&mut self.max_file_size_kb, layer.max_filesize.as_ref());
        set(&mut self.overwrite, layer.overwrite.as_ref());
        set(&mut self.output_dir, layer.output.as_ref());

        let presentation = &mut self.presentation;
        set(&mut presentation.header, layer.header.as_ref());
        set(&mut presentation.timestamp, layer.timestamp.as_ref());
        set(&mut presentation.shadow, layer.shadow.as_ref());
        set(&mut presentation.spacing, layer.spacing.as_ref());
        set(&mut presentation.border, layer.border.as_ref());
        set(&mut presentation.bgcolor, layer.bgcolor.as_ref());
        set(&mut presentation.border_color, layer.b_color.as_ref());
        set(&mut presentation.timestamp_font, layer.t_font.as_ref());
        set(
            &mut presentation.timestamp_font_size,
            layer.t_fontsize.as_ref(),
        );
        set(&mut presentation.header_font_size, layer.h_fontsize.as_ref());
    }
}

/// 將開頭的 `~` 展開為使用者家目錄
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    home.map_or_else(|| path.to_path_buf(), |home| PathBuf::from(home).join(rest))
}
