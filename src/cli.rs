use crate::config::{Caps, OptionOverrides, Template};
use clap::Parser;
use std::path::PathBuf;

/// 為影片產生附時間戳的縮圖網格預覽圖
///
/// 未指定的參數依序沿用樣板、`cinegrid.json` 與內建預設值。
#[derive(Debug, Parser)]
#[command(name = "cinegrid", version, about)]
pub struct Cli {
    /// 影片檔案或資料夾（資料夾會遞迴尋找影片）
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// 背景顏色（預設 #EAEAEA）
    #[arg(long, value_name = "COLOR")]
    pub bgcolor: Option<String>,

    /// 邊框粗細，單位像素（預設 0）
    #[arg(long, value_name = "PIXELS")]
    pub border: Option<u32>,

    /// 邊框顏色（預設 black）
    #[arg(long = "b_color", value_name = "COLOR")]
    pub b_color: Option<String>,

    /// 擷取張數，或 "maximum" 依寬度上限計算（預設 9）
    #[arg(long, value_name = "N|maximum")]
    pub caps: Option<Caps>,

    /// 欄數（預設 3）
    #[arg(long, allow_negative_numbers = true)]
    pub columns: Option<i64>,

    /// 擷取結束時間，單位秒
    #[arg(long, value_name = "END")]
    pub end: Option<f64>,

    /// 擷取結束位置，影片長度百分比（預設 90）
    #[arg(long = "end_percent", value_name = "END")]
    pub end_percent: Option<f64>,

    /// 標頭字級（預設 32）
    #[arg(long = "h_fontsize", value_name = "PIXELS")]
    pub h_fontsize: Option<u32>,

    /// 顯示檔案資訊標頭
    #[arg(long)]
    pub header: bool,

    /// 擷取間隔秒數；未同時指定 --caps 時由間隔決定張數（預設 30）
    #[arg(long)]
    pub interval: Option<f64>,

    /// 檔案大小上限，單位 KB（預設 3072）
    #[arg(long = "max_filesize", value_name = "KB")]
    pub max_filesize: Option<f64>,

    /// 高度上限，單位像素（預設 5000）
    #[arg(long = "max_height", value_name = "PIXELS")]
    pub max_height: Option<u32>,

    /// 寬度上限，單位像素（預設 5000）
    #[arg(long = "max_width", value_name = "PIXELS")]
    pub max_width: Option<u32>,

    /// 輸出資料夾（預設 ~/Pictures）
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// 覆寫已存在的預覽圖
    #[arg(long)]
    pub overwrite: bool,

    /// 結束前等待按下 Enter
    #[arg(long)]
    pub prompt: bool,

    /// 縮圖加上陰影
    #[arg(long)]
    pub shadow: bool,

    /// 縮圖間距，單位像素（預設 0）
    #[arg(long)]
    pub spacing: Option<u32>,

    /// 擷取開始時間，單位秒
    #[arg(long, value_name = "START")]
    pub start: Option<f64>,

    /// 擷取開始位置，影片長度百分比（預設 0）
    #[arg(long = "start_percent", value_name = "START")]
    pub start_percent: Option<f64>,

    /// 設定樣板: 3x3, big, custom, huge, mpc（預設 3x3）
    #[arg(long)]
    pub template: Option<Template>,

    /// 時間戳字型
    #[arg(long = "t_font", value_name = "FONT")]
    pub t_font: Option<String>,

    /// 時間戳字級（預設 64）
    #[arg(long = "t_fontsize", value_name = "PIXELS")]
    pub t_fontsize: Option<u32>,

    /// 在縮圖上顯示時間戳
    #[arg(long)]
    pub timestamp: bool,
}

impl Cli {
    /// 命令列設定層；旗標只在有指定時才覆寫較低層
    #[must_use]
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            start: self.start,
            end: self.end,
            start_percent: self.start_percent,
            end_percent: self.end_percent,
            caps: self.caps,
            columns: self.columns,
            interval: self.interval,
            max_width: self.max_width,
            max_height: self.max_height,
            max_filesize: self.max_filesize,
            overwrite: self.overwrite.then_some(true),
            output: self.output.clone(),
            template: self.template,
            header: self.header.then_some(true),
            timestamp: self.timestamp.then_some(true),
            shadow: self.shadow.then_some(true),
            spacing: self.spacing,
            border: self.border,
            bgcolor: self.bgcolor.clone(),
            b_color: self.b_color.clone(),
            t_font: self.t_font.clone(),
            t_fontsize: self.t_fontsize,
            h_fontsize: self.h_fontsize,
        }
    }
}
