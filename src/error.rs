//! 預覽圖核心流程的錯誤型別
//!
//! 所有錯誤都只影響單一影片檔案，呼叫端記錄後繼續處理下一個檔案。
//! 「預覽圖已存在」不是錯誤，由 [`crate::component::contact_sheet_generator::PlanOutcome::Skip`] 表示。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CinegridError {
    /// ffprobe 無法執行、回傳非零結束碼，或輸出格式錯誤
    #[error("無法讀取影片資訊 {path}: {reason}")]
    ProbeFailed { path: PathBuf, reason: String },

    /// 所有串流都沒有提供寬度或高度
    #[error("影片缺少 {field} 資訊: {path}")]
    MissingMetadata { path: PathBuf, field: &'static str },

    /// 起訖時間無法決定，或結束時間不晚於開始時間
    #[error("無效的擷取範圍: {0}")]
    InvalidRange(String),

    /// 擷取張數不是正整數
    #[error("無效的擷取張數: {0}")]
    InvalidCaptureCount(String),

    /// 欄數必須為正整數
    #[error("無效的欄數: {0}")]
    InvalidLayout(i64),

    /// 寬度上限不足以讓每欄至少分到 1 像素
    #[error("寬度上限 {max_width} 不足以分配給 {columns} 欄")]
    InvalidFrameWidth { max_width: u32, columns: u32 },

    /// 外部工具（ffmpeg / montage / convert / mogrify）執行失敗
    #[error("{program} 執行失敗: {reason}")]
    CommandFailed { program: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
