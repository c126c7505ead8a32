//! ImageMagick 指令組裝
//!
//! 所有指令都在暫存目錄中執行：`montage` 產生 `montage.png`，
//! 選用的 `convert` 加上檔案資訊標頭，`mogrify` 縮放到尺寸上限，
//! 最後 `convert` 依檔案大小上限壓縮為 `montage.jpg`。

use super::capture_plan::ResolvedCapturePlan;
use super::media_metadata::MediaMetadata;
use crate::config::{CapturePlanOptions, PresentationOptions};
use crate::tools::{Invocation, formatted_duration};
use std::path::{Path, PathBuf};

pub const MONTAGE_PNG: &str = "montage.png";
pub const MONTAGE_JPG: &str = "montage.jpg";

/// 標頭高度為字級的五倍（四行文字加上邊距）
const HEADER_LINES_HEIGHT_FACTOR: u32 = 5;

#[must_use]
pub fn build_montage_invocation(
    frames: &[PathBuf],
    plan: &ResolvedCapturePlan,
    presentation: &PresentationOptions,
    work_dir: &Path,
) -> Invocation {
    let mut args = vec![
        "-background".to_string(),
        presentation.bgcolor.clone(),
        "-border".to_string(),
        presentation.border.to_string(),
        "-bordercolor".to_string(),
        presentation.border_color.clone(),
    ];

    if presentation.shadow {
        args.push("-shadow".to_string());
    }

    args.extend([
        "-geometry".to_string(),
        format!("+{0}+{0}", presentation.spacing),
        "-tile".to_string(),
        format!("{}x", plan.columns),
    ]);

    // 以檔名傳入，順序與擷取順序一致
    args.extend(frames.iter().map(|frame| {
        frame
            .file_name()
            .map_or_else(|| frame.to_string_lossy(), |name| name.to_string_lossy())
            .to_string()
    }));
    args.push(MONTAGE_PNG.to_string());

    Invocation::new("montage", args).in_dir(work_dir)
}

/// 標頭四行：檔名、檔案大小、解析度、長度
#[must_use]
pub fn build_header_label(metadata: &MediaMetadata) -> String {
    [
        format!("File Name: {}{}", metadata.base_name, metadata.extension),
        format!(
            "File Size: {} ({} bytes)",
            metadata.file_size_human,
            group_thousands(metadata.file_size)
        ),
        format!(
            "Resolution: {}x{} ({})",
            metadata.width, metadata.height, metadata.aspect_ratio_label
        ),
        format!("Duration: {}", formatted_duration(metadata.duration)),
    ]
    .join("\n")
}

#[must_use]
pub fn build_header_invocation(
    metadata: &MediaMetadata,
    presentation: &PresentationOptions,
    work_dir: &Path,
) -> Invocation {
    let font_size = presentation.header_font_size;
    let args = vec![
        MONTAGE_PNG.to_string(),
        "-gravity".to_string(),
        "NorthWest".to_string(),
        "-splice".to_string(),
        format!("0x{}", font_size * HEADER_LINES_HEIGHT_FACTOR),
        "-pointsize".to_string(),
        font_size.to_string(),
        "-annotate".to_string(),
        "+5+2".to_string(),
        build_header_label(metadata),
        "-append".to_string(),
        "-layers".to_string(),
        "merge".to_string(),
        MONTAGE_PNG.to_string(),
    ];

    Invocation::new("convert", args).in_dir(work_dir)
}

/// 只縮小不放大（`>`）
#[must_use]
pub fn build_resize_invocation(options: &CapturePlanOptions, work_dir: &Path) -> Invocation {
    Invocation::new(
        "mogrify",
        vec![
            "-resize".to_string(),
            format!("{}x{}>", options.max_width, options.max_height),
            MONTAGE_PNG.to_string(),
        ],
    )
    .in_dir(work_dir)
}

#[must_use]
pub fn build_compress_invocation(options: &CapturePlanOptions, work_dir: &Path) -> Invocation {
    Invocation::new(
        "convert",
        vec![
            MONTAGE_PNG.to_string(),
            "-define".to_string(),
            format!("jpeg:extent={}kb", options.max_file_size_kb),
            MONTAGE_JPG.to_string(),
        ],
    )
    .in_dir(work_dir)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
