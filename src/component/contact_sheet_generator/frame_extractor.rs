use super::capture_plan::ResolvedCapturePlan;
use super::media_metadata::MediaMetadata;
use crate::config::PresentationOptions;
use crate::error::CinegridError;
use crate::tools::{Invocation, MediaToolchain, drawtext_duration};
use indicatif::ProgressBar;
use log::{debug, error};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 單張擷取任務
#[derive(Debug, Clone)]
pub struct FrameCapture {
    pub index: u32,
    pub timestamp: f64,
    pub output_path: PathBuf,
}

#[derive(Debug)]
pub struct CaptureResult {
    pub output_path: PathBuf,
    pub index: u32,
    pub success: bool,
    pub error_message: Option<String>,
}

/// 依計畫建立擷取任務，輸出為 `img00001.jpg` 起的連號檔案
#[must_use]
pub fn create_capture_tasks(plan: &ResolvedCapturePlan, work_dir: &Path) -> Vec<FrameCapture> {
    plan.capture_times()
        .into_iter()
        .map(|(index, timestamp)| FrameCapture {
            index,
            timestamp,
            output_path: work_dir.join(format!("img{index:05}.jpg")),
        })
        .collect()
}

/// ffmpeg 濾鏡：`showinfo`，需要時加上時間戳與縮放
#[must_use]
pub fn build_filter_chain(
    capture: &FrameCapture,
    metadata: &MediaMetadata,
    plan: &ResolvedCapturePlan,
    presentation: &PresentationOptions,
) -> String {
    let mut filters = vec!["showinfo".to_string()];

    if presentation.timestamp {
        filters.push(format!(
            "drawtext=font={}:text={}:fontsize={}:borderw=5:bordercolor=black:fontcolor=white:x=w-tw-10:y=h-th-10",
            presentation.timestamp_font,
            drawtext_duration(capture.timestamp),
            presentation.timestamp_font_size
        ));
    }

    if metadata.width > plan.max_frame_width {
        filters.push(format!("scale={}:-1", plan.max_frame_width));
    }

    filters.join(",")
}

#[must_use]
pub fn build_capture_invocation(
    capture: &FrameCapture,
    video_path: &Path,
    filters: String,
) -> Invocation {
    Invocation::new(
        "ffmpeg",
        vec![
            "-ss".to_string(),
            capture.timestamp.to_string(),
            "-i".to_string(),
            video_path.to_string_lossy().to_string(),
            "-y".to_string(),
            "-vframes".to_string(),
            "1".to_string(),
            "-vf".to_string(),
            filters,
            "-loglevel".to_string(),
            "fatal".to_string(),
            capture.output_path.to_string_lossy().to_string(),
        ],
    )
}

fn extract_frame(
    toolchain: &impl MediaToolchain,
    capture: &FrameCapture,
    metadata: &MediaMetadata,
    plan: &ResolvedCapturePlan,
    presentation: &PresentationOptions,
) -> CaptureResult {
    debug!("擷取第 {} 張: {:.3}s", capture.index, capture.timestamp);

    let filters = build_filter_chain(capture, metadata, plan, presentation);
    let invocation = build_capture_invocation(capture, &metadata.path, filters);

    let result = toolchain.run(&invocation).and_then(|()| {
        if capture.output_path.exists() {
            Ok(())
        } else {
            Err(CinegridError::CommandFailed {
                program: "ffmpeg".to_string(),
                reason: format!("縮圖檔案未建立: {}", capture.output_path.display()),
            })
        }
    });

    CaptureResult {
        output_path: capture.output_path.clone(),
        index: capture.index,
        success: result.is_ok(),
        error_message: result.err().map(|e| e.to_string()),
    }
}

/// 平行擷取所有縮圖
///
/// 每張縮圖各自呼叫一次 ffmpeg；收到中斷訊號後其餘任務直接標記為取消。
pub fn extract_frames_parallel(
    toolchain: &impl MediaToolchain,
    tasks: &[FrameCapture],
    metadata: &MediaMetadata,
    plan: &ResolvedCapturePlan,
    presentation: &PresentationOptions,
    shutdown_signal: &Arc<AtomicBool>,
    progress_bar: &ProgressBar,
) -> Vec<CaptureResult> {
    let mut results: Vec<CaptureResult> = tasks
        .par_iter()
        .map(|task| {
            if shutdown_signal.load(Ordering::SeqCst) {
                return CaptureResult {
                    output_path: task.output_path.clone(),
                    index: task.index,
                    success: false,
                    error_message: Some("操作已取消".to_string()),
                };
            }

            let result = extract_frame(toolchain, task, metadata, plan, presentation);

            if let Some(msg) = result.error_message.as_ref().filter(|_| !result.success) {
                error!("縮圖擷取失敗 [{}]: {}", task.index, &msg);
            }

            progress_bar.inc(1);
            result
        })
        .collect();

    results.sort_by_key(|r| r.index);
    results
}
