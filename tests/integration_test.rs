//! 整合測試 - 使用實際的 ffprobe / ffmpeg 驗證影片資訊與縮圖擷取
//!
//! 測試影片由 ffmpeg 的 testsrc 即時產生；環境沒有 ffmpeg 時跳過。

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use cinegrid::component::contact_sheet_generator::{
    MediaMetadata, PlanOutcome, create_capture_tasks, extract_frames_parallel, resolve,
};
use cinegrid::config::{Caps, CapturePlanOptions};
use cinegrid::tools::{ExternalToolchain, probe_media};
use indicatif::ProgressBar;
use tempfile::tempdir;

fn tools_available() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|program| {
        Command::new(program)
            .arg("-version")
            .output()
            .is_ok_and(|output| output.status.success())
    })
}

/// 產生 640x360、10 秒的測試影片
fn generate_test_video(dir: &Path) -> Option<PathBuf> {
    let path = dir.join("test_video.mp4");
    let status = Command::new("ffmpeg")
        .args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=10:size=640x360:rate=10",
            "-pix_fmt",
            "yuv420p",
            "-y",
        ])
        .arg(&path)
        .status()
        .ok()?;
    status.success().then_some(path)
}

/// 測試 1: 影片資訊取得與正規化
#[test]
fn test_probe_and_normalize() {
    if !tools_available() {
        println!("跳過測試：找不到 ffmpeg / ffprobe");
        return;
    }
    let dir = tempdir().unwrap();
    let Some(video) = generate_test_video(dir.path()) else {
        println!("跳過測試：無法產生測試影片");
        return;
    };

    let metadata = MediaMetadata::load(&video, &ExternalToolchain).unwrap();

    assert_eq!(metadata.width, 640);
    assert_eq!(metadata.height, 360);
    assert!((metadata.duration - 10.0).abs() < 0.5, "影片長度應約為 10 秒");
    assert_eq!(metadata.aspect_ratio_label, "16:9");
    assert_eq!(metadata.base_name, "test_video");
    assert_eq!(metadata.extension, ".mp4");
    assert!(metadata.file_size > 0);
}

/// 測試 2: 探測失敗
#[test]
fn test_probe_invalid_file() {
    if !tools_available() {
        println!("跳過測試：找不到 ffmpeg / ffprobe");
        return;
    }
    let dir = tempdir().unwrap();
    let bogus = dir.path().join("bogus.mp4");
    std::fs::write(&bogus, b"not a video").unwrap();

    assert!(probe_media(&bogus).is_err());
}

/// 測試 3: 依計畫擷取縮圖
#[test]
fn test_extract_frames_from_plan() {
    if !tools_available() {
        println!("跳過測試：找不到 ffmpeg / ffprobe");
        return;
    }
    let dir = tempdir().unwrap();
    let Some(video) = generate_test_video(dir.path()) else {
        println!("跳過測試：無法產生測試影片");
        return;
    };
    let work_dir = dir.path().join("work");
    std::fs::create_dir_all(&work_dir).unwrap();

    let metadata = MediaMetadata::load(&video, &ExternalToolchain).unwrap();
    let options = CapturePlanOptions {
        caps: Some(Caps::Count(4)),
        columns: 2,
        max_width: 400,
        output_dir: dir.path().join("out"),
        ..CapturePlanOptions::default()
    };
    let PlanOutcome::Ready(plan) = resolve(&metadata, &options).unwrap() else {
        panic!("不應跳過");
    };
    assert_eq!(plan.capture_count, 4);
    assert_eq!(plan.max_frame_width, 200);

    let tasks = create_capture_tasks(&plan, &work_dir);
    let results = extract_frames_parallel(
        &ExternalToolchain,
        &tasks,
        &metadata,
        &plan,
        &options.presentation,
        &Arc::new(AtomicBool::new(false)),
        &ProgressBar::hidden(),
    );

    assert_eq!(results.len(), 4);
    for result in &results {
        assert!(result.success, "擷取失敗: {:?}", result.error_message);
        assert!(result.output_path.exists());
    }
}
