use super::capture_plan::{PlanOutcome, ResolvedCapturePlan, resolve};
use super::frame_extractor::{create_capture_tasks, extract_frames_parallel};
use super::media_metadata::MediaMetadata;
use super::montage_builder::{
    MONTAGE_JPG, build_compress_invocation, build_header_invocation, build_montage_invocation,
    build_resize_invocation,
};
use crate::config::CapturePlanOptions;
use crate::tools::{MediaToolchain, ensure_directory_exists};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// 預覽圖生成結果
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub total_videos: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// 單一影片的處理結果
#[derive(Debug, PartialEq, Eq)]
pub enum FileOutcome {
    Created(PathBuf),
    Skipped(String),
}

/// 預覽圖生成器
///
/// 每個影片依序經過：
/// A. 取得影片資訊（ffprobe）
/// B. 計算擷取計畫
/// C. 平行擷取縮圖
/// D. 合併為預覽圖（可加標頭）
/// E. 縮放、壓縮並移到輸出位置
pub struct ContactSheetGenerator<T: MediaToolchain> {
    options: CapturePlanOptions,
    toolchain: T,
    shutdown_signal: Arc<AtomicBool>,
}

impl<T: MediaToolchain> ContactSheetGenerator<T> {
    pub const fn new(
        options: CapturePlanOptions,
        toolchain: T,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            options,
            toolchain,
            shutdown_signal,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &CapturePlanOptions {
        &self.options
    }

    #[must_use]
    pub const fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// 逐一處理影片；單一影片失敗不影響其他影片
    pub fn run(&self, videos: &[PathBuf]) -> GenerationResult {
        let mut result = GenerationResult {
            total_videos: videos.len(),
            ..GenerationResult::default()
        };

        for (index, video) in videos.iter().enumerate() {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，停止處理");
                break;
            }

            println!(
                "\n{} [{}/{}] {}",
                style("處理中").cyan(),
                index + 1,
                videos.len(),
                style(video.display()).bold()
            );

            match self.process_file(video) {
                Ok(FileOutcome::Created(output_path)) => {
                    println!("  {} 預覽圖已建立", style("✓").green());
                    info!("Cinegrid completed. Filename: {}", output_path.display());
                    result.successful += 1;
                }
                Ok(FileOutcome::Skipped(message)) => {
                    println!("  {} {}", style("⤳").dim(), message);
                    info!("{message}");
                    result.skipped += 1;
                }
                Err(e) => {
                    error!("處理影片失敗 {}: {e:#}", video.display());
                    println!("  {} 處理失敗: {:#}", style("✗").red(), e);
                    result.failed += 1;
                }
            }
        }

        result
    }

    pub fn process_file(&self, video_path: &Path) -> Result<FileOutcome> {
        if !video_path.exists() {
            anyhow::bail!("檔案不存在: {}", video_path.display());
        }

        // Stage A: 取得影片資訊
        let metadata = MediaMetadata::load(video_path, &self.toolchain)?;
        println!(
            "  {} {:.1}s, {}x{} ({}), {}",
            style("A").dim(),
            metadata.duration,
            metadata.width,
            metadata.height,
            metadata.aspect_ratio_label,
            metadata.file_size_human
        );

        // Stage B: 擷取計畫
        let plan = match resolve(&metadata, &self.options)? {
            PlanOutcome::Ready(plan) => plan,
            PlanOutcome::Skip { message, .. } => return Ok(FileOutcome::Skipped(message)),
        };

        ensure_directory_exists(&self.options.output_dir)?;
        let work_dir = self
            .options
            .output_dir
            .join(format!(".cinegrid-{}", Uuid::new_v4()));
        ensure_directory_exists(&work_dir)?;

        let result = self.render(&metadata, &plan, &work_dir);

        // 清理暫存目錄
        if work_dir.exists() && fs::remove_dir_all(&work_dir).is_err() {
            warn!("無法清理暫存目錄: {}", work_dir.display());
        }

        result.map(|()| FileOutcome::Created(plan.output_path))
    }

    fn render(
        &self,
        metadata: &MediaMetadata,
        plan: &ResolvedCapturePlan,
        work_dir: &Path,
    ) -> Result<()> {
        let presentation = &self.options.presentation;

        // Stage C: 平行擷取縮圖
        info!(
            "Generating {} frame captures for {} from {} for {:.2} seconds",
            plan.capture_count,
            metadata.path.display(),
            plan.start_seconds,
            plan.duration_seconds
        );
        let tasks = create_capture_tasks(plan, work_dir);
        let progress_bar = ProgressBar::new(tasks.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        progress_bar.set_message("擷取縮圖中...");

        let results = extract_frames_parallel(
            &self.toolchain,
            &tasks,
            metadata,
            plan,
            presentation,
            &self.shutdown_signal,
            &progress_bar,
        );
        progress_bar.finish_and_clear();

        let failed_count = results.iter().filter(|r| !r.success).count();
        if failed_count > 0 {
            anyhow::bail!(
                "縮圖擷取失敗: 需要 {} 張，{} 張失敗",
                results.len(),
                failed_count
            );
        }

        // Stage D: 合併預覽圖
        info!("Generating montage");
        let frames: Vec<PathBuf> = results.into_iter().map(|r| r.output_path).collect();
        self.toolchain
            .run(&build_montage_invocation(
                &frames,
                plan,
                presentation,
                work_dir,
            ))
            .context("合併預覽圖失敗")?;

        if presentation.header {
            info!("Adding header to montage.");
            self.toolchain
                .run(&build_header_invocation(metadata, presentation, work_dir))
                .context("加入標頭失敗")?;
        }

        // Stage E: 縮放、壓縮、移動
        info!(
            "Resizing montage to within {}x{}.",
            self.options.max_width, self.options.max_height
        );
        self.toolchain
            .run(&build_resize_invocation(&self.options, work_dir))
            .context("縮放預覽圖失敗")?;

        info!(
            "Compressing montage to {}kb.",
            self.options.max_file_size_kb
        );
        self.toolchain
            .run(&build_compress_invocation(&self.options, work_dir))
            .context("壓縮預覽圖失敗")?;

        let compressed = work_dir.join(MONTAGE_JPG);
        info!(
            "Moving image from {} to {}.",
            compressed.display(),
            plan.output_path.display()
        );
        fs::rename(&compressed, &plan.output_path).with_context(|| {
            format!(
                "無法移動預覽圖 {} -> {}",
                compressed.display(),
                plan.output_path.display()
            )
        })?;

        Ok(())
    }

    pub fn print_summary(&self, result: &GenerationResult) {
        println!();
        println!("{}", style("=== 預覽圖生成摘要 ===").cyan().bold());
        println!("  總計: {} 個影片", result.total_videos);
        println!("  成功: {} 個", style(result.successful).green());

        if result.skipped > 0 {
            println!("  跳過: {} 個", style(result.skipped).yellow());
        }

        if result.failed > 0 {
            println!("  失敗: {} 個", style(result.failed).red());
        }

        info!(
            "預覽圖生成完成 - 成功: {}, 跳過: {}, 失敗: {}",
            result.successful, result.skipped, result.failed
        );
    }
}
