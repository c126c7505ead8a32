use super::media_metadata::MediaMetadata;
use crate::config::{Caps, CapturePlanOptions};
use crate::error::CinegridError;
use std::path::PathBuf;

/// 「maximum」張數計算時每張縮圖的名目高度
const NOMINAL_FRAME_HEIGHT: f64 = 200.0;

/// 完全決定的擷取計畫，外部工具直接使用其欄位
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCapturePlan {
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub duration_seconds: f64,
    pub capture_count: u32,
    pub interval_seconds: f64,
    pub columns: u32,
    pub rows: u32,
    pub max_frame_width: u32,
    pub output_path: PathBuf,
}

impl ResolvedCapturePlan {
    /// 第 i 張（1 起算）位於 `start + i * interval`，第一張不會落在起點
    #[must_use]
    pub fn capture_times(&self) -> Vec<(u32, f64)> {
        (1..=self.capture_count)
            .map(|i| {
                (
                    i,
                    f64::from(i).mul_add(self.interval_seconds, self.start_seconds),
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Ready(ResolvedCapturePlan),
    /// 預覽圖已存在且不允許覆寫
    Skip { output_path: PathBuf, message: String },
}

/// 預覽圖輸出路徑 `{output_dir}/{base_name}-{template}.jpg`
#[must_use]
pub fn montage_output_path(options: &CapturePlanOptions, base_name: &str) -> PathBuf {
    options
        .output_dir
        .join(format!("{base_name}-{}.jpg", options.template.name()))
}

/// 由影片資訊與設定算出擷取計畫
///
/// 輸出已存在且未開啟覆寫時直接回傳 [`PlanOutcome::Skip`]，不做其他計算。
pub fn resolve(
    metadata: &MediaMetadata,
    options: &CapturePlanOptions,
) -> Result<PlanOutcome, CinegridError> {
    let output_path = montage_output_path(options, &metadata.base_name);
    if !options.overwrite && output_path.is_file() {
        return Ok(PlanOutcome::Skip {
            message: format!("預覽圖已存在，跳過 {}", metadata.path.display()),
            output_path,
        });
    }

    let start = resolve_bound("start", options.start, options.start_percent, metadata.duration)?;
    let end = resolve_bound("end", options.end, options.end_percent, metadata.duration)?;
    let duration = end - start;
    if !duration.is_finite() || duration <= 0.0 {
        return Err(CinegridError::InvalidRange(format!(
            "結束時間 {end:.3}s 必須晚於開始時間 {start:.3}s"
        )));
    }

    let columns = validate_columns(options.columns)?;
    let max_frame_width = options.max_width / columns;
    if max_frame_width == 0 {
        return Err(CinegridError::InvalidFrameWidth {
            max_width: options.max_width,
            columns,
        });
    }

    let (capture_count, interval_seconds) = match (options.caps, options.interval) {
        (Some(Caps::Maximum), _) => {
            let count = maximum_capture_count(metadata, options.max_width, columns)?;
            (count, duration / f64::from(count))
        }
        (Some(Caps::Count(caps)), _) => {
            let count = u32::try_from(caps)
                .ok()
                .filter(|count| *count > 0)
                .ok_or_else(|| CinegridError::InvalidCaptureCount(format!("caps = {caps}")))?;
            (count, duration / f64::from(count))
        }
        (None, Some(interval)) if interval.is_finite() && interval > 0.0 => {
            let count = capture_count_from((duration / interval).floor()).ok_or_else(|| {
                CinegridError::InvalidCaptureCount(format!(
                    "間隔 {interval}s 大於擷取長度 {duration:.3}s"
                ))
            })?;
            (count, interval)
        }
        (None, Some(interval)) => {
            return Err(CinegridError::InvalidCaptureCount(format!(
                "間隔必須為正數，收到 {interval}"
            )));
        }
        (None, None) => {
            return Err(CinegridError::InvalidCaptureCount(
                "未指定 caps 或 interval".to_string(),
            ));
        }
    };

    Ok(PlanOutcome::Ready(ResolvedCapturePlan {
        start_seconds: start,
        end_seconds: end,
        duration_seconds: duration,
        capture_count,
        interval_seconds,
        columns,
        rows: capture_count / columns,
        max_frame_width,
        output_path,
    }))
}

/// 絕對秒數優先，否則以百分比換算
fn resolve_bound(
    name: &str,
    absolute: Option<f64>,
    percent: Option<f64>,
    duration: f64,
) -> Result<f64, CinegridError> {
    absolute
        .or_else(|| percent.map(|p| duration * p / 100.0))
        .ok_or_else(|| CinegridError::InvalidRange(format!("未指定 {name} 或 {name}_percent")))
}

fn validate_columns(columns: i64) -> Result<u32, CinegridError> {
    u32::try_from(columns)
        .ok()
        .filter(|c| *c > 0)
        .ok_or(CinegridError::InvalidLayout(columns))
}

/// 以名目高度縮放後，寬度預算可容納的最多張數（取整列）
fn maximum_capture_count(
    metadata: &MediaMetadata,
    max_width: u32,
    columns: u32,
) -> Result<u32, CinegridError> {
    let frame_width = f64::from(metadata.height) * NOMINAL_FRAME_HEIGHT / f64::from(metadata.width);
    let per_row = (f64::from(max_width) / frame_width).floor();

    capture_count_from(per_row * f64::from(columns)).ok_or_else(|| {
        CinegridError::InvalidCaptureCount(format!(
            "寬度 {max_width} 無法容納 {}x{} 的縮圖",
            metadata.width, metadata.height
        ))
    })
}

fn capture_count_from(value: f64) -> Option<u32> {
    (value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX)).then(|| value as u32)
}
