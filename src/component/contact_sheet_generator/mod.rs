//! 影片預覽圖生成元件
//!
//! 流程：
//! A. 取得影片資訊（ffprobe）並正規化
//! B. 計算擷取計畫（起訖、張數、間隔、欄列、單張寬度）
//! C. 平行擷取縮圖（ffmpeg）
//! D. 合併為預覽圖（montage，可加標頭）
//! E. 縮放、壓縮並移到輸出位置

mod capture_plan;
mod frame_extractor;
mod main;
mod media_metadata;
mod montage_builder;

pub use capture_plan::{PlanOutcome, ResolvedCapturePlan, montage_output_path, resolve};
pub use frame_extractor::{
    CaptureResult, FrameCapture, build_capture_invocation, build_filter_chain,
    create_capture_tasks, extract_frames_parallel,
};
pub use main::{ContactSheetGenerator, FileOutcome, GenerationResult};
pub use media_metadata::{MediaMetadata, aspect_ratio, sizeof_fmt};
pub use montage_builder::{
    MONTAGE_JPG, MONTAGE_PNG, build_compress_invocation, build_header_invocation,
    build_header_label, build_montage_invocation, build_resize_invocation,
};
