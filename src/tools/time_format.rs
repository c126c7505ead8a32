/// 將秒數格式化為 `HH:MM:SS`（小數捨去，小時以 24 循環）
#[must_use]
pub fn formatted_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    let hours = (total / 3600) % 24;
    let minutes = (total / 60) % 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// 供 ffmpeg drawtext 使用，冒號需跳脫
#[must_use]
pub fn drawtext_duration(seconds: f64) -> String {
    formatted_duration(seconds).replace(':', "\\\\:")
}
