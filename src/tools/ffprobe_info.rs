use crate::error::CinegridError;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// ffprobe 的原始輸出：多個串流與一個 format 區塊
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProbe {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
    pub format: Option<ProbeFormat>,
}

/// 單一串流；影像串流才有寬高，長度可能出現在任一串流
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeStream {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeFormat {
    pub duration: Option<String>,
}

/// 使用 ffprobe 取得串流寬高與長度
pub fn probe_media(path: &Path) -> Result<RawProbe, CinegridError> {
    let output = Command::new("ffprobe")
        .args([
            "-show_entries",
            "stream=height,width,duration:format=duration",
            "-of",
            "json",
            "-v",
            "error",
        ])
        .arg(path)
        .output()
        .map_err(|e| CinegridError::ProbeFailed {
            path: path.to_path_buf(),
            reason: format!("無法執行 ffprobe: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CinegridError::ProbeFailed {
            path: path.to_path_buf(),
            reason: stderr.trim().to_string(),
        });
    }

    parse_probe_output(path, &String::from_utf8_lossy(&output.stdout))
}

pub fn parse_probe_output(path: &Path, stdout: &str) -> Result<RawProbe, CinegridError> {
    serde_json::from_str(stdout).map_err(|e| CinegridError::ProbeFailed {
        path: path.to_path_buf(),
        reason: format!("無法解析 ffprobe 輸出: {e}"),
    })
}
