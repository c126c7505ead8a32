use crate::error::CinegridError;
use crate::tools::{MediaToolchain, RawProbe};
use std::fs;
use std::path::{Path, PathBuf};

const SIZE_UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// 寬高比對照表，平手時取先出現者
const ASPECT_RATIOS: [(f64, &str); 10] = [
    (1.00, "1:1"),
    (1.25, "5:4"),
    (1.33, "4:3"),
    (1.43, "1.43:1 IMAX"),
    (1.60, "16:10"),
    (1.78, "16:9"),
    (1.85, "1.85:1"),
    (1.90, "1.90:1 IMAX"),
    (2.20, "2.20:1"),
    (2.35, "2.35:1"),
];

/// 單一影片探測後的正規化資訊，建立後不再變更
#[derive(Debug, Clone, PartialEq)]
pub struct MediaMetadata {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub duration: f64,
    pub file_size: u64,
    pub file_size_human: String,
    pub aspect_ratio_label: &'static str,
    pub base_name: String,
    pub extension: String,
}

impl MediaMetadata {
    /// 探測影片並查詢檔案大小
    pub fn load(path: &Path, toolchain: &impl MediaToolchain) -> Result<Self, CinegridError> {
        let probe = toolchain.probe(path)?;
        let file_size = fs::metadata(path)?.len();
        Self::from_probe(path, &probe, file_size)
    }

    /// 每個欄位取第一個有提供該欄位的串流；長度缺少時改用 format 區塊
    ///
    /// 寬高為 0 視同未提供。
    pub fn from_probe(
        path: &Path,
        probe: &RawProbe,
        file_size: u64,
    ) -> Result<Self, CinegridError> {
        let height = probe
            .streams
            .iter()
            .find_map(|s| s.height.filter(|h| *h > 0))
            .ok_or_else(|| missing(path, "height"))?;
        let width = probe
            .streams
            .iter()
            .find_map(|s| s.width.filter(|w| *w > 0))
            .ok_or_else(|| missing(path, "width"))?;

        let raw_duration = probe
            .streams
            .iter()
            .find_map(|s| s.duration.as_deref())
            .or_else(|| probe.format.as_ref().and_then(|f| f.duration.as_deref()))
            .ok_or_else(|| probe_failed(path, "找不到影片長度".to_string()))?;
        let duration = raw_duration
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or_else(|| probe_failed(path, format!("無效的影片長度: {raw_duration}")))?;

        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            duration,
            file_size,
            file_size_human: sizeof_fmt(file_size as f64),
            aspect_ratio_label: aspect_ratio(f64::from(width), f64::from(height)),
            base_name,
            extension,
        })
    }
}

fn missing(path: &Path, field: &'static str) -> CinegridError {
    CinegridError::MissingMetadata {
        path: path.to_path_buf(),
        field,
    }
}

fn probe_failed(path: &Path, reason: String) -> CinegridError {
    CinegridError::ProbeFailed {
        path: path.to_path_buf(),
        reason,
    }
}

/// 取最接近 `width / height` 的標準寬高比名稱
#[must_use]
pub fn aspect_ratio(width: f64, height: f64) -> &'static str {
    let ratio = width / height;
    let mut best = ASPECT_RATIOS[0];

    for entry in &ASPECT_RATIOS[1..] {
        if (entry.0 - ratio).abs() < (best.0 - ratio).abs() {
            best = *entry;
        }
    }

    best.1
}

/// 以 1024 為基數的人類可讀檔案大小，保留一位小數，最大單位為 YiB
#[must_use]
pub fn sizeof_fmt(num: f64) -> String {
    let mut value = num;
    let mut unit = 0;

    if num > 0.0 {
        while value.abs() >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
    }

    format!("{value:.1} {}", SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ProbeFormat, ProbeStream};

    fn trailer_probe() -> RawProbe {
        RawProbe {
            streams: vec![
                ProbeStream {
                    width: Some(854),
                    height: Some(480),
                    duration: Some("52.208333".to_string()),
                },
                ProbeStream {
                    duration: Some("51.946667".to_string()),
                    ..ProbeStream::default()
                },
            ],
            format: Some(ProbeFormat {
                duration: Some("52.209000".to_string()),
            }),
        }
    }

    #[test]
    fn test_sizeof_fmt() {
        assert_eq!(sizeof_fmt(1.0), "1.0 B");
        assert_eq!(sizeof_fmt(1023.0), "1023.0 B");
        for (power, unit) in SIZE_UNITS.iter().enumerate().skip(1) {
            assert_eq!(sizeof_fmt(1024f64.powi(power as i32)), format!("1.0 {unit}"));
        }
        assert_eq!(sizeof_fmt(1024f64.powi(8)), "1.0 YiB");
        assert_eq!(sizeof_fmt(1024f64.powi(9)), "1024.0 YiB");
        assert_eq!(sizeof_fmt(4_372_373.0), "4.2 MiB");
    }

    #[test]
    fn test_sizeof_fmt_zero_and_negative() {
        assert_eq!(sizeof_fmt(0.0), "0.0 B");
        assert_eq!(sizeof_fmt(-2048.0), "-2048.0 B");
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(1920.0, 1080.0), "16:9");
        assert_eq!(aspect_ratio(1.0, 1.0), "1:1");
        assert_eq!(aspect_ratio(5.0, 4.0), "5:4");
        assert_eq!(aspect_ratio(4.0, 3.0), "4:3");
        assert_eq!(aspect_ratio(1.43, 1.0), "1.43:1 IMAX");
        assert_eq!(aspect_ratio(16.0, 10.0), "16:10");
        assert_eq!(aspect_ratio(16.0, 9.0), "16:9");
        assert_eq!(aspect_ratio(1.85, 1.0), "1.85:1");
        assert_eq!(aspect_ratio(1.90, 1.0), "1.90:1 IMAX");
        assert_eq!(aspect_ratio(2.20, 1.0), "2.20:1");
        assert_eq!(aspect_ratio(2.35, 1.0), "2.35:1");
    }

    #[test]
    fn test_aspect_ratio_tie_prefers_earlier_entry() {
        // 1.125 與 1.00、1.25 距離相同
        assert_eq!(aspect_ratio(9.0, 8.0), "1:1");
    }

    #[test]
    fn test_aspect_ratio_outside_table() {
        assert_eq!(aspect_ratio(3.0, 1.0), "2.35:1");
        assert_eq!(aspect_ratio(9.0, 16.0), "1:1");
    }

    #[test]
    fn test_from_probe() {
        let path = Path::new("/videos/sintel_trailer-480p.mp4");
        let metadata = MediaMetadata::from_probe(path, &trailer_probe(), 4_372_373).unwrap();

        assert_eq!(metadata.path, path);
        assert_eq!(metadata.base_name, "sintel_trailer-480p");
        assert_eq!(metadata.extension, ".mp4");
        assert_eq!(metadata.width, 854);
        assert_eq!(metadata.height, 480);
        assert_eq!(metadata.aspect_ratio_label, "16:9");
        assert!((metadata.duration - 52.208_333).abs() < f64::EPSILON);
        assert_eq!(metadata.file_size, 4_372_373);
        assert_eq!(metadata.file_size_human, "4.2 MiB");
    }

    #[test]
    fn test_from_probe_takes_first_stream_per_field() {
        let probe = RawProbe {
            streams: vec![
                ProbeStream {
                    duration: Some("10.5".to_string()),
                    ..ProbeStream::default()
                },
                ProbeStream {
                    width: Some(1280),
                    height: Some(720),
                    duration: Some("99.0".to_string()),
                },
                ProbeStream {
                    width: Some(640),
                    height: Some(360),
                    duration: None,
                },
            ],
            format: None,
        };

        let metadata = MediaMetadata::from_probe(Path::new("a.mkv"), &probe, 0).unwrap();
        assert_eq!(metadata.width, 1280);
        assert_eq!(metadata.height, 720);
        assert!((metadata.duration - 10.5).abs() < f64::EPSILON);
        assert_eq!(metadata.file_size_human, "0.0 B");
    }

    #[test]
    fn test_from_probe_falls_back_to_format_duration() {
        let probe = RawProbe {
            streams: vec![ProbeStream {
                width: Some(640),
                height: Some(480),
                duration: None,
            }],
            format: Some(ProbeFormat {
                duration: Some("120.25".to_string()),
            }),
        };

        let metadata = MediaMetadata::from_probe(Path::new("clip"), &probe, 10).unwrap();
        assert!((metadata.duration - 120.25).abs() < f64::EPSILON);
        assert_eq!(metadata.aspect_ratio_label, "4:3");
        assert_eq!(metadata.base_name, "clip");
        assert_eq!(metadata.extension, "");
    }

    #[test]
    fn test_from_probe_missing_dimensions() {
        let probe = RawProbe {
            streams: vec![ProbeStream {
                width: Some(640),
                height: None,
                duration: Some("1.0".to_string()),
            }],
            format: None,
        };
        let err = MediaMetadata::from_probe(Path::new("audio.m4a"), &probe, 1).unwrap_err();
        assert!(matches!(
            err,
            CinegridError::MissingMetadata {
                field: "height",
                ..
            }
        ));

        let probe = RawProbe {
            streams: vec![ProbeStream {
                width: None,
                height: Some(480),
                duration: None,
            }],
            format: Some(ProbeFormat {
                duration: Some("1.0".to_string()),
            }),
        };
        let err = MediaMetadata::from_probe(Path::new("a.mp4"), &probe, 1).unwrap_err();
        assert!(matches!(
            err,
            CinegridError::MissingMetadata { field: "width", .. }
        ));
    }

    #[test]
    fn test_from_probe_zero_dimensions() {
        let probe = RawProbe {
            streams: vec![ProbeStream {
                width: Some(1920),
                height: Some(0),
                duration: Some("1.0".to_string()),
            }],
            format: None,
        };
        let err = MediaMetadata::from_probe(Path::new("a.mp4"), &probe, 1).unwrap_err();
        assert!(matches!(
            err,
            CinegridError::MissingMetadata {
                field: "height",
                ..
            }
        ));

        let probe = RawProbe {
            streams: vec![
                ProbeStream {
                    width: Some(0),
                    height: Some(0),
                    duration: Some("1.0".to_string()),
                },
                ProbeStream {
                    width: Some(1280),
                    height: Some(720),
                    duration: None,
                },
            ],
            format: None,
        };
        let metadata = MediaMetadata::from_probe(Path::new("a.mp4"), &probe, 1).unwrap();
        assert_eq!((metadata.width, metadata.height), (1280, 720));
        assert_eq!(metadata.aspect_ratio_label, "16:9");
    }

    #[test]
    fn test_from_probe_malformed_duration() {
        let probe = RawProbe {
            streams: vec![ProbeStream {
                width: Some(640),
                height: Some(480),
                duration: Some("N/A".to_string()),
            }],
            format: None,
        };
        let err = MediaMetadata::from_probe(Path::new("a.mp4"), &probe, 1).unwrap_err();
        assert!(matches!(err, CinegridError::ProbeFailed { .. }));
    }
}
