use crate::config::VideoExtensionTable;
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct VideoFileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// 掃描資料夾中的影片檔案，依檔案大小排序（由小到大）
#[must_use]
pub fn scan_video_files(directory: &Path, table: &VideoExtensionTable) -> Vec<VideoFileInfo> {
    let mut video_files: Vec<VideoFileInfo> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| table.is_video_file(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some(VideoFileInfo {
                path: entry.into_path(),
                size: metadata.len(),
            })
        })
        .collect();

    video_files.sort_by_key(|file| file.size);
    video_files
}

/// 展開命令列輸入：資料夾展開為其中的影片，其他路徑原樣保留
///
/// 不存在的路徑也保留，由處理流程回報。
#[must_use]
pub fn collect_input_files(inputs: &[PathBuf], table: &VideoExtensionTable) -> Vec<PathBuf> {
    let mut files = Vec::with_capacity(inputs.len());

    for input in inputs {
        if input.is_dir() {
            let found = scan_video_files(input, table);
            if found.is_empty() {
                warn!("資料夾中找不到影片檔案: {}", input.display());
            }
            files.extend(found.into_iter().map(|file| file.path));
        } else {
            files.push(input.clone());
        }
    }

    files
}
