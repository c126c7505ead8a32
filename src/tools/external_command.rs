use crate::error::CinegridError;
use crate::tools::ffprobe_info::{RawProbe, probe_media};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 一次外部工具呼叫：程式名稱、參數與工作目錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    #[must_use]
    pub const fn new(program: &'static str, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            working_dir: None,
        }
    }

    #[must_use]
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// 影片探測與外部影像工具的介面
///
/// 擷取縮圖時會在 rayon 執行緒間共用，因此需要 `Sync`。
pub trait MediaToolchain: Sync {
    fn probe(&self, path: &Path) -> Result<RawProbe, CinegridError>;

    fn run(&self, invocation: &Invocation) -> Result<(), CinegridError>;
}

/// 實際執行 ffprobe / ffmpeg / ImageMagick 的工具組
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalToolchain;

impl MediaToolchain for ExternalToolchain {
    fn probe(&self, path: &Path) -> Result<RawProbe, CinegridError> {
        probe_media(path)
    }

    fn run(&self, invocation: &Invocation) -> Result<(), CinegridError> {
        debug!("{} {}", invocation.program, invocation.args.join(" "));

        let output = invocation
            .build_command()
            .output()
            .map_err(|e| CinegridError::CommandFailed {
                program: invocation.program.to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CinegridError::CommandFailed {
                program: invocation.program.to_string(),
                reason: format!("{} ({})", stderr.trim(), output.status),
            });
        }

        Ok(())
    }
}
