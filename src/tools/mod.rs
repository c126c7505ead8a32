mod external_command;
mod ffprobe_info;
mod path_validator;
mod time_format;
mod video_scanner;

pub use external_command::{ExternalToolchain, Invocation, MediaToolchain};
pub use ffprobe_info::{ProbeFormat, ProbeStream, RawProbe, parse_probe_output, probe_media};
pub use path_validator::ensure_directory_exists;
pub use time_format::{drawtext_duration, formatted_duration};
pub use video_scanner::{VideoFileInfo, collect_input_files, scan_video_files};
