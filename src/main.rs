use anyhow::Result;
use cinegrid::cli::Cli;
use cinegrid::component::ContactSheetGenerator;
use cinegrid::config::{CapturePlanOptions, VideoExtensionTable, load_settings};
use cinegrid::init;
use cinegrid::pause;
use cinegrid::signal::setup_shutdown_signal;
use cinegrid::tools::{ExternalToolchain, collect_input_files};
use clap::Parser;
use console::{Term, style};
use log::{debug, info};

fn main() -> Result<()> {
    init::init();
    let cli = Cli::parse();
    let shutdown_signal = setup_shutdown_signal()?;

    let settings = load_settings()?;
    let options = CapturePlanOptions::layered(&settings, &cli.overrides());
    debug!("有效設定: {options:?}");

    let table = VideoExtensionTable::embedded()?;
    let videos = collect_input_files(&cli.files, &table);

    if videos.is_empty() {
        println!("{}", style("找不到任何影片檔案").yellow());
    } else {
        println!(
            "{}",
            style(format!(
                "=== 預覽圖生成: {} 個影片，樣板 {} ===",
                videos.len(),
                options.template
            ))
            .cyan()
            .bold()
        );

        let generator = ContactSheetGenerator::new(options, ExternalToolchain, shutdown_signal);
        let result = generator.run(&videos);
        generator.print_summary(&result);
    }

    if cli.prompt {
        pause(&Term::stdout())?;
    }

    info!("Program exited normally");
    Ok(())
}
