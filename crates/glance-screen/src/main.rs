#![forbid(unsafe_code)]

use std::sync::Arc;

use clap::Parser;
use glance_runtime::Program;
use glance_screen::cli::Opts;
use glance_screen::{AssetSource, BundledAssets, DirAssets, ScreenController, logging};
use tracing::info;

fn main() {
    let opts = Opts::parse();

    if let Err(e) = logging::init(opts.log_file.as_deref(), &opts.log_level) {
        eprintln!("Failed to initialize: {e}");
        std::process::exit(1);
    }

    let assets: Arc<dyn AssetSource> = match &opts.assets_dir {
        Some(dir) => Arc::new(DirAssets::new(dir)),
        None => Arc::new(BundledAssets),
    };
    info!(
        assets_dir = ?opts.assets_dir,
        supports_dark_mode = !opts.no_dark_mode,
        "starting"
    );

    let model = ScreenController::new(opts.capabilities(), assets);
    match Program::with_config(model, opts.program_config()) {
        Ok(mut program) => {
            if let Err(e) = program.run() {
                eprintln!("Runtime error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    }
}
