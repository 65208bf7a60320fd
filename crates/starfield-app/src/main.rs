//! The binary entry point for the headless starfield renderer.

use clap::Parser;
use starfield_config::CliArgs;

fn main() {
    let args = CliArgs::parse();

    let loaded = match starfield_app::load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    starfield_log::init_logging(
        Some(&loaded.dirs.log_dir),
        cfg!(debug_assertions),
        Some(&loaded.config),
    );
    tracing::info!("{}", loaded.origin);

    if let Err(e) = starfield_app::run(&loaded.config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
