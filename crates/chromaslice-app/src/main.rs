//! Command-line entry point.

fn main() {
    env_logger::init();
    log::info!("Starting ChromaSlice");

    let config = match chromaslice_app::AppConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    match chromaslice_app::run(&config) {
        Ok(paths) => log::info!("Wrote {} images to {}", paths.len(), config.output_dir.display()),
        Err(e) => {
            log::error!("Render failed: {}", e);
            std::process::exit(1);
        }
    }
}
