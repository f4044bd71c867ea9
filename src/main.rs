use std::env;

use color_eyre::eyre::{Result, WrapErr as _};

mod app;
mod assets;
mod audio;
mod canvas;
mod clock;
mod constants;
mod fireworks;
mod input;
mod logging;
mod random;
mod scene;
mod terminal;

use app::BirthdayApp;
use assets::Assets;
use random::RandomSource;

fn print_usage() {
    eprintln!("birthday-fireworks - A birthday celebration in your terminal");
    eprintln!();
    eprintln!("Usage: birthday-fireworks");
    eprintln!();
    eprintln!("Put a photo (jpg/png) and a song (mp3/wav/ogg) in the current");
    eprintln!("directory to have them shown and played during the show.");
    eprintln!();
    eprintln!("Controls:");
    eprintln!("  click     Launch a firework below the pointer");
    eprintln!("  SPACE     Launch a random firework");
    eprintln!("  M         Pause/play music");
    eprintln!("  Q, ESC    Exit (Ctrl+C also works)");
    eprintln!();
    eprintln!(
        "Logs are written to {}, verbosity via {}",
        logging::log_path().display(),
        constants::LOG_ENV_VAR
    );
}

fn main() -> Result<()> {
    color_eyre::install()?;

    if let Some(arg) = env::args().nth(1) {
        match arg.as_str() {
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            arg => {
                eprintln!("Unknown argument: {arg}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }

    let log_path = logging::setup_logging()?;
    tracing::info!("Starting the celebration, logging to {}", log_path.display());

    let directory = env::current_dir().wrap_err("Couldn't find the working directory")?;
    let assets = Assets::discover(&directory);
    let mut app = BirthdayApp::new(assets, RandomSource::new());

    let result = terminal::run(&mut app);
    if let Err(error) = &result {
        tracing::error!("Frame loop failed: {error:?}");
    }
    drop(app);
    tracing::info!("Goodbye");
    result
}
