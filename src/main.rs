use asciiwave::config::{Args, Config};
use asciiwave::error::Result;
use asciiwave::patterns::PATTERN_NAMES;
use asciiwave::rendering::display::Size;
use asciiwave::rendering::renderer::FrameBuf;
use asciiwave::theme::THEMES;
use asciiwave::{
    App, EventReader, init_logging, install_panic_handler, terminal_cleanup, terminal_setup,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.list {
        println!("patterns: {}", PATTERN_NAMES.join(", "));
        let themes: Vec<_> = THEMES.iter().map(|t| t.name()).collect();
        println!("themes:   {}", themes.join(", "));
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("asciiwave: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = Config::load(args)?;
    init_logging(config.log_file.as_deref())?;

    let size = Size::from(crossterm::terminal::size()?);
    terminal_setup(config.mouse)?;
    install_panic_handler();

    let (reader, events) = EventReader::spawn();
    let result = App::new(&config, size, FrameBuf::stdout(), events).and_then(|mut app| app.run());
    drop(reader);

    // restore the terminal even if the app failed, but report the app's error first
    let cleanup = terminal_cleanup();
    result?;
    cleanup?;
    Ok(())
}
