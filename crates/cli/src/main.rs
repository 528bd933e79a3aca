use clap::Parser;
use scriptify::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so a script's stdout is passed through untouched
    let filter = if cli.global.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let code = match cli.command.execute(&cli.global) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Fatal: {err:#}");
            1
        }
    };
    std::process::exit(code);
}
