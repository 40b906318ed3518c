use clap::Parser;
use tracing_subscriber::EnvFilter;

use fileserve_cli::{Args, Outcome};

fn main() {
    let args = Args::parse();

    // Log to stderr so stdout only carries results
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    match fileserve_cli::run(&args, &mut stdout.lock()) {
        Ok(Outcome::Found) => {}
        Ok(Outcome::NotFound) => {
            eprintln!("not found: {}", args.command.key());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
