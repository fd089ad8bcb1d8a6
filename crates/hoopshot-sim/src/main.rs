use tracing_subscriber::EnvFilter;

use hoopshot_basketball::config::BasketballConfig;
use hoopshot_sim::{Drill, SimError, run_drill};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "Drill failed");
        eprintln!("hoopshot-sim: {e}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), SimError> {
    let config = args
        .iter()
        .find_map(|a| a.strip_prefix("--config="))
        .map(BasketballConfig::load_from)
        .unwrap_or_else(BasketballConfig::load);

    let drill = match args.iter().find(|a| !a.starts_with("--")) {
        Some(path) => Drill::load(path)?,
        None => Drill::free_throws(),
    };

    let summary = run_drill(&drill, config);
    println!("{}", summary.to_json()?);
    Ok(())
}
