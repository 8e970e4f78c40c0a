use std::{env, path::PathBuf};

use selekt::SelektConfig;
use tracing_subscriber::EnvFilter;

fn usage() {
    eprintln!("Usage: print_stub [base_dir]");
    eprintln!("Example: RUST_LOG=debug cargo run --example print_stub -- .");
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.len() > 1 {
        usage();
        std::process::exit(1);
    }
    let base_dir = args.pop().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let config = SelektConfig::load_default();
    for (name, sql) in selekt::render_fixtures(&base_dir, &config)? {
        println!("-- {name}");
        println!("{sql};");
        println!();
    }
    Ok(())
}
