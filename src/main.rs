use clap::Parser;
use spotcheck::cli::{self, Args};

fn main() {
    env_logger::init();

    let args = Args::parse();
    cli::run(&args);
}
