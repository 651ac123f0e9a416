//! Command line interface.

use clap::Parser;
use log::debug;

use crate::{checker::Checker, quick::quick_check};

/// The argument that selects the quick check.
pub const QUICK_MODE: &str = "quick";

/// Check Spotify Web API credentials and connectivity.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// `quick` runs only authentication and a single search. Anything else, or nothing, runs every check
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Full,
    Quick,
}

impl Args {
    pub fn mode(&self) -> Mode {
        Mode::from_arg(self.mode.as_deref())
    }
}

impl Mode {
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some(QUICK_MODE) => Mode::Quick,
            _ => Mode::Full,
        }
    }
}

/// Run the selected mode. The outcome of the checks is only printed; it does not affect the exit status.
pub fn run(args: &Args) {
    let mode = args.mode();
    debug!("Running in {:?} mode", mode);

    match mode {
        Mode::Quick => {
            quick_check();
        }

        Mode::Full => {
            Checker::new().run_all();
        }
    }
}
