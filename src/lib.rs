//! Checks that a Spotify application's client credentials work against the Spotify Web API.
//!
//! The full [Checker] runs a sequence of checks: the credentials are present in the environment, authentication with the
//! client credentials flow succeeds, and a handful of public catalog endpoints answer. The [quick_check] only
//! authenticates and runs a single search.
//!
//! ```no_run
//! use spotcheck::Checker;
//!
//! let mut checker = Checker::new();
//! let results = checker.run_all();
//!
//! println!("{}/{} checks passed", results.passed(), results.total());
//! ```

pub mod checker;
pub mod cli;
pub mod client;
pub mod config;
mod error;
pub mod model;
pub mod quick;
mod util;

pub use crate::{
    checker::{CheckName, CheckOutcome, CheckResults, Checker},
    error::{Error, IdError, Result},
    quick::quick_check,
};
