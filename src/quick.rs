//! A single-request smoke test: authenticate and run one playlist search.

use std::io::Write;

use log::{debug, info};

use crate::{
    checker::Reporter,
    client::ClientSecretSpotifyClientBuilder,
    config::{ClientConfig, Credentials, ProcessEnvironment, VariableSource},
    model::ItemType,
};

pub const QUICK_CHECK_QUERY: &str = "artist:Spotify";

/// Run the quick check against the process environment and print to standard output. Returns whether it passed.
pub fn quick_check() -> bool {
    quick_check_with(&ProcessEnvironment, ClientConfig::default(), &mut Reporter::stdout())
}

/// Run the quick check with the given variable source, client settings and output. Returns whether it passed.
///
/// Nothing is sent to Spotify when either credential is missing.
pub fn quick_check_with<S, W>(source: &S, config: ClientConfig, reporter: &mut Reporter<W>) -> bool
where
    S: VariableSource + ?Sized,
    W: Write,
{
    reporter.line(format_args!("🚀 Quick Spotify API Test"));
    reporter.line(format_args!("{}", "=".repeat(30)));

    let credentials = match Credentials::from_source(source) {
        Ok(credentials) => credentials,
        Err(err) => {
            debug!("Quick check skipped: {}", err);
            reporter.error("Missing credentials in .env file");
            return false;
        }
    };

    let result = ClientSecretSpotifyClientBuilder::from_credentials(&credentials)
        .config(config)
        .build()
        .and_then(|client| {
            client
                .search(QUICK_CHECK_QUERY)
                .types([ItemType::Playlist])
                .limit(1)
                .send()
        });

    match result {
        Ok(results) => {
            info!("Quick check passed");
            debug!("Quick check search results: {:?}", results);
            reporter.success("Spotify API is working!");
            true
        }

        Err(err) => {
            info!("Quick check failed: {}", err);
            reporter.error(format_args!("API test failed: {}", err));
            false
        }
    }
}
