//! Credentials and client settings.
//!
//! Credentials are looked up from a [VariableSource]. The [ProcessEnvironment] source first loads a `.env` file from
//! the working directory (or any of its parents) if one exists, and then reads the process environment. Variables that
//! are already set in the process are not overridden by the `.env` file.
//!
//! Each credential accepts two variable names. The first one that is set to a non-empty value wins:
//!
//! | Credential    | Variables                                  |
//! |---------------|--------------------------------------------|
//! | client ID     | `CLIENT_ID`, `SPOTIFY_CLIENT_ID`           |
//! | client secret | `CLIENT_SECRET`, `SPOTIFY_CLIENT_SECRET`   |

use std::{borrow::Borrow, collections::HashMap, fmt, hash::Hash, time::Duration};

use log::{debug, warn};

use crate::error::{Error, Result};

pub const CLIENT_ID_VARS: [&str; 2] = ["CLIENT_ID", "SPOTIFY_CLIENT_ID"];
pub const CLIENT_SECRET_VARS: [&str; 2] = ["CLIENT_SECRET", "SPOTIFY_CLIENT_SECRET"];

pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1/";
pub const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com/";

/// Request timeout used by both the checker and the quick check.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// How many times a failed request is retried unless configured otherwise.
pub const DEFAULT_RETRIES: u32 = 3;
/// The checker gives each request a single retry to keep the run short.
pub const CHECKER_RETRIES: u32 = 1;

/// Somewhere to read configuration variables from.
pub trait VariableSource {
    /// Prepare the source before reading variables from it. Called once before credentials are looked up.
    fn load(&self) {}

    /// Return the value of a variable, if it is set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment, with an optional `.env` file loaded into it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

/// The client ID and client secret of a Spotify application.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

/// The result of looking up credentials from a [VariableSource]. Either value may be missing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CredentialLookup {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Settings for the HTTP client used to talk to Spotify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub retries: u32,
    pub api_base_url: String,
    pub accounts_base_url: String,
}

impl VariableSource for ProcessEnvironment {
    fn load(&self) {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => debug!("No .env file found, using the process environment"),
            Err(err) => warn!("Failed to load .env file: {}", err),
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<K, V> VariableSource for HashMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| value.as_ref().to_owned())
    }
}

impl Credentials {
    pub fn new<I, S>(client_id: I, client_secret: S) -> Self
    where
        I: Into<String>,
        S: Into<String>,
    {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load the source and look up both credentials from it.
    pub fn from_source<S>(source: &S) -> Result<Self>
    where
        S: VariableSource + ?Sized,
    {
        source.load();
        CredentialLookup::from_source(source).into_credentials()
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl CredentialLookup {
    /// Look up both credentials from an already loaded source.
    pub fn from_source<S>(source: &S) -> Self
    where
        S: VariableSource + ?Sized,
    {
        Self {
            client_id: first_non_empty(source, &CLIENT_ID_VARS),
            client_secret: first_non_empty(source, &CLIENT_SECRET_VARS),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }

    pub fn into_credentials(self) -> Result<Credentials> {
        match (self.client_id, self.client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(Credentials {
                client_id,
                client_secret,
            }),

            (None, _) => Err(Error::MissingCredential(CLIENT_ID_VARS[0])),
            (_, None) => Err(Error::MissingCredential(CLIENT_SECRET_VARS[0])),
        }
    }
}

impl ClientConfig {
    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn retries(self, retries: u32) -> Self {
        Self { retries, ..self }
    }

    /// Set the base URL of the Web API, e.g. `https://api.spotify.com/v1/`.
    pub fn api_base_url<S>(self, api_base_url: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            api_base_url: with_trailing_slash(api_base_url.into()),
            ..self
        }
    }

    /// Set the base URL of the accounts service, e.g. `https://accounts.spotify.com/`.
    pub fn accounts_base_url<S>(self, accounts_base_url: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            accounts_base_url: with_trailing_slash(accounts_base_url.into()),
            ..self
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            accounts_base_url: DEFAULT_ACCOUNTS_BASE_URL.to_owned(),
        }
    }
}

fn first_non_empty<S>(source: &S, names: &[&str]) -> Option<String>
where
    S: VariableSource + ?Sized,
{
    names
        .iter()
        .filter_map(|name| source.var(name))
        .find(|value| !value.is_empty())
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }

    url
}
