use thiserror::Error;

use crate::model::{error::AuthenticationErrorKind, ItemType};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{0} is not set in the environment")]
    MissingCredential(&'static str),
    #[error("The client ID contains a colon, or the client ID or secret contains control characters")]
    MalformedCredentials,
    #[error("Invalid client ID or secret")]
    InvalidClient,
    #[error("The client is not authenticated")]
    NotAuthenticated,
    #[error("The access token expired and could not be refreshed")]
    AccessTokenExpired,
    #[error("The endpoint is forbidden for this client")]
    Forbidden,

    #[error("Request rate limit hit; retry after {0} seconds")]
    RateLimit(u64),
    #[error(
        "Missing or invalid Retry-After header in 429 rate-limit response. This is likely an issue on Spotify's side"
    )]
    InvalidRateLimitResponse,

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Nonexistent playlist: {0}")]
    NonexistentPlaylist(String),
    #[error("No {0} returned from API")]
    NoResults(&'static str),

    #[error("Unhandled authentication error: {0:?}: {1}")]
    UnhandledAuthenticationError(AuthenticationErrorKind, String),
    #[error("Unhandled API error {0}: {1}")]
    UnhandledSpotifyError(u16, String),
    #[error("Unhandled Spotify response status code {0}")]
    UnhandledSpotifyResponseStatusCode(u16),

    #[error(transparent)]
    InvalidId(#[from] IdError),

    #[error(transparent)]
    HttpError(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum IdError {
    #[error("Malformed Spotify ID string: {0}")]
    MalformedString(String),
    #[error("Invalid Spotify ID: {0}")]
    InvalidId(String),
    #[error("Invalid item type: {0}")]
    InvalidItemType(String),
    #[error("Wrong item type in ID: {0}")]
    WrongItemType(ItemType),
}
