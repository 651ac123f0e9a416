//! A blocking Spotify Web API client authenticated with the client credentials flow.
//!
//! ```no_run
//! # use spotcheck::{client::SpotifyClientBuilder, model::ItemType};
//! let client = SpotifyClientBuilder::new("client id")
//!     .client_secret("client secret")
//!     .build()?;
//!
//! let results = client.search("artist:Ed Sheeran").types([ItemType::Track]).limit(1).send()?;
//! # Ok::<(), spotcheck::Error>(())
//! ```

pub(crate) mod playlist_items_builder;
pub(crate) mod private;
pub(crate) mod search_builder;

use std::sync::RwLock;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use log::{debug, warn};
use reqwest::{
    blocking::{Client as BlockingClient, RequestBuilder, Response},
    header::{self, HeaderValue},
    Method, StatusCode, Url,
};
use serde::Deserialize;

pub use self::{playlist_items_builder::PlaylistItemsBuilder, search_builder::SearchBuilder};
use self::private::SendHttpRequest;
use crate::{
    config::{ClientConfig, Credentials},
    error::{Error, Result},
    model::{
        audio_features::AudioFeatures,
        error::{AuthenticationErrorKind, AuthenticationErrorResponse},
        id::{Id, PlaylistId, TrackId},
        playlist::FullPlaylist,
    },
};

const API_SEARCH_PATH: &str = "search";
const API_PLAYLISTS_PATH: &str = "playlists";
const API_AUDIO_FEATURES_PATH: &str = "audio-features";
const ACCOUNTS_API_TOKEN_PATH: &str = "api/token";

const AUDIO_FEATURES_IDS_QUERY: &str = "ids";

/// Spotify client authenticated with the client credentials flow. All requests made with it are unscoped; they do not
/// access any user's data.
#[derive(Debug)]
pub struct SpotifyClient {
    http_client: BlockingClient,
    config: ClientConfig,
    authorization: HeaderValue,
    access_token: RwLock<String>,
}

#[derive(Debug, Clone)]
pub struct SpotifyClientBuilder {
    client_id: String,
}

#[derive(Debug, Clone)]
pub struct ClientSecretSpotifyClientBuilder {
    client_id: String,
    client_secret: String,
    config: ClientConfig,
}

#[derive(Debug, Deserialize)]
struct ClientTokenResponse {
    access_token: String,

    // these fields are in the response but the client doesn't need them. keep them here for logging purposes
    #[allow(dead_code)]
    token_type: String,
    #[allow(dead_code)]
    expires_in: u32,
}

impl SpotifyClientBuilder {
    pub fn new<S>(client_id: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            client_id: client_id.into(),
        }
    }

    pub fn client_secret<S>(self, client_secret: S) -> ClientSecretSpotifyClientBuilder
    where
        S: Into<String>,
    {
        ClientSecretSpotifyClientBuilder {
            client_id: self.client_id,
            client_secret: client_secret.into(),
            config: ClientConfig::default(),
        }
    }
}

impl ClientSecretSpotifyClientBuilder {
    pub fn from_credentials(credentials: &Credentials) -> Self {
        SpotifyClientBuilder::new(credentials.client_id()).client_secret(credentials.client_secret())
    }

    /// Replace all client settings at once.
    pub fn config(self, config: ClientConfig) -> Self {
        Self { config, ..self }
    }

    /// Timeout for each individual request. Default: 10 seconds.
    pub fn timeout(self, timeout: std::time::Duration) -> Self {
        Self {
            config: self.config.timeout(timeout),
            ..self
        }
    }

    /// How many times a request is retried after a transient failure or a rate-limit response. Default: 3.
    pub fn retries(self, retries: u32) -> Self {
        Self {
            config: self.config.retries(retries),
            ..self
        }
    }

    /// Base URL of the Web API. Default: `https://api.spotify.com/v1/`.
    pub fn api_base_url<S>(self, api_base_url: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            config: self.config.api_base_url(api_base_url),
            ..self
        }
    }

    /// Base URL of the accounts service the token is requested from. Default: `https://accounts.spotify.com/`.
    pub fn accounts_base_url<S>(self, accounts_base_url: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            config: self.config.accounts_base_url(accounts_base_url),
            ..self
        }
    }

    /// Request an access token with the client credentials flow and return a client that uses it.
    pub fn build(self) -> Result<SpotifyClient> {
        let authorization = build_authorization_header(&self.client_id, &self.client_secret)?;

        let http_client = BlockingClient::builder().timeout(self.config.timeout).build()?;
        let token_url = endpoint_url(&self.config.accounts_base_url, ACCOUNTS_API_TOKEN_PATH)?;

        debug!("Requesting access token for client credentials flow");
        let access_token = request_access_token(&http_client, token_url, &authorization).map_err(|err| {
            if let Error::UnhandledAuthenticationError(AuthenticationErrorKind::InvalidClient, _) = err {
                Error::InvalidClient
            } else {
                err
            }
        })?;

        Ok(SpotifyClient {
            http_client,
            config: self.config,
            authorization,
            access_token: RwLock::new(access_token),
        })
    }
}

impl SpotifyClient {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Request a new access token from Spotify and save it internally in the client.
    pub fn refresh_access_token(&self) -> Result<()> {
        debug!("Refreshing access token for client credentials flow");
        let token_url = endpoint_url(&self.config.accounts_base_url, ACCOUNTS_API_TOKEN_PATH)?;
        let access_token = request_access_token(&self.http_client, token_url, &self.authorization)?;

        *self.access_token.write().expect("access token rwlock poisoned") = access_token;
        Ok(())
    }

    /// Get Spotify catalog information about albums, artists, playlists or tracks that match a keyword string.
    ///
    /// This function returns a [SearchBuilder] that you can use to configure the various search parameters and finally
    /// send the search query and get the results back.
    pub fn search<S>(&self, query: S) -> SearchBuilder<'_>
    where
        S: Into<String>,
    {
        SearchBuilder::new(self, query.into())
    }

    /// Get a playlist owned by a Spotify user.
    pub fn playlist(&self, playlist: &Id<'_, PlaylistId>) -> Result<FullPlaylist> {
        let url = endpoint_url(
            &self.config.api_base_url,
            &format!("{}/{}", API_PLAYLISTS_PATH, playlist.as_str()),
        )?;

        let response = self.send_http_request(Method::GET, url)?;
        let response = handle_response(response, || Error::NonexistentPlaylist(playlist.as_str().to_owned()))?;

        let playlist: FullPlaylist = response.json()?;
        debug!("Playlist object: {:?}", playlist);

        Ok(playlist)
    }

    /// Get the items of a playlist. This function returns a [PlaylistItemsBuilder] that you can use to set the amount
    /// of items to get before sending the request.
    pub fn playlist_items<'a>(&'a self, playlist: &Id<'_, PlaylistId>) -> PlaylistItemsBuilder<'a> {
        PlaylistItemsBuilder::new(self, playlist.as_owned())
    }

    /// Get audio features for multiple tracks. Up to 100 IDs may be given.
    ///
    /// The returned list is in the same order as the given IDs. Tracks Spotify has no audio features for are `None`.
    pub fn audio_features<'a, I>(&self, tracks: I) -> Result<Vec<Option<AudioFeatures>>>
    where
        I: IntoIterator<Item = Id<'a, TrackId>>,
    {
        #[derive(Debug, Deserialize)]
        struct AudioFeaturesResponse {
            audio_features: Vec<Option<AudioFeatures>>,
        }

        let ids = tracks
            .into_iter()
            .map(|id| id.as_str().to_owned())
            .collect::<Vec<_>>()
            .join(",");

        let mut url = endpoint_url(&self.config.api_base_url, API_AUDIO_FEATURES_PATH)?;
        url.query_pairs_mut().append_pair(AUDIO_FEATURES_IDS_QUERY, &ids);

        let response = self.send_http_request(Method::GET, url)?;
        let response = handle_response(response, || Error::UnhandledSpotifyResponseStatusCode(404))?;

        let features: AudioFeaturesResponse = response.json()?;
        debug!("Audio features object: {:?}", features);

        Ok(features.audio_features)
    }
}

impl private::Sealed for SpotifyClient {}

impl private::BuildHttpRequest for SpotifyClient {
    fn build_http_request(&self, method: Method, url: Url) -> RequestBuilder {
        let access_token = self.access_token.read().expect("access token rwlock poisoned");
        self.http_client.request(method, url).bearer_auth(access_token.as_str())
    }

    fn retry_budget(&self) -> u32 {
        self.config.retries
    }
}

impl private::AccessTokenExpiry for SpotifyClient {
    fn handle_access_token_expired(&self) -> Result<()> {
        self.refresh_access_token()
    }
}

/// Builds the HTTP Basic authorization header for the token request. The client ID may not contain a colon since it
/// separates the ID from the secret, and neither may contain control characters.
fn build_authorization_header(client_id: &str, client_secret: &str) -> Result<HeaderValue> {
    if client_id.contains(':') || client_id.chars().chain(client_secret.chars()).any(char::is_control) {
        warn!("Client ID or secret contains characters not allowed in Basic authentication");
        return Err(Error::MalformedCredentials);
    }

    let auth = format!("{}:{}", client_id, client_secret);
    let mut value =
        HeaderValue::from_str(&format!("Basic {}", BASE64.encode(auth))).map_err(|_| Error::MalformedCredentials)?;

    value.set_sensitive(true);
    Ok(value)
}

fn request_access_token(http_client: &BlockingClient, token_url: Url, authorization: &HeaderValue) -> Result<String> {
    let token_request_form = &[("grant_type", "client_credentials")];

    let response = http_client
        .post(token_url)
        .header(header::AUTHORIZATION, authorization.clone())
        .form(token_request_form)
        .send()?;

    let response = extract_authentication_error(response)?;
    let response = handle_response(response, || Error::UnhandledSpotifyResponseStatusCode(404))?;

    let token_response: ClientTokenResponse = response.json()?;
    debug!("Got token response for client credentials flow: {:?}", token_response);

    Ok(token_response.access_token)
}

/// Takes a response for an authentication request and if its status is 400 or 401, parses its body as an
/// authentication error. On success returns the given response without modifying it.
fn extract_authentication_error(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
            let error_response: AuthenticationErrorResponse = response.json()?;
            Err(error_response.into_unhandled_error())
        }

        _ => Ok(response),
    }
}

/// Passes successful responses through and turns the rest into errors. A 404 becomes the error `not_found` returns.
fn handle_response<F>(response: Response, not_found: F) -> Result<Response>
where
    F: FnOnce() -> Error,
{
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(not_found()),

        other => Err(Error::UnhandledSpotifyResponseStatusCode(other.as_u16())),
    }
}

pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    Url::parse(base_url)
        .and_then(|base| base.join(path))
        .map_err(|err| Error::InvalidUrl(format!("{}{}: {}", base_url, path, err)))
}
