use std::{thread, time::Duration};

use log::{error, warn};
use reqwest::{
    blocking::{RequestBuilder, Response},
    header, Method, StatusCode, Url,
};

use crate::{
    error::{Error, Result},
    model::error::{ApiErrorMessage, ApiErrorResponse},
};

/// Base delay between retries of transient failures. Doubled for each retry.
const RETRY_BACKOFF: Duration = Duration::from_millis(300);

pub trait Sealed {}

/// Every Spotify client implements this trait.
pub trait BuildHttpRequest: Sealed {
    /// Returns a new [RequestBuilder](reqwest::blocking::RequestBuilder) with any necessary information (e.g.
    /// authentication headers) filled in. You probably shouldn't call this function directly; instead use
    /// [send_http_request](SendHttpRequest::send_http_request).
    fn build_http_request(&self, method: Method, url: Url) -> RequestBuilder;

    /// How many times a request may be retried after a transient failure.
    fn retry_budget(&self) -> u32;
}

/// Every Spotify client implements this trait.
pub trait AccessTokenExpiry: Sealed {
    /// Get a new access token for the client after Spotify reported the current one as expired.
    fn handle_access_token_expired(&self) -> Result<()>;
}

/// Every Spotify client implements this trait.
pub trait SendHttpRequest: BuildHttpRequest + AccessTokenExpiry {
    /// Builds an HTTP request, sends it, and handles rate limiting, transient failures and access token refreshes.
    fn send_http_request(&self, method: Method, url: Url) -> Result<Response>;
}

impl<C> SendHttpRequest for C
where
    C: BuildHttpRequest + AccessTokenExpiry,
{
    fn send_http_request(&self, method: Method, url: Url) -> Result<Response> {
        let mut retries_left = self.retry_budget();
        let mut token_refreshed = false;

        loop {
            let request = self.build_http_request(method.clone(), url.clone());

            let response = match request.send() {
                Ok(response) => response,

                Err(err) if (err.is_timeout() || err.is_connect()) && retries_left > 0 => {
                    warn!("Request to {} failed, retrying: {}", url, err);
                    backoff(self.retry_budget() - retries_left);
                    retries_left -= 1;
                    continue;
                }

                Err(err) => return Err(err.into()),
            };

            match response.status() {
                StatusCode::FORBIDDEN => {
                    error!("Got 403 Forbidden response");
                    return Err(Error::Forbidden);
                }

                StatusCode::UNAUTHORIZED => {
                    warn!("Got 401 Unauthorized response");
                    let error_response: ApiErrorResponse = response.json()?;

                    match error_response.error.message {
                        ApiErrorMessage::TokenExpired if !token_refreshed => {
                            warn!("Access token expired, attempting to refresh");

                            self.handle_access_token_expired()?;
                            token_refreshed = true;
                        }

                        ApiErrorMessage::TokenExpired => {
                            error!("Access token expired again right after refreshing it");
                            return Err(Error::AccessTokenExpired);
                        }

                        ApiErrorMessage::InvalidToken => {
                            error!("Spotify rejected the access token");
                            return Err(Error::UnhandledSpotifyError(401, String::from("Invalid access token")));
                        }

                        ApiErrorMessage::Other(message) => {
                            error!("Unhandled Spotify error: {}", message);
                            return Err(Error::UnhandledSpotifyError(401, message));
                        }
                    }
                }

                StatusCode::TOO_MANY_REQUESTS => {
                    let wait_time = response
                        .headers()
                        .get(header::RETRY_AFTER)
                        .and_then(|header| header.to_str().ok())
                        .and_then(|header_str| header_str.parse::<u64>().ok())
                        .ok_or_else(|| {
                            warn!("Invalid rate-limit response");
                            Error::InvalidRateLimitResponse
                        })?;

                    if retries_left == 0 {
                        warn!("Got 429 rate-limit response with no retries left");
                        return Err(Error::RateLimit(wait_time));
                    }

                    warn!(
                        "Got 429 rate-limit response from Spotify with Retry-After: {}",
                        wait_time
                    );

                    thread::sleep(Duration::from_secs(wait_time));
                    retries_left -= 1;
                }

                status if status.is_server_error() && retries_left > 0 => {
                    warn!("Got {} response from Spotify, retrying", status);
                    backoff(self.retry_budget() - retries_left);
                    retries_left -= 1;
                }

                // all other responses, even erroneous ones, are returned to the caller
                _ => return Ok(response),
            }
        }
    }
}

fn backoff(retries_used: u32) {
    thread::sleep(RETRY_BACKOFF * 2u32.saturating_pow(retries_used));
}
