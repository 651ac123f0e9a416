use std::borrow::Cow;

use log::trace;
use reqwest::Method;

use super::{endpoint_url, handle_response, private::SendHttpRequest, SpotifyClient, API_SEARCH_PATH};
use crate::{
    error::{Error, Result},
    model::search::{
        SearchResults, ToTypesString, DEFAULT_SEARCH_LIMIT, DEFAULT_SEARCH_OFFSET, DEFAULT_SEARCH_TYPES_STRING,
    },
};

/// A builder for a search in Spotify's catalog. New instances are returned by the
/// [search-function](SpotifyClient::search) in [SpotifyClient].
#[derive(Debug)]
pub struct SearchBuilder<'a> {
    client: &'a SpotifyClient,
    query: String,
    types: Cow<'static, str>,
    limit: u32,
    offset: u32,
    market: Option<String>,
}

impl<'a> SearchBuilder<'a> {
    pub(crate) fn new(client: &'a SpotifyClient, query: String) -> Self {
        Self {
            client,
            query,
            types: Cow::Borrowed(DEFAULT_SEARCH_TYPES_STRING),
            limit: DEFAULT_SEARCH_LIMIT,
            offset: DEFAULT_SEARCH_OFFSET,
            market: None,
        }
    }

    /// Set specific Spotify item types to search for. The `types` parameter can be any iterator of
    /// [ItemType](crate::model::ItemType)-enums.
    ///
    /// By default, all types are searched for.
    pub fn types<T>(self, types: T) -> Self
    where
        T: ToTypesString,
    {
        Self {
            types: Cow::Owned(types.to_types_string()),
            ..self
        }
    }

    /// The maximum number of results to return in each item type.
    ///
    /// Default: 20. Maximum: 50.
    pub fn limit(self, limit: u32) -> Self {
        Self { limit, ..self }
    }

    /// The index of the first result to return.
    ///
    /// Default: 0.
    pub fn offset(self, offset: u32) -> Self {
        Self { offset, ..self }
    }

    /// Only return content available in the given market, as an ISO 3166-1 alpha-2 country code.
    pub fn market<S>(self, market: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            market: Some(market.into()),
            ..self
        }
    }

    /// Send the search and return a collection of results.
    pub fn send(self) -> Result<SearchResults> {
        let mut url = endpoint_url(&self.client.config().api_base_url, API_SEARCH_PATH)?;

        {
            let mut params = url.query_pairs_mut();
            params
                .append_pair("q", &self.query)
                .append_pair("type", &self.types)
                .append_pair("limit", &self.limit.to_string())
                .append_pair("offset", &self.offset.to_string());

            if let Some(market) = self.market.as_deref() {
                params.append_pair("market", market);
            }
        }

        let response = self.client.send_http_request(Method::GET, url)?;
        trace!("Search results response: {:?}", response);

        let response = handle_response(response, || Error::UnhandledSpotifyResponseStatusCode(404))?;

        let search_results: SearchResults = response.json()?;
        trace!("Search results object: {:?}", search_results);

        Ok(search_results)
    }
}
