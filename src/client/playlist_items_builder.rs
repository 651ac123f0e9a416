use log::trace;
use reqwest::Method;

use super::{endpoint_url, handle_response, private::SendHttpRequest, SpotifyClient, API_PLAYLISTS_PATH};
use crate::{
    error::{Error, Result},
    model::{
        id::{Id, PlaylistId},
        playlist::PlaylistItems,
    },
};

/// Default amount of items to get from a playlist.
pub const DEFAULT_PLAYLIST_ITEMS_LIMIT: u32 = 100;

/// A builder for getting the items in a playlist. New instances are returned by the
/// [playlist_items-function](SpotifyClient::playlist_items) in [SpotifyClient].
#[derive(Debug)]
pub struct PlaylistItemsBuilder<'a> {
    client: &'a SpotifyClient,
    playlist: Id<'static, PlaylistId>,
    limit: u32,
    offset: u32,
}

impl<'a> PlaylistItemsBuilder<'a> {
    pub(crate) fn new(client: &'a SpotifyClient, playlist: Id<'static, PlaylistId>) -> Self {
        Self {
            client,
            playlist,
            limit: DEFAULT_PLAYLIST_ITEMS_LIMIT,
            offset: 0,
        }
    }

    /// The maximum number of items to return.
    ///
    /// Default: 100. Maximum: 100.
    pub fn limit(self, limit: u32) -> Self {
        Self { limit, ..self }
    }

    /// The index of the first item to return.
    pub fn offset(self, offset: u32) -> Self {
        Self { offset, ..self }
    }

    /// Send the request and return the first page of items.
    pub fn send(self) -> Result<PlaylistItems> {
        let mut url = endpoint_url(
            &self.client.config().api_base_url,
            &format!("{}/{}/tracks", API_PLAYLISTS_PATH, self.playlist.as_str()),
        )?;

        url.query_pairs_mut()
            .append_pair("limit", &self.limit.to_string())
            .append_pair("offset", &self.offset.to_string());

        let response = self.client.send_http_request(Method::GET, url)?;
        let response = handle_response(response, || Error::NonexistentPlaylist(self.playlist.as_str().to_owned()))?;

        let items: PlaylistItems = response.json()?;
        trace!("Playlist items object: {:?}", items);

        Ok(items)
    }
}
