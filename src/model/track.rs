//! Everything related to tracks.

use std::time::Duration;

use serde::Deserialize;

use super::{
    album::SimplifiedAlbum,
    artist::SimplifiedArtist,
    object_type::{obj_deserialize, TypeTrack},
    ExternalUrls,
};
use crate::util::duration_millis;

/// A track with its album and popularity.
///
/// Local tracks in playlists deserialize into this type as well; they have no ID and their album has no ID either.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FullTrack {
    name: String,
    id: Option<String>,
    #[serde(default)]
    artists: Vec<SimplifiedArtist>,
    album: Option<SimplifiedAlbum>,
    #[serde(rename = "duration_ms", with = "duration_millis")]
    duration: Duration,
    #[serde(default)]
    explicit: bool,
    #[serde(default)]
    popularity: u32,
    #[serde(default)]
    is_local: bool,
    #[serde(default)]
    external_urls: ExternalUrls,
    #[allow(dead_code)]
    #[serde(rename = "type", deserialize_with = "obj_deserialize")]
    item_type: TypeTrack,
}

impl FullTrack {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn artists(&self) -> &[SimplifiedArtist] {
        &self.artists
    }

    /// The name of the track's first artist, if it has any.
    pub fn first_artist_name(&self) -> Option<&str> {
        self.artists.first().map(SimplifiedArtist::name)
    }

    pub fn album(&self) -> Option<&SimplifiedAlbum> {
        self.album.as_ref()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn explicit(&self) -> bool {
        self.explicit
    }

    pub fn popularity(&self) -> u32 {
        self.popularity
    }

    pub fn is_local(&self) -> bool {
        self.is_local
    }

    pub fn external_urls(&self) -> &ExternalUrls {
        &self.external_urls
    }
}
