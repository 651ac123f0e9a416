use serde::Deserialize;

use super::{
    object_type::{obj_deserialize, TypePlaylist},
    page::Page,
    track::FullTrack,
    user::PublicUser,
    ExternalUrls, Followers, Image,
};

/// Reference to a playlist's tracks. Simplified playlists contain only the total count.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u32,
}

/// A playlist as it appears in search results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimplifiedPlaylist {
    name: String,
    id: String,
    description: Option<String>,
    owner: PublicUser,
    public: Option<bool>,
    collaborative: Option<bool>,
    #[serde(default)]
    images: Vec<Image>,
    #[serde(default)]
    tracks: PlaylistTracksRef,
    #[serde(default)]
    external_urls: ExternalUrls,
    #[allow(dead_code)]
    #[serde(rename = "type", deserialize_with = "obj_deserialize")]
    item_type: TypePlaylist,
}

/// A playlist with its followers, as returned by the playlist endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FullPlaylist {
    name: String,
    id: String,
    description: Option<String>,
    owner: PublicUser,
    public: Option<bool>,
    collaborative: Option<bool>,
    #[serde(default)]
    followers: Followers,
    #[serde(default)]
    images: Vec<Image>,
    tracks: PlaylistTracksRef,
    #[serde(default)]
    external_urls: ExternalUrls,
    #[allow(dead_code)]
    #[serde(rename = "type", deserialize_with = "obj_deserialize")]
    item_type: TypePlaylist,
}

/// One entry in a playlist. The track is missing if it has since been removed from Spotify.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaylistItem {
    added_at: Option<String>,
    #[serde(default)]
    is_local: bool,
    track: Option<FullTrack>,
}

pub type PlaylistItems = Page<PlaylistItem>;

impl SimplifiedPlaylist {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    pub fn owner(&self) -> &PublicUser {
        &self.owner
    }

    pub fn public(&self) -> Option<bool> {
        self.public
    }

    pub fn collaborative(&self) -> bool {
        self.collaborative.unwrap_or_default()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn total_tracks(&self) -> u32 {
        self.tracks.total
    }

    pub fn external_urls(&self) -> &ExternalUrls {
        &self.external_urls
    }
}

impl FullPlaylist {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The playlist's description. An empty description is returned as `None`.
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    pub fn owner(&self) -> &PublicUser {
        &self.owner
    }

    /// Whether the playlist is public. `None` means the playlist status is not relevant.
    pub fn public(&self) -> Option<bool> {
        self.public
    }

    pub fn collaborative(&self) -> bool {
        self.collaborative.unwrap_or_default()
    }

    pub fn followers(&self) -> u64 {
        self.followers.total
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn total_tracks(&self) -> u32 {
        self.tracks.total
    }

    pub fn external_urls(&self) -> &ExternalUrls {
        &self.external_urls
    }
}

impl PlaylistItem {
    pub fn added_at(&self) -> Option<&str> {
        self.added_at.as_deref()
    }

    pub fn is_local(&self) -> bool {
        self.is_local
    }

    pub fn track(&self) -> Option<&FullTrack> {
        self.track.as_ref()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
