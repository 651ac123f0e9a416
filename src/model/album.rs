use serde::{Deserialize, Serialize};

use super::{
    artist::SimplifiedArtist,
    object_type::{obj_deserialize, TypeAlbum},
    ExternalUrls, Image,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
}

/// An album as it appears in search results and inside track objects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimplifiedAlbum {
    name: String,
    id: Option<String>,
    album_type: Option<AlbumType>,
    #[serde(default)]
    artists: Vec<SimplifiedArtist>,
    #[serde(default)]
    images: Vec<Image>,
    release_date: Option<String>,
    total_tracks: Option<u32>,
    #[serde(default)]
    external_urls: ExternalUrls,
    #[allow(dead_code)]
    #[serde(rename = "type", deserialize_with = "obj_deserialize")]
    item_type: TypeAlbum,
}

impl SimplifiedAlbum {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn album_type(&self) -> Option<AlbumType> {
        self.album_type
    }

    pub fn artists(&self) -> &[SimplifiedArtist] {
        &self.artists
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }

    pub fn total_tracks(&self) -> Option<u32> {
        self.total_tracks
    }

    pub fn external_urls(&self) -> &ExternalUrls {
        &self.external_urls
    }
}
