use serde::Deserialize;

use super::{
    object_type::{obj_deserialize, TypeArtist},
    ExternalUrls, Followers, Image,
};

/// An artist as it appears inside track and album objects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimplifiedArtist {
    name: String,
    id: Option<String>,
    #[serde(default)]
    external_urls: ExternalUrls,
    #[allow(dead_code)]
    #[serde(rename = "type", deserialize_with = "obj_deserialize")]
    item_type: TypeArtist,
}

/// An artist with its followers, genres and popularity, as returned by artist searches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FullArtist {
    #[serde(flatten)]
    simplified: SimplifiedArtist,
    #[serde(default)]
    followers: Followers,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    images: Vec<Image>,
    #[serde(default)]
    popularity: u32,
}

impl SimplifiedArtist {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local artists don't have an ID.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn external_urls(&self) -> &ExternalUrls {
        &self.external_urls
    }
}

impl FullArtist {
    pub fn name(&self) -> &str {
        self.simplified.name()
    }

    pub fn id(&self) -> Option<&str> {
        self.simplified.id()
    }

    pub fn followers(&self) -> u64 {
        self.followers.total
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn popularity(&self) -> u32 {
        self.popularity
    }
}

impl From<FullArtist> for SimplifiedArtist {
    fn from(full: FullArtist) -> Self {
        full.simplified
    }
}
