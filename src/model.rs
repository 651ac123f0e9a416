pub mod album;
pub mod artist;
pub mod audio_features;
pub mod error;
pub mod id;
pub mod object_type;
pub mod page;
pub mod playlist;
pub mod search;
pub mod track;
pub mod user;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::IdError;

mod private {
    pub trait Sealed {}
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Follower information of an artist or a playlist. Spotify doesn't support `href` yet so only the total is kept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

/// The kinds of catalog items the checks search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Album,
    Artist,
    Playlist,
    Track,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Album => "album",
            ItemType::Artist => "artist",
            ItemType::Playlist => "playlist",
            ItemType::Track => "track",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "album" => Ok(ItemType::Album),
            "artist" => Ok(ItemType::Artist),
            "playlist" => Ok(ItemType::Playlist),
            "track" => Ok(ItemType::Track),

            other => Err(IdError::InvalidItemType(other.to_owned())),
        }
    }
}
