use serde::{Deserialize, Deserializer};

pub const TYPE_ALBUM: &str = "album";
pub const TYPE_ARTIST: &str = "artist";
pub const TYPE_PLAYLIST: &str = "playlist";
pub const TYPE_TRACK: &str = "track";
pub const TYPE_AUDIO_FEATURES: &str = "audio_features";

/// Deserializes an object's `type` field and verifies it matches the type the object is being deserialized into.
pub(crate) fn obj_deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    T: ObjectType + Default,
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == T::OBJECT_TYPE {
        Ok(T::default())
    } else {
        Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Str(&s),
            &T::OBJECT_TYPE,
        ))
    }
}

pub(crate) trait ObjectType {
    const OBJECT_TYPE: &'static str;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TypeAlbum;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TypeArtist;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TypePlaylist;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TypeTrack;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TypeAudioFeatures;

impl ObjectType for TypeAlbum {
    const OBJECT_TYPE: &'static str = TYPE_ALBUM;
}

impl ObjectType for TypeArtist {
    const OBJECT_TYPE: &'static str = TYPE_ARTIST;
}

impl ObjectType for TypePlaylist {
    const OBJECT_TYPE: &'static str = TYPE_PLAYLIST;
}

impl ObjectType for TypeTrack {
    const OBJECT_TYPE: &'static str = TYPE_TRACK;
}

impl ObjectType for TypeAudioFeatures {
    const OBJECT_TYPE: &'static str = TYPE_AUDIO_FEATURES;
}
