//! Spotify IDs for the catalog items the checks look up.
//!
//! An [Id] can be parsed from any of the three forms Spotify uses:
//! - URIs: `spotify:playlist:37i9dQZEVXbMDoHDwVN2tF`
//! - URLs: `https://open.spotify.com/playlist/37i9dQZEVXbMDoHDwVN2tF`. The URL may contain any query parameters.
//! - Bare IDs: `37i9dQZEVXbMDoHDwVN2tF`
//!
//! The kind of ID is given in the type parameter, and parsing a URI or URL of another kind fails:
//!
//! ```
//! # use spotcheck::model::id::{Id, PlaylistId, TrackId};
//! let playlist = Id::<PlaylistId>::from_url("https://open.spotify.com/playlist/37i9dQZEVXbMDoHDwVN2tF").unwrap();
//! assert_eq!(playlist.as_str(), "37i9dQZEVXbMDoHDwVN2tF");
//!
//! assert!(Id::<TrackId>::from_uri("spotify:playlist:37i9dQZEVXbMDoHDwVN2tF").is_err());
//! ```

use std::{borrow::Cow, fmt, marker::PhantomData};

use super::ItemType;
use crate::error::IdError;

const ID_LENGTH: usize = 22;
const URL_PREFIX: &str = "https://open.spotify.com/";
const URI_PREFIX: &str = "spotify:";

mod private {
    pub trait Sealed {}
}

/// Used to signify a type that describes a kind of Spotify ID.
pub trait ItemTypeId: private::Sealed {
    /// The Spotify catalog item type this type corresponds to.
    const ITEM_TYPE: ItemType;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistId;

impl private::Sealed for TrackId {}
impl private::Sealed for PlaylistId {}

impl ItemTypeId for TrackId {
    const ITEM_TYPE: ItemType = ItemType::Track;
}

impl ItemTypeId for PlaylistId {
    const ITEM_TYPE: ItemType = ItemType::Playlist;
}

/// A single validated Spotify ID of the kind `T`.
///
/// The original string is kept in a [Cow] so parsing a borrowed string does not allocate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id<'a, T> {
    value: Cow<'a, str>,
    kind: IdKind,
    phantom: PhantomData<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdKind {
    Uri(usize),
    Url(usize),
    Bare,
}

impl<'a, T> Id<'a, T>
where
    T: ItemTypeId,
{
    fn new(value: Cow<'a, str>, kind: IdKind) -> Self {
        Self {
            value,
            kind,
            phantom: PhantomData,
        }
    }

    /// Parses a bare Spotify ID.
    pub fn from_bare<C>(bare: C) -> Result<Self, IdError>
    where
        C: Into<Cow<'a, str>>,
    {
        let bare = bare.into();

        if verify_valid_id(&bare) {
            Ok(Self::new(bare, IdKind::Bare))
        } else {
            Err(IdError::InvalidId(bare.into_owned()))
        }
    }

    /// Parses a Spotify URI string.
    pub fn from_uri<C>(uri: C) -> Result<Self, IdError>
    where
        C: Into<Cow<'a, str>>,
    {
        let uri = uri.into();
        let (item_type, id_index) = parse_item_type_and_id_from_uri(&uri)?;

        if item_type == T::ITEM_TYPE {
            Ok(Self::new(uri, IdKind::Uri(id_index)))
        } else {
            Err(IdError::WrongItemType(item_type))
        }
    }

    /// Parses a Spotify URL.
    pub fn from_url<C>(url: C) -> Result<Self, IdError>
    where
        C: Into<Cow<'a, str>>,
    {
        let url = url.into();
        let (item_type, id_index) = parse_item_type_and_id_from_url(&url)?;

        if item_type == T::ITEM_TYPE {
            Ok(Self::new(url, IdKind::Url(id_index)))
        } else {
            Err(IdError::WrongItemType(item_type))
        }
    }

    /// Parses any of the three ID forms.
    pub fn parse<C>(value: C) -> Result<Self, IdError>
    where
        C: Into<Cow<'a, str>>,
    {
        let value = value.into();

        if value.starts_with(URI_PREFIX) {
            Self::from_uri(value)
        } else if value.starts_with(URL_PREFIX) {
            Self::from_url(value)
        } else {
            Self::from_bare(value)
        }
    }

    /// Returns this ID as a bare Spotify ID.
    pub fn as_str(&self) -> &str {
        match self.kind {
            IdKind::Uri(index) => &self.value[index..],
            IdKind::Url(index) => &self.value[index..index + ID_LENGTH],
            IdKind::Bare => &self.value,
        }
    }

    /// Returns this ID as a Spotify URI.
    pub fn as_uri(&self) -> Cow<'_, str> {
        match self.kind {
            IdKind::Uri(_) => Cow::Borrowed(self.value.as_ref()),
            _ => Cow::Owned(format!("{}{}:{}", URI_PREFIX, T::ITEM_TYPE, self.as_str())),
        }
    }

    /// Returns a new Id that clones the value from this Id and owns it.
    pub fn as_owned(&self) -> Id<'static, T> {
        Id::new(Cow::Owned(self.value.clone().into_owned()), self.kind)
    }
}

impl<'a, T> fmt::Display for Id<'a, T>
where
    T: ItemTypeId,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_item_type_and_id_from_uri(uri: &str) -> Result<(ItemType, usize), IdError> {
    if let Some((item_type, id)) = uri
        .strip_prefix(URI_PREFIX)
        .and_then(|prefix_removed| prefix_removed.split_once(':'))
    {
        let item_type: ItemType = item_type.parse()?;

        if verify_valid_id(id) {
            // the ID is always at the end of the string
            Ok((item_type, uri.len() - ID_LENGTH))
        } else {
            Err(IdError::InvalidId(id.to_owned()))
        }
    } else {
        Err(IdError::MalformedString(uri.to_owned()))
    }
}

fn parse_item_type_and_id_from_url(url: &str) -> Result<(ItemType, usize), IdError> {
    // a whole URL could look like: https://open.spotify.com/playlist/37i9dQZEVXbMDoHDwVN2tF?si=AAAAAAAAAAAAAAAA
    if let Some((item_type_str, id)) = url
        .strip_prefix(URL_PREFIX)
        .and_then(|prefix_removed| prefix_removed.split_once('/'))
        .map(|(item_type_str, id_with_possible_query)| {
            let id = id_with_possible_query
                .split_once('?')
                .map_or(id_with_possible_query, |(id, _)| id);

            (item_type_str, id)
        })
    {
        let item_type: ItemType = item_type_str.parse()?;

        if verify_valid_id(id) {
            // the position of the ID in the string is the domain + the item type + /
            Ok((item_type, URL_PREFIX.len() + item_type_str.len() + 1))
        } else {
            Err(IdError::InvalidId(id.to_owned()))
        }
    } else {
        Err(IdError::MalformedString(url.to_owned()))
    }
}

fn verify_valid_id(id: &str) -> bool {
    // Spotify IDs are base-62 strings and they look like 37i9dQZEVXbMDoHDwVN2tF
    id.len() == ID_LENGTH && id.chars().all(|c| c.is_ascii_alphanumeric())
}
