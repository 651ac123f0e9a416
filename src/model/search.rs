use serde::Deserialize;

use super::{
    album::SimplifiedAlbum, artist::FullArtist, page::Page, playlist::SimplifiedPlaylist, track::FullTrack, ItemType,
};

/// The default search types.
pub const DEFAULT_SEARCH_TYPES_STRING: &str = "album,artist,playlist,track";
/// The default search limit, i.e. how many items there are in each page.
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
/// The default search offset.
pub const DEFAULT_SEARCH_OFFSET: u32 = 0;

/// Trait for converting an object to a string used in Spotify's search types. This is currently implemented for all
/// iterators of [ItemType]-enums.
pub trait ToTypesString: super::private::Sealed {
    fn to_types_string(self) -> String;
}

/// First pages of search results from a [search](crate::client::SpotifyClient::search).
///
/// Each accessor returns `None` if the type wasn't searched for or if nothing matched the query. Therefore, a returned
/// page always contains some items.
#[derive(Debug, Deserialize)]
pub struct SearchResults {
    tracks: Option<Page<FullTrack>>,
    artists: Option<Page<FullArtist>>,
    albums: Option<Page<SimplifiedAlbum>>,
    playlists: Option<Page<SimplifiedPlaylist>>,
}

impl SearchResults {
    pub fn tracks(&self) -> Option<&Page<FullTrack>> {
        self.tracks.as_ref().filter(|page| !page.is_empty())
    }

    pub fn artists(&self) -> Option<&Page<FullArtist>> {
        self.artists.as_ref().filter(|page| !page.is_empty())
    }

    pub fn albums(&self) -> Option<&Page<SimplifiedAlbum>> {
        self.albums.as_ref().filter(|page| !page.is_empty())
    }

    pub fn playlists(&self) -> Option<&Page<SimplifiedPlaylist>> {
        self.playlists.as_ref().filter(|page| !page.is_empty())
    }

    /// Whether the given type is present in the results at all, even with an empty page.
    pub fn contains(&self, item_type: ItemType) -> bool {
        match item_type {
            ItemType::Track => self.tracks.is_some(),
            ItemType::Artist => self.artists.is_some(),
            ItemType::Album => self.albums.is_some(),
            ItemType::Playlist => self.playlists.is_some(),
        }
    }
}

impl<I> super::private::Sealed for I where I: IntoIterator<Item = ItemType> {}

impl<I> ToTypesString for I
where
    I: IntoIterator<Item = ItemType> + super::private::Sealed,
{
    fn to_types_string(self) -> String {
        self.into_iter()
            .map(|ty| ty.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }
}
