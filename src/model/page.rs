use serde::{Deserialize, Deserializer};

/// A page of items returned from Spotify.
///
/// Spotify occasionally returns `null` in place of an item it cannot show (e.g. a playlist that was removed after the
/// search index was built). Those entries are dropped while deserializing, so [items](Page::items) only contains
/// actual items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(deserialize_with = "skip_null_items")]
    items: Vec<T>,
    next: Option<String>,
    #[serde(default)]
    limit: u32,
    #[serde(default)]
    offset: u32,
    #[serde(default)]
    total: u32,
}

impl<T> Page<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn take_items(self) -> Vec<T> {
        self.items
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The URL of the next page, if there is one.
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The total number of items available, not only the ones in this page.
    pub fn total(&self) -> u32 {
        self.total
    }
}

fn skip_null_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Vec<Option<T>> = Deserialize::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().collect())
}
