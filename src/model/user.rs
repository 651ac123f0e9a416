use serde::Deserialize;

use super::ExternalUrls;

/// Public information about a user, such as the owner of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublicUser {
    id: String,
    display_name: Option<String>,
    #[serde(default)]
    external_urls: ExternalUrls,
}

impl PublicUser {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The user's display name. Spotify omits it for some users, in which case the user's ID is returned instead.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    pub fn external_urls(&self) -> &ExternalUrls {
        &self.external_urls
    }
}
