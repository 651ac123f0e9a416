#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use spotcheck::config::ClientConfig;

pub const CLIENT_ID: &str = "id";
pub const CLIENT_SECRET: &str = "secret";
/// `id:secret` in base64
pub const BASIC_AUTHORIZATION: &str = "Basic aWQ6c2VjcmV0";
pub const ACCESS_TOKEN: &str = "access-token";
pub const PLAYLIST_ID: &str = "37i9dQZEVXbMDoHDwVN2tF";
pub const TRACK_ID: &str = "0VjIjW4GlUZAMYd2vXMi3b";

pub fn credentials() -> Vec<(&'static str, &'static str)> {
    vec![("CLIENT_ID", CLIENT_ID), ("CLIENT_SECRET", CLIENT_SECRET)]
}

/// Client settings that send every request to the mock server and never retry.
pub fn config(server: &ServerGuard) -> ClientConfig {
    ClientConfig::default()
        .retries(0)
        .api_base_url(format!("{}/v1", server.url()))
        .accounts_base_url(server.url())
}

pub fn server() -> ServerGuard {
    Server::new()
}

pub fn mock_token(server: &mut ServerGuard) -> Mock {
    token_mock(server).create()
}

/// The token endpoint mock, not yet created so expectations can be added to it.
pub fn token_mock(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/api/token")
        .match_header("authorization", BASIC_AUTHORIZATION)
        .match_body(Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": ACCESS_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3600
            })
            .to_string(),
        )
}

pub fn mock_invalid_client(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(json!({ "error": "invalid_client", "error_description": "Invalid client" }).to_string())
        .create()
}

/// Mock a search with the given query and type that answers with the given JSON body.
pub fn mock_search(server: &mut ServerGuard, query: &str, item_type: &str, body: serde_json::Value) -> Mock {
    server
        .mock("GET", "/v1/search")
        .match_header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), query.into()),
            Matcher::UrlEncoded("type".into(), item_type.into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create()
}

pub fn mock_playlist(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", format!("/v1/playlists/{}", PLAYLIST_ID).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(playlist().to_string())
        .create()
}

pub fn mock_playlist_items(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", format!("/v1/playlists/{}/tracks", PLAYLIST_ID).as_str())
        .match_query(Matcher::UrlEncoded("limit".into(), "3".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            page(vec![
                json!({ "added_at": "2024-01-01T00:00:00Z", "is_local": false, "track": track("Espresso", "Sabrina Carpenter") }),
                json!({ "added_at": "2024-01-01T00:00:00Z", "is_local": false, "track": track("Birds of a Feather", "Billie Eilish") }),
                json!({ "added_at": "2024-01-01T00:00:00Z", "is_local": false, "track": track("APT.", "ROSÉ") }),
            ])
            .to_string(),
        )
        .create()
}

pub fn mock_audio_features(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/v1/audio-features")
        .match_query(Matcher::UrlEncoded("ids".into(), TRACK_ID.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "audio_features": [{
                    "id": TRACK_ID,
                    "type": "audio_features",
                    "danceability": 0.514,
                    "energy": 0.73,
                    "valence": 0.334,
                    "tempo": 171.005,
                    "key": 1,
                    "mode": 1,
                    "acousticness": 0.00146,
                    "instrumentalness": 0.0000954,
                    "liveness": 0.0897,
                    "loudness": -5.934,
                    "speechiness": 0.0598
                }]
            })
            .to_string(),
        )
        .create()
}

/// Mock every request a full passing run makes.
pub fn mock_everything(server: &mut ServerGuard) -> Vec<Mock> {
    vec![
        mock_token(server),
        mock_search(
            server,
            "artist:Ed Sheeran",
            "track",
            json!({ "tracks": page(vec![track("Shape of You", "Ed Sheeran")]) }),
        ),
        mock_playlist(server),
        mock_playlist_items(server),
        mock_search(
            server,
            "Dua Lipa",
            "artist",
            json!({ "artists": page(vec![artist("Dua Lipa", 45_123_456)]) }),
        ),
        mock_search(
            server,
            "Blinding Lights",
            "track",
            json!({ "tracks": page(vec![track("Blinding Lights", "The Weeknd")]) }),
        ),
        mock_search(
            server,
            "Today's Top Hits",
            "playlist",
            json!({ "playlists": page(vec![simplified_playlist("Today's Top Hits", "Spotify")]) }),
        ),
        mock_search(
            server,
            "Future Nostalgia",
            "album",
            json!({ "albums": page(vec![album("Future Nostalgia", "Dua Lipa")]) }),
        ),
        mock_search(
            server,
            "track:Blinding Lights artist:The Weeknd",
            "track",
            json!({ "tracks": page(vec![track("Blinding Lights", "The Weeknd")]) }),
        ),
        mock_audio_features(server),
    ]
}

pub fn page(items: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "href": "https://api.spotify.com/v1/",
        "items": items,
        "limit": 1,
        "next": null,
        "offset": 0,
        "previous": null,
        "total": 1
    })
}

pub fn simplified_artist(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "id": "1Xyo4u8uXC1ZmMpatF05PJ",
        "type": "artist",
        "external_urls": { "spotify": "https://open.spotify.com/artist/1Xyo4u8uXC1ZmMpatF05PJ" }
    })
}

pub fn artist(name: &str, followers: u64) -> serde_json::Value {
    json!({
        "name": name,
        "id": "6M2wZ9GZgrQXHCFfjv46we",
        "type": "artist",
        "followers": { "href": null, "total": followers },
        "genres": ["dance pop"],
        "images": [],
        "popularity": 86
    })
}

pub fn album(name: &str, artist_name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "id": "7fJJK56U9fHixgO0HQkhtI",
        "type": "album",
        "album_type": "album",
        "artists": [simplified_artist(artist_name)],
        "images": [],
        "release_date": "2020-03-27",
        "total_tracks": 11
    })
}

pub fn track(name: &str, artist_name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "id": TRACK_ID,
        "type": "track",
        "artists": [simplified_artist(artist_name)],
        "album": album("After Hours", artist_name),
        "duration_ms": 200040,
        "explicit": false,
        "popularity": 90,
        "is_local": false
    })
}

pub fn simplified_playlist(name: &str, owner: &str) -> serde_json::Value {
    json!({
        "name": name,
        "id": "37i9dQZF1DXcBWIGoYBM5M",
        "type": "playlist",
        "description": "The hottest 50.",
        "owner": { "id": "spotify", "display_name": owner, "type": "user" },
        "public": true,
        "collaborative": false,
        "images": [],
        "tracks": { "href": "https://api.spotify.com/v1/", "total": 50 }
    })
}

pub fn playlist() -> serde_json::Value {
    json!({
        "name": "Top 50 - Global",
        "id": PLAYLIST_ID,
        "type": "playlist",
        "description": "Your daily update of the most played tracks right now - Global.",
        "owner": { "id": "spotify", "display_name": "Spotify", "type": "user" },
        "public": true,
        "collaborative": false,
        "followers": { "href": null, "total": 20123456 },
        "images": [],
        "tracks": { "href": "https://api.spotify.com/v1/", "total": 50 }
    })
}
