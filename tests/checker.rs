mod common;

use std::collections::HashMap;

use mockito::Matcher;
use serde_json::json;
use spotcheck::{config::VariableSource, CheckName, Checker, Error};

use common::*;

fn checker(
    source: Vec<(&'static str, &'static str)>,
    server: &mockito::ServerGuard,
) -> Checker<HashMap<&'static str, &'static str>, Vec<u8>> {
    Checker::with_parts(source.into_iter().collect(), config(server), Vec::new())
}

#[test]
fn everything_passes() {
    let mut server = server();
    let mocks = mock_everything(&mut server);

    let mut checker = checker(credentials(), &server);
    let results = checker.run_all().clone();

    for mock in mocks {
        mock.assert();
    }

    assert!(results.all_passed());
    assert_eq!(results.passed(), 5);
    assert_eq!(checker.executed(), CheckName::ALL);

    let output = String::from_utf8(checker.into_output()).unwrap();
    assert!(output.contains("🔧 Starting Spotify API Test Suite"));
    assert!(output.contains("✅ Authentication successful!"));
    assert!(output.contains("   Test track: Shape of You"));
    assert!(output.contains("   Artist: Ed Sheeran"));
    assert!(output.contains("   Duration: 200040ms"));
    assert!(output.contains("   Followers: 20,123,456"));
    assert!(output.contains("   Sample tracks:"));
    assert!(output.contains("     3. APT. - ROSÉ"));
    assert!(output.contains("   Artist: Dua Lipa - 45,123,456 followers"));
    assert!(output.contains("   Playlist: Today's Top Hits - Spotify"));
    assert!(output.contains("   Album: Future Nostalgia - Dua Lipa"));
    assert!(output.contains("   Danceability: 0.51"));
    assert!(output.contains("   Mode: Major"));
    assert!(output.contains("   Search Functionality ✅ PASS"));
    assert!(output.contains("📊 Overall Result: 5/5 tests passed"));
    assert!(output.contains("🎉 You're ready to use the Spotify Agent!"));
    assert!(!output.contains("Troubleshooting"));
}

#[test]
fn missing_credentials_skip_the_network() {
    let mut server = server();
    let token = server.mock("POST", "/api/token").expect(0).create();
    let search = server.mock("GET", "/v1/search").expect(0).create();

    let mut checker = checker(vec![("CLIENT_ID", CLIENT_ID)], &server);
    let results = checker.run_all().clone();

    token.assert();
    search.assert();

    assert_eq!(results.passed(), 0);
    assert!(checker.client().is_none());

    let output = String::from_utf8(checker.into_output()).unwrap();
    assert!(output.contains("CLIENT_SECRET: ❌ Missing"));
    assert!(output.contains("❌ Authentication failed: CLIENT_SECRET is not set in the environment"));
    assert!(output.contains("❌ API connection test failed: The client is not authenticated"));
    assert!(output.contains("📊 Overall Result: 0/5 tests passed"));
    assert!(output.contains("   • Verify no typos in environment variable names"));
}

#[test]
fn invalid_client() {
    let mut server = server();
    let token = mock_invalid_client(&mut server);

    let mut checker = checker(credentials(), &server);
    checker.check_environment();
    let outcome = checker.check_authentication();

    token.assert();
    assert!(matches!(outcome.failure(), Some(Error::InvalidClient)));
    assert!(checker.client().is_none());
    assert_eq!(checker.results().get(CheckName::Environment), Some(true));
    assert_eq!(checker.results().get(CheckName::Authentication), Some(false));
}

#[test]
fn failing_playlist_does_not_stop_the_run() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let playlist = server
        .mock("GET", format!("/v1/playlists/{}", PLAYLIST_ID).as_str())
        .with_status(500)
        .create();
    let _searches = [
        mock_search(&mut server, "Dua Lipa", "artist", json!({ "artists": page(vec![]) })),
        mock_search(&mut server, "Blinding Lights", "track", json!({ "tracks": page(vec![]) })),
        mock_search(&mut server, "Today's Top Hits", "playlist", json!({ "playlists": page(vec![json!(null)]) })),
        mock_search(&mut server, "Future Nostalgia", "album", json!({ "albums": page(vec![]) })),
    ];

    let mut checker = checker(credentials(), &server);
    checker.check_authentication();

    let outcome = checker.check_playlist_access();
    assert!(matches!(
        outcome.failure(),
        Some(Error::UnhandledSpotifyResponseStatusCode(500))
    ));
    playlist.assert();

    // empty results and null items are skipped
    assert!(checker.check_search_functionality().is_passed());

    assert_eq!(checker.results().get(CheckName::PlaylistAccess), Some(false));
    assert_eq!(checker.results().get(CheckName::SearchFunctionality), Some(true));

    let output = String::from_utf8(checker.into_output()).unwrap();
    assert!(output.contains("❌ Playlist access test failed: Unhandled Spotify response status code 500"));
    assert!(output.contains("✅ Search functionality working!"));
    assert!(!output.contains("   Artist:"));
}

#[test]
fn api_connection_without_results() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let _search = mock_search(&mut server, "artist:Ed Sheeran", "track", json!({ "tracks": page(vec![]) }));

    let mut checker = checker(credentials(), &server);
    checker.check_authentication();

    let outcome = checker.check_api_connection();
    assert!(matches!(outcome.failure(), Some(Error::NoResults("results"))));

    let output = String::from_utf8(checker.into_output()).unwrap();
    assert!(output.contains("No results returned from API"));
}

#[test]
fn audio_features_result_is_not_recorded() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let _search = mock_search(
        &mut server,
        "track:Blinding Lights artist:The Weeknd",
        "track",
        json!({ "tracks": page(vec![]) }),
    );

    let mut checker = checker(credentials(), &server);
    checker.check_authentication();
    let before = checker.results().clone();

    let outcome = checker.check_audio_features();
    assert!(matches!(outcome.failure(), Some(Error::NoResults("tracks"))));
    assert_eq!(checker.results(), &before);
}

#[test]
fn server_errors_are_retried() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let search = server
        .mock("GET", "/v1/search")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(2)
        .create();

    let mut checker = Checker::with_parts(
        credentials().into_iter().collect::<HashMap<_, _>>(),
        config(&server).retries(1),
        Vec::new(),
    );
    checker.check_authentication();

    let outcome = checker.check_api_connection();
    search.assert();
    assert!(matches!(
        outcome.failure(),
        Some(Error::UnhandledSpotifyResponseStatusCode(503))
    ));
}

#[test]
fn expired_token_is_refreshed_once() {
    let mut server = server();
    let token = token_mock(&mut server).expect(2).create();
    let search = server
        .mock("GET", "/v1/search")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({ "error": { "status": 401, "message": "The access token expired" } }).to_string())
        .expect(2)
        .create();

    let mut checker = checker(credentials(), &server);
    checker.check_authentication();

    let outcome = checker.check_api_connection();
    token.assert();
    search.assert();
    assert!(matches!(outcome.failure(), Some(Error::AccessTokenExpired)));
}

#[test]
fn rate_limit_waits_within_retry_budget() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let playlist = server
        .mock("GET", format!("/v1/playlists/{}", PLAYLIST_ID).as_str())
        .with_status(429)
        .with_header("retry-after", "0")
        .expect(2)
        .create();

    let mut checker = Checker::with_parts(
        credentials().into_iter().collect::<HashMap<_, _>>(),
        config(&server).retries(1),
        Vec::new(),
    );
    checker.check_authentication();

    let outcome = checker.check_playlist_access();
    playlist.assert();
    assert!(matches!(outcome.failure(), Some(Error::RateLimit(0))));
}

#[test]
fn forbidden() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let _search = server
        .mock("GET", "/v1/search")
        .match_query(Matcher::Any)
        .with_status(403)
        .create();

    let mut checker = checker(credentials(), &server);
    checker.check_authentication();

    assert!(matches!(
        checker.check_search_functionality().failure(),
        Some(Error::Forbidden)
    ));
}

/// A variable source that panics on every lookup.
struct PanickingSource;

impl VariableSource for PanickingSource {
    fn var(&self, _key: &str) -> Option<String> {
        panic!("source exploded")
    }
}

#[test]
fn panicking_check_does_not_stop_the_run() {
    let server = server();
    let mut checker = Checker::with_parts(PanickingSource, config(&server), Vec::new());

    let results = checker.run_all().clone();

    assert_eq!(checker.executed(), CheckName::ALL);
    assert_eq!(results.passed(), 0);

    let output = String::from_utf8(checker.into_output()).unwrap();
    assert!(output.contains("❌ Test environment crashed: source exploded"));
    assert!(output.contains("❌ Test authentication crashed: source exploded"));
    assert!(output.contains("❌ Search functionality test failed: The client is not authenticated"));
    assert!(output.contains("📊 Overall Result: 0/5 tests passed"));
}

#[test]
fn malformed_credentials_skip_the_network() {
    let mut server = server();
    let token = server.mock("POST", "/api/token").expect(0).create();

    let mut checker = checker(vec![("CLIENT_ID", "client:id"), ("CLIENT_SECRET", CLIENT_SECRET)], &server);
    let outcome = checker.check_authentication();

    token.assert();
    assert!(matches!(outcome.failure(), Some(Error::MalformedCredentials)));
    assert!(checker.client().is_none());
}

#[test]
fn connection_failures_are_retried_then_reported() {
    let mut server = server();
    let _token = mock_token(&mut server);

    // nothing listens on port 1
    let mut checker = Checker::with_parts(
        credentials().into_iter().collect::<HashMap<_, _>>(),
        config(&server).retries(1).api_base_url("http://127.0.0.1:1/v1"),
        Vec::new(),
    );
    assert!(checker.check_authentication().is_passed());

    let outcome = checker.check_api_connection();
    assert!(matches!(outcome.failure(), Some(Error::HttpError(err)) if err.is_connect()));
    assert_eq!(checker.results().get(CheckName::ApiConnection), Some(false));
}

#[test]
fn missing_playlist() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let playlist = server
        .mock("GET", format!("/v1/playlists/{}", PLAYLIST_ID).as_str())
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json!({ "error": { "status": 404, "message": "Resource not found" } }).to_string())
        .create();

    let mut checker = checker(credentials(), &server);
    checker.check_authentication();

    let outcome = checker.check_playlist_access();
    playlist.assert();
    assert!(matches!(outcome.failure(), Some(Error::NonexistentPlaylist(id)) if id == PLAYLIST_ID));

    let output = String::from_utf8(checker.into_output()).unwrap();
    assert!(output.contains("❌ Playlist access test failed: Nonexistent playlist: 37i9dQZEVXbMDoHDwVN2tF"));
}

#[test]
fn rate_limit_without_retry_after() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let search = server
        .mock("GET", "/v1/search")
        .match_query(Matcher::Any)
        .with_status(429)
        .expect(1)
        .create();

    let mut checker = Checker::with_parts(
        credentials().into_iter().collect::<HashMap<_, _>>(),
        config(&server).retries(1),
        Vec::new(),
    );
    checker.check_authentication();

    let outcome = checker.check_api_connection();
    search.assert();
    assert!(matches!(outcome.failure(), Some(Error::InvalidRateLimitResponse)));
}

#[test]
fn rate_limit_with_invalid_retry_after() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let _search = server
        .mock("GET", "/v1/search")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_header("retry-after", "soon")
        .create();

    let mut checker = checker(credentials(), &server);
    checker.check_authentication();

    assert!(matches!(
        checker.check_search_functionality().failure(),
        Some(Error::InvalidRateLimitResponse)
    ));
}

#[test]
fn searches_without_result_pages_are_skipped() {
    let mut server = server();
    let _token = mock_token(&mut server);
    let _searches = [
        mock_search(&mut server, "Dua Lipa", "artist", json!({})),
        mock_search(&mut server, "Blinding Lights", "track", json!({})),
        mock_search(&mut server, "Today's Top Hits", "playlist", json!({})),
        mock_search(&mut server, "Future Nostalgia", "album", json!({})),
    ];

    let mut checker = checker(credentials(), &server);
    checker.check_authentication();

    assert!(checker.check_search_functionality().is_passed());

    let output = String::from_utf8(checker.into_output()).unwrap();
    assert!(output.contains("✅ Search functionality working!"));
    assert!(!output.contains("   Album:"));
}
