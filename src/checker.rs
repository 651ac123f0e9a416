//! The credential and connectivity checker.
//!
//! A [Checker] runs a fixed list of checks against the Spotify Web API, printing decorated status output for each one
//! and recording whether it passed in its [CheckResults]. Checks never stop the run: a check that fails, or one that
//! depends on authentication when authentication failed, is reported as failed and the next check runs.
//!
//! The audio features check is run and reported like the others, but its result is not recorded and is not part of
//! the summary.

pub mod report;

use std::{
    any::Any,
    fmt,
    io::{self, Write},
    panic::{self, AssertUnwindSafe},
};

use log::{debug, error, info};

pub use self::report::Reporter;
use crate::{
    client::{ClientSecretSpotifyClientBuilder, SpotifyClient},
    config::{
        ClientConfig,
        CredentialLookup,
        ProcessEnvironment,
        VariableSource,
        CHECKER_RETRIES,
        CLIENT_ID_VARS,
        CLIENT_SECRET_VARS,
    },
    error::{Error, Result},
    model::{
        id::{Id, PlaylistId, TrackId},
        page::Page,
        ItemType,
    },
    util::group_thousands,
};

/// Search query for the API connection check.
pub const API_CONNECTION_QUERY: &str = "artist:Ed Sheeran";
/// Spotify's public Global Top 50 playlist.
pub const GLOBAL_TOP_50_PLAYLIST_ID: &str = "37i9dQZEVXbMDoHDwVN2tF";
/// How many tracks of the playlist are fetched and shown.
pub const PLAYLIST_SAMPLE_SIZE: u32 = 3;
/// The searches the search functionality check runs, one for each item type.
pub const SEARCH_QUERIES: [(&str, ItemType); 4] = [
    ("Dua Lipa", ItemType::Artist),
    ("Blinding Lights", ItemType::Track),
    ("Today's Top Hits", ItemType::Playlist),
    ("Future Nostalgia", ItemType::Album),
];
/// Search query for the track whose audio features are requested.
pub const AUDIO_FEATURES_QUERY: &str = "track:Blinding Lights artist:The Weeknd";

const UNKNOWN_ARTIST: &str = "Unknown artist";

/// The checks, in the order they are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckName {
    Environment,
    Authentication,
    ApiConnection,
    PlaylistAccess,
    SearchFunctionality,
    AudioFeatures,
}

/// How a single check went.
#[derive(Debug)]
pub enum CheckOutcome {
    Passed,
    Failed(Error),
}

/// Ordered mapping from check to whether it passed. Only the checks in [CheckName::TRACKED] are in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResults {
    entries: Vec<(CheckName, bool)>,
}

/// Runs the checks and owns everything they share: the result set, the authenticated client and the output.
#[derive(Debug)]
pub struct Checker<S = ProcessEnvironment, W = io::Stdout> {
    source: S,
    source_loaded: bool,
    config: ClientConfig,
    reporter: Reporter<W>,
    results: CheckResults,
    client: Option<SpotifyClient>,
    executed: Vec<CheckName>,
}

impl CheckName {
    pub const ALL: [CheckName; 6] = [
        CheckName::Environment,
        CheckName::Authentication,
        CheckName::ApiConnection,
        CheckName::PlaylistAccess,
        CheckName::SearchFunctionality,
        CheckName::AudioFeatures,
    ];

    /// The checks whose results are recorded and summarised.
    pub const TRACKED: [CheckName; 5] = [
        CheckName::Environment,
        CheckName::Authentication,
        CheckName::ApiConnection,
        CheckName::PlaylistAccess,
        CheckName::SearchFunctionality,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CheckName::Environment => "environment",
            CheckName::Authentication => "authentication",
            CheckName::ApiConnection => "api_connection",
            CheckName::PlaylistAccess => "playlist_access",
            CheckName::SearchFunctionality => "search_functionality",
            CheckName::AudioFeatures => "audio_features",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CheckName::Environment => "Environment",
            CheckName::Authentication => "Authentication",
            CheckName::ApiConnection => "Api Connection",
            CheckName::PlaylistAccess => "Playlist Access",
            CheckName::SearchFunctionality => "Search Functionality",
            CheckName::AudioFeatures => "Audio Features",
        }
    }

    pub fn is_tracked(self) -> bool {
        CheckName::TRACKED.contains(&self)
    }

    fn header(self) -> &'static str {
        match self {
            CheckName::Environment => "Testing Environment Variables",
            CheckName::Authentication => "Testing Authentication",
            CheckName::ApiConnection => "Testing API Connection",
            CheckName::PlaylistAccess => "Testing Playlist Access",
            CheckName::SearchFunctionality => "Testing Search Functionality",
            CheckName::AudioFeatures => "Testing Audio Features",
        }
    }

    fn failure_context(self) -> &'static str {
        match self {
            CheckName::Environment => "Environment check failed",
            CheckName::Authentication => "Authentication failed",
            CheckName::ApiConnection => "API connection test failed",
            CheckName::PlaylistAccess => "Playlist access test failed",
            CheckName::SearchFunctionality => "Search functionality test failed",
            CheckName::AudioFeatures => "Audio features test failed",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl CheckOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }

    /// The reason the check failed, if it did.
    pub fn failure(&self) -> Option<&Error> {
        match self {
            CheckOutcome::Passed => None,
            CheckOutcome::Failed(err) => Some(err),
        }
    }
}

impl From<Result<()>> for CheckOutcome {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => CheckOutcome::Passed,
            Err(err) => CheckOutcome::Failed(err),
        }
    }
}

impl CheckResults {
    /// Set the result of a check. Returns whether the check is tracked; results of untracked checks are dropped.
    pub fn record(&mut self, name: CheckName, passed: bool) -> bool {
        match self.entries.iter_mut().find(|(entry, _)| *entry == name) {
            Some((_, result)) => {
                *result = passed;
                true
            }

            None => false,
        }
    }

    pub fn get(&self, name: CheckName) -> Option<bool> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, passed)| *passed)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CheckName, bool)> + '_ {
        self.entries.iter().copied()
    }

    pub fn passed(&self) -> usize {
        self.entries.iter().filter(|(_, passed)| *passed).count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

impl Default for CheckResults {
    fn default() -> Self {
        Self {
            entries: CheckName::TRACKED.iter().map(|name| (*name, false)).collect(),
        }
    }
}

impl Checker {
    /// A checker that reads credentials from `.env` and the process environment and prints to standard output.
    pub fn new() -> Self {
        Self::with_parts(
            ProcessEnvironment,
            ClientConfig::default().retries(CHECKER_RETRIES),
            io::stdout(),
        )
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, W> Checker<S, W>
where
    S: VariableSource,
    W: Write,
{
    pub fn with_parts(source: S, config: ClientConfig, out: W) -> Self {
        Self {
            source,
            source_loaded: false,
            config,
            reporter: Reporter::new(out),
            results: CheckResults::default(),
            client: None,
            executed: Vec::new(),
        }
    }

    pub fn results(&self) -> &CheckResults {
        &self.results
    }

    /// The authenticated client, if authentication has succeeded.
    pub fn client(&self) -> Option<&SpotifyClient> {
        self.client.as_ref()
    }

    /// Every check that has been started, in order.
    pub fn executed(&self) -> &[CheckName] {
        &self.executed
    }

    pub fn into_output(self) -> W {
        self.reporter.into_inner()
    }

    /// Run a single check by its name.
    pub fn run_check(&mut self, name: CheckName) -> CheckOutcome {
        match name {
            CheckName::Environment => self.check_environment(),
            CheckName::Authentication => self.check_authentication(),
            CheckName::ApiConnection => self.check_api_connection(),
            CheckName::PlaylistAccess => self.check_playlist_access(),
            CheckName::SearchFunctionality => self.check_search_functionality(),
            CheckName::AudioFeatures => self.check_audio_features(),
        }
    }

    /// Run every check in order, then print the summary. A check that panics is reported and the run continues.
    pub fn run_all(&mut self) -> &CheckResults {
        self.reporter.header("Starting Spotify API Test Suite");

        for name in CheckName::ALL {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run_check(name)));

            if let Err(payload) = outcome {
                let message = panic_message(payload.as_ref());
                error!("Check {} panicked: {}", name, message);
                self.reporter.error(format_args!("Test {} crashed: {}", name, message));
            }
        }

        self.print_summary();
        &self.results
    }

    /// Check that both credentials are set in the environment.
    pub fn check_environment(&mut self) -> CheckOutcome {
        self.begin(CheckName::Environment);
        self.ensure_source_loaded();

        let lookup = CredentialLookup::from_source(&self.source);

        self.reporter
            .line(format_args!("{}: {}", CLIENT_ID_VARS[0], presence(lookup.client_id.is_some())));
        self.reporter.line(format_args!(
            "{}: {}",
            CLIENT_SECRET_VARS[0],
            presence(lookup.client_secret.is_some())
        ));

        let result = if lookup.is_complete() {
            self.reporter.success("All environment variables are set!");
            Ok(())
        } else {
            self.reporter.error("Missing environment variables!");
            self.reporter.info("Please check your .env file");
            lookup.into_credentials().map(|_| ())
        };

        self.finish(CheckName::Environment, result, false)
    }

    /// Authenticate with the client credentials flow. On success the client is kept for the checks after this one.
    pub fn check_authentication(&mut self) -> CheckOutcome {
        self.begin(CheckName::Authentication);
        self.ensure_source_loaded();
        self.client = None;

        let result = CredentialLookup::from_source(&self.source)
            .into_credentials()
            .and_then(|credentials| {
                ClientSecretSpotifyClientBuilder::from_credentials(&credentials)
                    .config(self.config.clone())
                    .build()
            })
            .map(|client| {
                self.client = Some(client);
                self.reporter.success("Authentication successful!");
            });

        self.finish(CheckName::Authentication, result, true)
    }

    /// Search for a single well-known track.
    pub fn check_api_connection(&mut self) -> CheckOutcome {
        self.begin(CheckName::ApiConnection);
        let result = self.try_api_connection();
        self.finish(CheckName::ApiConnection, result, true)
    }

    /// Get a public playlist and a few of its tracks.
    pub fn check_playlist_access(&mut self) -> CheckOutcome {
        self.begin(CheckName::PlaylistAccess);
        let result = self.try_playlist_access();
        self.finish(CheckName::PlaylistAccess, result, true)
    }

    /// Search once for every item type. Searches that find nothing are skipped.
    pub fn check_search_functionality(&mut self) -> CheckOutcome {
        self.begin(CheckName::SearchFunctionality);
        let result = self.try_search_functionality();
        self.finish(CheckName::SearchFunctionality, result, true)
    }

    /// Get the audio features of a well-known track. The outcome is returned but not recorded.
    pub fn check_audio_features(&mut self) -> CheckOutcome {
        self.begin(CheckName::AudioFeatures);
        let result = self.try_audio_features();
        self.finish(CheckName::AudioFeatures, result, true)
    }

    /// Print every recorded result and the overall pass count.
    pub fn print_summary(&mut self) {
        self.reporter.header("Test Summary");

        for (name, passed) in self.results.iter() {
            let status = if passed { "✅ PASS" } else { "❌ FAIL" };
            self.reporter.detail(format_args!("{:<20} {}", name.title(), status));
        }

        let passed = self.results.passed();
        let total = self.results.total();
        info!("{}/{} checks passed", passed, total);

        self.reporter
            .line(format_args!("\n📊 Overall Result: {}/{} tests passed", passed, total));

        if self.results.all_passed() {
            self.reporter
                .success("All tests passed! Your Spotify API setup is working correctly.");
            self.reporter.line(format_args!("\n🎉 You're ready to use the Spotify Agent!"));
        } else {
            self.reporter.error("Some tests failed. Please check your setup.");
            self.reporter.line(format_args!("\n🔧 Troubleshooting tips:"));
            self.reporter.detail("• Verify your Client ID and Secret in .env file");
            self.reporter.detail("• Check your internet connection");
            self.reporter.detail("• Ensure your Spotify app is active in Developer Dashboard");
            self.reporter.detail("• Verify no typos in environment variable names");
        }
    }

    fn try_api_connection(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::NotAuthenticated)?;

        let results = client
            .search(API_CONNECTION_QUERY)
            .types([ItemType::Track])
            .limit(1)
            .send()?;

        let track = results
            .tracks()
            .and_then(Page::first)
            .ok_or(Error::NoResults("results"))?;

        self.reporter.success("API connection successful!");
        self.reporter.detail(format_args!("Test track: {}", track.name()));
        self.reporter
            .detail(format_args!("Artist: {}", track.first_artist_name().unwrap_or(UNKNOWN_ARTIST)));
        self.reporter
            .detail(format_args!("Duration: {}ms", track.duration().as_millis()));

        Ok(())
    }

    fn try_playlist_access(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::NotAuthenticated)?;
        let playlist_id = Id::<PlaylistId>::from_bare(GLOBAL_TOP_50_PLAYLIST_ID)?;

        let playlist = client.playlist(&playlist_id)?;

        self.reporter.success("Playlist access successful!");
        self.reporter.detail(format_args!("Playlist: {}", playlist.name()));
        self.reporter.detail(format_args!(
            "Description: {}",
            playlist.description().unwrap_or("No description")
        ));
        self.reporter
            .detail(format_args!("Followers: {}", group_thousands(playlist.followers())));
        self.reporter.detail(format_args!("Tracks: {}", playlist.total_tracks()));
        self.reporter.detail(format_args!(
            "Public: {}",
            playlist.public().map_or("unknown", |public| if public { "true" } else { "false" })
        ));

        let items = client
            .playlist_items(&playlist_id)
            .limit(PLAYLIST_SAMPLE_SIZE)
            .send()?;

        if !items.is_empty() {
            self.reporter.detail("Sample tracks:");

            for (i, item) in items.items().iter().take(PLAYLIST_SAMPLE_SIZE as usize).enumerate() {
                match item.track() {
                    Some(track) => self.reporter.detail(format_args!(
                        "  {}. {} - {}",
                        i + 1,
                        track.name(),
                        track.first_artist_name().unwrap_or(UNKNOWN_ARTIST)
                    )),

                    None => debug!("Playlist item {} has no track", i + 1),
                }
            }
        }

        Ok(())
    }

    fn try_search_functionality(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::NotAuthenticated)?;

        for (query, item_type) in SEARCH_QUERIES {
            let results = client.search(query).types([item_type]).limit(1).send()?;

            if !results.contains(item_type) {
                debug!("Search for {:?} returned no {} page", query, item_type);
                continue;
            }

            match item_type {
                ItemType::Artist => {
                    if let Some(artist) = results.artists().and_then(Page::first) {
                        self.reporter.detail(format_args!(
                            "Artist: {} - {} followers",
                            artist.name(),
                            group_thousands(artist.followers())
                        ));
                    }
                }

                ItemType::Track => {
                    if let Some(track) = results.tracks().and_then(Page::first) {
                        self.reporter.detail(format_args!(
                            "Track: {} - {}",
                            track.name(),
                            track.first_artist_name().unwrap_or(UNKNOWN_ARTIST)
                        ));
                    }
                }

                ItemType::Playlist => {
                    if let Some(playlist) = results.playlists().and_then(Page::first) {
                        self.reporter.detail(format_args!(
                            "Playlist: {} - {}",
                            playlist.name(),
                            playlist.owner().display_name()
                        ));
                    }
                }

                ItemType::Album => {
                    if let Some(album) = results.albums().and_then(Page::first) {
                        self.reporter.detail(format_args!(
                            "Album: {} - {}",
                            album.name(),
                            album.artists().first().map_or(UNKNOWN_ARTIST, |artist| artist.name())
                        ));
                    }
                }
            }
        }

        self.reporter.success("Search functionality working!");
        Ok(())
    }

    fn try_audio_features(&mut self) -> Result<()> {
        let client = self.client.as_ref().ok_or(Error::NotAuthenticated)?;

        let results = client
            .search(AUDIO_FEATURES_QUERY)
            .types([ItemType::Track])
            .limit(1)
            .send()?;

        let track_id = results
            .tracks()
            .and_then(Page::first)
            .and_then(|track| track.id())
            .ok_or(Error::NoResults("tracks"))?;

        let track_id = Id::<TrackId>::from_bare(track_id)?;
        let features = client
            .audio_features([track_id])?
            .into_iter()
            .next()
            .flatten()
            .ok_or(Error::NoResults("audio features"))?;

        self.reporter.success("Audio features access successful!");
        self.reporter
            .detail(format_args!("Danceability: {:.2}", features.danceability()));
        self.reporter.detail(format_args!("Energy: {:.2}", features.energy()));
        self.reporter.detail(format_args!("Valence: {:.2}", features.valence()));
        self.reporter.detail(format_args!("Tempo: {} BPM", features.tempo()));
        self.reporter.detail(format_args!("Key: {}", features.key()));
        self.reporter.detail(format_args!("Mode: {}", features.mode()));

        Ok(())
    }

    fn begin(&mut self, name: CheckName) {
        debug!("Running check {}", name);
        self.executed.push(name);
        self.reporter.header(name.header());
    }

    fn finish(&mut self, name: CheckName, result: Result<()>, report_error: bool) -> CheckOutcome {
        if let Err(err) = &result {
            debug!("Check {} failed: {:?}", name, err);

            if report_error {
                self.reporter.error(format_args!("{}: {}", name.failure_context(), err));
            }
        }

        let outcome = CheckOutcome::from(result);
        if !self.results.record(name, outcome.is_passed()) {
            debug!("Not recording result of untracked check {}", name);
        }

        outcome
    }

    fn ensure_source_loaded(&mut self) {
        if !self.source_loaded {
            self.source.load();
            self.source_loaded = true;
        }
    }
}

fn presence(found: bool) -> &'static str {
    if found {
        "✅ Found"
    } else {
        "❌ Missing"
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
