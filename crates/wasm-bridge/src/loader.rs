//! Loads everything playback waits on: the event feed and the soundscape

use gaia_config::GaiaConfig;
use gaia_data::{DataFetcher, Timeline};
use gaia_shared::{GaiaError, GaiaResult};

use crate::soundscape::Soundscape;

pub const EVENTS_LOAD_FAILED: &str = "Problem loading the events data.";
pub const AUDIO_LOAD_FAILED: &str = "Problem loading the background audio.";
pub const STARTUP_FAILED: &str = "Problem starting the event replay.";

/// Fetch the feed and load the sample concurrently. Either failure fails
/// the whole load.
pub async fn load_assets(config: &GaiaConfig) -> GaiaResult<(Timeline, Soundscape)> {
    let fetcher = DataFetcher::new(config.sources.events_url.clone());
    futures::try_join!(fetcher.fetch_timeline(), Soundscape::load(&config.audio))
}

/// Text shown to the user when loading or setup fails
pub fn failure_notice(error: &GaiaError) -> &'static str {
    match error {
        GaiaError::AudioLoad { .. } => AUDIO_LOAD_FAILED,
        GaiaError::DataFetch { .. }
        | GaiaError::DataParse { .. }
        | GaiaError::EmptyTimeline
        | GaiaError::UnsortedRecords { .. } => EVENTS_LOAD_FAILED,
        _ => STARTUP_FAILED,
    }
}

/// Log the failure and tell the user
pub fn report_failure(error: &GaiaError) {
    log::error!("Starting failed: {error}");
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(failure_notice(error)) {
            log::warn!("Could not show load failure notice: {e:?}");
        }
    }
}
