//! Playback core for the Gaia globe
//!
//! Replays a sorted event timeline against wall-clock time and drives the
//! globe's idle motion. Nothing here touches the DOM: the page side plugs
//! in through the [`PingSink`], [`PlaybackView`] and [`Projection`] traits.

pub mod autorotate;
pub mod date;
pub mod driver;
pub mod globe;
pub mod scale;
pub mod ticker;
pub mod viewport;
pub mod visual;

pub use autorotate::{Autorotate, Projection};
pub use date::DateLabel;
pub use driver::{PingSink, PlaybackDriver, PlaybackState, PlaybackView, TickOutcome};
pub use globe::GlobeController;
pub use scale::{ColorScale, LinearScale, PowScale};
pub use ticker::{Clock, ElapsedTicker, WallClock};
pub use viewport::{Autocenter, Autoscale, ViewportPadding};
pub use visual::VisualMapping;
