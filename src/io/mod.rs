//! Audio I/O modules
//!
//! Audio decoding with Symphonia, the mono waveform container, and the
//! click-track writer.

pub mod click_track;
pub mod decoder;
pub mod waveform;

pub use click_track::{render_click_track, write_click_track};
pub use decoder::load_waveform;
pub use waveform::Waveform;
