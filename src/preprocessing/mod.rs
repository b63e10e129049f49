//! Audio preprocessing modules
//!
//! This module contains utilities for preparing audio for analysis:
//! - Channel mixing (interleaved multichannel to mono)
//! - Sample-rate conversion
//! - Zero-phase Butterworth low-pass filtering

pub mod channel_mixer;
pub mod lowpass;
pub mod resample;
