//! Feature extraction modules
//!
//! This module contains all feature extraction algorithms:
//! - Short-time Fourier transform
//! - Spectral novelty onset detection
//! - Tempo estimation from onset times
//! - Chroma extraction
//! - Key detection

pub mod chroma;
pub mod key;
pub mod onset;
pub mod stft;
pub mod tempo;
