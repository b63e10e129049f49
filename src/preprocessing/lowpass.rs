//! Zero-phase Butterworth low-pass filtering
//!
//! Chroma extraction runs on a band-limited copy of the signal: content above a
//! couple of kHz adds noise to pitch-class estimation without carrying tonal
//! information. The filter is applied forward and backward so the result has
//! no phase distortion (and a squared magnitude response).
//!
//! # Example
//!
//! ```no_run
//! use composer_dsp::preprocessing::lowpass::lowpass_zero_phase;
//!
//! let samples = vec![0.0f32; 22050];
//! let filtered = lowpass_zero_phase(&samples, 22050, 1400.0, 4)?;
//! # Ok::<(), composer_dsp::AnalysisError>(())
//! ```

use crate::error::AnalysisError;
use rustfft::num_complex::Complex64;
use std::f64::consts::PI;

/// Digital filter in transfer-function form, `a[0] == 1`
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    /// Numerator coefficients
    pub b: Vec<f64>,
    /// Denominator coefficients
    pub a: Vec<f64>,
}

impl TransferFunction {
    /// Gain at 0 Hz
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }

    fn order(&self) -> usize {
        self.a.len().max(self.b.len()) - 1
    }

    /// Filter state that makes a constant unit input produce a constant output
    fn steady_state(&self) -> Vec<f64> {
        let n = self.order();
        let gain = self.dc_gain();
        let mut zi = vec![0.0f64; n];
        let mut acc = 0.0f64;
        for i in (0..n).rev() {
            let b = self.b.get(i + 1).copied().unwrap_or(0.0);
            let a = self.a.get(i + 1).copied().unwrap_or(0.0);
            acc += b - a * gain;
            zi[i] = acc;
        }
        zi
    }

    /// Run the filter over `x` (direct form II transposed), starting from `state`
    fn filter(&self, x: &[f64], mut state: Vec<f64>) -> Vec<f64> {
        let n = self.order();
        let coeff = |v: &[f64], i: usize| v.get(i).copied().unwrap_or(0.0);
        let mut y = Vec::with_capacity(x.len());

        for &input in x {
            let output = coeff(&self.b, 0) * input + state.first().copied().unwrap_or(0.0);
            for i in 0..n {
                let next = if i + 1 < n { state[i + 1] } else { 0.0 };
                state[i] = coeff(&self.b, i + 1) * input + next - coeff(&self.a, i + 1) * output;
            }
            y.push(output);
        }

        y
    }
}

/// Design a digital Butterworth low-pass filter
///
/// The analog prototype poles are scaled to the pre-warped cutoff and mapped to
/// the z-plane with the bilinear transform; all zeros sit at Nyquist.
///
/// # Arguments
///
/// * `order` - Filter order (>= 1)
/// * `cutoff_hz` - -3 dB cutoff frequency in Hz
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the order is zero or the cutoff is
/// not strictly between 0 and the Nyquist frequency.
pub fn butterworth_lowpass(
    order: usize,
    cutoff_hz: f32,
    sample_rate: u32,
) -> Result<TransferFunction, AnalysisError> {
    if order == 0 {
        return Err(AnalysisError::InvalidInput(
            "Butterworth order must be >= 1".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput("Invalid sample rate".to_string()));
    }

    let nyquist = sample_rate as f64 * 0.5;
    let wn = cutoff_hz as f64 / nyquist;
    if !(wn > 0.0 && wn < 1.0) {
        return Err(AnalysisError::InvalidInput(format!(
            "Cutoff {} Hz must lie strictly between 0 and Nyquist ({} Hz)",
            cutoff_hz, nyquist
        )));
    }

    // Bilinear transform with fs = 2 (normalized frequency units)
    let fs2 = 4.0f64;
    let warped = fs2 * (PI * wn / 2.0).tan();

    let n = order as f64;
    let analog_poles: Vec<Complex64> = (0..order)
        .map(|k| {
            let m = -(n - 1.0) + 2.0 * k as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * n)) * warped
        })
        .collect();

    let digital_poles: Vec<Complex64> = analog_poles
        .iter()
        .map(|&p| (Complex64::new(fs2, 0.0) + p) / (Complex64::new(fs2, 0.0) - p))
        .collect();

    let denom = analog_poles
        .iter()
        .fold(Complex64::new(1.0, 0.0), |acc, &p| acc * (Complex64::new(fs2, 0.0) - p));
    let gain = warped.powi(order as i32) * (Complex64::new(1.0, 0.0) / denom).re;

    let b: Vec<f64> = binomial_row(order).into_iter().map(|c| c * gain).collect();
    let a: Vec<f64> = poly_from_roots(&digital_poles).into_iter().map(|c| c.re).collect();

    log::debug!(
        "Butterworth low-pass: order={}, cutoff={} Hz, sr={} Hz, dc_gain={:.6}",
        order,
        cutoff_hz,
        sample_rate,
        b.iter().sum::<f64>() / a.iter().sum::<f64>()
    );

    Ok(TransferFunction { b, a })
}

/// Apply a filter forward and backward (zero phase)
///
/// The signal is extended at both ends by odd reflection of
/// `3 * max(len(a), len(b))` samples and each pass starts from the steady-state
/// filter response to its first sample, which suppresses start-up transients.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the signal is not longer than the
/// padding length.
pub fn filtfilt(filter: &TransferFunction, x: &[f32]) -> Result<Vec<f32>, AnalysisError> {
    let padlen = 3 * filter.a.len().max(filter.b.len());
    if x.len() <= padlen {
        return Err(AnalysisError::InvalidInput(format!(
            "Signal of {} samples is too short for zero-phase filtering (needs > {})",
            x.len(),
            padlen
        )));
    }

    let n = x.len();
    let first = x[0] as f64;
    let last = x[n - 1] as f64;

    let mut ext = Vec::with_capacity(n + 2 * padlen);
    for i in 0..padlen {
        ext.push(2.0 * first - x[padlen - i] as f64);
    }
    ext.extend(x.iter().map(|&v| v as f64));
    for i in 0..padlen {
        ext.push(2.0 * last - x[n - 2 - i] as f64);
    }

    let zi = filter.steady_state();

    let x0 = ext[0];
    let forward = filter.filter(&ext, zi.iter().map(|z| z * x0).collect());

    let mut reversed: Vec<f64> = forward.into_iter().rev().collect();
    let y0 = reversed[0];
    reversed = filter.filter(&reversed, zi.iter().map(|z| z * y0).collect());

    Ok(reversed
        .into_iter()
        .rev()
        .skip(padlen)
        .take(n)
        .map(|v| v as f32)
        .collect())
}

/// Design a Butterworth low-pass and apply it with zero phase
pub fn lowpass_zero_phase(
    samples: &[f32],
    sample_rate: u32,
    cutoff_hz: f32,
    order: usize,
) -> Result<Vec<f32>, AnalysisError> {
    let filter = butterworth_lowpass(order, cutoff_hz, sample_rate)?;
    filtfilt(&filter, samples)
}

/// Coefficients of (z + 1)^n
fn binomial_row(n: usize) -> Vec<f64> {
    let mut row = vec![1.0f64];
    for _ in 0..n {
        let mut next = vec![1.0f64; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// Monic polynomial coefficients (highest power first) with the given roots
fn poly_from_roots(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &r in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * r;
        }
        coeffs = next;
    }
    coeffs
}
