//! Color conversion and contrast.

use crate::error::{Error, Result};

/// Convert RGB or RGBA channels in `[0, 1]` to a Graphviz color string.
///
/// ```
/// assert_eq!(gvstyle_core::color(&[0.5, 0.5, 0.5]).unwrap(), "#808080");
/// ```
pub fn color(channels: &[f64]) -> Result<String> {
    if !matches!(channels.len(), 3 | 4) {
        return Err(Error::Validation(format!(
            "expected 3 (RGB) or 4 (RGBA) color channels, got {}",
            channels.len()
        )));
    }
    let hex: String = channels
        .iter()
        .map(|&c| format!("{:02X}", to_byte(c)))
        .collect();
    Ok(format!("#{}", hex))
}

fn to_byte(value: f64) -> u8 {
    ((256.0 * value) as i64).clamp(0, 255) as u8
}

// https://www.w3.org/TR/2008/REC-WCAG20-20081211/#relativeluminancedef
fn linearize(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else if x <= 0.03928 {
        x / 12.92
    } else if x <= 1.0 {
        ((x + 0.055) / 1.055).powf(2.4)
    } else {
        1.0
    }
}

/// WCAG relative luminance of RGB(A) channels. Alpha is ignored.
pub fn relative_luminance(channels: &[f64]) -> f64 {
    const WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];
    WEIGHTS
        .iter()
        .zip(channels)
        .map(|(w, &c)| w * linearize(c))
        .sum()
}

/// WCAG contrast ratio between two luminances, in `[1, 21]`.
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (hi, lo) = if l1 < l2 { (l2, l1) } else { (l1, l2) };
    (hi + 0.05) / (lo + 0.05)
}

const BLACK: [f64; 3] = [0.0, 0.0, 0.0];
const WHITE: [f64; 3] = [1.0, 1.0, 1.0];

/// Pick black or white, whichever contrasts most with `channels`.
///
/// Handy for a `fontcolor` that stays readable on a computed `fillcolor`.
pub fn contrasting_color(channels: &[f64]) -> Vec<f64> {
    contrasting_color_among(channels, &[BLACK.to_vec(), WHITE.to_vec()])
}

/// Pick the option that contrasts most with `channels`.
///
/// The first option wins ties. No options yields black.
pub fn contrasting_color_among<C: AsRef<[f64]>>(channels: &[f64], options: &[C]) -> Vec<f64> {
    let lum = relative_luminance(channels);
    let mut best: Option<(f64, &C)> = None;
    for option in options {
        let ratio = contrast_ratio(lum, relative_luminance(option.as_ref()));
        if best.map_or(true, |(r, _)| ratio > r) {
            best = Some((ratio, option));
        }
    }
    best.map_or_else(|| BLACK.to_vec(), |(_, c)| c.as_ref().to_vec())
}
