use crate::constants::{FADE_RANGE, FADE_START, THETA};

/// Rendered state of one card for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardVisual {
    pub opacity: f64,
    pub interactive: bool,
}

/// Resting angle of the card at `index`: `index * THETA` degrees.
pub fn resting_angle(index: usize) -> f64 {
    index as f64 * THETA
}

/// Pure visibility function of (item index, current angle).
///
/// Cards within FADE_START degrees of the view are fully opaque and
/// clickable. Past that, opacity falls linearly to zero over FADE_RANGE
/// degrees and the card stops accepting pointer interaction, so off-screen
/// geometry can never swallow a click.
pub fn card_visual(index: usize, current_angle: f64) -> CardVisual {
    let diff = (resting_angle(index) - current_angle).abs();
    if diff <= FADE_START {
        CardVisual {
            opacity: 1.0,
            interactive: true,
        }
    } else {
        CardVisual {
            opacity: (1.0 - (diff - FADE_START) / FADE_RANGE).max(0.0),
            interactive: false,
        }
    }
}
