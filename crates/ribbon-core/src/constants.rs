/// Angular spacing between adjacent cards, degrees
pub const THETA: f64 = 18.0;

/// Ring radius for 3D card placement (renderer units).
/// Part of the renderer contract only; the angle math never reads it.
pub const RADIUS: f64 = 900.0;

/// Per-frame easing factor: current += (target - current) * SMOOTHING
pub const SMOOTHING: f64 = 0.1;

/// Slack beyond the first/last resting angle, degrees
pub const CLAMP_PADDING: f64 = 10.0;

/// Degrees of rotation per pixel of pointer drag
pub const DRAG_GAIN: f64 = 0.15;

/// Degrees of rotation per wheel delta unit
pub const WHEEL_GAIN: f64 = 0.05;

/// A release within this displacement (px) can still classify as a click
pub const CLICK_MAX_DISTANCE: f64 = 5.0;

/// A release within this hold time (ms) can still classify as a click
pub const CLICK_MAX_ELAPSED_MS: u64 = 400;

/// Angular distance at which cards begin fading, degrees
pub const FADE_START: f64 = 60.0;

/// Width of the linear fade band, degrees. Cards are fully transparent
/// past FADE_START + FADE_RANGE.
pub const FADE_RANGE: f64 = 20.0;
