use crate::constants::{CLICK_MAX_DISTANCE, CLICK_MAX_ELAPSED_MS};

/// Raw input event, decoupled from any particular event-dispatch mechanism.
/// Timestamps are caller-supplied milliseconds so the classifier stays
/// clock-free and testable without a live UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, at_ms: u64 },
    PointerMove { x: f64 },
    PointerUp { x: f64, at_ms: u64 },
    Wheel { delta_y: f64 },
    Key(NavKey),
}

/// Keyboard navigation keys the carousel responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

impl NavKey {
    /// Step direction: +1 scrolls forward, -1 back.
    pub fn direction(self) -> i8 {
        match self {
            NavKey::Right => 1,
            NavKey::Left => -1,
        }
    }
}

/// High-level intent produced from raw events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    /// Pointer moved while dragging; `delta_x` is pixels since the last move.
    Drag { delta_x: f64 },
    /// Drag released without qualifying as a click.
    DragEnd,
    /// Quick, near-stationary release. Coordinates are the gesture's
    /// original pointer-down position, for hit-testing the topmost card.
    Click { x: f64, y: f64 },
    /// Wheel scroll, raw delta units.
    Scroll { delta_y: f64 },
    /// Keyboard step of one card width in the given direction.
    Step { direction: i8 },
}

/// Live drag record, created on pointer-down and destroyed on pointer-up.
#[derive(Clone, Copy, Debug)]
struct DragState {
    start_x: f64,
    start_y: f64,
    last_x: f64,
    started_at_ms: u64,
}

/// Pointer gesture state machine: `Idle → Dragging → Idle`.
///
/// Classification happens at release time only: a release counts as a click
/// iff total displacement stayed under `CLICK_MAX_DISTANCE` px AND the hold
/// lasted under `CLICK_MAX_ELAPSED_MS`. A drag held open indefinitely is
/// legal; only elapsed-time-at-release matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureClassifier {
    drag: Option<DragState>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Consume one raw event, possibly yielding an intent.
    /// Pointer moves and releases while idle are ignored; a pointer-down
    /// while already dragging restarts the gesture.
    pub fn classify(&mut self, event: InputEvent) -> Option<Intent> {
        match event {
            InputEvent::PointerDown { x, y, at_ms } => {
                self.drag = Some(DragState {
                    start_x: x,
                    start_y: y,
                    last_x: x,
                    started_at_ms: at_ms,
                });
                None
            }
            InputEvent::PointerMove { x } => {
                let drag = self.drag.as_mut()?;
                let delta_x = x - drag.last_x;
                drag.last_x = x;
                Some(Intent::Drag { delta_x })
            }
            InputEvent::PointerUp { x, at_ms } => {
                let drag = self.drag.take()?;
                let distance = (x - drag.start_x).abs();
                let elapsed = at_ms.saturating_sub(drag.started_at_ms);
                if distance < CLICK_MAX_DISTANCE && elapsed < CLICK_MAX_ELAPSED_MS {
                    Some(Intent::Click {
                        x: drag.start_x,
                        y: drag.start_y,
                    })
                } else {
                    Some(Intent::DragEnd)
                }
            }
            InputEvent::Wheel { delta_y } => Some(Intent::Scroll { delta_y }),
            InputEvent::Key(key) => Some(Intent::Step {
                direction: key.direction(),
            }),
        }
    }
}
