//! Angular carousel engine for date-ordered memory entries.
//!
//! Converts heterogeneous input (pointer drag, wheel, keyboard) into a
//! single target angle, eases a current angle toward it every frame, clamps
//! to collection bounds, classifies pointer gestures as click vs drag, and
//! derives per-card visibility from angular distance. The entry collection
//! stays date-sorted across every mutation, and the view re-targets to a
//! saved entry's post-sort position.
//!
//! Zero I/O beyond the system clock: rendering, storage, and the edit
//! overlay are external collaborators behind the traits and snapshot types
//! in `carousel`.

pub mod angle;
pub mod carousel;
pub mod collection;
pub mod constants;
pub mod date;
pub mod entry;
pub mod gesture;
pub mod visibility;
pub mod wire;

pub use angle::AngleController;
pub use carousel::{
    CardHitTest, CarouselController, DeleteReceipt, DraftError, EditSession, EntryDraft, Frame,
    PersistError, Persistence, SaveReceipt, UiAction,
};
pub use collection::OrderedCollection;
pub use constants::{
    CLAMP_PADDING, CLICK_MAX_DISTANCE, CLICK_MAX_ELAPSED_MS, DRAG_GAIN, FADE_RANGE, FADE_START,
    RADIUS, SMOOTHING, THETA, WHEEL_GAIN,
};
pub use date::{format_short, parse_iso_date, today_iso};
pub use entry::Entry;
pub use gesture::{GestureClassifier, InputEvent, Intent, NavKey};
pub use visibility::{CardVisual, card_visual, resting_angle};
pub use wire::{WIRE_VERSION, export_json, import_json};
