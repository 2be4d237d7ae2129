use std::fmt;

use crate::angle::AngleController;
use crate::collection::OrderedCollection;
use crate::constants::{DRAG_GAIN, THETA, WHEEL_GAIN};
use crate::date;
use crate::entry::Entry;
use crate::gesture::{GestureClassifier, InputEvent, Intent};
use crate::visibility::{CardVisual, card_visual};

/// Failure at the persistence boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersistError {
    /// Backing storage is out of capacity. In-memory state stays valid;
    /// the save is not retried automatically.
    StorageFull,
    Backend(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::StorageFull => write!(f, "storage is full"),
            PersistError::Backend(msg) => write!(f, "storage backend error: {msg}"),
        }
    }
}

impl std::error::Error for PersistError {}

/// Contract toward the external storage collaborator. Receives read-only
/// snapshots; `load` returns `None` when nothing has ever been persisted.
pub trait Persistence {
    fn load(&self) -> Result<Option<Vec<Entry>>, PersistError>;
    fn save(&self, entries: &[Entry]) -> Result<(), PersistError>;
}

/// Contract toward the external renderer for click resolution: which entry
/// index (if any) is the topmost card at a given screen coordinate.
pub trait CardHitTest {
    fn card_at(&self, x: f64, y: f64) -> Option<usize>;
}

/// Action the host UI must carry out in response to an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    /// Open the edit overlay for the entry at this index.
    OpenEditor(usize),
}

/// Open edit-overlay state. `index: None` means a brand-new entry (the
/// form's `-1` sentinel). Field values are prefilled for the form; the url
/// field is presented blank for embedded (`data:`) images so binary-as-text
/// never surfaces in a text input.
#[derive(Clone, Debug)]
pub struct EditSession {
    pub index: Option<usize>,
    pub url_field: String,
    pub date_field: String,
    pub note_field: String,
}

/// Confirmed form values returned by the edit overlay.
/// `url: None` (or empty) on an existing entry keeps its current image.
#[derive(Clone, Debug, Default)]
pub struct EntryDraft {
    pub url: Option<String>,
    pub date: String,
    pub note: String,
}

/// Draft rejected before any mutation; the collection is untouched and the
/// edit session stays open for the user to fix the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftError {
    /// A new entry needs an image URL or an uploaded file.
    MissingImage,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingImage => write!(f, "an image URL or upload is required"),
        }
    }
}

impl std::error::Error for DraftError {}

/// Result of a completed save: where the entry landed after re-sorting,
/// the target angle now pointing at it, and any persistence failure
/// (surfaced, never fatal to in-memory state).
#[derive(Debug)]
pub struct SaveReceipt {
    pub index: usize,
    pub target_angle: f64,
    pub storage: Option<PersistError>,
}

/// Result of a completed delete.
#[derive(Debug)]
pub struct DeleteReceipt {
    pub remaining: usize,
    pub target_angle: f64,
    pub storage: Option<PersistError>,
}

/// Per-frame read-only snapshot the renderer consumes: the smoothed angle
/// plus one visual per card, in collection order. `empty` drives the
/// empty-state message.
#[derive(Clone, Debug)]
pub struct Frame {
    pub current_angle: f64,
    pub cards: Vec<CardVisual>,
    pub empty: bool,
}

/// Orchestrates the carousel: feeds classified intents into the angle
/// controller, keeps the angle consistent with the date-sorted collection
/// across mutations, and runs the per-frame update.
///
/// Owns all mutable state exclusively; collaborators only ever see
/// `&[Entry]` and `Frame` snapshots. Every mutating operation is a complete
/// synchronous transaction: collection mutation, index resolution, angle
/// re-target, persistence, in that order.
pub struct CarouselController<P: Persistence> {
    collection: OrderedCollection,
    angle: AngleController,
    gesture: GestureClassifier,
    store: P,
    session: Option<EditSession>,
}

impl<P: Persistence> CarouselController<P> {
    /// Load persisted entries (absent means empty) and start at angle 0.
    pub fn new(store: P) -> Result<Self, PersistError> {
        let entries = store.load()?.unwrap_or_default();
        Ok(Self {
            collection: OrderedCollection::from_entries(entries),
            angle: AngleController::new(),
            gesture: GestureClassifier::new(),
            store,
            session: None,
        })
    }

    pub fn entries(&self) -> &[Entry] {
        self.collection.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn target_angle(&self) -> f64 {
        self.angle.target()
    }

    pub fn current_angle(&self) -> f64 {
        self.angle.current()
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// One display-frame step: ease the current angle toward the target.
    /// Arithmetic only; must never block.
    pub fn tick(&mut self) {
        self.angle.tick();
    }

    /// Snapshot for the renderer, a pure function of current state.
    pub fn frame(&self) -> Frame {
        let current = self.angle.current();
        Frame {
            current_angle: current,
            cards: (0..self.collection.len())
                .map(|i| card_visual(i, current))
                .collect(),
            empty: self.collection.is_empty(),
        }
    }

    /// Route one raw input event through the gesture classifier and apply
    /// the resulting intent. Keyboard input is dropped outright while an
    /// edit session is open (the modal owns input focus). Drag deltas move
    /// the target unclamped; bounds are enforced on every pointer release.
    /// A click only opens the editor when the hit card is interactive at
    /// the current angle, so faded-out cards never register.
    pub fn handle_input<H: CardHitTest>(&mut self, event: InputEvent, hit: &H) -> Option<UiAction> {
        if self.session.is_some() && matches!(event, InputEvent::Key(_)) {
            return None;
        }

        let n = self.collection.len();
        match self.gesture.classify(event)? {
            Intent::Drag { delta_x } => {
                // drag-right moves the view left
                self.angle.nudge_unclamped(-delta_x * DRAG_GAIN);
                None
            }
            Intent::DragEnd => {
                self.angle.clamp(n);
                None
            }
            Intent::Click { x, y } => {
                self.angle.clamp(n);
                let index = hit.card_at(x, y)?;
                if index < n && card_visual(index, self.angle.current()).interactive {
                    Some(UiAction::OpenEditor(index))
                } else {
                    None
                }
            }
            Intent::Scroll { delta_y } => {
                self.angle.nudge(delta_y * WHEEL_GAIN, n);
                None
            }
            Intent::Step { direction } => {
                self.angle.nudge(f64::from(direction) * THETA, n);
                None
            }
        }
    }

    /// Open an edit session for a brand-new entry. The date field defaults
    /// to today.
    pub fn begin_add(&mut self) -> &EditSession {
        self.session.insert(EditSession {
            index: None,
            url_field: String::new(),
            date_field: date::today_iso(),
            note_field: String::new(),
        })
    }

    /// Open an edit session prefilled from the entry at `index`.
    /// Panics on an out-of-range index (caller invariant violation).
    pub fn begin_edit(&mut self, index: usize) -> &EditSession {
        let entry = &self.collection.as_slice()[index];
        self.session.insert(EditSession {
            index: Some(index),
            url_field: if entry.has_embedded_image() {
                String::new()
            } else {
                entry.url.clone()
            },
            date_field: entry.date.clone(),
            note_field: entry.note.clone(),
        })
    }

    pub fn cancel_edit(&mut self) {
        self.session = None;
    }

    /// Commit the open edit session. Inserts or replaces, re-sorts, then
    /// scrolls the view to wherever the entry now sits, then persists.
    ///
    /// A new entry with no image source is rejected before any mutation.
    /// A persistence failure is carried in the receipt: in-memory state is
    /// already valid and must not be rolled back.
    ///
    /// Panics when no session is open.
    pub fn save_edit(&mut self, draft: EntryDraft) -> Result<SaveReceipt, DraftError> {
        let session = self.session.as_ref().expect("save_edit without an open session");
        let new_url = draft.url.as_deref().filter(|u| !u.is_empty());

        let url = match (new_url, session.index) {
            (Some(u), _) => u.to_string(),
            // editing without a new image keeps the old one
            (None, Some(i)) => self.collection.as_slice()[i].url.clone(),
            (None, None) => return Err(DraftError::MissingImage),
        };

        let id = match session.index {
            None => {
                let entry = Entry::new(url, draft.date, draft.note);
                let id = entry.id;
                self.collection.insert(entry);
                id
            }
            Some(i) => {
                let entry = self.collection.as_slice()[i].replacing(url, draft.date, draft.note);
                let id = entry.id;
                self.collection.update(i, entry);
                id
            }
        };

        let index = self
            .collection
            .index_of(id)
            .expect("just-saved entry present after sort");
        self.angle.jump_to(index, self.collection.len());

        let storage = self.persist();
        self.session = None;

        Ok(SaveReceipt {
            index,
            target_angle: self.angle.target(),
            storage,
        })
    }

    /// Remove the entry at `index`, persist, and shrink the angle bounds.
    /// Deleting the last entry forces the target back to 0.
    /// Panics on an out-of-range index.
    pub fn delete_at(&mut self, index: usize) -> DeleteReceipt {
        self.collection.remove(index);
        let storage = self.persist();

        self.angle.clamp(self.collection.len());
        if self.collection.is_empty() {
            self.angle.reset_target();
        }
        self.session = None;

        DeleteReceipt {
            remaining: self.collection.len(),
            target_angle: self.angle.target(),
            storage,
        }
    }

    fn persist(&self) -> Option<PersistError> {
        self.store.save(self.collection.as_slice()).err()
    }
}
