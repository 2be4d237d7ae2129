use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date;

/// One memory record: an image reference, a calendar date, and a note.
///
/// `url` is either an opaque remote URL or an embedded binary-as-text image
/// (`data:` prefix). Entries are immutable once constructed; an edit replaces
/// the whole record while keeping `id`. The id is the stable identity used to
/// re-find a card after the collection re-sorts, independent of array
/// position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub url: String,
    pub date: String,
    pub note: String,
}

impl Entry {
    pub fn new(url: String, date: String, note: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            date,
            note,
        }
    }

    /// Replacement record for an edit: new fields, same identity.
    pub fn replacing(&self, url: String, date: String, note: String) -> Self {
        Self {
            id: self.id,
            url,
            date,
            note,
        }
    }

    /// Chronological sort key (epoch days; unparseable dates sort earliest).
    pub fn sort_key(&self) -> i64 {
        date::sort_key(&self.date)
    }

    /// Whether the image is embedded binary-as-text rather than a remote URL.
    pub fn has_embedded_image(&self) -> bool {
        self.url.starts_with("data:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_unique_ids() {
        let a = Entry::new("a.jpg".into(), "2020-01-01".into(), String::new());
        let b = Entry::new("a.jpg".into(), "2020-01-01".into(), String::new());
        assert_ne!(a.id, b.id, "structurally equal entries stay distinguishable");
    }

    #[test]
    fn test_replacing_keeps_id() {
        let a = Entry::new("a.jpg".into(), "2020-01-01".into(), "old".into());
        let b = a.replacing("b.jpg".into(), "2021-06-15".into(), "new".into());
        assert_eq!(a.id, b.id);
        assert_eq!(b.url, "b.jpg");
        assert_eq!(b.note, "new");
    }

    #[test]
    fn test_sort_key_ordering() {
        let early = Entry::new("x".into(), "2019-12-31".into(), String::new());
        let late = Entry::new("x".into(), "2020-01-01".into(), String::new());
        assert!(early.sort_key() < late.sort_key());
    }

    #[test]
    fn test_has_embedded_image() {
        let remote = Entry::new("https://x/p.jpg".into(), "2020-01-01".into(), String::new());
        let embedded = Entry::new("data:image/png;base64,AAAA".into(), "2020-01-01".into(), String::new());
        assert!(!remote.has_embedded_image());
        assert!(embedded.has_embedded_image());
    }

    #[test]
    fn test_serde_roundtrip() {
        let e = Entry::new("p.jpg".into(), "2020-05-05".into(), "picnic".into());
        let json = serde_json::to_string(&e).unwrap();
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, e.id);
        assert_eq!(back.date, e.date);
    }
}
