//! JSON wire format for exporting and importing the entry set.
//!
//! The envelope is versioned; import also accepts the legacy bare array of
//! `{url, date, note}` records, minting ids for entries that predate stable
//! identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date;
use crate::entry::Entry;

pub const WIRE_VERSION: &str = "1";

#[derive(Serialize, Deserialize, Debug)]
pub struct WireExport {
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
    pub entries: Vec<WireEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    pub date: String,
    pub note: String,
}

impl WireEntry {
    fn from_entry(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id.to_string()),
            url: entry.url.clone(),
            date: entry.date.clone(),
            note: entry.note.clone(),
        }
    }

    /// Convert to a domain entry. A missing or malformed id gets a fresh
    /// one; ids are identity, not data, so this is tolerated like a bad
    /// date rather than rejected.
    fn into_entry(self) -> Entry {
        let id = self
            .id
            .and_then(|s| Uuid::parse_str(&s).ok())
            .unwrap_or_else(Uuid::new_v4);
        Entry {
            id,
            url: self.url,
            date: self.date,
            note: self.note,
        }
    }
}

/// Serialize entries to the versioned wire envelope.
pub fn export_json(entries: &[Entry]) -> Result<String, serde_json::Error> {
    let export = WireExport {
        version: WIRE_VERSION.to_string(),
        timestamp: date::now_unix_secs().to_string(),
        entries: entries.iter().map(WireEntry::from_entry).collect(),
    };
    serde_json::to_string_pretty(&export)
}

/// Deserialize either the versioned envelope or a legacy bare array.
/// Returned entries are unsorted; callers hand them to OrderedCollection.
pub fn import_json(json: &str) -> Result<Vec<Entry>, serde_json::Error> {
    let wire_entries = match serde_json::from_str::<WireExport>(json) {
        Ok(export) => export.entries,
        Err(_) => serde_json::from_str::<Vec<WireEntry>>(json)?,
    };
    Ok(wire_entries.into_iter().map(WireEntry::into_entry).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_preserves_ids() {
        let entries = vec![
            Entry::new("a.jpg".into(), "2020-01-01".into(), "one".into()),
            Entry::new("b.jpg".into(), "2020-02-01".into(), "two".into()),
        ];
        let json = export_json(&entries).unwrap();
        let back = import_json(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].id, entries[0].id);
        assert_eq!(back[1].note, "two");
    }

    #[test]
    fn test_import_legacy_bare_array() {
        let json = r#"[
            {"url": "p.jpg", "date": "2020-01-05", "note": "picnic"},
            {"url": "q.jpg", "date": "2019-06-01", "note": ""}
        ]"#;
        let entries = import_json(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].note, "picnic");
        assert_ne!(entries[0].id, entries[1].id, "legacy records get fresh ids");
    }

    #[test]
    fn test_import_malformed_id_tolerated() {
        let json = r#"{"version": "1", "entries": [
            {"id": "not-a-uuid", "url": "p.jpg", "date": "2020-01-05", "note": ""}
        ]}"#;
        let entries = import_json(json).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_import_garbage_fails() {
        assert!(import_json("{not json").is_err());
        assert!(import_json(r#"{"entries": "nope"}"#).is_err());
    }

    #[test]
    fn test_export_carries_version() {
        let json = export_json(&[]).unwrap();
        let export: WireExport = serde_json::from_str(&json).unwrap();
        assert_eq!(export.version, WIRE_VERSION);
    }
}
