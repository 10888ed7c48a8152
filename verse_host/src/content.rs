/// ContentStore — immutable per-verse metadata.
///
/// One entry per slide: verse number, title, text, the three concept
/// readings, and the control descriptors for that verse's scene. Loaded
/// once at startup from an embedded RON document and never mutated.

use serde::{Deserialize, Serialize};

use crate::controls::ControlDescriptor;
use crate::error::{Error, Result};
use crate::host_error;

/// The three readings of a verse's concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concepts {
    /// Primary philosophical reading
    pub primary: String,
    /// Secondary (physics-metaphor) reading
    pub secondary: String,
    /// Plain-language reading
    pub accessible: String,
}

/// One verse/slide: text plus its scene's control descriptors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideEntry {
    /// Verse number as printed in the source text
    pub number: u32,
    /// Display title
    pub title: String,
    /// Verse body text
    pub text: String,
    /// Concept readings
    pub concepts: Concepts,
    /// Control descriptors for this verse's scene
    #[serde(default)]
    pub controls: Vec<ControlDescriptor>,
}

/// Ordered, read-only collection of slide entries.
///
/// Position in the sequence is the slide's stable identity; the Host
/// checks at startup that the registry has a factory for every entry.
pub struct ContentStore {
    entries: Vec<SlideEntry>,
}

impl ContentStore {
    /// Parse a RON document holding a list of slide entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContentError`] if the document does not parse,
    /// or if it contains no entries.
    pub fn from_ron(source: &str) -> Result<Self> {
        let entries: Vec<SlideEntry> = ron::from_str(source)
            .map_err(|e| Error::ContentError(format!("verse content: {}", e)))?;
        Self::from_entries(entries)
    }

    /// Build a store from already-constructed entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty.
    pub fn from_entries(entries: Vec<SlideEntry>) -> Result<Self> {
        if entries.is_empty() {
            host_error!("versehost::ContentStore", "content has no entries");
            return Err(Error::ContentError("content has no entries".to_string()));
        }
        Ok(Self { entries })
    }

    /// Entry for a slide index
    pub fn entry(&self, index: usize) -> Option<&SlideEntry> {
        self.entries.get(index)
    }

    /// Number of slides
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects empty stores
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in slide order
    pub fn iter(&self) -> impl Iterator<Item = &SlideEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
