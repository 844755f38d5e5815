//! Session-scoped string slots.
//!
//! Two plain-string slots live for the duration of the session: the committed
//! search text and the saved page index. The timeline store is their only
//! owner; nothing else reads or writes them.

use tracing::warn;

/// Committed search text and saved page index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSlots {
    committed_search: Option<String>,
    saved_page: Option<String>,
}

impl SessionSlots {
    /// Empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the committed search text.
    pub fn commit_search(&mut self, text: &str) {
        self.committed_search = Some(text.to_string());
    }

    /// Committed search text, if a search was ever committed.
    pub fn committed_search(&self) -> Option<&str> {
        self.committed_search.as_deref()
    }

    /// Write the page index to hand over to the next resume.
    pub fn save_page(&mut self, page_index: u32) {
        self.saved_page = Some(page_index.to_string());
    }

    /// Read the saved page index without clearing it.
    ///
    /// A value that is not a page index is discarded with a warning and
    /// reads as `None`.
    pub fn saved_page(&mut self) -> Option<u32> {
        let raw = self.saved_page.as_deref()?;
        match raw.trim().parse::<u32>() {
            Ok(page) => Some(page),
            Err(_) => {
                warn!(value = raw, "Discarding unparsable saved page index");
                self.saved_page = None;
                None
            }
        }
    }

    /// Clear the saved page index.
    pub fn clear_saved_page(&mut self) {
        self.saved_page = None;
    }

    /// Overwrite the raw saved page slot.
    #[cfg(test)]
    pub(crate) fn set_raw_saved_page(&mut self, raw: &str) {
        self.saved_page = Some(raw.to_string());
    }
}
