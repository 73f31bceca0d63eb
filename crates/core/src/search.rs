//! Text search over record bodies.
//!
//! Typing only edits the pending text; the filter sees a new needle after an
//! explicit commit.

/// Case-insensitive substring needle. The empty needle matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.needle.is_empty() || text.to_lowercase().contains(&self.needle)
    }
}

/// Pending input plus the last committed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    pending: String,
    applied: String,
}

impl SearchBox {
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn applied(&self) -> &str {
        &self.applied
    }

    pub fn edit(&mut self, text: &str) {
        self.pending = text.to_string();
    }

    /// Promotes the pending text. Returns `true` when the applied value changed.
    pub fn commit(&mut self) -> bool {
        if self.pending == self.applied {
            return false;
        }
        self.applied = self.pending.clone();
        true
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(&self.applied)
    }
}
