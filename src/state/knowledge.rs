//! Knowledge cache state
//!
//! Read-through copy of the backend's knowledge list. The displayed view is
//! always derived from the cache, the search term and the category filter;
//! filtering never touches the cache itself.

use crate::api::{KnowledgeItem, NewKnowledgeItem};
use crate::error::ClientError;
use std::collections::BTreeSet;

/// Add-knowledge dialog state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    /// Whether the dialog is shown
    pub open: bool,
    /// Form contents
    pub draft: NewKnowledgeItem,
}

/// Locally held knowledge list with its filter inputs
#[derive(Debug, Clone, Default)]
pub struct KnowledgeCache {
    items: Vec<KnowledgeItem>,
    /// Free-text search term
    pub search: String,
    /// Selected category, `None` for all
    pub category: Option<String>,
    saving: bool,
    /// Add-knowledge dialog
    pub editor: Editor,
}

impl KnowledgeCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cached item, in server order
    pub fn items(&self) -> &[KnowledgeItem] {
        &self.items
    }

    /// Replace the whole cache with a fresh listing
    pub fn replace(&mut self, items: Vec<KnowledgeItem>) {
        tracing::debug!(count = items.len(), "Knowledge cache replaced");
        self.items = items;
    }

    /// Items matching the given search term and category
    ///
    /// The term matches title or content, case-insensitively. The category
    /// must match exactly. Empty inputs are treated as not given.
    pub fn filter(&self, search: Option<&str>, category: Option<&str>) -> Vec<&KnowledgeItem> {
        let term = search
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase());
        let category = category.filter(|c| !c.is_empty());

        self.items
            .iter()
            .filter(|item| match &term {
                Some(term) => {
                    item.title.to_lowercase().contains(term)
                        || item.content.to_lowercase().contains(term)
                }
                None => true,
            })
            .filter(|item| category.map_or(true, |c| item.category == c))
            .collect()
    }

    /// Items matching the current search term and category
    pub fn visible(&self) -> Vec<&KnowledgeItem> {
        self.filter(Some(&self.search), self.category.as_deref())
    }

    /// Distinct categories present in the cache, sorted
    pub fn categories(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether a create request is in flight
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Validate the current draft and mark a save as in flight
    ///
    /// # Returns
    /// * `Ok(Some(item))` - The item to post
    /// * `Ok(None)` - A save is already in flight; the request is dropped
    /// * `Err(ClientError::Validation)` - A field is empty
    pub fn begin_save(&mut self) -> Result<Option<NewKnowledgeItem>, ClientError> {
        if self.saving {
            return Ok(None);
        }
        if !self.editor.draft.is_complete() {
            return Err(ClientError::Validation(
                "title, category and content are required".to_string(),
            ));
        }
        self.saving = true;
        Ok(Some(self.editor.draft.clone()))
    }

    /// Finish the in-flight save
    ///
    /// A successful save closes the dialog and resets the form. A failed one
    /// leaves the form as it was so the user can retry.
    pub fn finish_save(&mut self, succeeded: bool) {
        self.saving = false;
        if succeeded {
            self.editor = Editor::default();
        }
    }
}
