//! Suggestion catalog behind the author and year filter pickers.
//!
//! The catalog is built from whatever list the upstream fetch returned and answers
//! "what should the picker offer for this typed text". Whether typed text may become
//! a new tag is part of the catalog's configuration, never ambient state.

use serde::{Deserialize, Serialize};

use crate::config::SuggestionConfig;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub is_new_item: bool,
}

impl Tag {
    pub fn existing(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            key: value.clone(),
            name: value,
            is_new_item: false,
        }
    }

    fn proposed(value: &str) -> Self {
        Self {
            key: value.to_string(),
            name: value.to_string(),
            is_new_item: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagCatalog {
    config: SuggestionConfig,
    tags: Vec<Tag>,
}

impl TagCatalog {
    pub fn new(config: SuggestionConfig) -> Self {
        Self {
            config,
            tags: Vec::new(),
        }
    }

    /// Build a catalog from raw fetched values: trimmed, empties dropped, first
    /// occurrence of each key wins.
    pub fn from_raw<I, S>(values: I, config: SuggestionConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::new(config);
        for value in values {
            let trimmed = value.as_ref().trim();
            if trimmed.is_empty() || catalog.contains_key(trimmed) {
                continue;
            }
            catalog.tags.push(Tag::existing(trimmed));
        }
        tracing::debug!(count = catalog.tags.len(), "built tag catalog");
        catalog
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tags.iter().any(|t| t.key == key)
    }

    /// Tags to offer for `filter_text`, excluding anything already selected.
    pub fn suggest(&self, filter_text: &str, selected: &[Tag]) -> Vec<Tag> {
        let mut matches: Vec<Tag> = if filter_text.is_empty() {
            Vec::new()
        } else {
            let needle = filter_text.to_lowercase();
            self.tags
                .iter()
                .filter(|t| t.name.to_lowercase().starts_with(&needle))
                .filter(|t| !selected.iter().any(|s| s.key == t.key))
                .cloned()
                .collect()
        };

        if self.config.allow_new
            && !filter_text.is_empty()
            && !matches.iter().any(|t| t.key == filter_text)
        {
            matches.insert(0, Tag::proposed(filter_text));
        }
        matches
    }

    /// Accept a tag into the selection. A proposed tag joins the catalog as an
    /// ordinary entry.
    pub fn select(&mut self, mut tag: Tag, selected: &[Tag]) -> Result<Tag, AppError> {
        if selected.len() >= self.config.item_limit {
            return Err(AppError::new(
                "SUGGEST_ITEM_LIMIT_REACHED",
                "Selection already holds the maximum number of tags",
            )
            .with_details(format!("item_limit={}", self.config.item_limit)));
        }
        if tag.is_new_item {
            if !self.config.allow_new {
                return Err(AppError::new(
                    "SUGGEST_NEW_ITEMS_DISABLED",
                    "Adding new tags is not enabled for this picker",
                )
                .with_details(format!("key={}", tag.key)));
            }
            tag.is_new_item = false;
            if !self.contains_key(&tag.key) {
                self.tags.push(tag.clone());
            }
        }
        Ok(tag)
    }

    /// Hint shown when no suggestion matches, e.g. `kind = "author"`.
    pub fn no_results_text(&self, kind: &str) -> String {
        if self.config.allow_new {
            format!("Press Enter to add as a new {kind}")
        } else {
            format!("No matching {kind} found")
        }
    }
}
