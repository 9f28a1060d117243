//! Two-level category index over coloring pages
//!
//! Groups a flat item list into category → subcategory → items. Both levels
//! keep the order in which labels were first seen, and items keep their
//! source order inside a bucket. Labels are compared exactly, so "Cats" and
//! "cats" are different buckets.

use std::collections::HashMap;

use crate::content::records::ColoringItem;
use crate::io::configuration::GENERAL_SUBCATEGORY;
use crate::io::error::{PlayError, Result};

/// Items sharing one (category, subcategory) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    name: String,
    items: Vec<ColoringItem>,
}

impl Bucket {
    /// Subcategory label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Items in source order
    pub fn items(&self) -> &[ColoringItem] {
        &self.items
    }
}

/// A category and its subcategory buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    buckets: Vec<Bucket>,
}

impl Category {
    /// Category label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Buckets in first-seen order
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Bucket for a subcategory label
    pub fn bucket(&self, subcategory: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| bucket.name == subcategory)
    }

    /// Every item across all buckets
    pub fn items(&self) -> impl Iterator<Item = &ColoringItem> {
        self.buckets.iter().flat_map(|bucket| bucket.items.iter())
    }

    /// Number of items across all buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.items.len()).sum()
    }

    /// Whether the category holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derived grouping of coloring items; rebuilt whenever the source changes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    categories: Vec<Category>,
    positions: HashMap<String, usize>,
}

/// Subcategory label an item is filed under
///
/// Missing and blank subcategories share the `"General"` bucket.
pub fn bucket_label(item: &ColoringItem) -> &str {
    match item.subcategory.as_deref() {
        Some(label) if !label.trim().is_empty() => label,
        _ => GENERAL_SUBCATEGORY,
    }
}

impl CategoryIndex {
    /// Group `items` into categories and subcategory buckets
    pub fn build<'a>(items: impl IntoIterator<Item = &'a ColoringItem>) -> Self {
        let mut index = Self::default();
        for item in items {
            index.insert(item.clone());
        }
        index
    }

    fn insert(&mut self, item: ColoringItem) {
        let position = if let Some(&position) = self.positions.get(&item.category) {
            position
        } else {
            let position = self.categories.len();
            self.positions.insert(item.category.clone(), position);
            self.categories.push(Category {
                name: item.category.clone(),
                buckets: Vec::new(),
            });
            position
        };

        let Some(category) = self.categories.get_mut(position) else {
            return;
        };

        let label = bucket_label(&item).to_string();
        if let Some(bucket) = category.buckets.iter_mut().find(|b| b.name == label) {
            bucket.items.push(item);
        } else {
            category.buckets.push(Bucket {
                name: label,
                items: vec![item],
            });
        }
    }

    /// Categories in first-seen order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category labels in first-seen order
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    /// Look up a category by exact label
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.positions
            .get(name)
            .and_then(|&position| self.categories.get(position))
    }

    /// Items filed under (category, subcategory), `None` if either is unknown
    pub fn bucket(&self, category: &str, subcategory: &str) -> Option<&[ColoringItem]> {
        self.category(category)
            .and_then(|c| c.bucket(subcategory))
            .map(Bucket::items)
    }

    /// Every item, category by category
    pub fn items(&self) -> impl Iterator<Item = &ColoringItem> {
        self.categories.iter().flat_map(Category::items)
    }

    /// Total number of indexed items
    pub fn len(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    /// Whether the index holds no items
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Report an empty index so callers can render an explicit empty state
    ///
    /// # Errors
    ///
    /// Returns `EmptySource` when no items were indexed
    pub fn ensure_not_empty(&self) -> Result<&Self> {
        if self.is_empty() {
            Err(PlayError::EmptySource)
        } else {
            Ok(self)
        }
    }
}
