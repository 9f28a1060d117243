//! Category/subcategory browsing over the coloring index
//!
//! The browser is a small state machine:
//! `NoCategorySelected → CategorySelected → SubcategorySelected`.
//! It owns its index and selection; hosts either pull the current state or
//! subscribe to be told about every effective change.

use crate::coloring::index::CategoryIndex;
use crate::content::records::ColoringItem;
use crate::io::configuration::DEFAULT_UNSELECTED_VIEW;
use crate::io::error::{PlayError, Result, not_found};

/// What `visible_items` returns before a category is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UnselectedView {
    /// Show nothing; the host prompts the user to pick a category
    #[default]
    Prompt,
    /// Show every item, category by category
    AllItems,
}

/// Current browsing position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserSelection {
    /// Chosen category, if any
    pub selected_category: Option<String>,
    /// Chosen subcategory within the category, if any
    pub selected_subcategory: Option<String>,
}

/// Named state of the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    /// Nothing chosen yet
    NoCategorySelected,
    /// A category is chosen
    CategorySelected,
    /// A category and one of its subcategories are chosen
    SubcategorySelected,
}

impl BrowserState {
    const fn name(self) -> &'static str {
        match self {
            Self::NoCategorySelected => "NoCategorySelected",
            Self::CategorySelected => "CategorySelected",
            Self::SubcategorySelected => "SubcategorySelected",
        }
    }
}

/// Handle returned by [`ColoringBrowser::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&BrowserSelection)>;

/// Browsing state for one view
pub struct ColoringBrowser {
    index: CategoryIndex,
    selection: BrowserSelection,
    unselected_view: UnselectedView,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for ColoringBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColoringBrowser")
            .field("selection", &self.selection)
            .field("unselected_view", &self.unselected_view)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl ColoringBrowser {
    /// Browser over `items` using the default unselected view
    pub fn new(items: &[ColoringItem]) -> Self {
        Self::with_view(items, DEFAULT_UNSELECTED_VIEW)
    }

    /// Browser over `items` with an explicit unselected view
    pub fn with_view(items: &[ColoringItem], unselected_view: UnselectedView) -> Self {
        Self {
            index: CategoryIndex::build(items),
            selection: BrowserSelection::default(),
            unselected_view,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Index currently browsed
    pub const fn index(&self) -> &CategoryIndex {
        &self.index
    }

    /// Current selection
    pub const fn selection(&self) -> &BrowserSelection {
        &self.selection
    }

    /// Policy for the unselected state
    pub const fn unselected_view(&self) -> UnselectedView {
        self.unselected_view
    }

    /// Named state derived from the selection
    pub fn state(&self) -> BrowserState {
        match (
            &self.selection.selected_category,
            &self.selection.selected_subcategory,
        ) {
            (None, _) => BrowserState::NoCategorySelected,
            (Some(_), None) => BrowserState::CategorySelected,
            (Some(_), Some(_)) => BrowserState::SubcategorySelected,
        }
    }

    /// Choose a category, clearing any subcategory
    ///
    /// Returns `false` without changing anything when the category has no
    /// items in the current index.
    pub fn select_category(&mut self, name: &str) -> bool {
        if self.index.category(name).is_none_or(|c| c.is_empty()) {
            return false;
        }

        self.update(BrowserSelection {
            selected_category: Some(name.to_string()),
            selected_subcategory: None,
        });
        true
    }

    /// Choose a subcategory of the selected category
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No category is selected (`InvalidTransition`)
    /// - The selected category has no such subcategory (`NotFound`)
    pub fn select_subcategory(&mut self, name: &str) -> Result<()> {
        let Some(category) = self.selection.selected_category.clone() else {
            return Err(PlayError::InvalidTransition {
                operation: "select a subcategory",
                state: self.state().name(),
            });
        };

        if self.index.bucket(&category, name).is_none() {
            return Err(not_found("subcategory", &format!("{category}/{name}")));
        }

        self.update(BrowserSelection {
            selected_category: Some(category),
            selected_subcategory: Some(name.to_string()),
        });
        Ok(())
    }

    /// Return to `NoCategorySelected`
    pub fn clear_selection(&mut self) {
        self.update(BrowserSelection::default());
    }

    /// Rebuild the index from a new source list and reset the selection
    pub fn replace_items(&mut self, items: &[ColoringItem]) {
        self.index = CategoryIndex::build(items);
        self.update(BrowserSelection::default());
    }

    /// Items the view should render for the current state
    pub fn visible_items(&self) -> Vec<&ColoringItem> {
        let selection = &self.selection;
        match (
            selection.selected_category.as_deref(),
            selection.selected_subcategory.as_deref(),
        ) {
            (None, _) => match self.unselected_view {
                UnselectedView::Prompt => Vec::new(),
                UnselectedView::AllItems => self.index.items().collect(),
            },
            (Some(category), None) => self
                .index
                .category(category)
                .map(|c| c.items().collect())
                .unwrap_or_default(),
            (Some(category), Some(subcategory)) => self
                .index
                .bucket(category, subcategory)
                .map(|items| items.iter().collect())
                .unwrap_or_default(),
        }
    }

    /// Register a callback run after every effective selection change
    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&BrowserSelection) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a callback; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    // Subscribers only hear about changes that actually happened
    fn update(&mut self, selection: BrowserSelection) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.selection);
        }
    }
}
