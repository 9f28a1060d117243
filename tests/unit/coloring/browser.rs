//! Tests for the coloring browser state machine and its subscriptions

#[cfg(test)]
mod tests {
    use playcorner::PlayError;
    use playcorner::coloring::browser::{
        BrowserSelection, BrowserState, ColoringBrowser, UnselectedView,
    };
    use playcorner::content::records::ColoringItem;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_items() -> Vec<ColoringItem> {
        vec![
            ColoringItem::new("cat", "Cat", "Animals", Some("Cats")),
            ColoringItem::new("dog", "Dog", "Animals", Some("Dogs")),
            ColoringItem::new("kitten", "Kitten", "Animals", Some("Cats")),
            ColoringItem::new("truck", "Truck", "Cars", None),
        ]
    }

    fn ids(items: &[&ColoringItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    // Tests the initial state shows nothing under the prompt policy
    // Verified by defaulting the unselected view to AllItems
    #[test]
    fn test_initial_state_prompts() {
        let browser = ColoringBrowser::new(&sample_items());
        assert_eq!(browser.state(), BrowserState::NoCategorySelected);
        assert_eq!(browser.unselected_view(), UnselectedView::Prompt);
        assert!(browser.visible_items().is_empty());
    }

    // Tests the AllItems policy flattens every category
    // Verified by ignoring the policy in visible_items
    #[test]
    fn test_all_items_policy() {
        let browser = ColoringBrowser::with_view(&sample_items(), UnselectedView::AllItems);
        assert_eq!(
            ids(&browser.visible_items()),
            vec!["cat", "kitten", "dog", "truck"]
        );
    }

    // Tests selecting a category shows all its subcategories
    // Verified by returning only the first bucket
    #[test]
    fn test_select_category_shows_whole_category() {
        let mut browser = ColoringBrowser::new(&sample_items());
        assert!(browser.select_category("Animals"));
        assert_eq!(browser.state(), BrowserState::CategorySelected);
        assert_eq!(ids(&browser.visible_items()), vec!["cat", "kitten", "dog"]);
    }

    // Tests selecting a subcategory narrows to one bucket
    // Verified by leaving the selection at category level
    #[test]
    fn test_select_subcategory_narrows() {
        let mut browser = ColoringBrowser::new(&sample_items());
        browser.select_category("Animals");
        assert!(browser.select_subcategory("Cats").is_ok());
        assert_eq!(browser.state(), BrowserState::SubcategorySelected);
        assert_eq!(ids(&browser.visible_items()), vec!["cat", "kitten"]);

        // Switching subcategory is allowed from SubcategorySelected
        assert!(browser.select_subcategory("Dogs").is_ok());
        assert_eq!(ids(&browser.visible_items()), vec!["dog"]);
    }

    // Tests unknown categories are a silent no-op
    // Verified by clearing the selection before the lookup
    #[test]
    fn test_unknown_category_is_noop() {
        let mut browser = ColoringBrowser::new(&sample_items());
        browser.select_category("Animals");
        browser.select_subcategory("Dogs").ok();

        assert!(!browser.select_category("Dinosaurs"));
        assert_eq!(browser.state(), BrowserState::SubcategorySelected);
        assert_eq!(
            browser.selection().selected_subcategory.as_deref(),
            Some("Dogs")
        );
    }

    // Tests reselecting a category clears the subcategory
    // Verified by keeping the previous subcategory
    #[test]
    fn test_select_category_clears_subcategory() {
        let mut browser = ColoringBrowser::new(&sample_items());
        browser.select_category("Animals");
        browser.select_subcategory("Cats").ok();
        assert!(browser.select_category("Cars"));
        assert_eq!(browser.selection().selected_subcategory, None);
        assert_eq!(ids(&browser.visible_items()), vec!["truck"]);
    }

    // Tests subcategory selection without a category is an invalid transition
    // Verified by treating a missing category as NotFound
    #[test]
    fn test_subcategory_without_category() {
        let mut browser = ColoringBrowser::new(&sample_items());
        let result = browser.select_subcategory("Cats");
        assert!(matches!(
            result,
            Err(PlayError::InvalidTransition {
                state: "NoCategorySelected",
                ..
            })
        ));
    }

    // Tests subcategories are looked up under the selected category only
    // Verified by searching every category for the label
    #[test]
    fn test_subcategory_from_other_category_not_found() {
        let mut browser = ColoringBrowser::new(&sample_items());
        browser.select_category("Cars");
        let result = browser.select_subcategory("Cats");
        assert!(result.is_err_and(|e| e.is_not_found()));
        assert_eq!(browser.state(), BrowserState::CategorySelected);
    }

    // Tests clearing returns to the initial state
    // Verified by clearing only the subcategory
    #[test]
    fn test_clear_selection() {
        let mut browser = ColoringBrowser::new(&sample_items());
        browser.select_category("Animals");
        browser.select_subcategory("Cats").ok();
        browser.clear_selection();
        assert_eq!(browser.state(), BrowserState::NoCategorySelected);
        assert_eq!(browser.selection(), &BrowserSelection::default());
    }

    // Tests replacing the items resets the selection and index
    // Verified by keeping the old selection after replace
    #[test]
    fn test_replace_items_resets_selection() {
        let mut browser = ColoringBrowser::new(&sample_items());
        browser.select_category("Animals");

        browser.replace_items(&[ColoringItem::new("boat", "Boat", "Boats", None)]);
        assert_eq!(browser.state(), BrowserState::NoCategorySelected);
        assert!(!browser.select_category("Animals"));
        assert!(browser.select_category("Boats"));
    }

    // Tests subscribers hear effective changes only and can unsubscribe
    // Verified by notifying on every update call
    #[test]
    fn test_subscriptions() {
        let mut browser = ColoringBrowser::new(&sample_items());
        let seen: Rc<RefCell<Vec<BrowserSelection>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = browser.subscribe(move |selection| sink.borrow_mut().push(selection.clone()));

        browser.select_category("Animals");
        browser.select_category("Animals");
        browser.select_category("Nope");
        browser.select_subcategory("Cats").ok();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(
            seen.borrow()
                .last()
                .and_then(|s| s.selected_subcategory.clone()),
            Some("Cats".to_string())
        );

        assert!(browser.unsubscribe(id));
        assert!(!browser.unsubscribe(id));
        browser.clear_selection();
        assert_eq!(seen.borrow().len(), 2);
    }
}
