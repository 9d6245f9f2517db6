use std::collections::{BTreeMap, BTreeSet};

use super::errors::ShoppingEntryError;

/// Ordered ingredient list of one entry plus the set of ingredients ticked off.
///
/// Every checked name is always present in `ingredients`; a name that is not
/// in `checked` is unchecked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    ingredients: Vec<String>,
    checked: BTreeSet<String>,
}

impl Checklist {
    pub fn new(ingredients: Vec<String>) -> Self {
        Self {
            ingredients,
            checked: BTreeSet::new(),
        }
    }

    /// Rebuilds a checklist from stored parts, dropping checked names that
    /// no longer appear in the list.
    pub fn from_parts(ingredients: Vec<String>, checked: impl IntoIterator<Item = String>) -> Self {
        let checked = checked
            .into_iter()
            .filter(|name| ingredients.contains(name))
            .collect();
        Self {
            ingredients,
            checked,
        }
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn checked(&self) -> impl Iterator<Item = &str> {
        self.checked.iter().map(String::as_str)
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.ingredients.iter().any(|i| i == ingredient)
    }

    pub fn is_checked(&self, ingredient: &str) -> bool {
        self.checked.contains(ingredient)
    }

    pub fn set_checked(&mut self, ingredient: &str, checked: bool) -> Result<(), ShoppingEntryError> {
        if !self.contains(ingredient) {
            return Err(ShoppingEntryError::IngredientNotFound);
        }
        if checked {
            self.checked.insert(ingredient.to_string());
        } else {
            self.checked.remove(ingredient);
        }
        Ok(())
    }

    /// Removes every occurrence of `ingredient` together with its checked
    /// state. Returns whether anything was removed.
    pub fn remove(&mut self, ingredient: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i != ingredient);
        self.checked.remove(ingredient);
        before != self.ingredients.len()
    }

    /// Replaces the ingredient list, keeping the checked state of names
    /// that survive the replacement.
    pub fn reconcile(&mut self, ingredients: Vec<String>) {
        self.checked.retain(|name| ingredients.contains(name));
        self.ingredients = ingredients;
    }

    /// `ingredient -> checked` view with one key per distinct ingredient.
    pub fn check_map(&self) -> BTreeMap<String, bool> {
        self.ingredients
            .iter()
            .map(|name| (name.clone(), self.checked.contains(name)))
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.check_map().values().filter(|checked| !**checked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pasta() -> Checklist {
        Checklist::new(vec!["Pasta".to_string(), "Salt".to_string()])
    }

    #[test]
    fn should_start_unchecked() {
        let checklist = pasta();

        assert!(!checklist.is_checked("Pasta"));
        assert!(!checklist.is_checked("Salt"));
        assert_eq!(checklist.checked().count(), 0);
    }

    #[test]
    fn should_toggle_in_both_directions() {
        let mut checklist = pasta();

        checklist.set_checked("Salt", true).unwrap();
        assert!(checklist.is_checked("Salt"));

        checklist.set_checked("Salt", false).unwrap();
        assert!(!checklist.is_checked("Salt"));
    }

    #[test]
    fn should_reject_checking_unknown_ingredient() {
        let mut checklist = pasta();

        let result = checklist.set_checked("Pepper", true);

        assert!(matches!(result, Err(ShoppingEntryError::IngredientNotFound)));
        assert_eq!(checklist.checked().count(), 0);
    }

    #[test]
    fn should_remove_all_occurrences_and_check_state() {
        let mut checklist = Checklist::new(vec![
            "Salt".to_string(),
            "Pasta".to_string(),
            "Salt".to_string(),
        ]);
        checklist.set_checked("Salt", true).unwrap();

        assert!(checklist.remove("Salt"));

        assert_eq!(checklist.ingredients(), ["Pasta".to_string()]);
        assert!(!checklist.is_checked("Salt"));
    }

    #[test]
    fn should_report_no_removal_for_missing_ingredient() {
        let mut checklist = pasta();

        assert!(!checklist.remove("Pepper"));
        assert_eq!(checklist.ingredients().len(), 2);
    }

    #[test]
    fn should_keep_surviving_checks_on_reconcile() {
        let mut checklist = pasta();
        checklist.set_checked("Pasta", true).unwrap();
        checklist.set_checked("Salt", true).unwrap();

        checklist.reconcile(vec!["Pasta".to_string(), "Basil".to_string()]);

        assert!(checklist.is_checked("Pasta"));
        assert!(!checklist.is_checked("Salt"));
        assert_eq!(checklist.checked().collect::<Vec<_>>(), vec!["Pasta"]);
    }

    #[test]
    fn should_drop_orphans_when_rebuilt_from_parts() {
        let checklist = Checklist::from_parts(
            vec!["Pasta".to_string()],
            vec!["Pasta".to_string(), "Ghost".to_string()],
        );

        assert_eq!(checklist.checked().collect::<Vec<_>>(), vec!["Pasta"]);
    }

    #[test]
    fn should_render_check_map_with_every_ingredient() {
        let mut checklist = pasta();
        checklist.set_checked("Salt", true).unwrap();

        let map = checklist.check_map();

        assert_eq!(map.get("Pasta"), Some(&false));
        assert_eq!(map.get("Salt"), Some(&true));
        assert_eq!(checklist.pending(), 1);
    }

    fn ingredient_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-e]{1,2}", 2..8)
    }

    proptest! {
        #[test]
        fn toggling_one_ingredient_leaves_others_untouched(
            ingredients in ingredient_list(),
            seed in prop::collection::vec(any::<bool>(), 8),
            target in 0usize..8,
            checked in any::<bool>(),
        ) {
            let mut checklist = Checklist::new(ingredients.clone());
            for (name, on) in ingredients.iter().zip(seed.iter()) {
                checklist.set_checked(name, *on).unwrap();
            }
            let target = &ingredients[target % ingredients.len()];
            let before = checklist.clone();

            checklist.set_checked(target, checked).unwrap();

            prop_assert_eq!(checklist.ingredients(), before.ingredients());
            prop_assert_eq!(checklist.is_checked(target), checked);
            for name in ingredients.iter().filter(|n| *n != target) {
                prop_assert_eq!(checklist.is_checked(name), before.is_checked(name));
            }
        }

        #[test]
        fn removing_an_ingredient_leaves_no_orphan(
            ingredients in ingredient_list(),
            target in 0usize..8,
        ) {
            let mut checklist = Checklist::new(ingredients.clone());
            for name in &ingredients {
                checklist.set_checked(name, true).unwrap();
            }
            let target = ingredients[target % ingredients.len()].clone();

            checklist.remove(&target);

            prop_assert!(!checklist.contains(&target));
            prop_assert!(!checklist.is_checked(&target));
            prop_assert!(checklist.checked().all(|name| checklist.contains(name)));
        }
    }
}
