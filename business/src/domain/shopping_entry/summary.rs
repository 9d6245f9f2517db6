use super::model::ShoppingEntry;
use super::value_objects::RecipeId;

/// One ingredient string as it appears across the whole shopping scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedIngredient {
    pub name: String,
    /// Entries listing this ingredient, in snapshot order.
    pub recipe_ids: Vec<RecipeId>,
    /// True only when every owning entry has it checked.
    pub checked: bool,
}

/// Cross-recipe view of a shopping scope. Entries keep their own lists; this
/// is display-only deduplication by exact string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingSummary {
    pub recipe_count: usize,
    pub ingredients: Vec<AggregatedIngredient>,
}

impl ShoppingSummary {
    pub fn from_entries(entries: &[ShoppingEntry]) -> Self {
        let mut ingredients: Vec<AggregatedIngredient> = Vec::new();

        for entry in entries {
            for name in entry.ingredients() {
                let checked = entry.checklist.is_checked(name);
                match ingredients.iter_mut().find(|i| &i.name == name) {
                    Some(existing) => {
                        if !existing.recipe_ids.contains(&entry.recipe_id) {
                            existing.recipe_ids.push(entry.recipe_id.clone());
                        }
                        existing.checked &= checked;
                    }
                    None => ingredients.push(AggregatedIngredient {
                        name: name.clone(),
                        recipe_ids: vec![entry.recipe_id.clone()],
                        checked,
                    }),
                }
            }
        }

        Self {
            recipe_count: entries.len(),
            ingredients,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.ingredients.iter().filter(|i| !i.checked).count()
    }
}
