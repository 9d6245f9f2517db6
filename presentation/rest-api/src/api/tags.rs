use poem_openapi::Tags;

#[derive(Debug, Tags)]
pub enum ApiTags {
    Health,
    /// Recipes in the signed-in user's shopping list and their checklists
    ShoppingRecipes,
}
