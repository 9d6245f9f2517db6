pub mod error;
pub mod health;
pub mod security;
pub mod shopping_recipe;
pub mod tags;
