pub mod db;
pub mod memory {
    pub mod repository;
}
pub mod shopping_entry {
    pub mod entity;
    pub mod repository;
}
