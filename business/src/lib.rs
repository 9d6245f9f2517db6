pub mod application {
    pub mod shopping_entry {
        pub mod add_recipe;
        pub mod clear_all;
        pub mod get_all;
        pub mod get_summary;
        pub mod remove_ingredient;
        pub mod remove_recipe;
        pub mod set_checked;
        pub mod subscribe;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod session;
        pub mod value_objects;
    }
    pub mod shopping_entry {
        pub mod checklist;
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod subscription;
        pub mod summary;
        pub mod value_objects;
        pub mod use_cases {
            pub mod add_recipe;
            pub mod clear_all;
            pub mod get_all;
            pub mod get_summary;
            pub mod remove_ingredient;
            pub mod remove_recipe;
            pub mod set_checked;
            pub mod subscribe;
        }
    }
}
