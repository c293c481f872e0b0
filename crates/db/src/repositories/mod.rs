//! PostgreSQL repositories.

pub mod cat_repo;

pub use cat_repo::CatRepo;
