// src/db/mod.rs

pub mod catalog_repo;
pub mod client_repo;
pub mod revenue_repo;
pub mod social_repo;
pub mod talent_repo;
pub mod taxonomy_repo;
pub mod user_repo;

pub use catalog_repo::CatalogRepository;
pub use client_repo::ClientRepository;
pub use revenue_repo::RevenueRepository;
pub use social_repo::SocialRepository;
pub use talent_repo::TalentRepository;
pub use taxonomy_repo::TaxonomyRepository;
pub use user_repo::UserRepository;
