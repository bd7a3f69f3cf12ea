//! Sea-ORM entities for reviews and search history.

pub mod site_review;
pub mod society_review;
pub mod user_search;
