pub mod caching;
pub mod frankfurter;
