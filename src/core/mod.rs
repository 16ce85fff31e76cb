pub mod engine;
pub mod filter;
pub mod locale;
pub mod page;
pub mod publications;
pub mod rate_limit;
pub mod types;
