pub mod analytics;
pub mod clock;
pub mod errors;
pub mod filters;
pub mod pagination;
pub mod services;
