pub mod error;
pub mod export;
pub mod logger;
pub mod validation;
