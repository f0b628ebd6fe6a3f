pub mod admin;
pub mod app;
pub mod claims;
pub mod env;
pub mod jwt;
