pub mod converter;
pub mod settings;
