pub mod import_service;
pub mod models;
pub mod processing;
