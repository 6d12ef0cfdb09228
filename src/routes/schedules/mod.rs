pub mod excel_upload;
pub mod models;
pub mod views;
