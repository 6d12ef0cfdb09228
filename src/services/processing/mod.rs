pub mod color;
pub mod errors;
pub mod extractor;
pub mod layout;
pub mod legend;
pub mod name_match;
pub mod palette;
pub mod reconciler;
pub mod workbook;
