// src/extractors/mod.rs
pub mod pdf;

pub use pdf::PdfExtractor;
