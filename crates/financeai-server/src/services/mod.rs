//! Business logic services

pub mod content;
pub mod gemini;
pub mod market;
#[cfg(test)]
pub mod stub;

pub use content::ContentService;
pub use gemini::GeminiClient;
