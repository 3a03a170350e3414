//! Google Gemini analysis provider.

pub mod client;
pub mod prompt;

pub use client::GeminiProvider;
pub use prompt::{build_prompt, extract_json_text};
