//! External collaborators: the analysis provider, heartbeat slot and trade echo.

pub mod analysis;
pub mod gemini;
pub mod heartbeat;
pub mod trade;

pub use analysis::{AnalysisProvider, ProviderError};
pub use gemini::GeminiProvider;
pub use heartbeat::HeartbeatStore;
