pub mod engine;
pub mod llm;
pub mod recorder;

pub use engine::{ConversationEngine, FALLBACK_REPLY};
pub use llm::{LlmClient, LlmError, OpenAiChatClient};
pub use recorder::{OrderOutcome, OrderRecorder, UNKNOWN_PRODUCT};
