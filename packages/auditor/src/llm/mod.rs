mod client;
pub mod prompt;

pub use client::{AnthropicClient, LlmClient, LlmRequest, LlmResponse, Message, Role};
#[cfg(any(test, feature = "test-utils"))]
pub use client::test_support::MockLlmClient;
