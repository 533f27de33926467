//! Assistant trait — the abstraction over the hosted language model.
//!
//! The fallback assistant answers free-text questions about the space using a
//! fixed instructional preamble. It is stateless: one external call per
//! inbound message, no conversation memory across calls.

use async_trait::async_trait;

use crate::error::AssistantError;

/// The core Assistant trait.
///
/// Implementations: an OpenAI-compatible chat-completions client, mocks in
/// tests. Failures are returned as errors; the router maps them to a fixed
/// apology, so implementations never fabricate replies.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// A human-readable name for this assistant (e.g., "groq").
    fn name(&self) -> &str;

    /// Generate a reply for one free-text message.
    async fn generate_reply(
        &self,
        user_text: &str,
    ) -> std::result::Result<String, AssistantError>;
}
