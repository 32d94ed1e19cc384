// Offline mock provider
//
// Echoes the start of the prompt so the whole request path can be exercised
// without credentials or network access.

/// Prefix every mock reply starts with.
pub const MOCK_MARKER: &str = "RESP_MOCK: received: ";

/// Number of prompt characters echoed back.
pub const MOCK_ECHO_CHARS: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    /// Never fails. Truncates on character boundaries, not bytes.
    pub fn generate(&self, prompt: &str) -> String {
        let echoed: String = prompt.chars().take(MOCK_ECHO_CHARS).collect();
        format!("{}{}", MOCK_MARKER, echoed)
    }
}
