// Teaching prompt construction
//
// Free-form level strings from callers are normalised against a fixed
// vocabulary; anything unrecognised falls back to the gentlest option.

use std::fmt;

/// Audience sophistication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplanationLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExplanationLevel {
    /// Lenient parse: case-insensitive, unknown values become `Beginner`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ExplanationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much depth the answer should have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    High,
    #[default]
    Low,
}

impl DetailLevel {
    /// Lenient parse: case-insensitive, unknown or missing values become `Low`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_lowercase()).as_deref() {
            Some("high") => Self::High,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }

    /// Clause inserted into the prompt.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::High => "with in-depth explanations and examples",
            Self::Low => "with concise explanations",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render the instruction sent verbatim to the provider.
pub fn build_teaching_prompt(topic: &str, level: ExplanationLevel, detail: DetailLevel) -> String {
    format!(
        "You are an experienced teacher. Teach the topic '{topic}' to a {level} level student, {directive}. \
         Be clear, use practical examples and explain the concepts step by step. \
         Answer in a didactic and friendly way, without many emotes or figures.",
        topic = topic,
        level = level,
        directive = detail.directive(),
    )
}
