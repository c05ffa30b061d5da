//! Keyword rules that classify free-text input.
//!
//! Rules are checked in priority order and the first rule with a trigger
//! keyword contained in the lower-cased input wins.

use regex::Regex;
use std::sync::LazyLock;

/// Canned-reply categories recognized by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Help,
    Time,
    Weather,
    Calculation,
}

/// Matches the calculation keywords, longest first.
static CALCULATION_KEYWORDS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)calculate|calcula").ok());

impl Intent {
    /// All intents in priority order.
    pub const PRIORITY: [Intent; 5] = [
        Intent::Greeting,
        Intent::Help,
        Intent::Time,
        Intent::Weather,
        Intent::Calculation,
    ];

    /// Trigger keywords, lower-case.
    pub fn triggers(&self) -> &'static [&'static str] {
        match self {
            Self::Greeting => &["hola", "hello"],
            Self::Help => &["ayuda", "help"],
            Self::Time => &["hora", "time"],
            Self::Weather => &["clima", "weather"],
            Self::Calculation => &["calculate", "calcula"],
        }
    }

    /// Classify `text`, returning `None` when no trigger matches.
    pub fn classify(text: &str) -> Option<Intent> {
        let lowered = text.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|intent| intent.triggers().iter().any(|t| lowered.contains(t)))
    }
}

/// Remove every calculation keyword from `text` (case-insensitively) and
/// trim what remains.
pub fn strip_calculation_keywords(text: &str) -> String {
    match CALCULATION_KEYWORDS.as_ref() {
        Some(re) => re.replace_all(text, "").trim().to_string(),
        None => text.trim().to_string(),
    }
}
