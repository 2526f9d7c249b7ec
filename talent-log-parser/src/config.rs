//! Parser configuration types
//!
//! This module defines the minimal configuration needed by the parser library.
//! Everything about loading files and rendering output is handled by the
//! application layer.

use serde::{Deserialize, Serialize};

/// User name given to a legacy log that carries no `===name===` marker
pub const DEFAULT_FALLBACK_USER_NAME: &str = "我我";

/// How the `{ ... }` fragment is located inside a payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BraceCapture {
    /// First `{` to last `}`, no nesting check
    #[default]
    Greedy,
    /// First depth-balanced object starting at the first `{`, string-aware
    Balanced,
}

/// Configuration for the parser library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Name used for legacy logs without a name marker
    #[serde(default = "default_fallback_user_name")]
    pub fallback_user_name: String,

    /// Fragment capture strategy shared by both formats
    #[serde(default)]
    pub brace_capture: BraceCapture,
}

fn default_fallback_user_name() -> String {
    DEFAULT_FALLBACK_USER_NAME.to_string()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fallback_user_name: default_fallback_user_name(),
            brace_capture: BraceCapture::default(),
        }
    }
}

impl ParserConfig {
    /// Create a new parser configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the legacy fallback user name
    pub fn with_fallback_user_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_user_name = name.into();
        self
    }

    /// Builder method: set the brace capture strategy
    pub fn with_brace_capture(mut self, capture: BraceCapture) -> Self {
        self.brace_capture = capture;
        self
    }
}
