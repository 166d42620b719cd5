//! Request types for the web API.

use serde::Deserialize;
use strategies::Difficulty;

/// Request to start a new game. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct NewGameRequest {
    /// AI strength; the configured default when absent
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Who moves first: "human" (default) or "ai"
    #[serde(default = "default_first")]
    pub first: String,
}

fn default_first() -> String {
    "human".to_string()
}

impl NewGameRequest {
    /// Whether the AI takes X and moves first.
    pub fn ai_first(&self) -> bool {
        self.first.eq_ignore_ascii_case("ai")
    }
}

/// Request to place the human's mark.
///
/// Coordinates are signed so a negative value reaches the handler and gets
/// the same 400 as any other out-of-range coordinate.
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    /// Global row, 0-8
    pub row: i64,
    /// Global column, 0-8
    pub col: i64,
}

impl MoveRequest {
    /// Coordinates as indices, or `None` if either is negative.
    pub fn indices(&self) -> Option<(usize, usize)> {
        Some((usize::try_from(self.row).ok()?, usize::try_from(self.col).ok()?))
    }
}
