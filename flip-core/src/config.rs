use serde::{Deserialize, Serialize};

/// What a knight's landing does to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnightRule {
    /// Flip the destination square, like every other piece.
    #[default]
    ToggleLanding,
    /// Leave the board untouched.
    NoToggle,
}

/// Tunables for a play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub knight_rule: KnightRule,
}

impl EngineConfig {
    pub fn with_knight_rule(mut self, rule: KnightRule) -> Self {
        self.knight_rule = rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.knight_rule, KnightRule::ToggleLanding);
        let cfg: EngineConfig = serde_json::from_str(r#"{"knight_rule":"no_toggle"}"#).unwrap();
        assert_eq!(cfg, EngineConfig::default().with_knight_rule(KnightRule::NoToggle));
    }
}
