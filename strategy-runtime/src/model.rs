//! Parsing and validation of raw AI output into [`StrategyFromAi`].

use serde_json::Value;
use sha3::{Digest, Keccak256};

use crate::error::StrategyError;
use crate::types::StrategyFromAi;

/// Hard ceiling on steps per strategy, matching the model prompt.
pub const MAX_STEPS: usize = 10;

impl StrategyFromAi {
    /// Structural checks beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.name.is_empty() {
            return Err(StrategyError::ValidationFailed(
                "strategy name cannot be empty".into(),
            ));
        }
        if self.description.is_empty() {
            return Err(StrategyError::ValidationFailed(
                "strategy description cannot be empty".into(),
            ));
        }
        if self.summary.is_empty() {
            return Err(StrategyError::ValidationFailed(
                "strategy summary cannot be empty".into(),
            ));
        }
        if self.steps.is_empty() {
            return Err(StrategyError::ValidationFailed(
                "strategy must have at least one step".into(),
            ));
        }
        if self.steps.len() > MAX_STEPS {
            return Err(StrategyError::ValidationFailed(format!(
                "strategy has {} steps, maximum is {MAX_STEPS}",
                self.steps.len()
            )));
        }
        Ok(())
    }

    /// Keccak-256 fingerprint over the fields that determine the encoded
    /// output: name, input token, and the ordered step outputs. Used as an
    /// idempotency key for drafts and chat threading.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Keccak256::new();
        hasher.update(self.name.as_bytes());
        hasher.update(self.input_token.as_str().as_bytes());
        for step in &self.steps {
            hasher.update(step.output_token.as_str().as_bytes());
        }
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

/// Parse raw model output into a validated strategy.
///
/// Models occasionally wrap the object in markdown fences or omit the
/// nullable step keys; one normalization pass fills those with null before
/// the retry. Anything still malformed after that is a validation failure.
pub fn parse_strategy_json(raw: &str) -> Result<StrategyFromAi, StrategyError> {
    let json_str = extract_json(raw);
    let value: Value = serde_json::from_str(json_str)
        .map_err(|e| StrategyError::ValidationFailed(format!("not a JSON object: {e}")))?;

    let strategy = match serde_json::from_value::<StrategyFromAi>(value.clone()) {
        Ok(s) => s,
        Err(first_err) => {
            let normalized = normalize_steps(value);
            serde_json::from_value(normalized)
                .map_err(|_| StrategyError::ValidationFailed(first_err.to_string()))?
        }
    };

    strategy.validate()?;
    Ok(strategy)
}

/// Fill missing nullable step keys with null so a strict re-parse can
/// succeed on responses from models that drop them.
fn normalize_steps(mut value: Value) -> Value {
    if let Some(steps) = value.get_mut("steps").and_then(|s| s.as_array_mut()) {
        for step in steps {
            if let Some(obj) = step.as_object_mut() {
                obj.entry("marketToken").or_insert(Value::Null);
                obj.entry("label").or_insert(Value::Null);
            }
        }
    }
    value
}

/// Extract a JSON object from a string that may contain markdown fences.
pub fn extract_json(s: &str) -> &str {
    if let Some(start) = s.find("```json") {
        let after = &s[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }
    if let Some(start) = s.find("```") {
        let after = &s[start + 3..];
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }
    if let Some(start) = s.find('{') {
        if let Some(end) = s.rfind('}') {
            return &s[start..=end];
        }
    }
    s.trim()
}
