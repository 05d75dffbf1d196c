use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DEPTH: usize = 512;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// How deeply evaluation may nest before it gives up. Every node and every
    /// function call counts one level
    pub max_depth: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl EvaluationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let source = std::fs::read(path)?;
        Ok(serde_json::from_slice(&source)?)
    }
}
