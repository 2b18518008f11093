use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Worker thread count; values below 1 are coerced to 1.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Expected total job count. Used only for driver progress accounting,
    /// never for correctness.
    #[serde(default)]
    pub expected_jobs: usize,
}

fn default_threads() -> usize {
    1
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            expected_jobs: 0,
        }
    }
}
