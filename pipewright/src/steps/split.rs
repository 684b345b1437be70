//! Train/test dataset splitting.

use super::{Step, StepConfig, StepInputs, StepOutputs};
use crate::artifacts::{ArtifactCatalog, DatasetArtifact};
use crate::contracts::OutputContract;
use crate::errors::{ConfigError, PipewrightError, StepError};
use serde::{Deserialize, Serialize};

/// Configuration for [`TrainTestSplitStep`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Fraction of blocks allocated to the training partition.
    pub ratio: f64,

    /// Number of contiguous blocks the dataset is carved into.
    pub split_count: usize,

    /// Optional seed; rotates the block order deterministically.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            ratio: 0.7,
            split_count: 10,
            seed: None,
        }
    }
}

impl StepConfig for SplitConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let mut error = ConfigError::new();
        if !(self.ratio > 0.0 && self.ratio < 1.0) {
            error = error.with_issue("ratio", format!("must be in (0, 1), got {}", self.ratio));
        }
        if self.split_count < 2 {
            error = error.with_issue(
                "split_count",
                format!("must be at least 2, got {}", self.split_count),
            );
        }
        if error.is_empty() {
            Ok(())
        } else {
            Err(error)
        }
    }
}

/// Splits a dataset into train and test partitions.
///
/// The input dataset is carved into `split_count` contiguous blocks. The
/// training partition takes `round(ratio * split_count)` blocks, clamped so
/// both partitions get at least one block; the seed, when set, rotates the
/// block order before allocation so repeated runs with the same seed carve
/// identically.
#[derive(Debug)]
pub struct TrainTestSplitStep {
    name: String,
    config: SplitConfig,
    contract: OutputContract,
}

impl TrainTestSplitStep {
    /// The default step name.
    pub const NAME: &'static str = "train_test_split";
    /// The input name the dataset is read from.
    pub const INPUT: &'static str = "dataset";
    /// The output name of the training partition.
    pub const TRAIN: &'static str = "train";
    /// The output name of the test partition.
    pub const TEST: &'static str = "test";

    /// Creates a split step from a configuration.
    ///
    /// The contract `{train: dataset, test: dataset}` is declared here,
    /// once, against the catalog.
    ///
    /// # Errors
    /// Returns the per-field issues when the configuration is invalid, or a
    /// contract error when the catalog lacks the `dataset` tag.
    pub fn new(config: SplitConfig, catalog: &ArtifactCatalog) -> Result<Self, PipewrightError> {
        config.validate().map_err(|e| e.with_step(Self::NAME))?;
        let contract = OutputContract::declare(
            [(Self::TRAIN, "dataset"), (Self::TEST, "dataset")],
            catalog,
        )?;
        Ok(Self {
            name: Self::NAME.to_string(),
            config,
            contract,
        })
    }

    /// Overrides the step name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the configuration the step was built with.
    #[must_use]
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }
}

impl Step for TrainTestSplitStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn output_contract(&self) -> &OutputContract {
        &self.contract
    }

    fn process(&self, inputs: &StepInputs) -> Result<StepOutputs, StepError> {
        let dataset = inputs
            .downcast_ref::<DatasetArtifact>(Self::INPUT)
            .ok_or_else(|| {
                StepError::execution(
                    self.name.as_str(),
                    format!("missing '{}' input of type dataset", Self::INPUT),
                )
            })?;

        if dataset.len() < self.config.split_count {
            return Err(StepError::execution(
                self.name.as_str(),
                format!(
                    "dataset has {} rows, fewer than split_count {}",
                    dataset.len(),
                    self.config.split_count
                ),
            ));
        }

        let (train_rows, test_rows) = split_rows(&dataset.rows, &self.config);

        let train = DatasetArtifact::new(train_rows)
            .with_metadata("split", serde_json::json!("train"))
            .with_metadata("source_dataset", serde_json::json!(dataset.id));
        let test = DatasetArtifact::new(test_rows)
            .with_metadata("split", serde_json::json!("test"))
            .with_metadata("source_dataset", serde_json::json!(dataset.id));

        Ok(StepOutputs::new()
            .with_artifact(Self::TRAIN, train)
            .with_artifact(Self::TEST, test))
    }
}

fn split_rows(
    rows: &[serde_json::Value],
    config: &SplitConfig,
) -> (Vec<serde_json::Value>, Vec<serde_json::Value>) {
    let split_count = config.split_count;

    // Contiguous blocks; the remainder spreads over the leading blocks.
    let base = rows.len() / split_count;
    let remainder = rows.len() % split_count;
    let mut blocks: Vec<Vec<serde_json::Value>> = Vec::with_capacity(split_count);
    let mut cursor = 0;
    for index in 0..split_count {
        let size = base + usize::from(index < remainder);
        blocks.push(rows[cursor..cursor + size].to_vec());
        cursor += size;
    }

    if let Some(seed) = config.seed {
        let rotation = usize::try_from(seed % split_count as u64).unwrap_or(0);
        blocks.rotate_left(rotation);
    }

    let train_blocks = train_block_count(config.ratio, split_count);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for (index, block) in blocks.into_iter().enumerate() {
        if index < train_blocks {
            train.extend(block);
        } else {
            test.extend(block);
        }
    }
    (train, test)
}

// Both partitions must end up non-empty, so the rounded allocation is
// clamped to [1, split_count - 1].
fn train_block_count(ratio: f64, split_count: usize) -> usize {
    let rounded = (ratio * split_count as f64).round() as usize;
    rounded.clamp(1, split_count - 1)
}
