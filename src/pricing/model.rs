use std::path::Path;

use log::info;
use nalgebra::SVector;
use serde::Deserialize;

use crate::{
    error::ModelError,
    models::home::{FEATURE_COUNT, FEATURE_ORDER},
};

type FeatureVector = SVector<f64, FEATURE_COUNT>;

/// A fitted predictor mapping the model features to an estimated `medv`.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64;
}

#[derive(Debug, Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct PipelineArtifact {
    features: Vec<String>,
    scaler: Option<ScalerArtifact>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Standard scaler followed by ordinary linear regression.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPipeline {
    mean: FeatureVector,
    scale: FeatureVector,
    coefficients: FeatureVector,
    intercept: f64,
}

impl LinearPipeline {
    pub fn new(
        mean: [f64; FEATURE_COUNT],
        scale: [f64; FEATURE_COUNT],
        coefficients: [f64; FEATURE_COUNT],
        intercept: f64,
    ) -> Result<Self, ModelError> {
        let all_finite = mean
            .iter()
            .chain(scale.iter())
            .chain(coefficients.iter())
            .chain(std::iter::once(&intercept))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError::Invalid("non-finite parameter".to_string()));
        }
        if scale.iter().any(|s| *s == 0.0) {
            return Err(ModelError::Invalid("zero scale".to_string()));
        }

        Ok(LinearPipeline {
            mean: FeatureVector::from(mean),
            scale: FeatureVector::from(scale),
            coefficients: FeatureVector::from(coefficients),
            intercept,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let pipeline = Self::from_json(&bytes)?;
        info!("Loaded model artifact from {}", path.display());
        Ok(pipeline)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: PipelineArtifact = serde_json::from_slice(bytes)?;

        if artifact.features != FEATURE_ORDER {
            return Err(ModelError::Invalid(format!(
                "expected features {:?}, found {:?}",
                FEATURE_ORDER, artifact.features
            )));
        }

        let (mean, scale) = match artifact.scaler {
            Some(scaler) => (
                fixed_len("scaler.mean", scaler.mean)?,
                fixed_len("scaler.scale", scaler.scale)?,
            ),
            None => ([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]),
        };
        let coefficients = fixed_len("coefficients", artifact.coefficients)?;

        Self::new(mean, scale, coefficients, artifact.intercept)
    }
}

impl Regressor for LinearPipeline {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let x = FeatureVector::from(*features);
        let scaled = (x - self.mean).component_div(&self.scale);
        self.intercept + self.coefficients.dot(&scaled)
    }
}

fn fixed_len(name: &str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT], ModelError> {
    let len = values.len();
    values
        .try_into()
        .map_err(|_| ModelError::Invalid(format!("{name} has {len} values, expected {FEATURE_COUNT}")))
}
