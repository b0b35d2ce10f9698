// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Iris species classification from four flower measurements

pub mod onnx_classifier;

pub use onnx_classifier::OnnxTabularClassifier;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Class names in label order
pub const IRIS_SPECIES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Upper bound accepted for any measurement, in centimetres
pub const MAX_MEASUREMENT_CM: f64 = 100.0;

/// The four iris measurements, in the order the model was trained on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrisFeatures {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl IrisFeatures {
    /// Feature vector in training column order
    pub fn to_array(&self) -> [f32; 4] {
        [
            self.sepal_length as f32,
            self.sepal_width as f32,
            self.petal_length as f32,
            self.petal_width as f32,
        ]
    }

    /// Named fields, for validation messages
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("sepal_length", self.sepal_length),
            ("sepal_width", self.sepal_width),
            ("petal_length", self.petal_length),
            ("petal_width", self.petal_width),
        ]
    }
}

/// Species name for a class index, if it is one of the known labels
pub fn species_name(class_id: i64) -> Option<&'static str> {
    usize::try_from(class_id)
        .ok()
        .and_then(|i| IRIS_SPECIES.get(i).copied())
}

/// A trained model mapping measurements to a class index
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TabularClassifier: Send + Sync {
    /// Predict the class index for one sample
    async fn predict(&self, features: IrisFeatures) -> Result<i64>;

    fn model_name(&self) -> &str;
}
