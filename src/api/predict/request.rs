// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict API request types

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::tabular::{IrisFeatures, MAX_MEASUREMENT_CM};

/// Request body for POST /predict
///
/// # Example
/// ```json
/// {"sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4, "petal_width": 0.2}
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PredictRequest {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl PredictRequest {
    /// Check every measurement is a finite number of centimetres in
    /// `[0, 100]` and return the model input.
    pub fn validate(&self) -> Result<IrisFeatures, ApiError> {
        let features = IrisFeatures {
            sepal_length: self.sepal_length,
            sepal_width: self.sepal_width,
            petal_length: self.petal_length,
            petal_width: self.petal_width,
        };

        for (field, value) in features.named() {
            if !value.is_finite() {
                return Err(ApiError::validation(field, format!("{} must be a finite number", field)));
            }
            if !(0.0..=MAX_MEASUREMENT_CM).contains(&value) {
                return Err(ApiError::validation(
                    field,
                    format!(
                        "{} must be between 0 and {} cm, got {}",
                        field, MAX_MEASUREMENT_CM, value
                    ),
                ));
            }
        }

        Ok(features)
    }
}
