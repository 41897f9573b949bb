// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a key-value backend. The record store swallows these
/// after logging them; they never reach form or render callers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },
    #[error("could not encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected user input. The `Display` text is the alert shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Fill in description and amount.")]
    MissingDescriptionOrAmount,
    #[error("Fill in title and target amount.")]
    MissingTitleOrTarget,
    #[error("Fill in the amount.")]
    MissingAmount,
    #[error("Amount must not be negative.")]
    NegativeAmount,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Could not identify the item.")]
    MissingId,
}
