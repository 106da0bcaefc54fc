// SPDX-FileCopyrightText: 2026 Tollgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atomic hot-reload handle for the live configuration.
//!
//! The configuration is replaced wholesale on every change notification.
//! Readers take an `Arc` snapshot at the start of a routing decision and hold
//! it end-to-end, so a decision in progress sees either the old or the new
//! config in full, never a mix of fields.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::model::TollgateConfig;

/// Shared handle to the current configuration.
pub struct ConfigHandle {
    inner: ArcSwap<TollgateConfig>,
}

impl ConfigHandle {
    /// Create a handle owning the initial configuration.
    pub fn new(config: TollgateConfig) -> Self {
        Self {
            inner: ArcSwap::from_pointee(config),
        }
    }

    /// Take a consistent snapshot of the current configuration.
    pub fn snapshot(&self) -> Arc<TollgateConfig> {
        self.inner.load_full()
    }

    /// Replace the configuration wholesale. In-flight snapshots are unaffected.
    pub fn replace(&self, config: TollgateConfig) {
        self.inner.store(Arc::new(config));
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::new(TollgateConfig::default())
    }
}
