// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Compute-once-under-lock primitive
//!
//! Schema discovery, table discovery and delegate attach all follow the same
//! double-checked idiom: test the one-way "loaded" state without locking, and
//! only on a miss take a dedicated lock, test again and run the population
//! closure. The value is published as the last step, so a failed pass leaves
//! the scope unloaded and the next caller retries it.

use parking_lot::Mutex;
use std::fmt;
use std::sync::OnceLock;

pub struct LoadOnce<T> {
    value: OnceLock<T>,
    load_lock: Mutex<()>,
}

impl<T> LoadOnce<T> {
    pub fn new() -> Self {
        Self {
            value: OnceLock::new(),
            load_lock: Mutex::new(()),
        }
    }

    /// Loaded value, if the one-time population already succeeded
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.value.get().is_some()
    }

    /// Return the loaded value, running `load` at most once across all threads.
    ///
    /// Errors from `load` are returned to the caller that ran it and nothing is
    /// published.
    pub fn get_or_try_load<E, F>(&self, load: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        let _guard = self.load_lock.lock();
        if let Some(value) = self.value.get() {
            return Ok(value);
        }
        let loaded = load()?;
        // Unset while we hold the lock, so this stores `loaded`.
        Ok(self.value.get_or_init(|| loaded))
    }
}

impl<T> Default for LoadOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LoadOnce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOnce").field("value", &self.value.get()).finish()
    }
}
