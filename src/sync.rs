// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 rds-encoder contributors

//! [`SyncRdsEncoder`]: a shared, lock-protected wrapper around
//! [`RdsEncoder`].
//!
//! `spec.md` §5 leaves the concurrency discipline as an implementor choice:
//! serialize every setter/pull through a single mutex, or make fields
//! individually atomic with double-buffering. This crate keeps
//! [`RdsEncoder`] itself a plain, unsynchronized aggregate (so it stays
//! trivially unit-testable) and offers this wrapper for the common case of
//! one control thread and one bit-pull thread sharing an encoder.

use parking_lot::Mutex;

use crate::encoder::{InitParams, RdsEncoder};

/// A [`RdsEncoder`] behind a `parking_lot` mutex, safe to share between the
/// control thread (setters) and the bit-pull thread (`next_bits`).
pub struct SyncRdsEncoder {
    inner: Mutex<RdsEncoder>,
}

impl SyncRdsEncoder {
    /// Build a shared encoder.
    #[must_use]
    pub fn new(params: InitParams<'_>) -> Self {
        Self {
            inner: Mutex::new(RdsEncoder::new(params)),
        }
    }

    /// Pull the next 104-bit group, blocking briefly on the shared lock.
    pub fn next_bits(&self, out: &mut [u8; 104]) {
        self.inner.lock().next_bits(out);
    }

    /// Run a setter (or any other mutation) against the shared encoder
    /// under the lock. Prefer this over exposing the lock guard directly,
    /// so callers can't hold it across an unrelated blocking operation.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut RdsEncoder) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> InitParams<'static> {
        InitParams {
            pi: 0xF00F,
            ps: "TEST",
            rt: "",
            pty: 0,
            ptyn: "",
            tp: false,
            af: &[],
            call_sign: None,
            ert: "",
        }
    }

    #[test]
    fn next_bits_produces_104_valid_bits() {
        let encoder = SyncRdsEncoder::new(params());
        let mut bits = [0u8; 104];
        encoder.next_bits(&mut bits);
        assert!(bits.iter().all(|&b| b == 0 || b == 1));
    }

    #[test]
    fn with_mut_allows_setter_access() {
        let encoder = SyncRdsEncoder::new(params());
        encoder.with_mut(|enc| enc.set_ps("HELLO"));
        let mut bits = [0u8; 104];
        encoder.next_bits(&mut bits);
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncRdsEncoder>();
    }
}
