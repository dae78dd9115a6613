//! Keeps the head lock and the tail lock of the [`Queue`] on distinct cache lines.
//!
//! A producer only ever takes the tail lock and a consumer mostly takes the head lock.
//! If both locks shared a cache line, every acquisition on one side would invalidate
//! the line held by the other side's core and the split locking would buy little.
//!
//! # Size and alignment
//!
//! Cache lines are assumed to be N bytes long, depending on the architecture:
//!
//! - On x86_64 and aarch64, N = 128 (adjacent line prefetching pulls lines in pairs).
//! - On all others, N = 64.
//!
//! The size of `CachePad<T>` is the smallest multiple of N bytes large enough to hold `T`.
//!
//! [`Queue`]: crate::queue::Queue

use std::ops::Deref;

/// Pads and aligns a value to the length of a cache line.
#[cfg_attr(any(target_arch = "x86_64", target_arch = "aarch64"), repr(align(128)))]
#[cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64")),
    repr(align(64))
)]
pub(crate) struct CachePad<T>(T);

impl<T> CachePad<T> {
    pub(crate) fn new(value: T) -> CachePad<T> {
        CachePad(value)
    }
}

impl<T> Deref for CachePad<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}
