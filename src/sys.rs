// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time types that work on both native and wasm targets.
//!
//! `std::time::Instant` panics on `wasm32-unknown-unknown`, so the elapsed-time stamp in each
//! record uses `web_time` there.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
