//! Benchmark profiles and utilities for Satchel inventories.
//!
//! - [`size_profile`]: deterministic item extents from a seed
//! - [`profile_items`]: the same extents wrapped as [`BenchItem`] handles
//! - [`backpack_profile`] / [`stash_profile`]: empty inventories of the
//!   two reference sizes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use satchel_core::{ConfigError, Extent, ItemRef};
use satchel_engine::{Inventory, InventoryConfig};

/// Payload used by every benchmark: a shared handle to an extent.
pub type BenchItem = ItemRef<Extent>;

/// Build an empty 10x10 inventory (100 cells).
pub fn backpack_profile() -> Result<Inventory<BenchItem>, ConfigError> {
    bench_inventory(10, 10)
}

/// Build an empty 64x64 inventory (~4K cells) for stress runs.
pub fn stash_profile() -> Result<Inventory<BenchItem>, ConfigError> {
    bench_inventory(64, 64)
}

/// Build an empty inventory whose sizes come straight from the payload.
pub fn bench_inventory(width: u32, height: u32) -> Result<Inventory<BenchItem>, ConfigError> {
    Inventory::new(InventoryConfig::new(width, height), |item: &BenchItem| {
        **item
    })
}

/// Generate `n` deterministic extents with sides in `1..=max_side`.
///
/// Uses a fixed LCG stream seeded by `seed`; the same arguments always
/// produce the same sequence.
pub fn size_profile(n: usize, max_side: i32, seed: u64) -> Vec<Extent> {
    let side = max_side.max(1) as u64;
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % side) as i32 + 1
    };
    (0..n)
        .map(|_| {
            let w = next();
            let h = next();
            Extent::new(w, h)
        })
        .collect()
}

/// [`size_profile`] wrapped into fresh payload handles.
pub fn profile_items(n: usize, max_side: i32, seed: u64) -> Vec<BenchItem> {
    size_profile(n, max_side, seed)
        .into_iter()
        .map(ItemRef::new)
        .collect()
}
