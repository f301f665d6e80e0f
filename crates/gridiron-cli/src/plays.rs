//! Choosing which plays to draw.

use std::collections::{BTreeMap, BTreeSet};

use gridiron_scene::tracking::TrackingSample;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Pick up to `count` play keys at random from `candidates`, skipping any in
/// `exclude`. The same seed always yields the same plays, in sorted order.
pub fn sample_plays(
    candidates: &BTreeSet<String>,
    exclude: &BTreeSet<String>,
    count: usize,
    seed: u64,
) -> Vec<String> {
    let pool: Vec<&String> = candidates.difference(exclude).collect();
    if count > pool.len() {
        tracing::warn!(
            requested = count,
            available = pool.len(),
            "fewer candidate plays than requested, drawing all"
        );
    }

    let mut rng = Pcg64::seed_from_u64(seed);
    let mut chosen: Vec<String> = pool
        .choose_multiple(&mut rng, count)
        .map(|key| (*key).clone())
        .collect();
    chosen.sort_unstable();
    chosen
}

/// Samples for `key`, or an empty slice if the play is absent.
pub fn samples_for<'p, 's>(
    plays: &'p BTreeMap<&str, Vec<&'s TrackingSample>>,
    key: &str,
) -> &'p [&'s TrackingSample] {
    match plays.get(key) {
        Some(samples) => samples.as_slice(),
        None => {
            tracing::warn!(play = key, "no tracking samples for play");
            &[]
        }
    }
}
