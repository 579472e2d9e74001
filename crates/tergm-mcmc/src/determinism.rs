use tergm_core::derive_substream_seed;

/// Derives the deterministic seed used for a specific replicate run.
pub fn replicate_seed(master_seed: u64, replicate: usize) -> u64 {
    derive_substream_seed(master_seed, replicate as u64)
}
