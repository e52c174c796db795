use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Deterministic per-run RNG derived from a master seed and a run id,
/// decorrelated with a splitmix64 fold so parallel runs never share a
/// stream.
pub fn stream_rng(master: u64, run_id: usize) -> ChaCha20Rng {
    let mut x = master ^ ((run_id as u64).wrapping_mul(0x9E3779B97F4A7C15));
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^= x >> 31;
    ChaCha20Rng::seed_from_u64(x)
}
