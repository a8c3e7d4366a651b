//! Seeded random number generation.
//!
//! Every randomized operation in the crate takes an explicit `&mut R: Rng`.
//! The runner builds one [`StdRng`] per run from [`Nsga2Config::seed`](crate::nsga2::Nsga2Config::seed),
//! so a fixed seed reproduces a run exactly when evaluation is sequential.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_moea::random::create_rng;
///
/// let a: u64 = create_rng(42).random();
/// let b: u64 = create_rng(42).random();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
