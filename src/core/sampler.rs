use rand::Rng;

/// Returns a uniformly random permutation of `ids` using Fisher–Yates.
///
/// Walks `i` from the last index down to 1 and swaps it with a uniformly
/// chosen index in `[0, i]`, so each of the N! orders is equally likely.
pub fn shuffle_ids<R: Rng + ?Sized>(ids: &[String], rng: &mut R) -> Vec<String> {
    let mut shuffled = ids.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
