//! Fisher-Yates shuffle over an injected RNG.

use rand::Rng;

/// Returns a uniformly random permutation of `items`.
///
/// The input slice is left untouched; the result is a fresh copy.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, rng);
    out
}

/// Permutes `items` in place, drawing `j` from `[0, i]` for `i = n-1..1`.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::shuffled;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn output_is_permutation_and_input_is_untouched() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = (0..50).collect::<Vec<u32>>();
        let output = shuffled(&input, &mut rng);

        assert_eq!(input, (0..50).collect::<Vec<u32>>());
        let mut sorted = output.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn empty_and_single_inputs_are_returned_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: Vec<&str> = Vec::new();
        assert!(shuffled(&empty, &mut rng).is_empty());
        assert_eq!(shuffled(&["only"], &mut rng), vec!["only"]);
    }

    #[test]
    fn duplicates_survive_as_a_multiset() {
        let mut rng = StdRng::seed_from_u64(99);
        let input = vec!["a", "b", "a", "c", "a"];
        let mut output = shuffled(&input, &mut rng);
        output.sort_unstable();
        assert_eq!(output, vec!["a", "a", "a", "b", "c"]);
    }

    #[test]
    fn permutations_of_three_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let input = ['a', 'b', 'c'];
        let trials = 6_000;
        let mut counts: HashMap<Vec<char>, u32> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(shuffled(&input, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6, "every permutation should appear");
        for (perm, count) in counts {
            assert!(
                (850..=1150).contains(&count),
                "permutation {perm:?} drawn {count} times"
            );
        }
    }
}
