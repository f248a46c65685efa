use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use itertools::Itertools;

/// Check that `sampler` only returns values from `expected`, and returns each of them about equally often.
pub fn test_sampler_uniform<T: Eq + Hash + Debug + Copy>(expected: &[T], mut sampler: impl FnMut() -> Option<T>) {
    // expected is not a HashSet so failures are reported in a reasonable order
    assert!(
        expected.iter().all_unique(),
        "Got duplicate value in expected: {:?}",
        expected
    );

    if expected.is_empty() {
        for _ in 0..100 {
            assert_eq!(None, sampler());
        }
        return;
    }

    let samples_per_value = 1000;
    let total_samples = samples_per_value * expected.len();

    let mut all_counts: HashMap<T, u64> = expected.iter().map(|&value| (value, 0)).collect();
    for _ in 0..total_samples {
        let sample = sampler().expect("There are expected values, so sampler must return one");

        match all_counts.get_mut(&sample) {
            None => panic!("Non-expected value {:?} was sampled", sample),
            Some(count) => *count += 1,
        }
    }

    // check basic correctness first so worse errors are reported first
    for value in expected {
        assert!(all_counts[value] > 0, "Never sampled expected value {:?}", value);
    }

    for value in expected {
        let count = all_counts[value];
        let relative = count as f32 / samples_per_value as f32;

        assert!(
            (0.8..1.2).contains(&relative),
            "Value {:?} was over/under sampled {} ~ {}",
            value,
            count,
            relative,
        );
    }
}
