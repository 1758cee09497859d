//! Coin flipping with unbiased variables.

use quench_ir::{EnergyModel, SampleResult};

/// Default number of coins per read.
pub const DEFAULT_COINS: u32 = 50;

/// Most coins flipped in one read.
pub const MAX_COINS: u32 = 2000;

/// Reads per experiment.
pub const TRIALS: u32 = 5000;

/// Widest histogram bar.
pub const BAR_WIDTH: usize = 60;

/// `n` variables with zero bias and no couplings: every state has energy 0.
pub fn coin_model(n: u32) -> EnergyModel {
    let mut model = EnergyModel::new();
    for i in 0..n {
        model.add_variable(&format!("coin{i}"));
    }
    model
}

/// Occurrences per number of heads, indexed `0..=n`.
pub fn heads_histogram<'a, I>(samples: I, n: u32) -> Vec<u64>
where
    I: IntoIterator<Item = &'a SampleResult>,
{
    let mut counts = vec![0_u64; n as usize + 1];
    for sample in samples {
        let heads = sample.assignment.count_ones().min(n as usize);
        counts[heads] += sample.occurrences;
    }
    counts
}

/// One line per bucket: the head count followed by `x`s scaled so the
/// fullest bucket spans [`BAR_WIDTH`] columns.
pub fn histogram_lines(counts: &[u64]) -> Vec<String> {
    let max = counts.iter().copied().max().unwrap_or(0);
    counts
        .iter()
        .enumerate()
        .map(|(heads, &count)| {
            let width = if max == 0 {
                0
            } else {
                (BAR_WIDTH as f64 * count as f64 / max as f64).round() as usize
            };
            format!("{heads} {}", "x".repeat(width)).trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quench_ir::Assignment;

    #[test]
    fn test_coin_model_is_flat() {
        let model = coin_model(3);
        assert_eq!(model.num_variables(), 3);
        assert_eq!(model.energy_of_bits(&[true, false, true]), 0.0);
    }

    #[test]
    fn test_histogram() {
        let samples = [
            SampleResult::new(Assignment::new().with("coin0", 1).with("coin1", 1), 0.0, 3),
            SampleResult::new(Assignment::new().with("coin0", 0).with("coin1", 1), 0.0, 6),
            SampleResult::new(Assignment::new().with("coin0", 1).with("coin1", 0), 0.0, 6),
        ];
        let counts = heads_histogram(&samples, 2);
        assert_eq!(counts, vec![0, 12, 3]);
        assert_eq!(
            histogram_lines(&counts),
            vec![
                "0".to_string(),
                format!("1 {}", "x".repeat(60)),
                format!("2 {}", "x".repeat(15)),
            ]
        );
    }
}
