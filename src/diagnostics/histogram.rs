//! Predicted-probability bins and a chi-square goodness-of-fit statistic.
//!
//! A bin covering predicted probabilities `[lower, upper]` expects a share of
//! positives equal to its midpoint. Comparing observed and expected class
//! counts across bins measures how well the predictions are calibrated.

use crate::core::error::{Result, SanityError};
use serde::{Deserialize, Serialize};

/// Observed class counts for one predicted-probability interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityBin {
    lower: f64,
    upper: f64,
    observed_positive: u64,
    observed_negative: u64,
}

impl ProbabilityBin {
    /// Empty bin over `[lower, upper]`, with `0 <= lower < upper <= 1`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        crate::ensure!(
            lower >= 0.0 && upper <= 1.0 && lower < upper,
            SanityError::invalid_parameter(
                "probability_bin",
                format!("[{}, {}]", lower, upper),
                "bounds must satisfy 0 <= lower < upper <= 1",
            )
        );
        Ok(ProbabilityBin {
            lower,
            upper,
            observed_positive: 0,
            observed_negative: 0,
        })
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Probability the bin is assumed to predict.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Observed positives.
    pub fn observed_positive(&self) -> u64 {
        self.observed_positive
    }

    /// Observed negatives.
    pub fn observed_negative(&self) -> u64 {
        self.observed_negative
    }

    /// Total observations.
    pub fn total(&self) -> u64 {
        self.observed_positive + self.observed_negative
    }

    /// Count one observation.
    pub fn record(&mut self, positive: bool) {
        if positive {
            self.observed_positive += 1;
        } else {
            self.observed_negative += 1;
        }
    }

    /// Expected `(positive, negative)` counts among `num_samples` draws.
    ///
    /// Positives are the midpoint times the sample count, rounded half away
    /// from zero; negatives are the remainder.
    pub fn expected_counts(&self, num_samples: u64) -> (u64, u64) {
        let positive = (self.midpoint() * num_samples as f64).round() as u64;
        let positive = positive.min(num_samples);
        (positive, num_samples - positive)
    }

    /// Chi-square contribution of this bin; zero expectations contribute zero.
    pub fn chi_square(&self) -> f64 {
        let (expected_positive, expected_negative) = self.expected_counts(self.total());
        term(self.observed_positive, expected_positive) + term(self.observed_negative, expected_negative)
    }
}

fn term(observed: u64, expected: u64) -> f64 {
    if expected == 0 {
        return 0.0;
    }
    let diff = observed as f64 - expected as f64;
    diff * diff / expected as f64
}

/// Predicted probabilities bucketed into contiguous bins.
///
/// A histogram always holds at least one bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HistogramBins")]
pub struct ProbabilityHistogram {
    bins: Vec<ProbabilityBin>,
}

#[derive(Deserialize)]
struct HistogramBins {
    bins: Vec<ProbabilityBin>,
}

impl TryFrom<HistogramBins> for ProbabilityHistogram {
    type Error = SanityError;

    fn try_from(raw: HistogramBins) -> Result<Self> {
        crate::ensure!(
            !raw.bins.is_empty(),
            SanityError::invalid_parameter("bins", "[]", "must hold at least one bin")
        );
        Ok(ProbabilityHistogram { bins: raw.bins })
    }
}

impl ProbabilityHistogram {
    /// `num_bins` equal-width bins covering `[0, 1]`.
    pub fn uniform(num_bins: usize) -> Result<Self> {
        if num_bins == 0 {
            return Err(SanityError::invalid_parameter(
                "num_bins",
                "0",
                "must be at least 1",
            ));
        }
        let width = 1.0 / num_bins as f64;
        let bins = (0..num_bins)
            .map(|i| {
                let upper = if i + 1 == num_bins { 1.0 } else { (i + 1) as f64 * width };
                ProbabilityBin::new(i as f64 * width, upper)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ProbabilityHistogram { bins })
    }

    /// Bucket `(probability, is_positive)` pairs into `num_bins` uniform bins.
    pub fn from_scores<I>(num_bins: usize, scores: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, bool)>,
    {
        let mut histogram = Self::uniform(num_bins)?;
        for (probability, positive) in scores {
            histogram.observe(probability, positive)?;
        }
        Ok(histogram)
    }

    /// Count one scored example. The last bin includes 1.0.
    pub fn observe(&mut self, probability: f64, positive: bool) -> Result<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(SanityError::invalid_parameter(
                "probability",
                probability.to_string(),
                "must be in range [0.0, 1.0]",
            ));
        }
        let last = self.bins.len() - 1;
        let index = ((probability * self.bins.len() as f64) as usize).min(last);
        self.bins[index].record(positive);
        Ok(())
    }

    /// Bins in increasing probability order.
    pub fn bins(&self) -> &[ProbabilityBin] {
        &self.bins
    }

    /// Total observations across bins.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(ProbabilityBin::total).sum()
    }

    /// Chi-square statistic summed over both classes of every bin.
    pub fn chi_square(&self) -> f64 {
        self.bins.iter().map(ProbabilityBin::chi_square).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_expected_counts() {
        let bin = ProbabilityBin::new(0.0, 0.5).unwrap();
        assert_eq!(bin.expected_counts(1000), (250, 750));
        assert_eq!(bin.expected_counts(0), (0, 0));

        let bin = ProbabilityBin::new(0.9, 1.0).unwrap();
        assert_eq!(bin.expected_counts(10), (10, 0));
    }

    #[test]
    fn test_invalid_bins() {
        assert!(ProbabilityBin::new(0.5, 0.5).is_err());
        assert!(ProbabilityBin::new(-0.1, 0.5).is_err());
        assert!(ProbabilityBin::new(0.2, 1.1).is_err());
        assert!(ProbabilityBin::new(f64::NAN, 0.5).is_err());
        assert!(ProbabilityHistogram::uniform(0).is_err());
    }

    #[test]
    fn test_uniform_bins_cover_unit_interval() {
        let histogram = ProbabilityHistogram::uniform(3).unwrap();
        assert_eq!(histogram.bins().len(), 3);
        assert_abs_diff_eq!(histogram.bins()[0].lower(), 0.0);
        assert_abs_diff_eq!(histogram.bins()[1].upper(), 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(histogram.bins()[2].upper(), 1.0);
    }

    #[test]
    fn test_observe_buckets() {
        let mut histogram = ProbabilityHistogram::uniform(4).unwrap();
        histogram.observe(0.0, false).unwrap();
        histogram.observe(0.3, true).unwrap();
        histogram.observe(1.0, true).unwrap();
        assert!(histogram.observe(1.01, true).is_err());
        assert!(histogram.observe(f64::NAN, true).is_err());

        let totals: Vec<u64> = histogram.bins().iter().map(ProbabilityBin::total).collect();
        assert_eq!(totals, vec![1, 1, 0, 1]);
        assert_eq!(histogram.bins()[3].observed_positive(), 1);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_deserialize_requires_bins() {
        assert!(serde_json::from_str::<ProbabilityHistogram>(r#"{"bins": []}"#).is_err());

        let histogram = ProbabilityHistogram::from_scores(2, [(0.1, true), (0.9, false)]).unwrap();
        let json = serde_json::to_string(&histogram).unwrap();
        let mut restored: ProbabilityHistogram = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, histogram);
        restored.observe(1.0, true).unwrap();
        assert_eq!(restored.total(), 3);
    }

    #[test]
    fn test_chi_square_calibrated_is_zero() {
        // Bin [0, 0.5] expects 25% positives, bin [0.5, 1] expects 75%.
        let scores = (0..100)
            .map(|i| (0.25, i < 25))
            .chain((0..100).map(|i| (0.75, i < 75)));
        let histogram = ProbabilityHistogram::from_scores(2, scores).unwrap();
        assert_abs_diff_eq!(histogram.chi_square(), 0.0);
    }

    #[test]
    fn test_chi_square_miscalibrated() {
        let histogram =
            ProbabilityHistogram::from_scores(1, (0..100).map(|i| (0.5, i < 60))).unwrap();
        // Expected 50/50: (60-50)^2/50 + (40-50)^2/50 = 4
        assert_abs_diff_eq!(histogram.chi_square(), 4.0, epsilon = 1e-12);
    }
}
