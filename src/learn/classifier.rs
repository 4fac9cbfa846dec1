//! The trainable model behind the bots
//!
//! The engine only ever talks to [`Classifier`]; which learning algorithm
//! sits behind it is a construction-time choice. The crate ships a small
//! deterministic k-nearest-neighbor model as the default.

use std::cmp::Ordering;

use super::sample::Sample;

/// An opaque trainable, predictive model.
///
/// `train` consumes the full dataset and may be expensive; the engine
/// calls it synchronously at round boundaries. `classify` is only valid
/// after at least one successful `train` — calling it earlier is a caller
/// bug and panics. Labels are opaque strings chosen by whoever built the
/// dataset; implementations must echo them back verbatim.
pub trait Classifier {
    /// Fit the model to `samples`. Panics on an empty dataset.
    fn train(&mut self, samples: &[Sample]);

    /// Predict a label for a feature vector.
    fn classify(&self, features: &[f64]) -> &str;

    /// Whether `train` has completed at least once.
    fn is_trained(&self) -> bool;
}

/// Squared-distance contribution of a feature slot observed on one side
/// but not the other. Large enough to dominate angle features so samples
/// with matching threat counts cluster together.
const MISSING_PENALTY: f64 = 100.0;

/// Distance-weighted k-nearest-neighbor classifier.
///
/// Training just retains the dataset; classification votes among the `k`
/// nearest stored samples, weighting each by inverse distance. The metric
/// understands the NaN "not observed" convention of the feature pipeline:
/// a slot missing on both sides contributes nothing, a slot missing on one
/// side contributes a fixed penalty.
#[derive(Debug)]
pub struct KnnClassifier {
    k: usize,
    dataset: Vec<Sample>,
    trained: bool,
}

impl KnnClassifier {
    /// Model with the given neighborhood size. Panics if `k` is zero.
    pub fn new(k: usize) -> Self {
        assert!(k > 0, "k-NN needs at least one neighbor");
        Self {
            k,
            dataset: Vec::new(),
            trained: false,
        }
    }
}

impl Default for KnnClassifier {
    /// Five-neighbor model.
    fn default() -> Self {
        Self::new(5)
    }
}

/// NaN-aware Euclidean distance between two feature vectors.
fn feature_distance(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b) {
        sum += match (x.is_nan(), y.is_nan()) {
            (true, true) => 0.0,
            (false, false) => (x - y) * (x - y),
            _ => MISSING_PENALTY * MISSING_PENALTY,
        };
    }
    sum.sqrt()
}

impl Classifier for KnnClassifier {
    fn train(&mut self, samples: &[Sample]) {
        assert!(!samples.is_empty(), "training requires at least one sample");
        self.dataset = samples.to_vec();
        self.trained = true;
    }

    fn classify(&self, features: &[f64]) -> &str {
        assert!(self.trained, "classify called before the model was trained");

        let mut neighbors: Vec<(f64, &Sample)> = self
            .dataset
            .iter()
            .map(|s| (feature_distance(s.features(), features), s))
            .collect();
        neighbors.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        // Inverse-distance-weighted vote over the neighborhood
        let mut votes: Vec<(&str, f64)> = Vec::new();
        for &(distance, sample) in neighbors.iter().take(self.k) {
            let weight = 1.0 / (distance + 1e-9);
            match votes.iter_mut().find(|(label, _)| *label == sample.label()) {
                Some((_, total)) => *total += weight,
                None => votes.push((sample.label(), weight)),
            }
        }

        let mut best_label = "";
        let mut best_weight = f64::NEG_INFINITY;
        for (label, weight) in votes {
            if weight > best_weight {
                best_weight = weight;
                best_label = label;
            }
        }
        best_label
    }

    fn is_trained(&self) -> bool {
        self.trained
    }
}
