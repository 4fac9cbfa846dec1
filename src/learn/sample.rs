//! Samples and the bounded sample buffer

use std::collections::VecDeque;

/// One observation/action pair: a fixed-length feature vector and the
/// action label the player chose in that situation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    features: Vec<f64>,
    label: String,
}

impl Sample {
    pub fn new(features: Vec<f64>, label: impl Into<String>) -> Self {
        Self {
            features,
            label: label.into(),
        }
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A bounded FIFO of samples.
///
/// The first sample fixes the feature length for the buffer's lifetime
/// (until [`SampleBuffer::clear`]); pushing a mismatched sample is a
/// caller bug and panics. Once full, the oldest sample is evicted for each
/// new one. The tail can also be retracted ([`SampleBuffer::remove_newest`])
/// to take back speculative samples.
#[derive(Debug)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    feature_len: Option<usize>,
    capacity: usize,
}

impl SampleBuffer {
    /// Create an empty buffer. Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "sample buffer capacity must be non-zero");
        Self {
            samples: VecDeque::with_capacity(capacity.min(1024)),
            feature_len: None,
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one if the buffer is full.
    pub fn push(&mut self, sample: Sample) {
        let len = sample.features().len();
        let expected = *self.feature_len.get_or_insert(len);
        assert_eq!(
            len, expected,
            "inconsistent feature length: sample has {len}, buffer holds {expected}"
        );
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Discard up to `n` of the most recently added samples.
    pub fn remove_newest(&mut self, n: usize) {
        for _ in 0..n {
            if self.samples.pop_back().is_none() {
                break;
            }
        }
    }

    /// Empty the buffer and release the feature-length constraint.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.feature_len = None;
    }

    /// Drain all samples out of the buffer, oldest first, leaving it as if
    /// freshly created.
    pub fn take_all(&mut self) -> VecDeque<Sample> {
        self.feature_len = None;
        std::mem::take(&mut self.samples)
    }

    /// Stored samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Feature length shared by every stored sample, once fixed.
    pub fn feature_len(&self) -> Option<usize> {
        self.feature_len
    }
}
