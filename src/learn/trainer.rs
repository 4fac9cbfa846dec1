//! The trainer: buffers, features and classifier glued together
//!
//! Owns the two sample buffers and the two pluggable collaborators. The
//! tick engine records one sample per tick into staging; at round
//! boundaries staging is either committed into the training buffer (and
//! the classifier refit on the union) or discarded wholesale.

use super::classifier::Classifier;
use super::features::FeatureGenerator;
use super::sample::{Sample, SampleBuffer};
use crate::angle::Angle;
use crate::sim::Jet;

/// Collects (situation, action) samples from the player and turns them
/// into steering predictions for the red jets.
pub struct JetTrainer {
    features: Box<dyn FeatureGenerator>,
    classifier: Box<dyn Classifier>,
    /// Current round's samples, not yet confirmed worth learning from.
    staging: SampleBuffer,
    /// Confirmed samples the classifier is fit on.
    training: SampleBuffer,
}

impl JetTrainer {
    /// Both buffers share `capacity`; a round longer than that sheds its
    /// own oldest samples.
    pub fn new(
        features: Box<dyn FeatureGenerator>,
        classifier: Box<dyn Classifier>,
        capacity: usize,
    ) -> Self {
        Self {
            features,
            classifier,
            staging: SampleBuffer::new(capacity),
            training: SampleBuffer::new(capacity),
        }
    }

    /// Stage one sample: the observer's situation paired with the action
    /// label. The label is the angle's string form and parses back to it.
    pub fn record(&mut self, jets: &[Jet], observer: usize, action: Angle) {
        let features = self.features.generate(jets, observer);
        self.staging.push(Sample::new(features, action.to_string()));
    }

    /// Predict an origin-relative steering angle for one jet.
    ///
    /// Calling this before the first successful training pass is a caller
    /// bug and panics; gate on [`JetTrainer::is_trained`].
    pub fn infer(&self, jets: &[Jet], observer: usize) -> Angle {
        assert!(
            self.is_trained(),
            "inference requested before the classifier was trained"
        );
        let features = self.features.generate(jets, observer);
        let label = self.classifier.classify(&features);
        match label.parse() {
            Ok(angle) => angle,
            Err(_) => panic!("classifier produced a non-angle label {label:?}"),
        }
    }

    /// Refit the classifier on training ∪ staging, then promote the staged
    /// samples into the training buffer. Blocking; called at round end.
    pub fn train_and_commit(&mut self) {
        let dataset: Vec<Sample> = self
            .training
            .iter()
            .chain(self.staging.iter())
            .cloned()
            .collect();
        assert!(!dataset.is_empty(), "cannot train on an empty dataset");
        log::info!(
            "training classifier on {} samples ({} newly staged)",
            dataset.len(),
            self.staging.len()
        );
        self.classifier.train(&dataset);
        log::info!("training done");
        for sample in self.staging.take_all() {
            self.training.push(sample);
        }
    }

    /// Throw away the current round's staged samples.
    pub fn discard_round(&mut self) {
        self.staging.clear();
    }

    /// Whether the classifier has been trained at least once.
    pub fn is_trained(&self) -> bool {
        self.classifier.is_trained()
    }

    /// Samples staged in the current round.
    pub fn staged(&self) -> usize {
        self.staging.len()
    }

    /// Confirmed samples in the training buffer.
    pub fn confirmed(&self) -> usize {
        self.training.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learn::{KnnClassifier, NearestThreats};
    use crate::sim::{Body, Team};
    use glam::DVec2;
    use std::f64::consts::FRAC_PI_2;

    fn jets() -> Vec<Jet> {
        vec![
            Jet::new(DVec2::new(0.0, 50.0), Team::Blue, 10.0, 2.0),
            Jet::new(DVec2::new(100.0, 0.0), Team::Red, 10.0, 2.0),
        ]
    }

    fn trainer() -> JetTrainer {
        JetTrainer::new(
            Box::new(NearestThreats::default()),
            Box::new(KnnClassifier::new(1)),
            100,
        )
    }

    #[test]
    fn test_record_train_infer_round_trip() {
        let mut trainer = trainer();
        let jets = jets();
        trainer.record(&jets, 0, Angle::new(FRAC_PI_2));
        assert_eq!(trainer.staged(), 1);
        trainer.train_and_commit();
        assert_eq!(trainer.staged(), 0);
        assert_eq!(trainer.confirmed(), 1);
        // Identical situation, identical prediction
        let predicted = trainer.infer(&jets, 0);
        assert!((predicted.radians() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_sentinel_action_round_trips() {
        let mut trainer = trainer();
        let jets = jets();
        trainer.record(&jets, 0, Angle::NONE);
        trainer.train_and_commit();
        assert!(trainer.infer(&jets, 0).is_none());
    }

    #[test]
    fn test_discard_round_drops_staging_only() {
        let mut trainer = trainer();
        let jets = jets();
        trainer.record(&jets, 0, Angle::new(0.0));
        trainer.train_and_commit();
        trainer.record(&jets, 0, Angle::new(FRAC_PI_2));
        trainer.record(&jets, 1, Angle::new(FRAC_PI_2));
        trainer.discard_round();
        assert_eq!(trainer.staged(), 0);
        assert_eq!(trainer.confirmed(), 1);
        assert!(trainer.is_trained());
    }

    #[test]
    fn test_inference_sees_fresh_positions() {
        let mut trainer = trainer();
        let mut jets = jets();
        trainer.record(&jets, 0, Angle::new(0.0));
        trainer.train_and_commit();
        // Moving the observer changes the feature vector but the single
        // stored sample still decides the label
        jets[0].set_pos(DVec2::new(0.0, 80.0));
        let predicted = trainer.infer(&jets, 0);
        assert_eq!(predicted.radians(), 0.0);
    }

    #[test]
    #[should_panic(expected = "before the classifier was trained")]
    fn test_infer_before_training_panics() {
        let trainer = trainer();
        let _ = trainer.infer(&jets(), 0);
    }

    #[test]
    #[should_panic(expected = "empty dataset")]
    fn test_training_with_nothing_staged_panics() {
        let mut trainer = trainer();
        trainer.train_and_commit();
    }
}
