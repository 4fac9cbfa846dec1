//! Online imitation-learning pipeline
//!
//! Every tick the player's situation and chosen steering action are
//! captured as a [`Sample`] in a staging buffer. At round boundaries the
//! round's samples are either committed and the classifier retrained (the
//! player cleared the field) or discarded (the player was shot down, so
//! the round taught nothing worth copying). Trained classifiers then steer
//! the red jets.

pub mod classifier;
pub mod features;
pub mod sample;
pub mod trainer;

pub use classifier::{Classifier, KnnClassifier};
pub use features::{FeatureGenerator, NearestThreats};
pub use sample::{Sample, SampleBuffer};
pub use trainer::JetTrainer;
