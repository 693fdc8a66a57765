//! Shared fixtures for unit tests.

use crate::dataset::Dataset;

pub fn sample_dataset() -> Dataset {
    crate::sample::sample_dataset().unwrap()
}
