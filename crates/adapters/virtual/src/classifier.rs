//! Fake image classifier: no vision model, just a stable hash of the frame.

use catpoint_app::ports::ImageClassifier;
use catpoint_domain::error::{CatpointError, ClassificationError};
use catpoint_domain::image::Image;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Classifier that "sees" a cat whenever the frame's pseudo-confidence
/// reaches the threshold.
///
/// The confidence is an FNV-1a hash of the dimensions and pixels reduced to
/// `0..100`, so the same frame always gets the same verdict.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeImageClassifier;

impl FakeImageClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Pseudo-confidence in `0.0..100.0` that `image` shows a cat.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn confidence(&self, image: &Image) -> f32 {
        let dims = image
            .width()
            .to_le_bytes()
            .into_iter()
            .chain(image.height().to_le_bytes());
        let mut hash = FNV_OFFSET;
        for byte in dims.chain(image.pixels().iter().copied()) {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        // Always below 100, so the cast is exact.
        (hash % 100) as f32
    }
}

impl ImageClassifier for FakeImageClassifier {
    fn contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, CatpointError> {
        if !(0.0..=100.0).contains(&confidence_threshold) {
            return Err(ClassificationError::InvalidThreshold(confidence_threshold).into());
        }
        let confidence = self.confidence(image);
        tracing::debug!(confidence, confidence_threshold, "fake classification");
        Ok(confidence >= confidence_threshold)
    }
}
