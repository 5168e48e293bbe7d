//! Image classifier port: decides whether a camera frame depicts a cat.

use catpoint_domain::error::CatpointError;
use catpoint_domain::image::Image;

/// Vision backend consulted by the security service.
pub trait ImageClassifier {
    /// Whether `image` shows a cat with at least `confidence_threshold`
    /// percent confidence (`0.0..=100.0`).
    ///
    /// # Errors
    ///
    /// Returns a classification error when the backend cannot judge the image.
    fn contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, CatpointError>;
}

impl<T: ImageClassifier + ?Sized> ImageClassifier for std::sync::Arc<T> {
    fn contains_cat(
        &self,
        image: &Image,
        confidence_threshold: f32,
    ) -> Result<bool, CatpointError> {
        (**self).contains_cat(image, confidence_threshold)
    }
}
