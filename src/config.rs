use core::num::NonZeroUsize;

use num_traits::Float;

use crate::{Classification, ExtremaError, ExtremumDetector, ExtremumSink, Result};

/// Construction parameters for an [`ExtremumDetector`]
///
/// Hosts typically load this from their own configuration (enable the `serde` feature)
/// and hand it a sink. The default half-window radius is `1`, giving a three tick window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Half-window radius, the window holds `2 * threshold + 1` ticks
    pub threshold: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { threshold: 1 }
    }
}

impl DetectorConfig {
    /// Creates a config with the given half-window radius
    pub const fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Checks the threshold, returning it as non-zero
    ///
    /// # Returns
    ///
    /// * `Result<NonZeroUsize>` - The threshold, or [`ExtremaError::InvalidThreshold`]
    pub fn validate(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.threshold).ok_or(ExtremaError::InvalidThreshold)
    }

    /// Number of ticks the detector window holds, `2 * threshold + 1`
    ///
    /// # Returns
    ///
    /// * `Result<usize>` - The window size, or [`ExtremaError::InvalidThreshold`] if the
    ///   threshold is zero or the window size overflows `usize`
    pub fn window_size(&self) -> Result<usize> {
        self.validate()?
            .get()
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .ok_or(ExtremaError::InvalidThreshold)
    }

    /// Builds a detector delivering classifications to `sink`
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_extrema::{Classification, DetectorConfig};
    /// let mut kinds = vec![];
    /// let mut detector = DetectorConfig::default()
    ///     .build(|c: Classification<f64>| kinds.push(c.kind.as_str()))
    ///     .unwrap();
    ///
    /// detector.process_tick(10.0, 0);
    /// detector.process_tick(11.0, 1);
    /// drop(detector);
    ///
    /// assert_eq!(kinds, ["maxima"]);
    /// ```
    pub fn build<T, S>(&self, sink: S) -> Result<ExtremumDetector<T, S>>
    where
        T: Float + Default,
        S: ExtremumSink<T>,
    {
        ExtremumDetector::new(self.threshold, Some(sink))
    }

    /// Builds a detector with no sink; classifications are only returned to the caller
    pub fn build_detached<T>(&self) -> Result<ExtremumDetector<T, fn(Classification<T>)>>
    where
        T: Float + Default,
    {
        ExtremumDetector::detached(self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_is_one() {
        let config = DetectorConfig::default();
        assert_eq!(config.threshold, 1);
        assert_eq!(config.window_size(), Ok(3));
        assert_eq!(config.validate().map(NonZeroUsize::get), Ok(1));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = DetectorConfig::new(0);
        assert_eq!(config.validate(), Err(ExtremaError::InvalidThreshold));
        assert_eq!(config.window_size(), Err(ExtremaError::InvalidThreshold));
        assert!(config.build_detached::<f64>().is_err());
    }

    #[test]
    fn test_window_size_overflow_rejected() {
        let largest = DetectorConfig::new(usize::MAX / 2);
        assert_eq!(largest.window_size(), Ok(usize::MAX));

        let config = DetectorConfig::new(usize::MAX / 2 + 1);
        assert!(config.validate().is_ok());
        assert_eq!(config.window_size(), Err(ExtremaError::InvalidThreshold));
        assert_eq!(
            config.build_detached::<f64>().err(),
            Some(ExtremaError::InvalidThreshold)
        );
    }

    #[test]
    fn test_build_detached() {
        let detector = DetectorConfig::new(4).build_detached::<f64>().unwrap();
        assert_eq!(detector.threshold(), 4);
        assert_eq!(detector.window_size(), 9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_with_default() {
        let config: DetectorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DetectorConfig::default());

        let config: DetectorConfig = serde_json::from_str(r#"{"threshold":5}"#).unwrap();
        assert_eq!(config.threshold, 5);
    }
}
