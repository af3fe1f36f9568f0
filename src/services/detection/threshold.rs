// Decision threshold
// Users configure a percentage (0-100); the engine compares against a fraction (0-1).

use crate::services::config_store::ConfigError;

pub const DEFAULT_THRESHOLD_PERCENT: f64 = 70.0;

/// Fraction in [0, 1]; a combined score at or above it is flagged as AI-generated
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct DetectionThreshold(f64);

impl Default for DetectionThreshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD_PERCENT / 100.0)
    }
}

impl DetectionThreshold {
    /// Convert a user-facing percentage. Values outside 0-100 are rejected.
    pub fn from_percent(percent: f64) -> Result<Self, ConfigError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(ConfigError::InvalidThreshold(percent));
        }
        Ok(Self(percent / 100.0))
    }

    /// Build from a fraction, clamping into [0, 1]
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::default();
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    #[inline]
    pub fn is_ai(&self, combined: f64) -> bool {
        combined >= self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_seventy_percent() {
        let t = DetectionThreshold::default();
        assert!((t.fraction() - 0.70).abs() < 1e-12);
        assert!(t.is_ai(0.70));
        assert!(!t.is_ai(0.6999));
    }

    #[test]
    fn test_from_percent_converts() {
        let t = DetectionThreshold::from_percent(55.0).unwrap();
        assert!((t.fraction() - 0.55).abs() < 1e-12);
        assert!((t.percent() - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_percent_rejects_out_of_range() {
        assert!(DetectionThreshold::from_percent(-1.0).is_err());
        assert!(DetectionThreshold::from_percent(100.5).is_err());
        assert!(DetectionThreshold::from_percent(f64::NAN).is_err());
        assert!(DetectionThreshold::from_percent(0.0).is_ok());
        assert!(DetectionThreshold::from_percent(100.0).is_ok());
    }

    #[test]
    fn test_from_fraction_clamps() {
        assert_eq!(DetectionThreshold::from_fraction(1.7).fraction(), 1.0);
        assert_eq!(DetectionThreshold::from_fraction(-0.2).fraction(), 0.0);
    }
}
