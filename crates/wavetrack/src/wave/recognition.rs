//! Recognition rules: when does a tracked wave count as a real wave.
//!
//! The engine only sees [`RecognitionPolicy`]. The default rule is
//! [`RecognitionThresholds`]; any `Fn(&WaveDynamics) -> bool` closure works
//! as well.

/// Accumulated motion statistics a policy decides on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveDynamics {
    pub mass: usize,
    pub max_mass: usize,
    pub displacement: f64,
    pub max_displacement: f64,
}

/// Predicate deciding whether a wave's dynamics make it recognized.
///
/// The result feeds a one-way latch, so a policy is never asked again once
/// it has returned `true` for a wave.
pub trait RecognitionPolicy: Send + Sync {
    fn is_recognized(&self, dynamics: &WaveDynamics) -> bool;
}

impl<F> RecognitionPolicy for F
where
    F: Fn(&WaveDynamics) -> bool + Send + Sync,
{
    fn is_recognized(&self, dynamics: &WaveDynamics) -> bool {
        self(dynamics)
    }
}

/// Both the peak mass and the peak displacement must reach their thresholds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RecognitionThresholds {
    /// Minimum `max_mass` (pixels).
    pub mass_threshold: usize,
    /// Minimum `max_displacement` from the birth axis (pixels).
    pub displacement_threshold: f64,
}

impl Default for RecognitionThresholds {
    fn default() -> Self {
        Self {
            mass_threshold: 1000,
            displacement_threshold: 10.0,
        }
    }
}

impl RecognitionPolicy for RecognitionThresholds {
    fn is_recognized(&self, d: &WaveDynamics) -> bool {
        d.max_mass >= self.mass_threshold && d.max_displacement >= self.displacement_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamics(max_mass: usize, max_displacement: f64) -> WaveDynamics {
        WaveDynamics {
            mass: max_mass,
            max_mass,
            displacement: max_displacement,
            max_displacement,
        }
    }

    #[test]
    fn mass_alone_is_not_enough() {
        let p = RecognitionThresholds::default();
        assert!(!p.is_recognized(&dynamics(5000, 9.99)));
    }

    #[test]
    fn displacement_alone_is_not_enough() {
        let p = RecognitionThresholds::default();
        assert!(!p.is_recognized(&dynamics(999, 40.0)));
    }

    #[test]
    fn thresholds_are_inclusive() {
        let p = RecognitionThresholds::default();
        assert!(p.is_recognized(&dynamics(1000, 10.0)));
    }

    #[test]
    fn closures_act_as_policies() {
        let mass_only = |d: &WaveDynamics| d.max_mass >= 10;
        assert!(mass_only.is_recognized(&dynamics(10, 0.0)));
        assert!(!mass_only.is_recognized(&dynamics(9, 100.0)));
    }
}
