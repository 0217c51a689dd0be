//! Annealing schedules: temperature and regularization ramps.

use serde::{Deserialize, Serialize};

/// Annealing schedule for the points-only model.
///
/// `rad` is the correspondence temperature and `reg` the regularization
/// weight. Annealing must cool, not heat: a schedule is only valid when
/// every final value is strictly below its initial value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointSchedule {
    /// Initial correspondence temperature.
    pub rad_init: f64,
    /// Final correspondence temperature.
    pub rad_final: f64,
    /// Initial regularization weight.
    pub reg_init: f64,
    /// Final regularization weight.
    pub reg_final: f64,
}

impl PointSchedule {
    /// True when every (initial, final) pair cools strictly.
    pub fn cools(&self) -> bool {
        self.rad_final < self.rad_init && self.reg_final < self.reg_init
    }
}

/// Annealing schedule for the points-with-normals model.
///
/// Extends [`PointSchedule`] with the normal-temperature ramp (`radn`) and
/// the nu ramp weighting the normal terms against the point terms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalSchedule {
    /// The shared point-model ramps.
    pub point: PointSchedule,
    /// Initial normal temperature.
    pub radn_init: f64,
    /// Final normal temperature.
    pub radn_final: f64,
    /// Initial nu weight.
    pub nu_init: f64,
    /// Final nu weight.
    pub nu_final: f64,
}

impl NormalSchedule {
    /// True when every (initial, final) pair cools strictly, the nu pair
    /// included.
    pub fn cools(&self) -> bool {
        self.point.cools()
            && self.radn_final < self.radn_init
            && self.nu_final < self.nu_init
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cooling_point() -> PointSchedule {
        PointSchedule {
            rad_init: 1.0,
            rad_final: 0.01,
            reg_init: 10.0,
            reg_final: 0.1,
        }
    }

    #[test]
    fn test_point_schedule_cools() {
        assert!(cooling_point().cools());

        let heating = PointSchedule {
            rad_init: 0.01,
            rad_final: 1.0,
            ..cooling_point()
        };
        assert!(!heating.cools());

        // Equality is not cooling either.
        let flat = PointSchedule {
            reg_init: 0.1,
            reg_final: 0.1,
            ..cooling_point()
        };
        assert!(!flat.cools());
    }

    #[test]
    fn test_normal_schedule_requires_every_pair_to_cool() {
        let schedule = NormalSchedule {
            point: cooling_point(),
            radn_init: 0.05,
            radn_final: 0.001,
            nu_init: 1.0,
            nu_final: 0.1,
        };
        assert!(schedule.cools());

        let nu_heats = NormalSchedule {
            nu_init: 0.1,
            nu_final: 1.0,
            ..schedule
        };
        assert!(!nu_heats.cools());

        let radn_heats = NormalSchedule {
            radn_init: 0.001,
            radn_final: 0.05,
            ..schedule
        };
        assert!(!radn_heats.cools());
    }
}
