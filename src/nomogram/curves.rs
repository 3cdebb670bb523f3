/// A family of piecewise-linear reference curves sampled on a shared grid.
///
/// Every curve in a set has the same length and is sampled every `interval`
/// hours, the first sample sitting at `starts_at` hours of life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSet {
    pub interval: f64,
    pub starts_at: f64,
    pub curves: &'static [&'static [f64]],
}

impl CurveSet {
    /// Number of samples on each curve.
    pub fn len(&self) -> usize {
        self.curves.first().map(|curve| curve.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn curve(&self, index: usize) -> Option<&'static [f64]> {
        self.curves.get(index).copied()
    }

    /// Hour of life at which the sample `index` was tabulated.
    pub fn hour_at(&self, index: usize) -> f64 {
        self.starts_at + index as f64 * self.interval
    }

    /// Largest tabulated hour, or `starts_at` for an empty set.
    pub fn last_hour(&self) -> f64 {
        self.hour_at(self.len().saturating_sub(1))
    }

    /// Pair each sample of `curve` with its hour of life.
    pub fn points(&self, curve: usize) -> Vec<(f64, f64)> {
        self.curve(curve)
            .map(|values| {
                values
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (self.hour_at(index), *value))
                    .collect()
            })
            .unwrap_or_default()
    }
}

const RISK_HIGH: [f64; 35] = [25.0; 35];

const RISK_HIGH_INTERMEDIATE: [f64; 35] = [
    7.1, 7.2, 7.4, 7.8, 8.9, 10.0, 11.1, 12.2, 12.5, 13.2, 13.8, 14.4, 15.2, 15.4, 15.6, 15.9,
    16.2, 16.4, 16.7, 17.0, 17.2, 17.4, 17.4, 17.5, 17.5, 17.5, 17.6, 17.7, 17.6, 17.5, 17.4,
    17.4, 17.3, 17.3, 17.4,
];

const RISK_LOW_INTERMEDIATE: [f64; 35] = [
    5.1, 5.5, 5.9, 6.1, 7.0, 8.0, 8.9, 9.9, 10.3, 10.8, 11.3, 12.0, 12.6, 12.9, 13.1, 13.4, 13.8,
    14.3, 14.7, 14.7, 15.0, 15.2, 15.3, 15.4, 15.5, 15.6, 15.7, 15.8, 15.7, 15.6, 15.5, 15.4,
    15.3, 15.2, 15.2,
];

const RISK_LOW: [f64; 35] = [
    3.9, 4.3, 4.7, 4.9, 5.5, 6.3, 7.0, 7.8, 8.1, 8.6, 9.0, 9.3, 9.6, 10.2, 10.7, 11.2, 11.3, 11.4,
    11.6, 11.8, 12.2, 12.3, 12.5, 12.7, 12.8, 13.0, 13.1, 13.2, 13.2, 13.2, 13.2, 13.2, 13.2,
    13.2, 13.3,
];

const RISK_UNDEFINED: [f64; 35] = [0.0; 35];

/// Bhutani hour-specific percentile boundaries, indexed by
/// [`RiskZone::curve_index`](super::RiskZone::curve_index).
pub static RISK_ZONES: CurveSet = CurveSet {
    interval: 4.0,
    starts_at: 12.0,
    curves: &[
        &RISK_HIGH,
        &RISK_HIGH_INTERMEDIATE,
        &RISK_LOW_INTERMEDIATE,
        &RISK_LOW,
        &RISK_UNDEFINED,
    ],
};

/// AAP phototherapy thresholds, ordered High, Medium, Low.
pub static PHOTOTHERAPY: CurveSet = CurveSet {
    interval: 12.0,
    starts_at: 0.0,
    curves: &[
        &[
            6.7, 9.0, 11.5, 13.5, 15.2, 16.4, 17.6, 18.8, 19.8, 20.5, 21.0, 21.0, 21.0, 21.0, 21.0,
        ],
        &[
            5.0, 7.6, 9.8, 11.7, 13.1, 14.5, 15.4, 16.4, 17.2, 17.9, 18.0, 18.0, 18.0, 18.0, 18.0,
        ],
        &[
            3.8, 6.0, 7.8, 9.5, 11.1, 12.4, 13.4, 14.0, 14.5, 14.9, 15.0, 15.0, 15.0, 15.0, 15.0,
        ],
    ],
};

/// AAP exchange transfusion thresholds, ordered High, Medium, Low.
pub static TRANSFUSION: CurveSet = CurveSet {
    interval: 12.0,
    starts_at: 0.0,
    curves: &[
        &[
            16.0, 17.7, 19.0, 20.8, 22.1, 23.0, 23.9, 24.4, 24.9, 24.9, 24.9, 24.9, 24.9, 24.9,
            24.9,
        ],
        &[
            13.8, 15.1, 16.5, 17.9, 19.1, 20.1, 21.2, 22.0, 22.4, 22.4, 22.4, 22.4, 22.4, 22.4,
            22.4,
        ],
        &[
            12.0, 13.5, 15.0, 16.0, 17.1, 18.0, 18.5, 18.8, 19.0, 19.0, 19.0, 19.0, 19.0, 19.0,
            19.0,
        ],
    ],
};
