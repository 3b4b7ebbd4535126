use crate::constants::OUTLIER_THRESHOLD;

/// Elevation readings, in meters, for one location from each of the
/// three DEM sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSample {
    pub srtm30: f64,
    pub srtm90: f64,
    pub aw3d30: f64,
}

impl ElevationSample {
    /// Returns the best single elevation for this sample.
    ///
    /// The coarse 90 m reading is dropped when it disagrees with either
    /// 30 m reading by more than [`OUTLIER_THRESHOLD`]; otherwise all
    /// three are averaged.
    pub fn reconcile(&self) -> f64 {
        let Self {
            srtm30,
            srtm90,
            aw3d30,
        } = *self;
        if (srtm90 - srtm30).abs() > OUTLIER_THRESHOLD || (srtm90 - aw3d30).abs() > OUTLIER_THRESHOLD
        {
            (srtm30 + aw3d30) / 2.0
        } else {
            (srtm30 + srtm90 + aw3d30) / 3.0
        }
    }
}

/// Reconciles each sample into one elevation, keeping order.
pub fn reconcile(samples: &[ElevationSample]) -> Vec<f64> {
    samples.iter().map(ElevationSample::reconcile).collect()
}
