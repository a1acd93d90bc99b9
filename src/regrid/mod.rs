//! Grid transfer between regular rasters.

pub mod engine;

pub use engine::{resample, RegridEngine};

/// Offset between first samples (modulo half a source step) allowed on the
/// fast path, in coordinate units.
pub const OFFSET_TOLERANCE: f64 = 0.01;

/// Step-ratio error, multiplied by target length, allowed on the fast path.
pub const ACCUM_TOLERANCE: f32 = 0.01;

/// Tunables for [`RegridEngine`]. The defaults reproduce historical output.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegridOptions {
    pub offset_tolerance: f64,
    pub accum_tolerance: f32,
    /// Split target rows (and planes) across the rayon pool.
    pub parallel: bool,
}

impl Default for RegridOptions {
    fn default() -> Self {
        Self {
            offset_tolerance: OFFSET_TOLERANCE,
            accum_tolerance: ACCUM_TOLERANCE,
            parallel: true,
        }
    }
}

impl RegridOptions {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_partial_json() {
        let opts: RegridOptions = serde_json::from_str(r#"{"parallel": false}"#).unwrap();
        assert_eq!(opts, RegridOptions::sequential());
    }
}
