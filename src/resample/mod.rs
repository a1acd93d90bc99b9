//! Resampling kernels for the regrid engine.

pub mod block;
pub mod inverse_distance;

/// Available resampling modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResampleMode {
    NearestNeighbor,
    #[default]
    WeightedAverage,
}

impl ResampleMode {
    /// Parse from a string name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nearest" | "nearest_neighbor" => Some(Self::NearestNeighbor),
            "weighted" | "weighted_average" => Some(Self::WeightedAverage),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nearest_neighbor",
            Self::WeightedAverage => "weighted_average",
        }
    }
}

/// Source plane dimensions in samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneShape {
    pub rows: usize,
    pub cols: usize,
}

impl PlaneShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}
