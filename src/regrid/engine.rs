//! Regrid engine.
//!
//! Validates inputs, classifies the transfer, and runs the block fast path or
//! the generic interpolator once per value plane against one shared mapping.

use std::borrow::Cow;

use log::{debug, trace};
use rayon::prelude::*;

use super::RegridOptions;
use crate::decision::{self, ResamplePath};
use crate::error::Result;
use crate::grid::RegularGrid2D;
use crate::mapping::GridMapping;
use crate::raster::Raster;
use crate::resample::inverse_distance::Stencils;
use crate::resample::{block, inverse_distance, PlaneShape, ResampleMode};

/// Stateless regrid entry point; safe to share across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegridEngine {
    options: RegridOptions,
}

impl RegridEngine {
    pub fn new(options: RegridOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RegridOptions {
        &self.options
    }

    /// Transfer one plane from `source` to `target`.
    ///
    /// Identical grids return the input borrowed. Otherwise the output is a
    /// new plane on `target`, NaN wherever the source location is unknown.
    pub fn resample<'a>(
        &self,
        values: &'a [f32],
        source: &RegularGrid2D,
        target: &RegularGrid2D,
        mode: ResampleMode,
    ) -> Result<Cow<'a, [f32]>> {
        source.check_len(values.len())?;
        match self.transfer(&[values], source, target, mode).pop() {
            None => Ok(Cow::Borrowed(values)),
            Some(out) => Ok(Cow::Owned(out)),
        }
    }

    /// Transfer every plane of a multi-plane raster with one coordinate mapping.
    pub fn resample_planes<'a>(
        &self,
        planes: &'a [Vec<f32>],
        source: &RegularGrid2D,
        target: &RegularGrid2D,
        mode: ResampleMode,
    ) -> Result<Cow<'a, [Vec<f32>]>> {
        for plane in planes {
            source.check_len(plane.len())?;
        }
        let views: Vec<&[f32]> = planes.iter().map(Vec::as_slice).collect();
        let out = self.transfer(&views, source, target, mode);
        if out.is_empty() {
            Ok(Cow::Borrowed(planes))
        } else {
            Ok(Cow::Owned(out))
        }
    }

    /// Transfer a raster onto `target`. Fails with `UnsupportedDomain` when the
    /// raster is not on a regular grid.
    pub fn resample_raster<'a>(
        &self,
        raster: &'a Raster,
        target: &RegularGrid2D,
        mode: ResampleMode,
    ) -> Result<Cow<'a, Raster>> {
        let source = raster.grid()?;
        match self.resample_planes(&raster.planes, source, target, mode)? {
            Cow::Borrowed(_) => Ok(Cow::Borrowed(raster)),
            Cow::Owned(planes) => Ok(Cow::Owned(Raster::new(*target, planes)?)),
        }
    }

    /// Returns no planes for the identity transfer.
    fn transfer(
        &self,
        planes: &[&[f32]],
        source: &RegularGrid2D,
        target: &RegularGrid2D,
        mode: ResampleMode,
    ) -> Vec<Vec<f32>> {
        let path = decision::decide(source, target, &self.options);
        debug!(
            "regrid {:?} -> {:?} ({} planes, {}): {:?}, step ratios {:?}",
            source.shape(),
            target.shape(),
            planes.len(),
            mode.name(),
            path,
            decision::step_ratios(source, target),
        );

        let (rows, cols) = source.shape();
        let shape = PlaneShape::new(rows, cols);
        let mapping = || {
            let mapping = GridMapping::new(source, target);
            trace!(
                "{} of {} target cells covered by source",
                mapping.covered_cells(),
                target.len()
            );
            mapping
        };

        let parallel = self.options.parallel;
        let kernel: Box<dyn Fn(&[f32], &mut [f32]) + Sync> = match path {
            ResamplePath::Identity => return Vec::new(),
            ResamplePath::Fast(_) => {
                let (x_idx, y_idx) = mapping().floored();
                Box::new(move |src: &[f32], dst: &mut [f32]| {
                    block::resample(src, shape, &x_idx, &y_idx, mode, dst, parallel)
                })
            }
            ResamplePath::Generic => {
                let stencils = Stencils::new(&mapping(), shape);
                Box::new(move |src: &[f32], dst: &mut [f32]| {
                    inverse_distance::resample(src, shape, &stencils, mode, dst, parallel)
                })
            }
        };

        let run = |src: &&[f32]| {
            let mut dst = vec![f32::NAN; target.len()];
            kernel(src, &mut dst);
            dst
        };

        if parallel && planes.len() > 1 {
            planes.par_iter().map(run).collect()
        } else {
            planes.iter().map(run).collect()
        }
    }
}

/// [`RegridEngine::resample`] with default options.
pub fn resample<'a>(
    values: &'a [f32],
    source: &RegularGrid2D,
    target: &RegularGrid2D,
    mode: ResampleMode,
) -> Result<Cow<'a, [f32]>> {
    RegridEngine::default().resample(values, source, target, mode)
}

impl From<RegridOptions> for RegridEngine {
    fn from(options: RegridOptions) -> Self {
        Self::new(options)
    }
}
