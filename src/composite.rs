//! Three-band RGB composites from independently gridded single-band rasters.

use std::borrow::Cow;

use log::debug;

use crate::error::{RegridError, Result};
use crate::grid::RegularGrid2D;
use crate::raster::Raster;
use crate::regrid::RegridEngine;
use crate::resample::ResampleMode;

/// Regrid `red`, `green` and `blue` onto `target` and stack them as a
/// three-plane raster. A sample missing in any band is cleared in all three.
///
/// All inputs must be single-plane rasters on regular grids expressed in the
/// same (angular) coordinate space as `target`.
pub fn combine_rgb(
    engine: &RegridEngine,
    red: &Raster,
    green: &Raster,
    blue: &Raster,
    target: &RegularGrid2D,
    mode: ResampleMode,
) -> Result<Raster> {
    let bands = [red, green, blue];
    for band in bands {
        band.grid()?;
        if band.planes.len() != 1 {
            return Err(RegridError::ShapeMismatch {
                expected: 1,
                actual: band.planes.len(),
            });
        }
    }

    let regrid = |band: &Raster| -> Result<Vec<f32>> {
        let grid = band.grid()?;
        let out = engine.resample(&band.planes[0], grid, target, mode)?;
        Ok(match out {
            Cow::Borrowed(values) => values.to_vec(),
            Cow::Owned(values) => values,
        })
    };

    let (r, (g, b)) = if engine.options().parallel {
        rayon::join(
            || regrid(red),
            || rayon::join(|| regrid(green), || regrid(blue)),
        )
    } else {
        (regrid(red), (regrid(green), regrid(blue)))
    };
    let (mut r, mut g, mut b) = (r?, g?, b?);

    let cleared = mask_any_nan(&mut r, &mut g, &mut b);
    debug!(
        "rgb composite on {:?}: {} of {} samples cleared",
        target.shape(),
        cleared,
        target.len()
    );

    Raster::new(*target, vec![r, g, b])
}

/// [`combine_rgb`] onto the red band's own grid.
pub fn combine_rgb_on_red(
    engine: &RegridEngine,
    red: &Raster,
    green: &Raster,
    blue: &Raster,
    mode: ResampleMode,
) -> Result<Raster> {
    let target = *red.grid()?;
    combine_rgb(engine, red, green, blue, &target, mode)
}

/// Set all three bands to NaN wherever any one is NaN; returns how many
/// samples were incomplete.
pub fn mask_any_nan(r: &mut [f32], g: &mut [f32], b: &mut [f32]) -> usize {
    let mut cleared = 0;
    for ((r, g), b) in r.iter_mut().zip(g.iter_mut()).zip(b.iter_mut()) {
        if r.is_nan() || g.is_nan() || b.is_nan() {
            *r = f32::NAN;
            *g = f32::NAN;
            *b = f32::NAN;
            cleared += 1;
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Domain;

    fn row(n: usize) -> RegularGrid2D {
        RegularGrid2D::from_bounds((0.0, (n - 1) as f64, n), (0.0, 0.0, 1)).unwrap()
    }

    #[test]
    fn test_any_nan_clears_all() {
        let g = row(3);
        let r = Raster::single(g, vec![1.0, f32::NAN, 3.0]).unwrap();
        let gr = Raster::single(g, vec![4.0, 5.0, f32::NAN]).unwrap();
        let b = Raster::single(g, vec![7.0, 8.0, 9.0]).unwrap();

        let rgb = combine_rgb_on_red(&RegridEngine::default(), &r, &gr, &b, ResampleMode::default())
            .unwrap();
        assert_eq!(rgb.planes.len(), 3);
        for (plane, first) in rgb.planes.iter().zip([1.0_f32, 4.0, 7.0]) {
            assert_eq!(plane[0], first);
            assert!(plane[1].is_nan());
            assert!(plane[2].is_nan());
        }
    }

    #[test]
    fn test_bands_regridded_to_target() {
        let fine = RegularGrid2D::from_bounds((0.0, 3.0, 4), (0.0, 3.0, 4)).unwrap();
        let coarse = RegularGrid2D::from_bounds((0.0, 2.0, 2), (0.0, 2.0, 2)).unwrap();
        let ramp: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let r = Raster::single(fine, ramp.clone()).unwrap();
        let g = Raster::single(coarse, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Raster::single(fine, ramp).unwrap();

        let rgb = combine_rgb(
            &RegridEngine::default(),
            &r,
            &g,
            &b,
            &coarse,
            ResampleMode::WeightedAverage,
        )
        .unwrap();
        assert_eq!(rgb.grid().unwrap(), &coarse);
        assert_eq!(rgb.planes[0], vec![2.5, 4.5, 10.5, 12.5]);
        assert_eq!(rgb.planes[1], vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(rgb.planes[2], rgb.planes[0]);
    }

    #[test]
    fn test_multi_plane_band_rejected() {
        let g = row(2);
        let two = Raster::new(g, vec![vec![0.0; 2], vec![0.0; 2]]).unwrap();
        let one = Raster::single(g, vec![0.0; 2]).unwrap();
        let err = combine_rgb(&RegridEngine::default(), &two, &one, &one, &g, ResampleMode::default())
            .unwrap_err();
        assert_eq!(
            err,
            RegridError::ShapeMismatch {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_irregular_band_rejected() {
        let g = row(3);
        let irregular = Raster::new(
            Domain::from_coordinates(&[0.0, 0.5, 2.0], &[0.0]).unwrap(),
            vec![vec![0.0; 3]],
        )
        .unwrap();
        let one = Raster::single(g, vec![0.0; 3]).unwrap();
        let err = combine_rgb(&RegridEngine::default(), &one, &irregular, &one, &g, ResampleMode::default())
            .unwrap_err();
        assert!(matches!(err, RegridError::UnsupportedDomain(_)));
    }
}
