//! Sky-plane warping of assembled detector planes.
//!
//! Each camera's detector plane is rotated by the pointing position angle,
//! flipped into sky orientation, resampled and zero-padded onto the common
//! square canvas, so that the three cameras' sky grids overlay pixel for
//! pixel. The margin arithmetic truncates to whole pixels rather than
//! rounding; downstream alignment depends on reproducing those integer
//! margins exactly.
//!
//! Two variants share the pointing metadata. The PN plane is rectangular:
//! the rotation canvas grows to hold the footprint and the resample target
//! is whatever the margins leave of the canvas. The MOS planes are
//! cruciform: the rotation keeps the plane shape, the resample target is a
//! fixed 500 pixels, and the leftover margin budget is split between the
//! two sides of each axis in proportion to the footprint margins.

use log::debug;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use shared::Instrument;

use crate::assemble::assemble_detector_plane;
use crate::error::MosaicError;
use crate::raster;

/// Edge length of the square sky canvas, in sky pixels.
pub const SKY_CANVAS: usize = 648;

/// Fixed resample target of the MOS warp, per axis.
const MOS_RESAMPLE: usize = 500;

/// Margin budget around the MOS resample per axis: SKY_CANVAS - MOS_RESAMPLE.
const MOS_PAD_BUDGET: i64 = 148;

/// Pointing geometry of one camera exposure, as read from the observation
/// header by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointingMeta {
    /// Position angle of the pointing, degrees.
    pub position_angle_deg: f64,
    /// Sky-coordinate x range covered by the projected detector footprint.
    pub x_proj: (f64, f64),
    /// Sky-coordinate y range covered by the projected detector footprint.
    pub y_proj: (f64, f64),
    /// Full legal sky-coordinate x range of the exposure.
    pub x_legal: (f64, f64),
    /// Full legal sky-coordinate y range of the exposure.
    pub y_legal: (f64, f64),
}

/// Whole-pixel margins on one canvas axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pad {
    before: usize,
    after: usize,
}

/// Warps one camera's assembled detector plane onto the sky canvas.
///
/// The output is always [`SKY_CANVAS`] x [`SKY_CANVAS`].
///
/// # Errors
///
/// Fails on degenerate pointing metadata: a legal range without positive
/// span, a non-finite footprint limit, a footprint extending outside the
/// legal range, margins leaving no resample target (PN), or margins
/// truncating to zero on both sides of an axis (MOS).
pub fn warp_to_sky(
    instrument: Instrument,
    plane: ArrayView2<'_, f64>,
    pointing: &PointingMeta,
) -> Result<Array2<f64>, MosaicError> {
    let warped = if instrument.is_mos() {
        let (pad_rows, pad_cols) = mos_pads(instrument, pointing)?;
        let rotated = raster::rotate_fixed(plane, pointing.position_angle_deg);
        let oriented = raster::flip_rows(rotated.view());
        let resampled = raster::resize_bilinear(oriented.view(), (MOS_RESAMPLE, MOS_RESAMPLE));
        raster::pad_zero(
            resampled.view(),
            (pad_rows.before, pad_rows.after),
            (pad_cols.before, pad_cols.after),
        )
    } else {
        let (pad_rows, pad_cols, target) = pn_pads(pointing)?;
        let rotated = raster::rotate_reshape(plane, pointing.position_angle_deg);
        let oriented = raster::flip_rows(rotated.view());
        let resampled = raster::resize_bilinear(oriented.view(), target);
        raster::pad_zero(
            resampled.view(),
            (pad_rows.before, pad_rows.after),
            (pad_cols.before, pad_cols.after),
        )
    };
    debug!("{instrument}: warped detector plane onto the {SKY_CANVAS}x{SKY_CANVAS} sky canvas");
    Ok(warped)
}

/// Assembles and warps all three cameras in parallel.
///
/// The three pipelines are independent; the result keeps (PN, M1, M2)
/// order.
pub fn remap_observation(
    pn: (&[Array2<f64>], &PointingMeta),
    m1: (&[Array2<f64>], &PointingMeta),
    m2: (&[Array2<f64>], &PointingMeta),
) -> Result<[Array2<f64>; 3], MosaicError> {
    let run = |instrument: Instrument, elements: &[Array2<f64>], pointing: &PointingMeta| {
        let plane = assemble_detector_plane(instrument, elements)?;
        warp_to_sky(instrument, plane.view(), pointing)
    };
    let ((pn_sky, m1_sky), m2_sky) = rayon::join(
        || {
            rayon::join(
                || run(Instrument::Pn, pn.0, pn.1),
                || run(Instrument::M1, m1.0, m1.1),
            )
        },
        || run(Instrument::M2, m2.0, m2.1),
    );
    Ok([pn_sky?, m1_sky?, m2_sky?])
}

/// Canvas pixels per sky-coordinate unit along one legal axis range.
fn legal_scale(
    instrument: Instrument,
    axis: &'static str,
    legal: (f64, f64),
) -> Result<f64, MosaicError> {
    let span = legal.1 - legal.0;
    if !span.is_finite() || span <= 0.0 {
        return Err(MosaicError::DegenerateLegalRange {
            instrument,
            axis,
            range: legal,
        });
    }
    Ok(SKY_CANVAS as f64 / span)
}

/// Whole-pixel margins between the legal range and the projected footprint,
/// truncated toward zero. Footprint limits must be finite; the saturating
/// cast would turn a NaN limit into a zero margin.
fn footprint_margins(
    instrument: Instrument,
    axis: &'static str,
    proj: (f64, f64),
    legal: (f64, f64),
    scale: f64,
) -> Result<(i64, i64), MosaicError> {
    if !proj.0.is_finite() || !proj.1.is_finite() {
        return Err(MosaicError::NonFiniteFootprint {
            instrument,
            axis,
            range: proj,
        });
    }
    let before = ((proj.0 - legal.0) * scale).trunc() as i64;
    let after = ((legal.1 - proj.1) * scale).trunc() as i64;
    if before < 0 || after < 0 {
        return Err(MosaicError::FootprintOutsideLegal {
            instrument,
            axis,
            margins: (before, after),
        });
    }
    Ok((before, after))
}

/// PN margins and the resample target the margins leave on the canvas.
fn pn_pads(pointing: &PointingMeta) -> Result<(Pad, Pad, (usize, usize)), MosaicError> {
    let instrument = Instrument::Pn;
    let sx = legal_scale(instrument, "x", pointing.x_legal)?;
    let sy = legal_scale(instrument, "y", pointing.y_legal)?;
    let mx = footprint_margins(instrument, "x", pointing.x_proj, pointing.x_legal, sx)?;
    let my = footprint_margins(instrument, "y", pointing.y_proj, pointing.y_legal, sy)?;

    let target_x = SKY_CANVAS as i64 - (mx.0 + mx.1);
    let target_y = SKY_CANVAS as i64 - (my.0 + my.1);
    if target_x <= 0 {
        return Err(MosaicError::EmptyResampleTarget {
            instrument,
            axis: "x",
            size: target_x,
        });
    }
    if target_y <= 0 {
        return Err(MosaicError::EmptyResampleTarget {
            instrument,
            axis: "y",
            size: target_y,
        });
    }
    Ok((
        Pad { before: my.0 as usize, after: my.1 as usize },
        Pad { before: mx.0 as usize, after: mx.1 as usize },
        (target_y as usize, target_x as usize),
    ))
}

/// MOS margins: the fixed budget split between the two sides of each axis
/// in proportion to the truncated footprint margins.
fn mos_pads(instrument: Instrument, pointing: &PointingMeta) -> Result<(Pad, Pad), MosaicError> {
    let sx = legal_scale(instrument, "x", pointing.x_legal)?;
    let sy = legal_scale(instrument, "y", pointing.y_legal)?;
    let mx = footprint_margins(instrument, "x", pointing.x_proj, pointing.x_legal, sx)?;
    let my = footprint_margins(instrument, "y", pointing.y_proj, pointing.y_legal, sy)?;

    let pad_x = split_budget(instrument, "x", mx)?;
    let pad_y = split_budget(instrument, "y", my)?;
    Ok((pad_y, pad_x))
}

fn split_budget(
    instrument: Instrument,
    axis: &'static str,
    margins: (i64, i64),
) -> Result<Pad, MosaicError> {
    let total = margins.0 + margins.1;
    if total == 0 {
        return Err(MosaicError::NoFootprintMargin { instrument, axis });
    }
    let before = (margins.0 as f64 / total as f64 * MOS_PAD_BUDGET as f64).trunc() as i64;
    Ok(Pad {
        before: before as usize,
        after: (MOS_PAD_BUDGET - before) as usize,
    })
}
