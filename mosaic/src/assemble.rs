//! Detector-plane assembly from per-element variability grids.

use log::debug;
use ndarray::{concatenate, Array2, Axis};
use shared::Instrument;

use crate::error::MosaicError;
use crate::layout::{layout_for, Slot};

/// Assembles one camera's element grids into its detector plane.
///
/// The input slice is indexed by element number. Each element is reoriented
/// and stacked into its band per the camera's layout table, the bands are
/// joined left to right, and the composite transform fixes the plane's
/// final orientation.
///
/// # Errors
///
/// Fails when the element count or any element's shape does not match the
/// camera's layout.
pub fn assemble_detector_plane(
    instrument: Instrument,
    elements: &[Array2<f64>],
) -> Result<Array2<f64>, MosaicError> {
    let layout = layout_for(instrument);
    if elements.len() != layout.element_count {
        return Err(MosaicError::ElementCount {
            instrument,
            expected: layout.element_count,
            found: elements.len(),
        });
    }
    for (index, element) in elements.iter().enumerate() {
        if element.dim() != layout.element_shape {
            return Err(MosaicError::ElementShape {
                instrument,
                element: index,
                expected: layout.element_shape,
                found: element.dim(),
            });
        }
    }

    let band_width = layout.band_width();
    let mut bands = Vec::with_capacity(layout.bands.len());
    for band in layout.bands {
        let blocks: Vec<Array2<f64>> = band
            .iter()
            .map(|slot| match slot {
                Slot::Element { index, transform } => transform.apply(elements[*index].view()),
                Slot::Blank { rows } => Array2::zeros((*rows, band_width)),
            })
            .collect();
        let views: Vec<_> = blocks.iter().map(|block| block.view()).collect();
        bands.push(concatenate(Axis(0), &views)?);
    }
    let views: Vec<_> = bands.iter().map(|band| band.view()).collect();
    let stacked = concatenate(Axis(1), &views)?;

    let plane = layout.composite.apply(stacked.view());
    debug!(
        "{instrument}: assembled {}x{} detector plane from {} elements",
        plane.nrows(),
        plane.ncols(),
        elements.len()
    );
    Ok(plane)
}

#[cfg(test)]
mod tests {
    use crate::layout::{M1_LAYOUT, M2_LAYOUT, PN_LAYOUT};

    use super::*;

    fn zero_elements(count: usize, shape: (usize, usize)) -> Vec<Array2<f64>> {
        (0..count).map(|_| Array2::zeros(shape)).collect()
    }

    #[test]
    fn test_all_zero_elements_give_all_zero_planes_of_documented_shape() {
        let cases = [
            (Instrument::Pn, &PN_LAYOUT),
            (Instrument::M1, &M1_LAYOUT),
            (Instrument::M2, &M2_LAYOUT),
        ];
        for (instrument, layout) in cases {
            let elements = zero_elements(layout.element_count, layout.element_shape);
            let plane = assemble_detector_plane(instrument, &elements).unwrap();
            assert_eq!(plane.dim(), layout.composite_shape());
            assert_eq!(plane.sum(), 0.0);
        }
    }

    #[test]
    fn test_pn_left_band_carries_ccd_8_flipped_at_the_top() {
        let mut elements = zero_elements(12, (64, 200));
        // Mark the raw top-left texel of CCD 8; after the top-to-bottom
        // mirror it must land on the band's row 63.
        elements[8][(0, 0)] = 5.0;
        let plane = assemble_detector_plane(Instrument::Pn, &elements).unwrap();
        assert_eq!(plane[(63, 0)], 5.0);
        assert_eq!(plane.sum(), 5.0, "exactly one texel is set");
    }

    #[test]
    fn test_pn_right_band_mirrors_columns() {
        let mut elements = zero_elements(12, (64, 200));
        // CCD 5 opens the right band; its raw (0, 0) mirrors to column 199
        // of the band, which sits at plane column 200 + 199.
        elements[5][(0, 0)] = 3.0;
        let plane = assemble_detector_plane(Instrument::Pn, &elements).unwrap();
        assert_eq!(plane[(0, 399)], 3.0);
        assert_eq!(plane.sum(), 3.0);
    }

    #[test]
    fn test_mos_corner_caps_stay_blank() {
        let elements: Vec<Array2<f64>> = (0..7).map(|_| Array2::ones((600, 600))).collect();
        let plane = assemble_detector_plane(Instrument::M1, &elements).unwrap();
        assert_eq!(plane.dim(), (1800, 1800));
        // Plane flux equals seven full CCDs; the four corner caps are zero.
        assert_eq!(plane.sum(), 7.0 * 600.0 * 600.0);
        assert_eq!(plane[(0, 0)], 0.0);
        assert_eq!(plane[(0, 1799)], 0.0);
        assert_eq!(plane[(1799, 0)], 0.0);
        assert_eq!(plane[(1799, 1799)], 0.0);
        assert_eq!(plane[(900, 900)], 1.0, "centre is on CCD 0");
    }

    #[test]
    fn test_m1_and_m2_only_differ_by_orientation() {
        let mut elements = zero_elements(7, (600, 600));
        elements[0][(300, 300)] = 2.0;
        elements[4][(10, 20)] = 1.0;

        let m1 = assemble_detector_plane(Instrument::M1, &elements).unwrap();
        let m2 = assemble_detector_plane(Instrument::M2, &elements).unwrap();
        assert_eq!(m1.sum(), m2.sum());
        assert_ne!(m1, m2, "the composite turns differ");

        // Undoing each composite turn recovers the same stacked plane.
        use crate::layout::Transform;
        let mut m1_unturned = m1;
        for _ in 0..3 {
            m1_unturned = Transform::Rot90.apply(m1_unturned.view());
        }
        let m2_unturned = Transform::Rot180.apply(m2.view());
        assert_eq!(m1_unturned, m2_unturned);
    }

    #[test]
    fn test_wrong_element_count_is_rejected() {
        let elements = zero_elements(11, (64, 200));
        let err = assemble_detector_plane(Instrument::Pn, &elements).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::ElementCount { expected: 12, found: 11, .. }
        ));
    }

    #[test]
    fn test_wrong_element_shape_is_rejected() {
        let mut elements = zero_elements(7, (600, 600));
        elements[3] = Array2::zeros((600, 601));
        let err = assemble_detector_plane(Instrument::M2, &elements).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::ElementShape { element: 3, found: (600, 601), .. }
        ));
    }
}
