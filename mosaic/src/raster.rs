//! Raster primitives for the sky warp: rotation, resampling and padding of
//! dense `f64` grids.
//!
//! All resampling is inverse-mapped bilinear interpolation: each output
//! pixel is projected back into the source grid and blended from its four
//! neighbours. Rotation follows the image-processing convention of rotating
//! counterclockwise about the grid centre, with pixels swept in from
//! outside the source treated as zero. A zero-angle rotation and a
//! same-shape resample are exact identities, which the warp round-trip
//! relies on.

use ndarray::{s, Array2, ArrayView2};

/// Rotates a grid counterclockwise about its centre onto a canvas sized to
/// hold the whole rotated footprint.
pub fn rotate_reshape(grid: ArrayView2<'_, f64>, angle_deg: f64) -> Array2<f64> {
    let (rows, cols) = grid.dim();
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    // Bounding box of the rotated corners, rounded like the reference
    // implementations round it.
    let out_rows = (rows as f64 * cos.abs() + cols as f64 * sin.abs() + 0.5) as usize;
    let out_cols = (rows as f64 * sin.abs() + cols as f64 * cos.abs() + 0.5) as usize;
    rotate_onto(grid, sin, cos, (out_rows, out_cols))
}

/// Rotates a grid counterclockwise about its centre, keeping the input
/// shape. Corners swept outside the canvas are lost; corners swept in are
/// zero.
pub fn rotate_fixed(grid: ArrayView2<'_, f64>, angle_deg: f64) -> Array2<f64> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    rotate_onto(grid, sin, cos, grid.dim())
}

fn rotate_onto(
    grid: ArrayView2<'_, f64>,
    sin: f64,
    cos: f64,
    out_shape: (usize, usize),
) -> Array2<f64> {
    let (rows, cols) = grid.dim();
    let in_centre = ((rows as f64 - 1.0) / 2.0, (cols as f64 - 1.0) / 2.0);
    let out_centre = (
        (out_shape.0 as f64 - 1.0) / 2.0,
        (out_shape.1 as f64 - 1.0) / 2.0,
    );
    // Offset aligning the two centres under the inverse rotation.
    let offset = (
        in_centre.0 - (cos * out_centre.0 + sin * out_centre.1),
        in_centre.1 - (-sin * out_centre.0 + cos * out_centre.1),
    );
    Array2::from_shape_fn(out_shape, |(r, c)| {
        let src_r = cos * r as f64 + sin * c as f64 + offset.0;
        let src_c = -sin * r as f64 + cos * c as f64 + offset.1;
        sample_bilinear_zero(&grid, src_r, src_c)
    })
}

/// Bilinear sample treating everything outside the grid as zero.
fn sample_bilinear_zero(grid: &ArrayView2<'_, f64>, r: f64, c: f64) -> f64 {
    let (rows, cols) = grid.dim();
    let r0 = r.floor();
    let c0 = c.floor();
    let fr = r - r0;
    let fc = c - c0;

    let mut value = 0.0;
    for (dr, wr) in [(0, 1.0 - fr), (1, fr)] {
        if wr == 0.0 {
            continue;
        }
        let ri = r0 as i64 + dr;
        if ri < 0 || ri >= rows as i64 {
            continue;
        }
        for (dc, wc) in [(0, 1.0 - fc), (1, fc)] {
            if wc == 0.0 {
                continue;
            }
            let ci = c0 as i64 + dc;
            if ci < 0 || ci >= cols as i64 {
                continue;
            }
            value += wr * wc * grid[(ri as usize, ci as usize)];
        }
    }
    value
}

/// Resamples a grid to a new shape with centre-aligned bilinear sampling.
///
/// Output pixel `i` maps to `(i + 0.5) * scale - 0.5` on the source axis
/// and samples its neighbours, clamped at the grid edges.
pub fn resize_bilinear(grid: ArrayView2<'_, f64>, shape: (usize, usize)) -> Array2<f64> {
    let (rows, cols) = grid.dim();
    if shape.0 == 0 || shape.1 == 0 || rows == 0 || cols == 0 {
        return Array2::zeros(shape);
    }
    let scale_r = rows as f64 / shape.0 as f64;
    let scale_c = cols as f64 / shape.1 as f64;
    Array2::from_shape_fn(shape, |(r, c)| {
        let src_r = (r as f64 + 0.5) * scale_r - 0.5;
        let src_c = (c as f64 + 0.5) * scale_c - 0.5;
        sample_bilinear_clamp(&grid, src_r, src_c)
    })
}

/// Bilinear sample clamped to the grid edges.
fn sample_bilinear_clamp(grid: &ArrayView2<'_, f64>, r: f64, c: f64) -> f64 {
    let (rows, cols) = grid.dim();
    let r = r.clamp(0.0, rows as f64 - 1.0);
    let c = c.clamp(0.0, cols as f64 - 1.0);
    let r0 = r.floor() as usize;
    let c0 = c.floor() as usize;
    let r1 = (r0 + 1).min(rows - 1);
    let c1 = (c0 + 1).min(cols - 1);
    let fr = r - r0 as f64;
    let fc = c - c0 as f64;

    let top = grid[(r0, c0)] * (1.0 - fc) + grid[(r0, c1)] * fc;
    let bottom = grid[(r1, c0)] * (1.0 - fc) + grid[(r1, c1)] * fc;
    top * (1.0 - fr) + bottom * fr
}

/// Mirrors a grid top to bottom.
pub fn flip_rows(grid: ArrayView2<'_, f64>) -> Array2<f64> {
    grid.slice(s![..;-1, ..]).to_owned()
}

/// Embeds a grid in a zero canvas with the given `(before, after)` margins
/// on rows and columns.
pub fn pad_zero(
    grid: ArrayView2<'_, f64>,
    rows_margin: (usize, usize),
    cols_margin: (usize, usize),
) -> Array2<f64> {
    let (rows, cols) = grid.dim();
    let mut out = Array2::zeros((
        rows + rows_margin.0 + rows_margin.1,
        cols + cols_margin.0 + cols_margin.1,
    ));
    out.slice_mut(s![
        rows_margin.0..rows_margin.0 + rows,
        cols_margin.0..cols_margin.0 + cols
    ])
    .assign(&grid);
    out
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::layout::Transform;

    use super::*;

    fn random_grid(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Array2::from_shape_fn((rows, cols), |_| rng.gen_range(0.0..10.0))
    }

    fn assert_grids_close(a: &Array2<f64>, b: &Array2<f64>, epsilon: f64) {
        assert_eq!(a.dim(), b.dim());
        for (va, vb) in a.iter().zip(b.iter()) {
            assert_relative_eq!(va, vb, epsilon = epsilon);
        }
    }

    #[test]
    fn test_zero_angle_rotation_is_exact_identity() {
        let g = random_grid(11, 17, 3);
        assert_eq!(rotate_reshape(g.view(), 0.0), g);
        assert_eq!(rotate_fixed(g.view(), 0.0), g);
    }

    #[test]
    fn test_quarter_turn_matches_the_discrete_rotation() {
        let g = random_grid(6, 9, 5);
        let rotated = rotate_reshape(g.view(), 90.0);
        let discrete = Transform::Rot90.apply(g.view());
        assert_grids_close(&rotated, &discrete, 1e-9);
    }

    #[test]
    fn test_half_turn_matches_the_discrete_rotation() {
        let g = random_grid(5, 7, 8);
        let rotated = rotate_reshape(g.view(), 180.0);
        let discrete = Transform::Rot180.apply(g.view());
        assert_grids_close(&rotated, &discrete, 1e-9);
    }

    #[test]
    fn test_reshape_canvas_holds_the_rotated_footprint() {
        // 10x10 at 45 deg: 10 * (sin + cos) + 0.5 truncates to 14.
        let g = Array2::ones((10, 10));
        let rotated = rotate_reshape(g.view(), 45.0);
        assert_eq!(rotated.dim(), (14, 14));
        // The centre pixel stays on the detector.
        assert!(rotated[(7, 7)] > 0.5);
        // The canvas corners come from outside the source.
        assert_eq!(rotated[(0, 0)], 0.0);
        assert_eq!(rotated[(13, 13)], 0.0);
    }

    #[test]
    fn test_fixed_rotation_keeps_the_shape_and_zeroes_swept_corners() {
        let g = Array2::ones((20, 20));
        let rotated = rotate_fixed(g.view(), 45.0);
        assert_eq!(rotated.dim(), (20, 20));
        assert_eq!(rotated[(0, 0)], 0.0, "corner swept in from outside");
        assert_relative_eq!(rotated[(10, 10)], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotation_preserves_the_centre_value() {
        let mut g = Array2::zeros((21, 21));
        g[(10, 10)] = 7.0;
        for angle in [30.0, 45.0, 133.7] {
            let rotated = rotate_fixed(g.view(), angle);
            assert_relative_eq!(rotated[(10, 10)], 7.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_same_shape_resize_is_exact_identity() {
        let g = random_grid(9, 13, 21);
        assert_eq!(resize_bilinear(g.view(), (9, 13)), g);
    }

    #[test]
    fn test_resize_of_a_constant_grid_stays_constant() {
        let g = Array2::from_elem((30, 40), 2.5);
        for shape in [(10, 10), (60, 80), (7, 53)] {
            let resized = resize_bilinear(g.view(), shape);
            assert_eq!(resized.dim(), shape);
            for v in resized.iter() {
                assert_relative_eq!(*v, 2.5, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_upsample_interpolates_between_neighbours() {
        let g = array![[0.0, 1.0], [2.0, 3.0]];
        let resized = resize_bilinear(g.view(), (4, 4));
        // Output centres map to source coordinates -0.25, 0.25, 0.75, 1.25;
        // the edge samples clamp, the inner ones interpolate.
        assert_eq!(resized[(0, 0)], 0.0);
        assert_eq!(resized[(3, 3)], 3.0);
        assert_relative_eq!(resized[(1, 1)], 0.75, epsilon = 1e-12);
        assert_relative_eq!(resized[(1, 2)], 1.25, epsilon = 1e-12);
        assert_relative_eq!(resized[(2, 1)], 1.75, epsilon = 1e-12);
    }

    #[test]
    fn test_downsample_averages_the_quadrants() {
        let g = array![
            [1.0, 1.0, 5.0, 5.0],
            [1.0, 1.0, 5.0, 5.0],
            [9.0, 9.0, 13.0, 13.0],
            [9.0, 9.0, 13.0, 13.0],
        ];
        let resized = resize_bilinear(g.view(), (2, 2));
        assert_eq!(resized, array![[1.0, 5.0], [9.0, 13.0]]);
    }

    #[test]
    fn test_pad_zero_places_the_grid_at_the_margins() {
        let g = array![[1.0, 2.0], [3.0, 4.0]];
        let padded = pad_zero(g.view(), (1, 2), (3, 0));
        assert_eq!(padded.dim(), (5, 5));
        assert_eq!(padded[(0, 0)], 0.0);
        assert_eq!(padded[(1, 3)], 1.0);
        assert_eq!(padded[(2, 4)], 4.0);
        assert_eq!(padded[(4, 4)], 0.0);
        assert_relative_eq!(padded.sum(), g.sum(), epsilon = 1e-12);
    }

    #[test]
    fn test_flip_rows_mirrors_top_to_bottom() {
        let g = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        assert_eq!(
            flip_rows(g.view()),
            array![[5.0, 6.0], [3.0, 4.0], [1.0, 2.0]]
        );
    }
}
