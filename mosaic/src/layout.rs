//! Static detector-plane layout tables.
//!
//! Each camera's physical CCD arrangement is data, not code: a layout lists
//! the column bands of the detector plane, each band an ordered top-to-
//! bottom stack of reoriented elements and blank corner caps, plus one
//! whole-plane transform that fixes the north/east orientation. Supporting
//! a new camera family means writing a new table, not touching the
//! assembly routine.
//!
//! | Camera | Elements | Plane | Composite |
//! |--------|----------|-------|-----------|
//! | PN     | 12 of 64x200 | 384x400 rectangle | identity |
//! | M1     | 7 of 600x600 | 1800x1800 cruciform | quarter turn CCW |
//! | M2     | 7 of 600x600 | 1800x1800 cruciform | half turn |

use ndarray::{s, Array2, ArrayView2};
use shared::Instrument;

/// Orientation change applied to a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Leave the grid as is.
    Identity,
    /// Mirror top to bottom.
    FlipRows,
    /// Mirror left to right.
    FlipCols,
    /// Half turn.
    Rot180,
    /// Quarter turn counterclockwise.
    Rot90,
    /// Swap rows and columns.
    Transpose,
    /// Transpose then half turn (mirror across the anti-diagonal).
    AntiTranspose,
}

impl Transform {
    /// Applies the orientation change, yielding an owned grid.
    pub fn apply(&self, grid: ArrayView2<'_, f64>) -> Array2<f64> {
        match self {
            Transform::Identity => grid.to_owned(),
            Transform::FlipRows => grid.slice(s![..;-1, ..]).to_owned(),
            Transform::FlipCols => grid.slice(s![.., ..;-1]).to_owned(),
            Transform::Rot180 => grid.slice(s![..;-1, ..;-1]).to_owned(),
            Transform::Rot90 => grid.t().slice(s![..;-1, ..]).to_owned(),
            Transform::Transpose => grid.t().to_owned(),
            Transform::AntiTranspose => grid.t().slice(s![..;-1, ..;-1]).to_owned(),
        }
    }

    /// Output shape for an input of `shape`, as `(rows, cols)`.
    pub fn output_shape(&self, shape: (usize, usize)) -> (usize, usize) {
        match self {
            Transform::Identity | Transform::FlipRows | Transform::FlipCols | Transform::Rot180 => {
                shape
            }
            Transform::Rot90 | Transform::Transpose | Transform::AntiTranspose => {
                (shape.1, shape.0)
            }
        }
    }
}

/// One entry in a band: a reoriented detector element or a blank cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Element `index` of the input collection, reoriented by `transform`.
    Element { index: usize, transform: Transform },
    /// `rows` zero-filled rows at the band width.
    Blank { rows: usize },
}

/// Detector-plane geometry of one camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentLayout {
    /// Number of element grids the camera delivers.
    pub element_count: usize,
    /// Shape of every raw element grid, `(rows, cols)`.
    pub element_shape: (usize, usize),
    /// Column bands, left to right; each band stacks top to bottom.
    pub bands: &'static [&'static [Slot]],
    /// Whole-plane orientation fix applied after the bands are joined.
    pub composite: Transform,
}

impl InstrumentLayout {
    /// Width of one band: every reoriented element shares it.
    pub fn band_width(&self) -> usize {
        for band in self.bands {
            for slot in *band {
                if let Slot::Element { transform, .. } = slot {
                    return transform.output_shape(self.element_shape).1;
                }
            }
        }
        self.element_shape.1
    }

    /// Shape after band concatenation, before the composite transform.
    pub fn stacked_shape(&self) -> (usize, usize) {
        let width = self.band_width();
        let rows = self.bands[0]
            .iter()
            .map(|slot| match slot {
                Slot::Element { transform, .. } => transform.output_shape(self.element_shape).0,
                Slot::Blank { rows } => *rows,
            })
            .sum();
        (rows, width * self.bands.len())
    }

    /// Shape of the finished detector plane.
    pub fn composite_shape(&self) -> (usize, usize) {
        self.composite.output_shape(self.stacked_shape())
    }
}

/// PN plane: two bands of six 64x200 CCDs. The left band stacks CCDs
/// 8,7,6,9,10,11 top to bottom, each mirrored top-to-bottom; the right band
/// stacks 5,4,3,0,1,2, each mirrored left-to-right.
pub static PN_LAYOUT: InstrumentLayout = InstrumentLayout {
    element_count: 12,
    element_shape: (64, 200),
    bands: &[
        &[
            Slot::Element { index: 8, transform: Transform::FlipRows },
            Slot::Element { index: 7, transform: Transform::FlipRows },
            Slot::Element { index: 6, transform: Transform::FlipRows },
            Slot::Element { index: 9, transform: Transform::FlipRows },
            Slot::Element { index: 10, transform: Transform::FlipRows },
            Slot::Element { index: 11, transform: Transform::FlipRows },
        ],
        &[
            Slot::Element { index: 5, transform: Transform::FlipCols },
            Slot::Element { index: 4, transform: Transform::FlipCols },
            Slot::Element { index: 3, transform: Transform::FlipCols },
            Slot::Element { index: 0, transform: Transform::FlipCols },
            Slot::Element { index: 1, transform: Transform::FlipCols },
            Slot::Element { index: 2, transform: Transform::FlipCols },
        ],
    ],
    composite: Transform::Identity,
};

/// Shared cruciform band arrangement of the seven 600x600 MOS CCDs: the
/// outer bands carry 300-row blank corner caps, the central band carries
/// CCD 0 mirrored top-to-bottom between CCDs 2 and 5.
const MOS_BANDS: &[&[Slot]] = &[
    &[
        Slot::Blank { rows: 300 },
        Slot::Element { index: 1, transform: Transform::Transpose },
        Slot::Element { index: 6, transform: Transform::AntiTranspose },
        Slot::Blank { rows: 300 },
    ],
    &[
        Slot::Element { index: 2, transform: Transform::Transpose },
        Slot::Element { index: 0, transform: Transform::FlipRows },
        Slot::Element { index: 5, transform: Transform::AntiTranspose },
    ],
    &[
        Slot::Blank { rows: 300 },
        Slot::Element { index: 3, transform: Transform::Transpose },
        Slot::Element { index: 4, transform: Transform::AntiTranspose },
        Slot::Blank { rows: 300 },
    ],
];

/// M1 plane: the cruciform MOS arrangement, turned a quarter turn
/// counterclockwise.
pub static M1_LAYOUT: InstrumentLayout = InstrumentLayout {
    element_count: 7,
    element_shape: (600, 600),
    bands: MOS_BANDS,
    composite: Transform::Rot90,
};

/// M2 plane: the cruciform MOS arrangement, turned a half turn.
pub static M2_LAYOUT: InstrumentLayout = InstrumentLayout {
    element_count: 7,
    element_shape: (600, 600),
    bands: MOS_BANDS,
    composite: Transform::Rot180,
};

/// Returns the layout table for a camera.
pub fn layout_for(instrument: Instrument) -> &'static InstrumentLayout {
    match instrument {
        Instrument::Pn => &PN_LAYOUT,
        Instrument::M1 => &M1_LAYOUT,
        Instrument::M2 => &M2_LAYOUT,
    }
}
