use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{AxisRange, Point, Rect, ViewportState};

/// Point count above which `project_points` fans out to rayon.
#[cfg(feature = "parallel-projection")]
const PARALLEL_PROJECTION_THRESHOLD: usize = 4_096;

/// How the axis pair is laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// X runs along the width, Y along the height growing upward.
    #[default]
    Vertical,
    /// The vertical pipeline run in the transposed frame.
    Horizontal,
}

/// Value-to-pixel mapping for one axis pair, derived from a viewport snapshot.
///
/// The forward matrix is `offset * zoom_pan * value`:
/// - `value` maps data units to content-sized units with Y flipped,
/// - `zoom_pan` is the viewport's touch matrix,
/// - `offset` moves the result into view pixels (and undoes the flip for
///   inverted axes).
///
/// The transform is a plain value; rebuild it after the viewport, data ranges
/// or inversion change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTransform {
    orientation: Orientation,
    value_to_pixel: DAffine2,
    pixel_to_value: DAffine2,
}

impl ChartTransform {
    pub fn new(
        orientation: Orientation,
        viewport: &ViewportState,
        x_range: AxisRange,
        y_range: AxisRange,
        inverted: bool,
    ) -> Self {
        let value_to_pixel = match orientation {
            Orientation::Vertical => compose(viewport, x_range, y_range, inverted),
            Orientation::Horizontal => {
                compose(&viewport.transposed(), y_range, x_range, !inverted)
            }
        };
        Self::from_matrix(orientation, value_to_pixel)
    }

    /// Shorthand for a vertical, non-inverted transform.
    pub fn vertical(viewport: &ViewportState, x_range: AxisRange, y_range: AxisRange) -> Self {
        Self::new(Orientation::Vertical, viewport, x_range, y_range, false)
    }

    fn from_matrix(orientation: Orientation, value_to_pixel: DAffine2) -> Self {
        let determinant = value_to_pixel.matrix2.determinant();
        let pixel_to_value = if determinant.is_finite() && determinant != 0.0 {
            value_to_pixel.inverse()
        } else {
            warn!(determinant, "singular value-to-pixel matrix; using identity inverse");
            DAffine2::IDENTITY
        };
        Self {
            orientation,
            value_to_pixel,
            pixel_to_value,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Forward matrix in the frame the pipeline runs in.
    ///
    /// For `Orientation::Horizontal` this is the transposed-frame matrix; points
    /// are swapped before and after applying it.
    #[must_use]
    pub fn value_to_pixel_matrix(&self) -> DAffine2 {
        self.value_to_pixel
    }

    #[must_use]
    pub fn pixel_to_value_matrix(&self) -> DAffine2 {
        self.pixel_to_value
    }

    #[must_use]
    pub fn point_value_to_pixel(&self, value: Point) -> Point {
        apply(self.orientation, &self.value_to_pixel, value)
    }

    #[must_use]
    pub fn point_pixel_to_value(&self, pixel: Point) -> Point {
        apply(self.orientation, &self.pixel_to_value, pixel)
    }

    /// Maps every point of `points` to pixels in place.
    pub fn points_value_to_pixel(&self, points: &mut [Point]) {
        for point in points.iter_mut() {
            *point = self.point_value_to_pixel(*point);
        }
    }

    pub fn points_pixel_to_value(&self, points: &mut [Point]) {
        for point in points.iter_mut() {
            *point = self.point_pixel_to_value(*point);
        }
    }

    /// Maps a batch of value points to a new pixel vector.
    #[must_use]
    pub fn project_points(&self, points: &[Point]) -> Vec<Point> {
        #[cfg(feature = "parallel-projection")]
        {
            if points.len() >= PARALLEL_PROJECTION_THRESHOLD {
                return points
                    .par_iter()
                    .map(|point| self.point_value_to_pixel(*point))
                    .collect();
            }
        }

        points
            .iter()
            .map(|point| self.point_value_to_pixel(*point))
            .collect()
    }

    /// Maps a value-space rectangle to the pixel rectangle covering its corners.
    ///
    /// The result always has `left <= right` and `top <= bottom`. A zero-extent
    /// input side stays zero-extent.
    #[must_use]
    pub fn rect_value_to_pixel(&self, rect: Rect) -> Rect {
        let corners = rect.corners().map(|corner| self.point_value_to_pixel(corner));
        Rect::bounding(&corners)
    }

    /// Like `rect_value_to_pixel` with the Y extents scaled by an animation phase.
    #[must_use]
    pub fn rect_value_to_pixel_with_phase(&self, rect: Rect, phase_y: f64) -> Rect {
        let phase_y = if phase_y.is_finite() { phase_y } else { 1.0 };
        let phased = Rect::new(
            rect.left,
            rect.top * phase_y,
            rect.right,
            rect.bottom * phase_y,
        );
        self.rect_value_to_pixel(phased)
    }

    pub fn rects_value_to_pixel(&self, rects: &mut [Rect]) {
        for rect in rects.iter_mut() {
            *rect = self.rect_value_to_pixel(*rect);
        }
    }

    #[must_use]
    pub fn rect_pixel_to_value(&self, rect: Rect) -> Rect {
        let corners = rect.corners().map(|corner| self.point_pixel_to_value(corner));
        Rect::bounding(&corners)
    }
}

fn apply(orientation: Orientation, matrix: &DAffine2, point: Point) -> Point {
    match orientation {
        Orientation::Vertical => matrix.transform_point2(DVec2::from(point)).into(),
        Orientation::Horizontal => {
            let swapped = matrix.transform_point2(DVec2::from(point.swapped()));
            Point::from(swapped).swapped()
        }
    }
}

fn compose(
    viewport: &ViewportState,
    x_range: AxisRange,
    y_range: AxisRange,
    inverted: bool,
) -> DAffine2 {
    offset_matrix(viewport, inverted)
        * viewport.touch_matrix()
        * value_matrix(viewport, x_range, y_range)
}

fn value_matrix(viewport: &ViewportState, x_range: AxisRange, y_range: AxisRange) -> DAffine2 {
    let scale_x = viewport.content_width() / x_range.safe_span();
    let scale_y = viewport.content_height() / y_range.safe_span();
    DAffine2::from_scale(DVec2::new(scale_x, -scale_y))
        * DAffine2::from_translation(DVec2::new(-x_range.safe_min(), -y_range.safe_min()))
}

fn offset_matrix(viewport: &ViewportState, inverted: bool) -> DAffine2 {
    if inverted {
        DAffine2::from_scale(DVec2::new(1.0, -1.0))
            * DAffine2::from_translation(DVec2::new(
                viewport.content_left(),
                -viewport.content_top(),
            ))
    } else {
        DAffine2::from_translation(DVec2::new(
            viewport.content_left(),
            viewport.content_bottom(),
        ))
    }
}
