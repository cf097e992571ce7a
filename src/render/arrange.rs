use geo_types::{coord, Coord, Rect};
use nalgebra::{Affine2, Matrix3, Point2 as NPoint2};
use svg::Document;

/// An arrangement is a plan for placing walk coordinates on the page.
///
/// Each variant carries the page rect and whether to flip the y axis. Walk
/// coordinates are mathematical (North is +y) while SVG puts 0,0 at the top left,
/// so renders usually want the flip.
#[derive(Clone, Debug, PartialEq)]
pub enum Arrangement {
    /// Translate the content's center onto the page's center, no scaling.
    Center(Rect<f64>, bool),
    /// Scale uniformly to fill the page, then center.
    FitCenter(Rect<f64>, bool),
    /// Like FitCenter, but keep a margin clear on every side.
    FitCenterMargin(f64, Rect<f64>, bool),
}

impl Arrangement {
    pub fn viewbox(&self) -> Rect<f64> {
        match self {
            Arrangement::Center(viewbox, _)
            | Arrangement::FitCenter(viewbox, _)
            | Arrangement::FitCenterMargin(_, viewbox, _) => *viewbox,
        }
    }

    /// Shortcut to an empty, correctly sized SVG document (sizes in mm).
    pub fn create_svg_document(&self) -> Document {
        let viewbox = self.viewbox();
        Document::new()
            .set(
                "viewBox",
                (viewbox.min().x, viewbox.min().y, viewbox.width(), viewbox.height()),
            )
            .set("width", format!("{}mm", viewbox.width()))
            .set("height", format!("{}mm", viewbox.height()))
    }

    /// The affine transform taking content within `content` onto the page.
    ///
    /// Zero-width or zero-height content (a walk that never left its column, or a
    /// single record) is treated as one unit wide on that axis so the scale stays
    /// finite.
    pub fn transformation(&self, content: &Rect<f64>) -> Affine2<f64> {
        let (scale, bounds, invert) = match self {
            Arrangement::Center(bounds, invert) => (1.0, bounds, invert),
            Arrangement::FitCenter(bounds, invert) => (
                f64::min(
                    bounds.width() / extent(content.width()),
                    bounds.height() / extent(content.height()),
                ),
                bounds,
                invert,
            ),
            Arrangement::FitCenterMargin(margin, bounds, invert) => (
                f64::min(
                    (bounds.width() - 2.0 * margin) / extent(content.width()),
                    (bounds.height() - 2.0 * margin) / extent(content.height()),
                )
                .max(0.0),
                bounds,
                invert,
            ),
        };
        let bcenter = bounds.center();
        let gcenter = content.center() * scale; // post scaling
        let delta = bcenter - gcenter;
        let tx = Affine2::from_matrix_unchecked(Matrix3::new(
            scale, 0.0, delta.x,
            0.0, scale, delta.y,
            0.0, 0.0, 1.0,
        ));
        if *invert {
            Affine2::from_matrix_unchecked(Matrix3::new(
                1.0, 0.0, 0.0,
                0.0, -1.0, bounds.min().y + bounds.max().y,
                0.0, 0.0, 1.0,
            )) * tx
        } else {
            tx
        }
    }

    /// Scale factor the transform applies to content lengths.
    pub fn scale(&self, content: &Rect<f64>) -> f64 {
        let m = self.transformation(content).into_inner();
        m[(0, 0)].abs()
    }
}

fn extent(size: f64) -> f64 {
    if size > 0.0 {
        size
    } else {
        1.0
    }
}

/// Apply an affine transform to a single coordinate.
pub fn apply(transformation: &Affine2<f64>, c: Coord<f64>) -> Coord<f64> {
    let pt = transformation * NPoint2::new(c.x, c.y);
    coord! {x: pt.x, y: pt.y}
}
