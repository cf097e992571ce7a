use geo_types::{coord, Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use svg::node::element::{Circle, Element, Polygon as SvgPolygon, Rectangle};

/// Marker shapes, after the classic scatter-plot set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    /// A small dot, a quarter of the requested size.
    Point,
    /// A tiny square, fixed at a fraction of a millimetre regardless of size.
    Pixel,
    #[default]
    Circle,
    Square,
    Diamond,
}

const PIXEL_SIZE: f64 = 0.1;

impl std::str::FromStr for Glyph {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "point" | "." => Ok(Glyph::Point),
            "pixel" | "," => Ok(Glyph::Pixel),
            "circle" | "o" => Ok(Glyph::Circle),
            "square" | "s" => Ok(Glyph::Square),
            "diamond" | "d" => Ok(Glyph::Diamond),
            other => Err(format!("unknown glyph {:?}", other)),
        }
    }
}

/// How one auxiliary label is drawn: which glyph, and how big (page units, mm).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkStyle {
    pub glyph: Glyph,
    pub size: f64,
}

impl Default for MarkStyle {
    fn default() -> Self {
        MarkStyle {
            glyph: Glyph::Circle,
            size: 1.0,
        }
    }
}

impl MarkStyle {
    pub fn new(glyph: Glyph, size: f64) -> Self {
        MarkStyle { glyph, size }
    }

    /// Build the SVG element for one mark centered on `center`, filled with `fill`.
    pub fn to_element(&self, center: Coord<f64>, fill: &str) -> Element {
        let size = self.size.abs();
        match self.glyph {
            Glyph::Point => Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", size / 8.0)
                .set("fill", fill)
                .into(),
            Glyph::Circle => Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", size / 2.0)
                .set("fill", fill)
                .into(),
            Glyph::Pixel => square(center, PIXEL_SIZE, fill),
            Glyph::Square => square(center, size, fill),
            Glyph::Diamond => SvgPolygon::new()
                .set("points", points_attr(&regular_poly(4, center, size / 2.0, 0.0)))
                .set("fill", fill)
                .into(),
        }
    }
}

fn square(center: Coord<f64>, size: f64, fill: &str) -> Element {
    Rectangle::new()
        .set("x", center.x - size / 2.0)
        .set("y", center.y - size / 2.0)
        .set("width", size)
        .set("height", size)
        .set("fill", fill)
        .into()
}

/// Closed regular polygon around `center`. With rotation 0 the first vertex
/// points straight up. The ring is closed by `Polygon::new`, so its last point is
/// an exact copy of the first.
pub fn regular_poly(sides: usize, center: Coord<f64>, radius: f64, rotation: f64) -> Polygon<f64> {
    let sides = sides.max(3);
    Polygon::new(
        LineString::new(
            (0..sides)
                .map(|i| {
                    let angle = rotation - PI / 2.0 + (i as f64 / sides as f64) * (2.0 * PI);
                    coord! {x: center.x + angle.cos() * radius, y: center.y + angle.sin() * radius}
                })
                .collect(),
        ),
        vec![],
    )
}

fn points_attr(poly: &Polygon<f64>) -> String {
    let coords: Vec<&Coord<f64>> = poly.exterior().0.iter().collect();
    // The exterior is closed; SVG polygons close themselves.
    coords[..coords.len().saturating_sub(1)]
        .iter()
        .map(|c| format!("{:.3},{:.3}", c.x, c.y))
        .collect::<Vec<_>>()
        .join(" ")
}
