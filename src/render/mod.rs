//! Turns a walked [`Path`] into an SVG scatter of marks.
//!
//! The renderer knows about the page (size, margin, background, title); the walk
//! knows nothing about any of that. Colors and mark shapes are looked up per record
//! through a [`MarkPainter`], so the renderer works with any label types.

use crate::errors::RenderError;
use crate::walker::Path;
pub use csscolorparser::Color as CssColor;
use geo_types::{coord, Rect};
use serde::{Deserialize, Serialize};
use svg::node::element::{Group, Rectangle, Title};
use svg::Document;
use tracing::debug;

pub mod arrange;
pub use arrange::Arrangement;

pub mod marks;
pub use marks::{Glyph, MarkStyle};

/// Maps record labels to what ends up on the page.
pub trait MarkPainter<C, A> {
    fn color(&self, label: &C) -> Result<CssColor, RenderError>;
    fn mark(&self, label: &A) -> MarkStyle;
}

/// Page setup. All sizes in mm.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub background: Option<CssColor>,
    /// Overrides the generated "MarkovBrush (...)" title.
    pub title: Option<String>,
    /// Put North at the top of the page.
    pub flip_y: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            margin: 10.0,
            background: Some(CssColor::from_rgba8(255, 255, 255, 255)),
            title: None,
            flip_y: true,
        }
    }
}

impl RenderOptions {
    pub fn arrangement(&self) -> Arrangement {
        Arrangement::FitCenterMargin(
            self.margin,
            Rect::new(coord! {x: 0.0, y: 0.0}, coord! {x: self.width, y: self.height}),
            self.flip_y,
        )
    }
}

/// "MarkovBrush (N steps, jump size of J)".
pub fn default_title(step_count: usize, jump_size: f64) -> String {
    format!("MarkovBrush ({} steps, jump size of {})", step_count, jump_size)
}

#[derive(Debug, Clone, Default)]
pub struct ScatterRenderer {
    options: RenderOptions,
}

impl ScatterRenderer {
    pub fn new(options: RenderOptions) -> Self {
        ScatterRenderer { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// One mark per record, in walk order, so later marks sit on top. The whole
    /// walk is uniformly scaled to fit inside the margins.
    pub fn render<C, A, P>(
        &self,
        path: &Path<C, A>,
        painter: &P,
        title: &str,
    ) -> Result<Document, RenderError>
    where
        P: MarkPainter<C, A>,
    {
        let bounds = path.bounds().ok_or(RenderError::EmptyPath)?;
        let arrangement = self.options.arrangement();
        let transformation = arrangement.transformation(&bounds);
        debug!(
            records = path.len(),
            scale = arrangement.scale(&bounds),
            "rendering path"
        );

        let title = self.options.title.as_deref().unwrap_or(title);
        let mut document = arrangement.create_svg_document().add(Title::new(title));
        if let Some(background) = &self.options.background {
            let viewbox = arrangement.viewbox();
            document = document.add(
                Rectangle::new()
                    .set("x", viewbox.min().x)
                    .set("y", viewbox.min().y)
                    .set("width", viewbox.width())
                    .set("height", viewbox.height())
                    .set("fill", background.to_css_hex()),
            );
        }

        let mut marks = Group::new().set("stroke", "none");
        for record in path {
            let fill = painter.color(&record.color)?.to_css_hex();
            let center = arrange::apply(&transformation, record.coord());
            marks = marks.add(painter.mark(&record.auxiliary).to_element(center, &fill));
        }
        Ok(document.add(marks))
    }

    pub fn save<F: AsRef<std::path::Path>>(
        &self,
        document: &Document,
        file: F,
    ) -> Result<(), RenderError> {
        svg::save(file.as_ref(), document)?;
        debug!(file = %file.as_ref().display(), "saved svg");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::walker::PathRecord;

    struct Plain;

    impl MarkPainter<&'static str, u8> for Plain {
        fn color(&self, label: &&'static str) -> Result<CssColor, RenderError> {
            csscolorparser::parse(label).map_err(|_| RenderError::UnparseableColor(label.to_string()))
        }

        fn mark(&self, label: &u8) -> MarkStyle {
            if *label == 0 {
                MarkStyle::new(Glyph::Circle, 1.0)
            } else {
                MarkStyle::new(Glyph::Square, 2.0)
            }
        }
    }

    fn record(x: f64, y: f64, color: &'static str, auxiliary: u8) -> PathRecord<&'static str, u8> {
        PathRecord {
            x,
            y,
            color,
            auxiliary,
        }
    }

    #[test]
    fn test_one_mark_per_record() {
        let path = Path::from_records(vec![
            record(0.0, 0.0, "blue", 0),
            record(0.0, 1.0, "cyan", 1),
            record(1.0, 1.0, "magenta", 0),
        ]);
        let doc = ScatterRenderer::default()
            .render(&path, &Plain, &default_title(3, 50.0))
            .unwrap()
            .to_string();
        assert_eq!(doc.matches("<circle").count(), 2);
        // background plus one square mark
        assert_eq!(doc.matches("<rect").count(), 2);
        assert!(doc.contains("#0000ff"));
        assert!(doc.contains("#00ffff"));
        assert!(doc.contains("MarkovBrush (3 steps, jump size of 50)"));
    }

    #[test]
    fn test_title_override_and_no_background() {
        let options = RenderOptions {
            background: None,
            title: Some("Spiral".to_string()),
            ..RenderOptions::default()
        };
        let path = Path::from_records(vec![record(2.0, 2.0, "red", 0)]);
        let doc = ScatterRenderer::new(options)
            .render(&path, &Plain, "ignored")
            .unwrap()
            .to_string();
        assert!(doc.contains("<title>Spiral</title>"));
        assert!(!doc.contains("<rect"));
        // A single record lands in the middle of the page.
        assert!(doc.contains("cx=\"100\""));
        assert!(doc.contains("cy=\"100\""));
    }

    #[test]
    fn test_empty_path() {
        let path: Path<&'static str, u8> = Path::from_records(vec![]);
        assert!(matches!(
            ScatterRenderer::default().render(&path, &Plain, "t"),
            Err(RenderError::EmptyPath)
        ));
    }

    #[test]
    fn test_bad_color() {
        let path = Path::from_records(vec![record(0.0, 0.0, "blurple", 0)]);
        assert!(matches!(
            ScatterRenderer::default().render(&path, &Plain, "t"),
            Err(RenderError::UnparseableColor(_))
        ));
    }

    #[test]
    fn test_north_is_up() {
        let path = Path::from_records(vec![
            record(0.0, 0.0, "red", 0),
            record(0.0, 10.0, "blue", 0),
        ]);
        let doc = ScatterRenderer::default()
            .render(&path, &Plain, "t")
            .unwrap()
            .to_string();
        let red = doc.find("#ff0000").unwrap();
        let blue = doc.find("#0000ff").unwrap();
        // red is drawn first, at the bottom margin; blue at the top margin.
        assert!(red < blue);
        assert!(doc.contains("cy=\"190\""));
        assert!(doc.contains("cy=\"10\""));
    }
}
