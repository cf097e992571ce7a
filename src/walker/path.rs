use geo::BoundingRect;
use geo_types::{coord, Coord, MultiPoint, Point, Rect};
use serde::{Deserialize, Serialize};

/// One tick of a walk: where the brush is, and what it is painting with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathRecord<C, A> {
    pub x: f64,
    pub y: f64,
    pub color: C,
    pub auxiliary: A,
}

impl<C, A> PathRecord<C, A> {
    pub fn coord(&self) -> Coord<f64> {
        coord! {x: self.x, y: self.y}
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

/// # Path
///
/// The complete output of one walk, one record per step, in step order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path<C, A> {
    records: Vec<PathRecord<C, A>>,
}

impl<C, A> Path<C, A> {
    pub fn from_records(records: Vec<PathRecord<C, A>>) -> Self {
        Path { records }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathRecord<C, A>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&PathRecord<C, A>> {
        self.records.last()
    }

    /// Positions only, as geo-types points.
    pub fn to_multipoint(&self) -> MultiPoint<f64> {
        self.records.iter().map(|record| record.point()).collect()
    }

    /// Bounding box of every position visited. None for an empty path.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.to_multipoint().bounding_rect()
    }
}

impl<'a, C, A> IntoIterator for &'a Path<C, A> {
    type Item = &'a PathRecord<C, A>;
    type IntoIter = std::slice::Iter<'a, PathRecord<C, A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
