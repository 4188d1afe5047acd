//! Content-space geometry and the on-disk bounding box record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position on the drawing surface, independent of scroll offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Builds a rectangle from two opposite corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// True when the rectangle encloses a positive area.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn min(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn max(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
}

/// One labelled box as stored in a label file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBoxRecord {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBoxRecord {
    pub fn new(label: impl Into<String>, rect: Rect) -> Self {
        Self {
            label: label.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Why a label file row could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordParseError {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),
    #[error("field `{field}` is not a finite number: {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("width and height must be positive")]
    EmptyArea,
}

impl FromStr for BoundingBoxRecord {
    type Err = RecordParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [label, x, y, width, height] = fields.as_slice() else {
            return Err(RecordParseError::FieldCount(fields.len()));
        };
        let record = Self {
            label: (*label).to_string(),
            x: parse_coord("x", x)?,
            y: parse_coord("y", y)?,
            width: parse_coord("width", width)?,
            height: parse_coord("height", height)?,
        };
        if !record.rect().has_area() {
            return Err(RecordParseError::EmptyArea);
        }
        Ok(record)
    }
}

fn parse_coord(field: &'static str, raw: &str) -> Result<f64, RecordParseError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RecordParseError::NotANumber {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Writes `label x y width height`. Debug formatting keeps a trailing `.0`
/// on integral values, so `10` is written as `10.0`.
impl fmt::Display for BoundingBoxRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {:?} {:?} {:?}",
            self.label, self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Point::new(10.0, 10.0), Point::new(50.0, 40.0))]
    #[case(Point::new(50.0, 40.0), Point::new(10.0, 10.0))]
    #[case(Point::new(50.0, 10.0), Point::new(10.0, 40.0))]
    #[case(Point::new(10.0, 40.0), Point::new(50.0, 10.0))]
    fn from_corners_normalizes_any_drag_direction(#[case] a: Point, #[case] b: Point) {
        let r = Rect::from_corners(a, b);
        assert_relative_eq!(r.x, 10.0);
        assert_relative_eq!(r.y, 10.0);
        assert_relative_eq!(r.width, 40.0);
        assert_relative_eq!(r.height, 30.0);
        assert!(r.has_area());
    }

    #[rstest]
    #[case(Point::new(5.0, 5.0), Point::new(5.0, 30.0))]
    #[case(Point::new(5.0, 5.0), Point::new(30.0, 5.0))]
    #[case(Point::new(5.0, 5.0), Point::new(5.0, 5.0))]
    fn degenerate_rect_has_no_area(#[case] a: Point, #[case] b: Point) {
        assert!(!Rect::from_corners(a, b).has_area());
    }

    #[test]
    fn display_matches_label_file_row() {
        let rec = BoundingBoxRecord::new(
            "1",
            Rect {
                x: 10.0,
                y: 10.0,
                width: 40.0,
                height: 30.0,
            },
        );
        assert_eq!(rec.to_string(), "1 10.0 10.0 40.0 30.0");

        let frac = BoundingBoxRecord::new(
            "car",
            Rect {
                x: 0.5,
                y: 12.25,
                width: 3.0,
                height: 0.125,
            },
        );
        assert_eq!(frac.to_string(), "car 0.5 12.25 3.0 0.125");
    }

    #[test]
    fn parses_written_row_back() {
        let rec: BoundingBoxRecord = "dog 1.5 2 30.0 4e1".parse().unwrap();
        assert_eq!(rec.label, "dog");
        assert_relative_eq!(rec.x, 1.5);
        assert_relative_eq!(rec.y, 2.0);
        assert_relative_eq!(rec.width, 30.0);
        assert_relative_eq!(rec.height, 40.0);
    }

    #[rstest]
    #[case("1 2 3 4", RecordParseError::FieldCount(4))]
    #[case("1 2 3 4 5 6", RecordParseError::FieldCount(6))]
    #[case("1 a 3 4 5", RecordParseError::NotANumber { field: "x", value: "a".into() })]
    #[case("1 2 3 4 inf", RecordParseError::NotANumber { field: "height", value: "inf".into() })]
    #[case("1 2 3 0 5", RecordParseError::EmptyArea)]
    #[case("1 2 3 4 -5", RecordParseError::EmptyArea)]
    fn rejects_malformed_rows(#[case] line: &str, #[case] expected: RecordParseError) {
        assert_eq!(line.parse::<BoundingBoxRecord>().unwrap_err(), expected);
    }
}
