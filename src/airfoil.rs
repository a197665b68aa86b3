//! Airfoil boundary data: the raw closed loop as read from a catalog, its split into suction and
//! pressure sides, and the synthetic sections produced by the generators.

use crate::errors::{InvalidGeometry, SideKind};
use ncollide2d::na::Point2;

pub mod generate;
pub mod resample;

pub struct CamberStation {
    pub camber: Point2<f64>,
    pub upper: Point2<f64>,
    pub lower: Point2<f64>,
}

impl CamberStation {
    pub fn new(camber: Point2<f64>, upper: Point2<f64>, lower: Point2<f64>) -> CamberStation {
        CamberStation {
            camber,
            upper,
            lower,
        }
    }
}

/// An airfoil section described by its camber line and its two surfaces, each running from the
/// leading edge to the trailing edge.
pub struct Airfoil {
    pub camber: Vec<Point2<f64>>,
    pub upper: Vec<Point2<f64>>,
    pub lower: Vec<Point2<f64>>,
}

impl Airfoil {
    pub fn from_stations(stations: &[CamberStation]) -> Airfoil {
        Airfoil {
            camber: stations.iter().map(|s| s.camber).collect(),
            upper: stations.iter().map(|s| s.upper).collect(),
            lower: stations.iter().map(|s| s.lower).collect(),
        }
    }

    /// Builds the closed outer loop in the usual catalog order: from the trailing edge along the
    /// upper surface to the leading edge, then back along the lower surface. The shared leading
    /// edge point is only emitted once.
    pub fn to_outer_contour(&self) -> Vec<Point2<f64>> {
        let mut result: Vec<Point2<f64>> = self.upper.iter().rev().copied().collect();
        let skip = match (self.upper.first(), self.lower.first()) {
            (Some(u), Some(l)) if u == l => 1,
            _ => 0,
        };
        result.extend(self.lower.iter().skip(skip));
        result
    }

    pub fn to_boundary(&self) -> Result<BoundaryPolyline, InvalidGeometry> {
        BoundaryPolyline::new(self.to_outer_contour())
    }
}

/// The raw closed boundary of one airfoil. Points are kept in their original orientation, which
/// conventionally starts at the trailing edge. The loop is implicitly closed; the first point is
/// not repeated at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolyline {
    points: Vec<Point2<f64>>,
}

impl BoundaryPolyline {
    pub fn new(points: Vec<Point2<f64>>) -> Result<Self, InvalidGeometry> {
        if points.len() < 3 {
            return Err(InvalidGeometry::NotEnoughPoints(points.len()));
        }

        if let Some(i) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(InvalidGeometry::NonFinite(i));
        }

        Ok(Self { points })
    }

    /// Creates a boundary from parallel x and y columns
    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Self, InvalidGeometry> {
        if x.len() != y.len() {
            return Err(InvalidGeometry::MismatchedLengths {
                x: x.len(),
                y: y.len(),
            });
        }

        Self::new(x.iter().zip(y).map(|(a, b)| Point2::new(*a, *b)).collect())
    }

    /// Creates a boundary from a list of (x, y) pairs
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self, InvalidGeometry> {
        Self::new(pairs.iter().map(|p| Point2::new(p[0], p[1])).collect())
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Index of the leading edge, taken as the first occurrence of the minimum x value
    pub fn leading_edge_index(&self) -> usize {
        let mut index = 0;
        for (i, p) in self.points.iter().enumerate().skip(1) {
            if p.x < self.points[index].x {
                index = i;
            }
        }
        index
    }

    /// Splits the loop at the leading edge. Everything before the leading edge index becomes the
    /// suction side (reversed so that it runs from the leading edge aft), the leading edge point
    /// and everything after it becomes the pressure side. The two sides together hold exactly the
    /// points of the loop.
    pub fn split(&self) -> (Side, Side) {
        let index = self.leading_edge_index();
        let mut suction = self.points[..index].to_vec();
        suction.reverse();
        let pressure = self.points[index..].to_vec();

        (
            Side::new(SideKind::Suction, suction),
            Side::new(SideKind::Pressure, pressure),
        )
    }
}

/// One surface of the airfoil, ordered from the leading edge to the trailing edge
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    pub kind: SideKind,
    pub points: Vec<Point2<f64>>,
}

impl Side {
    pub fn new(kind: SideKind, points: Vec<Point2<f64>>) -> Self {
        Self { kind, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Counts the points of the leading edge neighborhood. Scanning from the front, a point
    /// belongs to the neighborhood while the x step to its successor stays below `gap`. The first
    /// point whose step reaches `gap` ends the run and is not part of it.
    pub fn leading_edge_count(&self, gap: f64) -> usize {
        self.points
            .windows(2)
            .take_while(|w| w[1].x - w[0].x < gap)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use generate::{AirfoilGenerator, Naca4Digit};
    use test_case::test_case;

    fn diamond() -> BoundaryPolyline {
        BoundaryPolyline::from_pairs(&[
            [1.0, 0.0],
            [0.5, 0.1],
            [0.0, 0.0],
            [0.5, -0.1],
            [0.9, -0.01],
        ])
        .unwrap()
    }

    #[test]
    fn test_split_preserves_count() {
        let b = diamond();
        let (suction, pressure) = b.split();
        assert_eq!(b.len(), suction.len() + pressure.len());
        assert_eq!(2, b.leading_edge_index());
    }

    #[test]
    fn test_split_orients_both_sides_aft() {
        let (suction, pressure) = diamond().split();
        assert_eq!(vec![Point2::new(0.5, 0.1), Point2::new(1.0, 0.0)], suction.points);
        assert_eq!(Point2::new(0.0, 0.0), pressure.points[0]);
        assert_eq!(Point2::new(0.9, -0.01), pressure.points[2]);
        assert_eq!(SideKind::Suction, suction.kind);
        assert_eq!(SideKind::Pressure, pressure.kind);
    }

    #[test]
    fn test_leading_edge_is_first_minimum() {
        let b = BoundaryPolyline::from_pairs(&[[1.0, 0.0], [0.0, 0.1], [0.0, -0.1], [1.0, -0.05]])
            .unwrap();
        assert_eq!(1, b.leading_edge_index());
    }

    #[test_case(&[0.0, 0.001, 0.5, 1.0], 1)]
    #[test_case(&[0.0, 0.001, 0.005, 0.0099, 0.5], 3)]
    #[test_case(&[0.0, 0.5, 1.0], 0)]
    #[test_case(&[0.0, 0.001, 0.002], 2)]
    fn test_leading_edge_count(xs: &[f64], e: usize) {
        let side = Side::new(
            SideKind::Pressure,
            xs.iter().map(|x| Point2::new(*x, 0.0)).collect(),
        );
        assert_eq!(e, side.leading_edge_count(0.01));
    }

    #[test]
    fn test_rejects_short_boundary() {
        let result = BoundaryPolyline::from_pairs(&[[0.0, 0.0], [1.0, 0.0]]);
        assert_eq!(Err(InvalidGeometry::NotEnoughPoints(2)), result);
    }

    #[test]
    fn test_rejects_mismatched_columns() {
        let result = BoundaryPolyline::from_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0]);
        assert_eq!(Err(InvalidGeometry::MismatchedLengths { x: 3, y: 2 }), result);
    }

    #[test]
    fn test_rejects_nan() {
        let result = BoundaryPolyline::from_xy(&[0.0, 1.0, f64::NAN], &[0.0, 1.0, 0.0]);
        assert_eq!(Err(InvalidGeometry::NonFinite(2)), result);
    }

    #[test]
    fn test_generated_contour_starts_at_trailing_edge() {
        let naca = Naca4Digit::new(0.12, 1.0, 0.0, 0.0);
        let airfoil = naca.generate(Some(1e-4));
        let boundary = airfoil.to_boundary().unwrap();

        let first = boundary.points()[0];
        let last = *boundary.points().last().unwrap();
        assert!(first.x > 0.99 && last.x > 0.99);
        assert!(first.y > last.y);
        assert_eq!(airfoil.upper.len() + airfoil.lower.len() - 1, boundary.len());

        let le = boundary.points()[boundary.leading_edge_index()];
        assert!(le.x.abs() < 1e-9);
    }
}
