use log::warn;

use crate::{
    error::{Degeneracy, ShapeError, ShapeResult},
    math::{matrix::Mat2, vector::Vector, FloatNum, EPSILON},
};

use super::MassData;

pub const MAX_POLY_VERTEX_COUNT: usize = 64;

/// Convex polygon in model space.
///
/// Vertices wind counter clockwise and are centered on the area centroid,
/// `normals[i]` is the outward normal of the edge starting at `vertices[i]`.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: [Vector; MAX_POLY_VERTEX_COUNT],
    normals: [Vector; MAX_POLY_VERTEX_COUNT],
    vertex_count: usize,
    // model to world
    rotation: Mat2,
}

impl Polygon {
    fn empty() -> Self {
        Self {
            vertices: [Vector::ZERO; MAX_POLY_VERTEX_COUNT],
            normals: [Vector::ZERO; MAX_POLY_VERTEX_COUNT],
            vertex_count: 0,
            rotation: Mat2::IDENTITY,
        }
    }

    /// Axis aligned box centered on the origin.
    pub fn new_box(half_width: FloatNum, half_height: FloatNum) -> ShapeResult<Self> {
        let is_valid = |v: FloatNum| v.is_finite() && v > 0.;
        if !(is_valid(half_width) && is_valid(half_height)) {
            return Err(ShapeError::InvalidExtents {
                half_width,
                half_height,
            });
        }

        let mut polygon = Self::empty();
        polygon.vertex_count = 4;
        polygon.vertices[0] = (-half_width, -half_height).into();
        polygon.vertices[1] = (half_width, -half_height).into();
        polygon.vertices[2] = (half_width, half_height).into();
        polygon.vertices[3] = (-half_width, half_height).into();
        polygon.normals[0] = (0., -1.).into();
        polygon.normals[1] = (1., 0.).into();
        polygon.normals[2] = (0., 1.).into();
        polygon.normals[3] = (-1., 0.).into();
        Ok(polygon)
    }

    /// Convex hull of `points` (gift wrapping), recentered on its centroid.
    ///
    /// Only the first [`MAX_POLY_VERTEX_COUNT`] points are considered.
    pub fn from_points(points: &[Vector]) -> ShapeResult<Self> {
        if points.len() < 3 {
            return Err(ShapeError::TooFewVertices {
                count: points.len(),
            });
        }

        let points = if points.len() > MAX_POLY_VERTEX_COUNT {
            warn!(
                "polygon got {} points, only the first {} are used",
                points.len(),
                MAX_POLY_VERTEX_COUNT
            );
            &points[..MAX_POLY_VERTEX_COUNT]
        } else {
            points
        };

        let hull = gift_wrap(points)?;

        let mut polygon = Self::empty();
        polygon.vertex_count = hull.len();
        for (slot, &index) in polygon.vertices.iter_mut().zip(hull.iter()) {
            *slot = points[index];
        }

        polygon.compute_normals()?;
        polygon.recenter()?;

        Ok(polygon)
    }

    fn compute_normals(&mut self) -> ShapeResult<()> {
        let n = self.vertex_count;
        for i in 0..n {
            let face = self.vertices[(i + 1) % n] - self.vertices[i];
            if face.len_sqr() <= EPSILON * EPSILON {
                return Err(Degeneracy::ZeroLengthEdge { index: i }.into());
            }
            self.normals[i] = (face.y(), -face.x()).into();
            self.normals[i].normalize();
        }
        Ok(())
    }

    // move the area centroid onto the origin
    fn recenter(&mut self) -> ShapeResult<()> {
        let (area, centroid) = self.area_and_centroid();
        if area.abs() <= EPSILON * EPSILON {
            return Err(Degeneracy::ZeroArea.into());
        }
        for v in self.vertices_mut() {
            *v -= centroid;
        }
        Ok(())
    }

    fn area_and_centroid(&self) -> (FloatNum, Vector) {
        const INV3: FloatNum = 1. / 3.;
        let mut area = 0.;
        let mut centroid = Vector::ZERO;
        for (p1, p2) in self.edges() {
            // triangle fan around the origin
            let triangle_area = 0.5 * (p1 ^ p2);
            area += triangle_area;
            centroid += (p1 + p2) * (triangle_area * INV3);
        }
        if area != 0. {
            centroid /= area;
        }
        (area, centroid)
    }

    pub fn compute_mass_data(&self, density: FloatNum) -> MassData {
        const INV3: FloatNum = 1. / 3.;
        let mut area = 0.;
        let mut inertia = 0.;
        for (p1, p2) in self.edges() {
            let d = p1 ^ p2;
            area += 0.5 * d;

            let int_x2 = p1.x() * p1.x() + p2.x() * p1.x() + p2.x() * p2.x();
            let int_y2 = p1.y() * p1.y() + p2.y() * p1.y() + p2.y() * p2.y();
            inertia += (0.25 * INV3 * d) * (int_x2 + int_y2);
        }
        MassData {
            mass: density * area,
            inertia: inertia * density,
        }
    }

    /// Farthest vertex along `direction`, model space.
    pub fn support(&self, direction: Vector) -> Vector {
        let mut best_projection = -FloatNum::MAX;
        let mut best_vertex = Vector::ZERO;
        for &v in self.vertices() {
            let projection = v * direction;
            if projection > best_projection {
                best_vertex = v;
                best_projection = projection;
            }
        }
        best_vertex
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector] {
        &self.vertices[..self.vertex_count]
    }

    fn vertices_mut(&mut self) -> &mut [Vector] {
        &mut self.vertices[..self.vertex_count]
    }

    #[inline]
    pub fn normals(&self) -> &[Vector] {
        &self.normals[..self.vertex_count]
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn vertex(&self, index: usize) -> Vector {
        self.vertices[index % self.vertex_count]
    }

    #[inline]
    pub fn normal(&self, index: usize) -> Vector {
        self.normals[index]
    }

    /// consecutive vertex pairs, last one wraps around
    pub fn edges(&self) -> impl Iterator<Item = (Vector, Vector)> + '_ {
        let n = self.vertex_count;
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    #[inline]
    pub fn rotation(&self) -> &Mat2 {
        &self.rotation
    }

    pub(crate) fn set_orientation(&mut self, radians: FloatNum) {
        self.rotation.set_angle(radians);
    }

    pub fn world_vertices(&self, position: Vector) -> impl Iterator<Item = Vector> + '_ {
        self.vertices()
            .iter()
            .map(move |&v| self.rotation * v + position)
    }
}

// indices of the hull of `points`, counter clockwise from the right most point
fn gift_wrap(points: &[Vector]) -> ShapeResult<Vec<usize>> {
    let count = points.len();

    let mut right_most = 0;
    let mut highest_x = points[0].x();
    for (i, p) in points.iter().enumerate().skip(1) {
        if p.x() > highest_x {
            highest_x = p.x();
            right_most = i;
        } else if p.x() == highest_x && p.y() < points[right_most].y() {
            right_most = i;
        }
    }

    let mut hull = Vec::with_capacity(count);
    let mut current = right_most;

    loop {
        if hull.len() >= count {
            return Err(Degeneracy::CollapsedHull { count: hull.len() }.into());
        }
        hull.push(current);

        // most clockwise candidate, farthest one on ties
        let mut next = 0;
        for i in 1..count {
            if next == current {
                next = i;
                continue;
            }
            let e1 = points[next] - points[current];
            let e2 = points[i] - points[current];
            let c = e1 ^ e2;
            if c < 0. {
                next = i;
            }
            if c == 0. && e2.len_sqr() > e1.len_sqr() {
                next = i;
            }
        }

        current = next;
        if next == right_most {
            break;
        }
    }

    if hull.len() < 3 {
        return Err(Degeneracy::CollapsedHull { count: hull.len() }.into());
    }

    Ok(hull)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_box_mass_data() {
        let polygon = Polygon::new_box(1., 0.5).unwrap();
        let MassData { mass, inertia } = polygon.compute_mass_data(2.);
        // 2 x 1 box
        assert_abs_diff_eq!(mass, 4., epsilon = 1e-12);
        // m (w^2 + h^2) / 12
        assert_abs_diff_eq!(inertia, 4. * (4. + 1.) / 12., epsilon = 1e-12);
    }

    #[test]
    fn test_hull_drops_interior_points() {
        let points: Vec<Vector> = vec![
            (0., 0.).into(),
            (2., 0.).into(),
            (1., 1.).into(),
            (2., 2.).into(),
            (0., 2.).into(),
        ];
        let polygon = Polygon::from_points(&points).unwrap();
        assert_eq!(polygon.vertex_count(), 4);

        // recentered
        let centroid = polygon
            .vertices()
            .iter()
            .fold(Vector::ZERO, |acc, &v| acc + v)
            / 4.;
        assert_abs_diff_eq!(centroid.x(), 0., epsilon = 1e-12);
        assert_abs_diff_eq!(centroid.y(), 0., epsilon = 1e-12);

        // first vertex is the right most one with the lowest y
        assert_abs_diff_eq!(polygon.vertices()[0].x(), 1., epsilon = 1e-12);
        assert_abs_diff_eq!(polygon.vertices()[0].y(), -1., epsilon = 1e-12);
    }

    #[test]
    fn test_random_hull_is_convex_and_ccw() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let count = rng.gen_range(3..=MAX_POLY_VERTEX_COUNT);
            let points: Vec<Vector> = (0..count)
                .map(|_| (rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0)).into())
                .collect();

            let Ok(polygon) = Polygon::from_points(&points) else {
                continue;
            };

            for (i, (v1, v2)) in polygon.edges().enumerate() {
                let edge = v2 - v1;
                let normal = polygon.normal(i);
                assert_abs_diff_eq!(normal.len_sqr(), 1., epsilon = 1e-9);
                assert_abs_diff_eq!(normal * edge, 0., epsilon = 1e-9);
                // every vertex lies behind every face
                for &v in polygon.vertices() {
                    assert!(normal * (v - v1) <= 1e-9);
                }
            }

            assert!(polygon.compute_mass_data(1.).mass > 0.);
        }
    }

    #[test]
    fn test_support() {
        let polygon = Polygon::new_box(1., 2.).unwrap();
        assert_eq!(polygon.support((1., 1.).into()), Vector::new(1., 2.));
        assert_eq!(polygon.support((-1., -0.1).into()), Vector::new(-1., -2.));
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(
            Polygon::from_points(&[(0., 0.).into(), (1., 0.).into()]).unwrap_err(),
            ShapeError::TooFewVertices { count: 2 }
        );

        let collinear: Vec<Vector> = vec![(0., 0.).into(), (1., 0.).into(), (2., 0.).into()];
        assert!(matches!(
            Polygon::from_points(&collinear),
            Err(ShapeError::DegenerateGeometry(Degeneracy::CollapsedHull { .. }))
        ));

        assert!(Polygon::new_box(0., 1.).is_err());
    }

    #[test]
    fn test_world_vertices_follow_rotation() {
        let mut polygon = Polygon::new_box(1., 1.).unwrap();
        polygon.set_orientation(std::f64::consts::FRAC_PI_2);
        let first = polygon.world_vertices((10., 0.).into()).next().unwrap();
        // (-1, -1) rotated by 90 degrees is (1, -1)
        assert_abs_diff_eq!(first.x(), 11., epsilon = 1e-12);
        assert_abs_diff_eq!(first.y(), -1., epsilon = 1e-12);
    }
}
