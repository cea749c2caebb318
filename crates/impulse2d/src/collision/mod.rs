use log::trace;

use crate::{
    element::Element,
    math::{
        num::{bias_greater_than, dist_sqr, sqr},
        vector::Vector,
        FloatNum, EPSILON, FLT_MAX,
    },
    shape::{circle::Circle, polygon::Polygon, ShapeKind},
};

/// Contact geometry between two elements, `normal` points from A to B.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contact {
    pub(crate) normal: Vector,
    pub(crate) penetration: FloatNum,
    pub(crate) points: [Vector; 2],
    pub(crate) contact_count: usize,
}

impl Contact {
    #[inline]
    pub fn normal(&self) -> Vector {
        self.normal
    }

    #[inline]
    pub fn penetration(&self) -> FloatNum {
        self.penetration
    }

    #[inline]
    pub fn contact_count(&self) -> usize {
        self.contact_count
    }

    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.contact_count > 0
    }

    /// world space contact points, at most two
    #[inline]
    pub fn contact_points(&self) -> &[Vector] {
        &self.points[..self.contact_count]
    }

    fn single(normal: Vector, penetration: FloatNum, point: Vector) -> Self {
        Self {
            normal,
            penetration,
            points: [point, Vector::ZERO],
            contact_count: 1,
        }
    }
}

/// Narrow phase for one pair, dispatched on the shape kinds.
pub fn solve(a: &Element, b: &Element) -> Contact {
    let (position_a, position_b) = (a.position(), b.position());
    match (a.kind(), b.kind()) {
        (ShapeKind::Circle(circle_a), ShapeKind::Circle(circle_b)) => {
            circle_to_circle(position_a, circle_a, position_b, circle_b)
        }
        (ShapeKind::Circle(circle), ShapeKind::Polygon(polygon)) => {
            circle_to_polygon(position_a, circle, position_b, polygon)
        }
        (ShapeKind::Polygon(polygon), ShapeKind::Circle(circle)) => {
            polygon_to_circle(position_a, polygon, position_b, circle)
        }
        (ShapeKind::Polygon(polygon_a), ShapeKind::Polygon(polygon_b)) => {
            polygon_to_polygon(position_a, polygon_a, position_b, polygon_b)
        }
    }
}

pub fn circle_to_circle(
    position_a: Vector,
    circle_a: &Circle,
    position_b: Vector,
    circle_b: &Circle,
) -> Contact {
    let normal = position_b - position_a;
    let distance_sqr = normal.len_sqr();
    let radius = circle_a.radius() + circle_b.radius();

    if distance_sqr >= sqr(radius) {
        return Contact::default();
    }

    let distance = distance_sqr.sqrt();

    if distance == 0. {
        // concentric, any direction separates them
        Contact::single((1., 0.).into(), circle_a.radius(), position_a)
    } else {
        let normal = normal / distance;
        let point = normal * circle_a.radius() + position_a;
        Contact::single(normal, radius - distance, point)
    }
}

pub fn circle_to_polygon(
    position_circle: Vector,
    circle: &Circle,
    position_polygon: Vector,
    polygon: &Polygon,
) -> Contact {
    let radius = circle.radius();
    let rotation = polygon.rotation();

    // circle center in polygon model space
    let center = rotation.transpose() * (position_circle - position_polygon);

    let mut separation = -FLT_MAX;
    let mut face_index = 0;
    for (i, (&normal, &vertex)) in polygon
        .normals()
        .iter()
        .zip(polygon.vertices())
        .enumerate()
    {
        let s = normal * (center - vertex);
        if s > radius {
            return Contact::default();
        }
        if s > separation {
            separation = s;
            face_index = i;
        }
    }

    let v1 = polygon.vertex(face_index);
    let v2 = polygon.vertex(face_index + 1);
    let face_normal = polygon.normal(face_index);

    // center inside the polygon
    if separation < EPSILON {
        let normal = -(rotation * face_normal);
        return Contact::single(normal, radius, normal * radius + position_circle);
    }

    let penetration = radius - separation;
    let dot1 = (center - v1) * (v2 - v1);
    let dot2 = (center - v2) * (v1 - v2);

    if dot1 <= 0. {
        // closest to v1
        if dist_sqr(center, v1) > sqr(radius) {
            return Contact::default();
        }
        let normal = (rotation * (v1 - center)).normalized();
        Contact::single(normal, penetration, rotation * v1 + position_polygon)
    } else if dot2 <= 0. {
        if dist_sqr(center, v2) > sqr(radius) {
            return Contact::default();
        }
        let normal = (rotation * (v2 - center)).normalized();
        Contact::single(normal, penetration, rotation * v2 + position_polygon)
    } else {
        if (center - v1) * face_normal > radius {
            return Contact::default();
        }
        let normal = -(rotation * face_normal);
        Contact::single(normal, penetration, normal * radius + position_circle)
    }
}

pub fn polygon_to_circle(
    position_polygon: Vector,
    polygon: &Polygon,
    position_circle: Vector,
    circle: &Circle,
) -> Contact {
    let mut contact = circle_to_polygon(position_circle, circle, position_polygon, polygon);
    contact.normal = -contact.normal;
    contact
}

pub fn polygon_to_polygon(
    position_a: Vector,
    polygon_a: &Polygon,
    position_b: Vector,
    polygon_b: &Polygon,
) -> Contact {
    let (penetration_a, face_a) =
        find_axis_least_penetration(position_a, polygon_a, position_b, polygon_b);
    if penetration_a >= 0. {
        return Contact::default();
    }

    let (penetration_b, face_b) =
        find_axis_least_penetration(position_b, polygon_b, position_a, polygon_a);
    if penetration_b >= 0. {
        return Contact::default();
    }

    // the normal must always point from a to b
    let (reference, incident, reference_index, flip) =
        if bias_greater_than(penetration_a, penetration_b) {
            (
                (position_a, polygon_a),
                (position_b, polygon_b),
                face_a,
                false,
            )
        } else {
            (
                (position_b, polygon_b),
                (position_a, polygon_a),
                face_b,
                true,
            )
        };

    let (position_ref, polygon_ref) = reference;
    let mut incident_face =
        find_incident_face(polygon_ref, reference_index, incident.0, incident.1);

    let rotation_ref = polygon_ref.rotation();
    let v1 = rotation_ref * polygon_ref.vertex(reference_index) + position_ref;
    let v2 = rotation_ref * polygon_ref.vertex(reference_index + 1) + position_ref;

    let side_plane_normal = (v2 - v1).normalized();
    let ref_face_normal: Vector = (side_plane_normal.y(), -side_plane_normal.x()).into();

    // ax + by = c, c is the distance from origin
    let ref_c = ref_face_normal * v1;
    let neg_side = -(side_plane_normal * v1);
    let pos_side = side_plane_normal * v2;

    if clip(-side_plane_normal, neg_side, &mut incident_face) < 2
        || clip(side_plane_normal, pos_side, &mut incident_face) < 2
    {
        trace!("incident face clipped below two points, pair skipped this frame");
        return Contact::default();
    }

    let normal = if flip {
        -ref_face_normal
    } else {
        ref_face_normal
    };

    // keep points behind the reference face
    let mut contact = Contact {
        normal,
        ..Default::default()
    };
    let mut total_depth = 0.;
    for point in incident_face {
        let separation = ref_face_normal * point - ref_c;
        if separation <= 0. {
            contact.points[contact.contact_count] = point;
            contact.contact_count += 1;
            total_depth += -separation;
        }
    }

    if contact.contact_count > 0 {
        contact.penetration = total_depth / contact.contact_count as FloatNum;
    }

    contact
}

/// Deepest separation of `b` along the face normals of `a`, with the face index.
/// A non negative result means a separating axis was found.
pub fn find_axis_least_penetration(
    position_a: Vector,
    polygon_a: &Polygon,
    position_b: Vector,
    polygon_b: &Polygon,
) -> (FloatNum, usize) {
    let rotation_a = polygon_a.rotation();
    let b_transpose = polygon_b.rotation().transpose();

    let mut best_distance = -FLT_MAX;
    let mut best_index = 0;

    for (i, (&normal, &vertex)) in polygon_a
        .normals()
        .iter()
        .zip(polygon_a.vertices())
        .enumerate()
    {
        // face normal and vertex of a in b's model space
        let n = b_transpose * (rotation_a * normal);
        let support = polygon_b.support(-n);
        let v = b_transpose * (rotation_a * vertex + position_a - position_b);

        let d = n * (support - v);
        if d > best_distance {
            best_distance = d;
            best_index = i;
        }
    }

    (best_distance, best_index)
}

/// World space edge of `incident` most anti parallel to the reference face normal.
pub fn find_incident_face(
    reference: &Polygon,
    reference_index: usize,
    position_incident: Vector,
    incident: &Polygon,
) -> [Vector; 2] {
    let reference_normal =
        incident.rotation().transpose() * (reference.rotation() * reference.normal(reference_index));

    let mut incident_index = 0;
    let mut min_dot = FLT_MAX;
    for (i, &normal) in incident.normals().iter().enumerate() {
        let dot = reference_normal * normal;
        if dot < min_dot {
            min_dot = dot;
            incident_index = i;
        }
    }

    let rotation = incident.rotation();
    [
        rotation * incident.vertex(incident_index) + position_incident,
        rotation * incident.vertex(incident_index + 1) + position_incident,
    ]
}

/// Clip `face` against the half plane `n . p <= c`, returns the kept point count.
pub fn clip(n: Vector, c: FloatNum, face: &mut [Vector; 2]) -> usize {
    let mut out = *face;
    let mut count = 0;

    let d1 = n * face[0] - c;
    let d2 = n * face[1] - c;

    if d1 <= 0. {
        out[count] = face[0];
        count += 1;
    }
    if d2 <= 0. {
        out[count] = face[1];
        count += 1;
    }

    // endpoints on different sides, strict to ignore -0.0
    if d1 * d2 < 0. {
        let alpha = d1 / (d1 - d2);
        out[count] = face[0] + (face[1] - face[0]) * alpha;
        count += 1;
    }

    *face = out;
    count
}
