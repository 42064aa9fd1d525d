//! Geodesic and local planar geometry primitives.
//!
//! All distances are in meters on a spherical Earth model. The local
//! projection is an equirectangular approximation, good enough for the
//! sub-kilometer spans of a single campus.

use geo::{Coord, Point};

/// Spherical Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (haversine).
///
/// Symmetric and deterministic; zero iff `p == q`.
pub fn geodesic_distance(p: Point<f64>, q: Point<f64>) -> f64 {
    let (lat_p, lat_q) = (p.y().to_radians(), q.y().to_radians());
    let d_lat = (q.y() - p.y()).to_radians();
    let d_lng = (q.x() - p.x()).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat_p.cos() * lat_q.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Projects a geographic point into a local meter frame centered on
/// `ref_lat_deg`. Valid only for short spans around the reference latitude.
pub fn project_local(p: Point<f64>, ref_lat_deg: f64) -> Coord<f64> {
    let scale = ref_lat_deg.to_radians().cos();
    Coord {
        x: p.x().to_radians() * scale * EARTH_RADIUS_M,
        y: p.y().to_radians() * EARTH_RADIUS_M,
    }
}

/// Inverse of [`project_local`] for the same reference latitude.
pub fn unproject_local(c: Coord<f64>, ref_lat_deg: f64) -> Point<f64> {
    let scale = ref_lat_deg.to_radians().cos();
    Point::new(
        (c.x / (scale * EARTH_RADIUS_M)).to_degrees(),
        (c.y / EARTH_RADIUS_M).to_degrees(),
    )
}

/// Closest point to `p` on the segment `a..b`.
///
/// The projection is computed in the local frame at `p`'s latitude with the
/// parameter clamped to the segment. Returns the geographic point and the
/// clamped parameter t in `[0, 1]`.
pub fn closest_point_on_segment(
    p: Point<f64>,
    a: Point<f64>,
    b: Point<f64>,
) -> (Point<f64>, f64) {
    let ref_lat = p.y();
    let pp = project_local(p, ref_lat);
    let pa = project_local(a, ref_lat);
    let pb = project_local(b, ref_lat);

    let (dx, dy) = (pb.x - pa.x, pb.y - pa.y);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        // Degenerate segment
        return (a, 0.0);
    }

    let t = (((pp.x - pa.x) * dx + (pp.y - pa.y) * dy) / len2).clamp(0.0, 1.0);
    let projected = Coord {
        x: pa.x + t * dx,
        y: pa.y + t * dy,
    };
    (unproject_local(projected, ref_lat), t)
}
