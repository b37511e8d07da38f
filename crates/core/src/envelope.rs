//! CG envelope geometry
//!
//! Pure predicates over the certified envelope polygon. The polygon lives in the
//! (CG, weight) plane: x is the CG in inches, y is the gross weight in pounds.
//! Vertices are taken in the order the aircraft data declares them, with the last
//! vertex joined back to the first.
//!
//! Both queries are exposed on their own so chart renderers can draw the
//! weight-dependent limit lines without running a full calculation.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::core_types::aircraft::EnvelopePoint;
use crate::core_types::units::{Inches, Pounds};

/// Fewer vertices than this cannot enclose an area
const MIN_POLYGON_VERTICES: usize = 3;

/// Forward and aft CG limits where a horizontal weight line cuts the envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgLimits {
    pub forward: Inches,
    pub aft: Inches,
}

#[inline]
fn vertex(point: &EnvelopePoint) -> Point2<f64> {
    Point2::new(*point.cg, *point.weight)
}

/// Even-odd ray-casting containment test.
///
/// An edge is counted when exactly one endpoint lies strictly above the query
/// weight, and the query point is counted as left of the crossing only when its
/// CG is strictly smaller. As a consequence a point on a horizontal lower edge
/// is inside while a point on a horizontal upper edge is outside; callers rely
/// on that asymmetry staying exactly as it is.
///
/// Returns `false` for envelopes with fewer than three vertices.
///
/// # Example
/// ```
/// use weight_balance_core::core_types::{EnvelopePoint, Inches, Pounds};
/// use weight_balance_core::envelope::is_point_in_envelope;
///
/// let envelope = [
///     EnvelopePoint::new(1500.0, 35.0),
///     EnvelopePoint::new(2300.0, 35.0),
///     EnvelopePoint::new(2300.0, 47.0),
///     EnvelopePoint::new(1500.0, 47.0),
/// ];
/// assert!(is_point_in_envelope(Pounds::new(2000.0), Inches::new(40.0), &envelope));
/// assert!(!is_point_in_envelope(Pounds::new(2300.0), Inches::new(50.0), &envelope));
/// ```
pub fn is_point_in_envelope(weight: Pounds, cg: Inches, envelope: &[EnvelopePoint]) -> bool {
    let n = envelope.len();
    if n < MIN_POLYGON_VERTICES {
        return false;
    }

    let (x, y) = (*cg, *weight);
    let mut inside = false;

    // Pair each vertex i with its predecessor j = i - 1 (mod n)
    let previous = envelope.iter().cycle().skip(n - 1);
    for (a, b) in envelope.iter().zip(previous) {
        let (pi, pj) = (vertex(a), vertex(b));

        if (pi.y > y) != (pj.y > y) {
            let crossing = (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x;
            if x < crossing {
                inside = !inside;
            }
        }
    }

    inside
}

/// Slice the envelope at `weight` and return the CG limits along that line.
///
/// Every edge whose closed weight interval contains `weight` contributes: a
/// horizontal edge contributes both endpoint CGs, any other edge the linearly
/// interpolated CG. Forward is the smallest contribution and aft the largest.
///
/// Pass the actual loaded weight; on trapezoidal envelopes the forward limit
/// moves with it.
///
/// Returns `None` for envelopes with fewer than three vertices, or when the
/// weight lies outside the envelope's weight span.
pub fn limits_at_weight(weight: Pounds, envelope: &[EnvelopePoint]) -> Option<CgLimits> {
    if envelope.len() < MIN_POLYGON_VERTICES {
        return None;
    }

    let w = *weight;
    let mut forward = f64::INFINITY;
    let mut aft = f64::NEG_INFINITY;
    let mut found = false;

    let mut record = |cg: f64| {
        forward = forward.min(cg);
        aft = aft.max(cg);
        found = true;
    };

    // Edge i runs from vertex i to vertex i + 1 (mod n)
    let next = envelope.iter().cycle().skip(1);
    for (a, b) in envelope.iter().zip(next) {
        let (p, q) = (vertex(a), vertex(b));

        if !(p.y.min(q.y)..=p.y.max(q.y)).contains(&w) {
            continue;
        }

        if p.y == q.y {
            record(p.x);
            record(q.x);
        } else {
            let t = (w - p.y) / (q.y - p.y);
            record(p.x + t * (q.x - p.x));
        }
    }

    if found {
        Some(CgLimits {
            forward: Inches::new(forward),
            aft: Inches::new(aft),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Aircraft;

    fn rectangle() -> Vec<EnvelopePoint> {
        vec![
            EnvelopePoint::new(1500.0, 35.0),
            EnvelopePoint::new(2300.0, 35.0),
            EnvelopePoint::new(2300.0, 47.0),
            EnvelopePoint::new(1500.0, 47.0),
        ]
    }

    fn inside(envelope: &[EnvelopePoint], weight: f64, cg: f64) -> bool {
        is_point_in_envelope(Pounds::new(weight), Inches::new(cg), envelope)
    }

    #[test]
    fn test_rectangle_containment() {
        let env = rectangle();
        assert!(inside(&env, 2000.0, 40.0));
        assert!(!inside(&env, 2400.0, 40.0), "above max weight");
        assert!(!inside(&env, 1400.0, 40.0), "below min weight");
        assert!(!inside(&env, 2000.0, 48.0), "aft of envelope");
        assert!(!inside(&env, 2000.0, 34.0), "forward of envelope");
    }

    #[test]
    fn test_point_beyond_aft_limit_at_max_weight() {
        assert!(!inside(&rectangle(), 2300.0, 50.0));
    }

    #[test]
    fn test_horizontal_edge_asymmetry() {
        let env = rectangle();
        // Lower edge counts as inside, upper edge as outside
        assert!(inside(&env, 1500.0, 40.0));
        assert!(!inside(&env, 2300.0, 40.0));
        // Left edge is inside, right edge outside (strict x < crossing)
        assert!(inside(&env, 2000.0, 35.0));
        assert!(!inside(&env, 2000.0, 47.0));
    }

    #[test]
    fn test_degenerate_envelopes() {
        let two = [EnvelopePoint::new(1500.0, 35.0), EnvelopePoint::new(2300.0, 47.0)];
        assert!(!inside(&two, 2000.0, 40.0));
        assert!(!inside(&[], 2000.0, 40.0));
        assert_eq!(limits_at_weight(Pounds::new(2000.0), &two), None);
        assert_eq!(limits_at_weight(Pounds::new(2000.0), &[]), None);
    }

    #[test]
    fn test_vertex_order_direction_does_not_matter() {
        let mut env = rectangle();
        env.reverse();
        assert!(inside(&env, 2000.0, 40.0));
        assert!(!inside(&env, 2000.0, 48.0));
    }

    #[test]
    fn test_trapezoid_forward_limit_interpolates() {
        let env = Aircraft::cessna_172n().cg_envelope;

        let limits = limits_at_weight(Pounds::new(2125.0), &env).unwrap();
        assert_eq!(limits.forward, Inches::new(36.75));
        assert_eq!(limits.aft, Inches::new(47.3));

        let limits = limits_at_weight(Pounds::new(2000.0), &env).unwrap();
        assert!(*limits.forward > 35.0 && *limits.forward < 38.5);
    }

    #[test]
    fn test_limits_at_envelope_extremes() {
        let env = Aircraft::cessna_172n().cg_envelope;

        let top = limits_at_weight(Pounds::new(2300.0), &env).unwrap();
        assert_eq!(top, CgLimits { forward: Inches::new(38.5), aft: Inches::new(47.3) });

        let bottom = limits_at_weight(Pounds::new(1500.0), &env).unwrap();
        assert_eq!(bottom, CgLimits { forward: Inches::new(35.0), aft: Inches::new(47.3) });
    }

    #[test]
    fn test_limits_outside_weight_span() {
        let env = Aircraft::cessna_172n().cg_envelope;
        assert_eq!(limits_at_weight(Pounds::new(1499.9), &env), None);
        assert_eq!(limits_at_weight(Pounds::new(2300.1), &env), None);
        assert_eq!(limits_at_weight(Pounds::new(f64::NAN), &env), None);
    }

    #[test]
    fn test_weight_dependent_containment_on_trapezoid() {
        let env = Aircraft::cessna_172n().cg_envelope;
        // 36.0 in is legal at 1900 lb but forward of the limit at 2250 lb
        assert!(inside(&env, 1900.0, 36.0));
        assert!(!inside(&env, 2250.0, 36.0));
    }
}
