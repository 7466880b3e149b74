//! Sampling helpers for the stochastic renderers.

use lumo_math::DVec3;
use rand::Rng;

/// Tent (triangle) filter offset in [-1, 1].
///
/// Transforms a uniform draw so that sub-pixel jitter is distributed
/// as a triangle centered on the pixel, weighting samples nearer the
/// pixel center more heavily than a box filter would.
pub fn tent_offset<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let r = 2.0 * rng.gen::<f64>();
    if r < 1.0 {
        r.sqrt() - 1.0
    } else {
        1.0 - (2.0 - r).sqrt()
    }
}

/// Mirror direction `d` about the normal `n`.
#[inline]
pub fn reflect(d: DVec3, n: DVec3) -> DVec3 {
    d - 2.0 * d.dot(n) * n
}

/// Cosine-weighted hemisphere direction around the oriented normal
/// `nl`.
///
/// Azimuth is uniform over 2 pi; the polar angle uses the sqrt
/// transform so the density is proportional to cos(theta). The local
/// basis is built from whichever world axis is less parallel to `nl`.
pub fn cosine_hemisphere<R: Rng + ?Sized>(nl: DVec3, rng: &mut R) -> DVec3 {
    let r1 = 2.0 * std::f64::consts::PI * rng.gen::<f64>();
    let r2: f64 = rng.gen();
    let r2s = r2.sqrt();

    let w = nl;
    let reference = if w.x.abs() > 0.1 { DVec3::Y } else { DVec3::X };
    let u = reference.cross(w).normalize();
    let v = w.cross(u);

    (u * (r1.cos() * r2s) + v * (r1.sin() * r2s) + w * (1.0 - r2).sqrt()).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tent_offset_range_and_center() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut sum = 0.0;
        for _ in 0..10_000 {
            let dx = tent_offset(&mut rng);
            assert!((-1.0..=1.0).contains(&dx));
            sum += dx;
        }
        // Symmetric around zero
        assert!((sum / 10_000.0).abs() < 0.02);
    }

    #[test]
    fn test_reflect() {
        let d = DVec3::new(1.0, 0.0, -1.0).normalize();
        let r = reflect(d, DVec3::Z);
        assert!((r - DVec3::new(1.0, 0.0, 1.0).normalize()).length() < 1e-12);
    }

    #[test]
    fn test_cosine_hemisphere_stays_above_surface() {
        let mut rng = StdRng::seed_from_u64(11);
        let normals = [
            DVec3::Z,
            DVec3::X,
            DVec3::new(1.0, -2.0, 0.5).normalize(),
        ];

        for nl in normals {
            for _ in 0..1_000 {
                let d = cosine_hemisphere(nl, &mut rng);
                assert!((d.length() - 1.0).abs() < 1e-9);
                assert!(d.dot(nl) > 0.0);
            }
        }
    }
}
