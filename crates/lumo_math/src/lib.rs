// Re-export glam for convenience
pub use glam::*;

// Lumo math types
mod ray;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_creation() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(DVec3::X.cross(DVec3::Y), DVec3::Z);
    }

    #[test]
    fn test_dvec3_modulate() {
        // Component-wise multiplication models color modulation
        let a = DVec3::new(0.5, 1.0, 0.0);
        let b = DVec3::new(0.5, 0.25, 4.0);
        assert_eq!(a * b, DVec3::new(0.25, 0.25, 0.0));
    }
}
