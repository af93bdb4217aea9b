/// Cells per region axis.
pub const REGION_SIZE: i32 = 16;

/// Integer coordinate of a region in region units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionCoord {
    pub rx: i32,
    pub ry: i32,
    pub rz: i32,
}

impl RegionCoord {
    #[inline]
    pub const fn new(rx: i32, ry: i32, rz: i32) -> Self {
        Self { rx, ry, rz }
    }

    /// Region holding the world cell `(wx, wy, wz)`.
    #[inline]
    pub fn containing(wx: i32, wy: i32, wz: i32) -> Self {
        Self::new(
            wx.div_euclid(REGION_SIZE),
            wy.div_euclid(REGION_SIZE),
            wz.div_euclid(REGION_SIZE),
        )
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            rx: self.rx + dx,
            ry: self.ry + dy,
            rz: self.rz + dz,
        }
    }

    /// World coordinate of the region's `(0, 0, 0)` cell.
    #[inline]
    pub fn origin(self) -> (i32, i32, i32) {
        (self.rx * REGION_SIZE, self.ry * REGION_SIZE, self.rz * REGION_SIZE)
    }

    #[inline]
    pub fn distance_sq(self, other: RegionCoord) -> i64 {
        let dx = i64::from(self.rx - other.rx);
        let dy = i64::from(self.ry - other.ry);
        let dz = i64::from(self.rz - other.rz);
        dx * dx + dy * dy + dz * dz
    }

    /// True when the camera region is this region or one of its 26 neighbors,
    /// so the camera may sit inside sealed space.
    #[inline]
    pub fn is_near(self, camera: RegionCoord) -> bool {
        self.distance_sq(camera) <= 3
    }
}

impl From<(i32, i32, i32)> for RegionCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_covers_the_26_neighborhood() {
        let c = RegionCoord::new(4, -2, 7);
        let mut near = 0;
        for dz in -2..=2 {
            for dy in -2..=2 {
                for dx in -2..=2 {
                    if c.offset(dx, dy, dz).is_near(c) {
                        near += 1;
                        assert!(dx.abs() <= 1 && dy.abs() <= 1 && dz.abs() <= 1);
                    }
                }
            }
        }
        assert_eq!(near, 27);
    }

    #[test]
    fn containing_rounds_toward_negative_infinity() {
        assert_eq!(RegionCoord::containing(0, 15, 16), RegionCoord::new(0, 0, 1));
        assert_eq!(RegionCoord::containing(-1, -16, -17), RegionCoord::new(-1, -1, -2));
        assert_eq!(RegionCoord::new(-1, 0, 2).origin(), (-16, 0, 32));
    }
}
