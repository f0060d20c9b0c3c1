//! Proportional/pixel sizing of the four edge regions at one branch level

use serde::{Deserialize, Serialize};

use super::site::DockSite;

/// Minimum extent reserved for the centre region when edges would overlap it
pub const MIN_CENTRE_SIZE: f32 = 50.0;

/// Per-branch sizing of the four edge regions.
///
/// Values below 1.0 are fractions of the available extent, values of 1.0 and
/// above are pixels. Values are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockSizeData {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for DockSizeData {
    fn default() -> Self {
        Self::quarters()
    }
}

/// Resolved pixel extents for the four edge regions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSizes {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl DockSizeData {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.max(0.0),
            top: top.max(0.0),
            right: right.max(0.0),
            bottom: bottom.max(0.0),
        }
    }

    /// Half-splits, used when a branch is allocated for an edge split
    pub fn halves() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5)
    }

    /// Quarter-splits, used for nested centre branches
    pub fn quarters() -> Self {
        Self::new(0.25, 0.25, 0.25, 0.25)
    }

    pub fn get(&self, site: DockSite) -> f32 {
        match site {
            DockSite::Centre => 0.0,
            DockSite::Left => self.left,
            DockSite::Right => self.right,
            DockSite::Top => self.top,
            DockSite::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, site: DockSite, value: f32) {
        let value = value.max(0.0);
        match site {
            DockSite::Centre => {}
            DockSite::Left => self.left = value,
            DockSite::Right => self.right = value,
            DockSite::Top => self.top = value,
            DockSite::Bottom => self.bottom = value,
        }
    }

    /// Compute pixel extents for all four edges within `width` x `height`.
    ///
    /// Opposing sides shrink proportionally when they would overlap the
    /// centre's minimum size.
    pub fn resolve(&self, width: f32, height: f32, min_centre: f32) -> ResolvedSizes {
        let (left, right) = Self::resolve_axis(self.left, self.right, width, min_centre);
        let (top, bottom) = Self::resolve_axis(self.top, self.bottom, height, min_centre);
        ResolvedSizes {
            left,
            top,
            right,
            bottom,
        }
    }

    fn resolve_axis(a: f32, b: f32, extent: f32, min_centre: f32) -> (f32, f32) {
        let to_px = |v: f32| if v < 1.0 { v * extent } else { v };
        let mut a_px = to_px(a);
        let mut b_px = to_px(b);

        let available = (extent - min_centre).max(0.0);
        let used = a_px + b_px;
        if used > available && used > 0.0 {
            let scale = available / used;
            a_px *= scale;
            b_px *= scale;
        }
        (a_px, b_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_vs_pixel_values() {
        let sizes = DockSizeData::new(0.25, 100.0, 0.25, 0.0);
        let r = sizes.resolve(800.0, 600.0, MIN_CENTRE_SIZE);
        assert_eq!(r.left, 200.0);
        assert_eq!(r.right, 200.0);
        assert_eq!(r.top, 100.0);
        assert_eq!(r.bottom, 0.0);
    }

    #[test]
    fn test_opposing_sides_shrink_proportionally() {
        // 300 + 300 pixels in a 400-wide area with a 50px centre minimum:
        // only 350px available, split 175/175.
        let sizes = DockSizeData::new(300.0, 0.0, 300.0, 0.0);
        let r = sizes.resolve(400.0, 400.0, 50.0);
        assert!((r.left - 175.0).abs() < 0.01);
        assert!((r.right - 175.0).abs() < 0.01);
        assert!((r.left + r.right) <= 350.0 + 0.01);
    }

    #[test]
    fn test_unequal_sides_keep_their_ratio_when_shrinking() {
        let sizes = DockSizeData::new(300.0, 0.0, 100.0, 0.0);
        let r = sizes.resolve(250.0, 250.0, 50.0);
        // 200px available out of 400px requested: everything halves.
        assert!((r.left - 150.0).abs() < 0.01);
        assert!((r.right - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_negative_inputs_clamp_to_zero() {
        let sizes = DockSizeData::new(-5.0, -1.0, 0.5, 0.5);
        assert_eq!(sizes.left, 0.0);
        assert_eq!(sizes.top, 0.0);
    }

    #[test]
    fn test_get_set_by_site() {
        let mut sizes = DockSizeData::halves();
        sizes.set(DockSite::Bottom, 120.0);
        assert_eq!(sizes.get(DockSite::Bottom), 120.0);
        assert_eq!(sizes.get(DockSite::Centre), 0.0);
        sizes.set(DockSite::Centre, 99.0); // ignored
        assert_eq!(sizes.get(DockSite::Centre), 0.0);
    }
}
