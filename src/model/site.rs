//! Dock sites, site masks, and the fixed five-slot site map

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DockError;

/// One of the five fixed positions a child may occupy in a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DockSite {
    Centre,
    Left,
    Right,
    Top,
    Bottom,
}

impl DockSite {
    /// All sites, Centre first, for uniform slot iteration
    pub const ALL: [DockSite; 5] = [
        DockSite::Centre,
        DockSite::Left,
        DockSite::Right,
        DockSite::Top,
        DockSite::Bottom,
    ];

    /// The four edge sites
    pub const EDGES: [DockSite; 4] = [
        DockSite::Left,
        DockSite::Right,
        DockSite::Top,
        DockSite::Bottom,
    ];

    /// Stable ordinal used for slot indexing
    pub fn index(self) -> usize {
        match self {
            DockSite::Centre => 0,
            DockSite::Left => 1,
            DockSite::Right => 2,
            DockSite::Top => 3,
            DockSite::Bottom => 4,
        }
    }

    pub fn is_edge(self) -> bool {
        self != DockSite::Centre
    }

    pub fn name(self) -> &'static str {
        match self {
            DockSite::Centre => "Centre",
            DockSite::Left => "Left",
            DockSite::Right => "Right",
            DockSite::Top => "Top",
            DockSite::Bottom => "Bottom",
        }
    }
}

impl fmt::Display for DockSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DockSite {
    type Err = DockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Centre" => Ok(DockSite::Centre),
            "Left" => Ok(DockSite::Left),
            "Right" => Ok(DockSite::Right),
            "Top" => Ok(DockSite::Top),
            "Bottom" => Ok(DockSite::Bottom),
            other => Err(DockError::BadLocation(other.to_string())),
        }
    }
}

/// Bit mask over dock sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DockMask(u8);

impl DockMask {
    pub const NONE: DockMask = DockMask(0);
    pub const ALL: DockMask = DockMask(0b11111);
    pub const EDGES: DockMask = DockMask(0b11110);

    pub fn of(site: DockSite) -> Self {
        DockMask(1 << site.index())
    }

    pub fn contains(self, site: DockSite) -> bool {
        self.0 & (1 << site.index()) != 0
    }

    pub fn insert(&mut self, site: DockSite) {
        self.0 |= 1 << site.index();
    }

    pub fn remove(&mut self, site: DockSite) {
        self.0 &= !(1 << site.index());
    }

    pub fn union(self, other: DockMask) -> DockMask {
        DockMask(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = DockSite> {
        DockSite::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<DockSite> for DockMask {
    fn from_iter<I: IntoIterator<Item = DockSite>>(iter: I) -> Self {
        let mut mask = DockMask::NONE;
        for site in iter {
            mask.insert(site);
        }
        mask
    }
}

/// Fixed-size array indexed by `DockSite`, keeping slot iteration uniform
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteMap<T>([T; 5]);

impl<T> SiteMap<T> {
    pub fn from_fn(mut f: impl FnMut(DockSite) -> T) -> Self {
        SiteMap([
            f(DockSite::Centre),
            f(DockSite::Left),
            f(DockSite::Right),
            f(DockSite::Top),
            f(DockSite::Bottom),
        ])
    }

    pub fn get(&self, site: DockSite) -> &T {
        &self.0[site.index()]
    }

    pub fn get_mut(&mut self, site: DockSite) -> &mut T {
        &mut self.0[site.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (DockSite, &T)> {
        DockSite::ALL.into_iter().map(move |s| (s, &self.0[s.index()]))
    }
}

impl<T> std::ops::Index<DockSite> for SiteMap<T> {
    type Output = T;

    fn index(&self, site: DockSite) -> &T {
        self.get(site)
    }
}

impl<T> std::ops::IndexMut<DockSite> for SiteMap<T> {
    fn index_mut(&mut self, site: DockSite) -> &mut T {
        self.get_mut(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_ordinals_are_stable() {
        assert_eq!(DockSite::Centre.index(), 0);
        assert_eq!(DockSite::Bottom.index(), 4);
        for (i, site) in DockSite::ALL.into_iter().enumerate() {
            assert_eq!(site.index(), i);
        }
    }

    #[test]
    fn test_site_name_round_trip() {
        for site in DockSite::ALL {
            assert_eq!(site.name().parse::<DockSite>().unwrap(), site);
        }
        assert!("Middle".parse::<DockSite>().is_err());
    }

    #[test]
    fn test_mask_operations() {
        let mut mask = DockMask::NONE;
        assert!(mask.is_empty());

        mask.insert(DockSite::Left);
        mask.insert(DockSite::Bottom);
        assert!(mask.contains(DockSite::Left));
        assert!(!mask.contains(DockSite::Centre));

        mask.remove(DockSite::Left);
        assert!(!mask.contains(DockSite::Left));

        let edges: DockMask = DockSite::EDGES.into_iter().collect();
        assert_eq!(edges, DockMask::EDGES);
        assert_eq!(edges.union(DockMask::of(DockSite::Centre)), DockMask::ALL);
    }

    #[test]
    fn test_site_map_indexing() {
        let mut map = SiteMap::from_fn(|s| s.index());
        assert_eq!(map[DockSite::Right], 2);
        map[DockSite::Right] = 9;
        assert_eq!(map[DockSite::Right], 9);
        assert_eq!(map.iter().count(), 5);
    }
}
