//! Serializable dock addresses and host descriptors
//!
//! A `DockLocation` names where a piece of content lives (or should live):
//! which tree host, the site address from that host's root down to a pane,
//! and the content's index within the pane. The descriptor string form is
//! what the layout document stores:
//!
//! ```text
//! main:Left,Centre:0
//! autohide(Bottom):Centre:2
//! float(3):Centre:0
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DockError;
use crate::model::host::{HostId, HostKind};
use crate::model::site::DockSite;

/// Address + host descriptor for one piece of content.
///
/// At most one of `auto_hide_site` / `floating_window` is set; neither set
/// means the main container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockLocation {
    /// Ordered dock sites from the host root to the pane
    pub address: Vec<DockSite>,
    /// Position within the pane's content list
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub auto_hide_site: Option<DockSite>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub floating_window: Option<u32>,
}

impl Default for DockLocation {
    fn default() -> Self {
        Self::main(vec![DockSite::Centre], 0)
    }
}

impl DockLocation {
    pub fn main(address: Vec<DockSite>, index: usize) -> Self {
        Self {
            address,
            index,
            auto_hide_site: None,
            floating_window: None,
        }
    }

    pub fn auto_hide(site: DockSite, index: usize) -> Self {
        Self {
            address: vec![DockSite::Centre],
            index,
            auto_hide_site: Some(site),
            floating_window: None,
        }
    }

    pub fn floating(window: u32, address: Vec<DockSite>, index: usize) -> Self {
        Self {
            address,
            index,
            auto_hide_site: None,
            floating_window: Some(window),
        }
    }

    /// Which kind of tree host this location names
    pub fn host_kind(&self) -> HostKind {
        if self.auto_hide_site.is_some() {
            HostKind::AutoHide
        } else if self.floating_window.is_some() {
            HostKind::Floating
        } else {
            HostKind::Main
        }
    }

    /// The concrete host this location names, if it is fully determined
    pub fn host(&self) -> HostId {
        if let Some(site) = self.auto_hide_site {
            HostId::AutoHide(site)
        } else if let Some(id) = self.floating_window {
            HostId::Floating(id)
        } else {
            HostId::Main
        }
    }

    fn joined_address(&self) -> String {
        self.address
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for DockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = self.joined_address();
        if let Some(site) = self.auto_hide_site {
            write!(f, "autohide({}):{}:{}", site, address, self.index)
        } else if let Some(id) = self.floating_window {
            write!(f, "float({}):{}:{}", id, address, self.index)
        } else {
            write!(f, "main:{}:{}", address, self.index)
        }
    }
}

impl FromStr for DockLocation {
    type Err = DockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || DockError::BadLocation(s.to_string());

        let mut parts = s.splitn(3, ':');
        let host = parts.next().ok_or_else(bad)?;
        let address_part = parts.next().ok_or_else(bad)?;
        let index_part = parts.next().ok_or_else(bad)?;

        let index: usize = index_part.parse().map_err(|_| bad())?;
        let address = if address_part.is_empty() {
            Vec::new()
        } else {
            address_part
                .split(',')
                .map(|name| name.parse::<DockSite>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| bad())?
        };

        if host == "main" {
            Ok(DockLocation::main(address, index))
        } else if let Some(inner) = host
            .strip_prefix("autohide(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let site = inner.parse::<DockSite>().map_err(|_| bad())?;
            Ok(DockLocation {
                address,
                index,
                auto_hide_site: Some(site),
                floating_window: None,
            })
        } else if let Some(inner) = host
            .strip_prefix("float(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let id: u32 = inner.parse().map_err(|_| bad())?;
            Ok(DockLocation::floating(id, address, index))
        } else {
            Err(bad())
        }
    }
}
