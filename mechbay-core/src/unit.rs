use serde::Serialize;

use crate::header::{ArmorProfile, DesignHeader};
use crate::resolver::{FailedEquipment, ResolvedEquipment, SlotEntry};
use crate::slots::Location;

/// One row of the file's weapon summary table. The critical arrays are
/// authoritative for placement; this table is retained for the text
/// export's weapon list and ammo linkage.
#[derive(Clone, Debug, Serialize)]
pub struct WeaponEntry {
    pub qty: u32,
    pub type_code: u32,
    pub location: Location,
    pub ammo_index: u32,
    pub label: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LocationReport {
    pub location: Location,
    pub slots: Vec<SlotEntry>,
}

/// A fully assembled unit: header, armor, weapon summary, per-location
/// placements, and whatever codes failed to resolve along the way.
#[derive(Clone, Debug, Serialize)]
pub struct UnitDesign {
    pub header: DesignHeader,
    pub armor: ArmorProfile,
    pub weapons: Vec<WeaponEntry>,
    pub locations: Vec<LocationReport>,
    pub equipment: Vec<ResolvedEquipment>,
    pub failed_equipment: Vec<FailedEquipment>,
    pub overview: String,
    pub capabilities: String,
    pub history: String,
}

impl UnitDesign {
    pub fn location(&self, location: Location) -> Option<&LocationReport> {
        self.locations.iter().find(|r| r.location == location)
    }

    /// True when every critical code resolved. A unit with lookup
    /// misses still assembles; this flags it for reporting.
    pub fn loaded_cleanly(&self) -> bool {
        self.failed_equipment.is_empty()
    }
}
