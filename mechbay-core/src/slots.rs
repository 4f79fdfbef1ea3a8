use serde::Serialize;

/// Every body location carries a fixed-length array of critical slots.
pub const SLOTS_PER_LOCATION: usize = 12;

const REAR_FLAG: u32 = 0x8000_0000;

/// One raw critical slot value as stored in the design file.
///
/// Bit 31 marks rear-mounted equipment and is stripped before lookup.
/// The low 16 bits select the code-table entry; bits 16-23 carry the
/// ammo sub-index for rounds-per-ton disambiguation. Zero is the
/// empty-slot sentinel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CriticalCode(pub u32);

pub(crate) const EMPTY: CriticalCode = CriticalCode(0);

impl CriticalCode {
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn rear_mounted(self) -> bool {
        self.0 & REAR_FLAG != 0
    }

    fn flagless(self) -> u32 {
        self.0 & !REAR_FLAG
    }

    pub fn table_index(self) -> u16 {
        (self.flagless() & 0xFFFF) as u16
    }

    pub fn ammo_subindex(self) -> u8 {
        ((self.flagless() >> 16) & 0xFF) as u8
    }

    /// True when the flagless value lies above the plain-code range and
    /// therefore carries an ammo sub-index in its upper byte.
    pub fn has_ammo_subindex(self) -> bool {
        self.flagless() > 0xFFFF
    }
}

pub type LocationSlots = [CriticalCode; SLOTS_PER_LOCATION];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Location {
    LeftArm,
    RightArm,
    LeftTorso,
    RightTorso,
    CenterTorso,
    LeftLeg,
    RightLeg,
    Head,
}

impl Location {
    /// Order in which the per-location critical arrays appear in the
    /// binary file.
    pub(crate) const FILE_ORDER: [Location; 8] = [
        Location::LeftArm,
        Location::LeftTorso,
        Location::LeftLeg,
        Location::RightArm,
        Location::RightTorso,
        Location::RightLeg,
        Location::Head,
        Location::CenterTorso,
    ];

    /// Order in which locations are resolved: legs, then arms, then
    /// torsos, then head. Cross-location consolidation depends on this
    /// ordering staying fixed.
    pub(crate) const RESOLVE_ORDER: [Location; 8] = [
        Location::LeftLeg,
        Location::RightLeg,
        Location::LeftArm,
        Location::RightArm,
        Location::LeftTorso,
        Location::RightTorso,
        Location::CenterTorso,
        Location::Head,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Location::LeftArm => "Left Arm",
            Location::RightArm => "Right Arm",
            Location::LeftTorso => "Left Torso",
            Location::RightTorso => "Right Torso",
            Location::CenterTorso => "Center Torso",
            Location::LeftLeg => "Left Leg",
            Location::RightLeg => "Right Leg",
            Location::Head => "Head",
        }
    }

    pub(crate) fn is_arm(self) -> bool {
        matches!(self, Location::LeftArm | Location::RightArm)
    }

    pub(crate) fn file_index(self) -> usize {
        Location::FILE_ORDER
            .iter()
            .position(|&l| l == self)
            .unwrap_or(0)
    }

    /// Location code used by the weapon summary table (same numbering
    /// as the critical-array file order).
    pub(crate) fn from_table_code(code: u32) -> Option<Location> {
        Location::FILE_ORDER.get(code as usize).copied()
    }

    /// Lower rank means harder to fit equipment into. Used to pick the
    /// canonical location for a weapon whose slots span two locations.
    pub(crate) fn restrictiveness(self) -> u8 {
        match self {
            Location::Head => 0,
            Location::LeftLeg | Location::RightLeg => 1,
            Location::LeftArm | Location::RightArm => 2,
            Location::LeftTorso | Location::RightTorso => 3,
            Location::CenterTorso => 4,
        }
    }

    /// Structural adjacency for split-weapon consolidation. A weapon
    /// may only span two locations that share a transfer boundary.
    pub(crate) fn adjacent(self, other: Location) -> bool {
        use Location::*;
        matches!(
            (self, other),
            (LeftArm, LeftTorso)
                | (LeftTorso, LeftArm)
                | (RightArm, RightTorso)
                | (RightTorso, RightArm)
                | (LeftLeg, LeftTorso)
                | (LeftTorso, LeftLeg)
                | (RightLeg, RightTorso)
                | (RightTorso, RightLeg)
                | (LeftTorso, CenterTorso)
                | (CenterTorso, LeftTorso)
                | (RightTorso, CenterTorso)
                | (CenterTorso, RightTorso)
                | (Head, CenterTorso)
                | (CenterTorso, Head)
        )
    }
}

/// Stable left-compaction of a slot array: all occupied entries slide
/// to the front in their original relative order, empties trail.
///
/// Single linear pass: once an occupied value is moved into the write
/// position the scan resumes after it rather than restarting, so
/// re-running this reactively mid-resolution stays cheap.
pub(crate) fn compact(slots: &mut LocationSlots) {
    let mut write = 0;
    while write < SLOTS_PER_LOCATION && !slots[write].is_empty() {
        write += 1;
    }

    let mut read = write;
    while read < SLOTS_PER_LOCATION {
        if !slots[read].is_empty() {
            slots[write] = slots[read];
            slots[read] = EMPTY;
            write += 1;
        }
        read += 1;
    }
}
