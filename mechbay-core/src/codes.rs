use serde::Serialize;

use crate::slots::CriticalCode;

/// Label given to a zero code. Zero always means an empty slot, no
/// matter which tech base is in play.
pub const EMPTY_LABEL: &str = "-Empty-";

/// A concrete ruleset family. Mixed designs still resolve every code
/// against one of these two, chosen per subsystem.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum BaseTech {
    InnerSphere,
    Clan,
}

impl BaseTech {
    pub fn name(self) -> &'static str {
        match self {
            BaseTech::InnerSphere => "Inner Sphere",
            BaseTech::Clan => "Clan",
        }
    }

    pub(crate) fn from_code(code: u32) -> Option<BaseTech> {
        match code {
            0 => Some(BaseTech::InnerSphere),
            1 => Some(BaseTech::Clan),
            _ => None,
        }
    }
}

/// Per-subsystem base overrides. Present only on mixed designs; a
/// non-mixed design resolves everything against its single base.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SubsystemBases {
    pub engine: BaseTech,
    pub heat_sinks: BaseTech,
    pub physical_weapons: BaseTech,
    pub myomer: BaseTech,
    pub targeting_computer: BaseTech,
    pub armor: BaseTech,
}

impl SubsystemBases {
    pub(crate) fn uniform(base: BaseTech) -> Self {
        Self {
            engine: base,
            heat_sinks: base,
            physical_weapons: base,
            myomer: base,
            targeting_computer: base,
            armor: base,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TechBase {
    InnerSphere,
    Clan,
    Mixed {
        preferred: BaseTech,
        subsystems: SubsystemBases,
    },
}

impl TechBase {
    pub fn name(&self) -> &'static str {
        match self {
            TechBase::InnerSphere => "Inner Sphere",
            TechBase::Clan => "Clan",
            TechBase::Mixed {
                preferred: BaseTech::InnerSphere,
                ..
            } => "Mixed (IS Chassis)",
            TechBase::Mixed {
                preferred: BaseTech::Clan,
                ..
            } => "Mixed (Clan Chassis)",
        }
    }
}

/// Which subsystem a critical code belongs to, for mixed-base routing.
/// The ranges are fixed by the authoring format.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Subsystem {
    Engine,
    PhysicalWeapon,
    Myomer,
    TargetingComputer,
    General,
}

pub(crate) fn subsystem_of(index: u16) -> Subsystem {
    match index {
        0x28..=0x2F => Subsystem::Engine,
        0x60..=0x6F => Subsystem::PhysicalWeapon,
        0x70..=0x77 => Subsystem::Myomer,
        0x78..=0x7F => Subsystem::TargetingComputer,
        _ => Subsystem::General,
    }
}

/// Which concrete base table a code consults under the given tech
/// base. Mixed designs pick the per-subsystem override, defaulting to
/// the design's preferred base for everything else.
pub(crate) fn base_for(tech: &TechBase, sub: Subsystem) -> BaseTech {
    match tech {
        TechBase::InnerSphere => BaseTech::InnerSphere,
        TechBase::Clan => BaseTech::Clan,
        TechBase::Mixed {
            preferred,
            subsystems,
        } => match sub {
            Subsystem::Engine => subsystems.engine,
            Subsystem::PhysicalWeapon => subsystems.physical_weapons,
            Subsystem::Myomer => subsystems.myomer,
            Subsystem::TargetingComputer => subsystems.targeting_computer,
            Subsystem::General => *preferred,
        },
    }
}

/// Which table a lookup consults: the shared table applies to every
/// design, the per-base tables only to the base actually selected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum CodeTable {
    Shared,
    PerBase(BaseTech),
}

// Actuator codes the arm pre-pass reconciles against the chassis
// type, and the jump jet code whose label depends on a header flag.
pub(crate) const LOWER_ARM_ACTUATOR: u16 = 0x03;
pub(crate) const HAND_ACTUATOR: u16 = 0x04;
pub(crate) const LOWER_LEG_ACTUATOR: u16 = 0x07;
pub(crate) const FOOT_ACTUATOR: u16 = 0x08;
pub(crate) const JUMP_JET: u16 = 0x0F;

pub(crate) fn is_system(index: u16) -> bool {
    (0x01..=0x0D).contains(&index)
}

/// True for labels the shared table reserves for system placements.
/// The block text format carries labels rather than codes, so its
/// loader classifies slots by name.
pub(crate) fn is_system_label(label: &str) -> bool {
    (0x01..=0x0D).any(|index| shared_label(index) == Some(label))
}

pub(crate) fn is_limb_actuator(index: u16) -> bool {
    matches!(
        index,
        LOWER_ARM_ACTUATOR | HAND_ACTUATOR | LOWER_LEG_ACTUATOR | FOOT_ACTUATOR
    )
}

fn table_label(table: CodeTable, index: u16) -> Option<&'static str> {
    match table {
        CodeTable::Shared => shared_label(index),
        CodeTable::PerBase(BaseTech::InnerSphere) => inner_sphere_label(index),
        CodeTable::PerBase(BaseTech::Clan) => clan_label(index),
    }
}

/// Tier 1: codes shared across all tech bases. Structural slots,
/// movement gear and base-neutral equipment.
fn shared_label(index: u16) -> Option<&'static str> {
    let label = match index {
        0x01 => "Shoulder",
        0x02 => "Upper Arm Actuator",
        0x03 => "Lower Arm Actuator",
        0x04 => "Hand Actuator",
        0x05 => "Hip",
        0x06 => "Upper Leg Actuator",
        0x07 => "Lower Leg Actuator",
        0x08 => "Foot Actuator",
        0x09 => "Life Support",
        0x0A => "Sensors",
        0x0B => "Cockpit",
        0x0C => "Engine",
        0x0D => "Gyro",
        0x0E => "Heat Sink",
        0x0F => "Jump Jet",
        0x10 => "Endo Steel",
        0x11 => "Ferro-Fibrous",
        0x12 => "CASE",
        0x13 => "Stealth Armor",
        0x14 => "Guardian ECM Suite",
        0x15 => "Beagle Active Probe",
        0x16 => "C3 Slave Unit",
        0x17 => "C3 Master Computer",
        0x18 => "TAG",
        0x19 => "Supercharger",
        0x1A => "MASC",
        0x1B => "Coolant Pod",
        0x1C => "Searchlight",
        0x1D => "Cargo Bay",
        0x1E => "Communications Equipment",
        0x1F => "Remote Sensor Dispenser",
        _ => return None,
    };
    Some(label)
}

/// Tier 2, Inner Sphere. Consulted only after a Tier 1 miss.
fn inner_sphere_label(index: u16) -> Option<&'static str> {
    let label = match index {
        // Engine-subsystem criticals.
        0x28 => "XL Engine",
        0x29 => "Light Engine",
        0x2A => "Compact Engine",
        0x2B => "XXL Engine",

        // Energy weapons.
        0x30 => "Small Laser",
        0x31 => "Medium Laser",
        0x32 => "Large Laser",
        0x33 => "PPC",
        0x34 => "ER Large Laser",
        0x35 => "ER PPC",
        0x36 => "Small Pulse Laser",
        0x37 => "Medium Pulse Laser",
        0x38 => "Large Pulse Laser",
        0x39 => "Flamer",

        // Ballistic weapons.
        0x3A => "Machine Gun",
        0x3B => "AC/2",
        0x3C => "AC/5",
        0x3D => "AC/10",
        0x3E => "AC/20",
        0x3F => "Ultra AC/5",
        0x40 => "LB 10-X AC",
        0x41 => "Gauss Rifle",

        // Missile weapons.
        0x42 => "LRM 5",
        0x43 => "LRM 10",
        0x44 => "LRM 15",
        0x45 => "LRM 20",
        0x46 => "SRM 2",
        0x47 => "SRM 4",
        0x48 => "SRM 6",
        0x49 => "Streak SRM 2",
        0x4A => "NARC Missile Beacon",
        0x4B => "Anti-Missile System",

        // Physical weapons.
        0x60 => "Hatchet",
        0x61 => "Sword",
        0x62 => "Retractable Blade",

        // Myomer systems.
        0x70 => "Triple Strength Myomer",
        0x71 => "Industrial Triple Strength Myomer",

        // Fire control.
        0x78 => "Targeting Computer",

        // Ammunition.
        0x80 => "AC/2 Ammo",
        0x81 => "AC/5 Ammo",
        0x82 => "AC/10 Ammo",
        0x83 => "AC/20 Ammo",
        0x84 => "Ultra AC/5 Ammo",
        0x85 => "LB 10-X AC Ammo",
        0x86 => "LB 10-X Cluster Ammo",
        0x87 => "Gauss Ammo",
        0x88 => "Machine Gun Ammo",
        0x89 => "LRM 5 Ammo",
        0x8A => "LRM 10 Ammo",
        0x8B => "LRM 15 Ammo",
        0x8C => "LRM 20 Ammo",
        0x8D => "SRM 2 Ammo",
        0x8E => "SRM 4 Ammo",
        0x8F => "SRM 6 Ammo",
        0x90 => "Streak SRM 2 Ammo",
        0x91 => "NARC Pods",
        0x92 => "AMS Ammo",
        _ => return None,
    };
    Some(label)
}

/// Tier 2, Clan. Sparser than the Inner Sphere table; Clan designs
/// have no physical weapons, so that whole range misses here.
fn clan_label(index: u16) -> Option<&'static str> {
    let label = match index {
        // Engine-subsystem criticals.
        0x28 => "XL Engine (Clan)",
        0x2B => "XXL Engine (Clan)",

        // Energy weapons.
        0x30 => "ER Small Laser",
        0x31 => "ER Medium Laser",
        0x32 => "ER Large Laser (Clan)",
        0x33 => "ER PPC (Clan)",
        0x34 => "Heavy Large Laser",
        0x35 => "Heavy Medium Laser",
        0x36 => "Small Pulse Laser (Clan)",
        0x37 => "Medium Pulse Laser (Clan)",
        0x38 => "Large Pulse Laser (Clan)",
        0x39 => "Flamer (Clan)",

        // Ballistic weapons.
        0x3A => "Machine Gun (Clan)",
        0x3B => "Ultra AC/2",
        0x3C => "Ultra AC/5 (Clan)",
        0x3D => "Ultra AC/10",
        0x3E => "Ultra AC/20",
        0x3F => "LB 2-X AC",
        0x40 => "LB 10-X AC (Clan)",
        0x41 => "Gauss Rifle (Clan)",

        // Missile weapons.
        0x42 => "LRM 5 (Clan)",
        0x43 => "LRM 10 (Clan)",
        0x44 => "LRM 15 (Clan)",
        0x45 => "LRM 20 (Clan)",
        0x46 => "SRM 2 (Clan)",
        0x47 => "SRM 4 (Clan)",
        0x48 => "SRM 6 (Clan)",
        0x49 => "Streak SRM 4",
        0x4A => "NARC Missile Beacon (Clan)",
        0x4B => "Anti-Missile System (Clan)",

        // Fire control.
        0x78 => "Targeting Computer (Clan)",

        // Ammunition.
        0x80 => "Ultra AC/2 Ammo",
        0x81 => "Ultra AC/5 Ammo",
        0x82 => "Ultra AC/10 Ammo",
        0x83 => "Ultra AC/20 Ammo",
        0x85 => "LB 10-X AC Ammo (Clan)",
        0x87 => "Gauss Ammo (Clan)",
        0x88 => "Machine Gun Ammo (Clan)",
        0x89 => "LRM 5 Ammo (Clan)",
        0x8A => "LRM 10 Ammo (Clan)",
        0x8B => "LRM 15 Ammo (Clan)",
        0x8C => "LRM 20 Ammo (Clan)",
        0x8D => "SRM 2 Ammo (Clan)",
        0x8E => "SRM 4 Ammo (Clan)",
        0x8F => "SRM 6 Ammo (Clan)",
        0x90 => "Streak SRM 4 Ammo",
        0x92 => "AMS Ammo (Clan)",
        _ => return None,
    };
    Some(label)
}

/// Ammo labels that vary only by rounds per ton all share this suffix;
/// the decoded sub-index disambiguates them.
const AMMO_NAME_SUFFIX: &str = " Ammo";

/// Resolve a critical code to a human-readable label.
///
/// Lookup order: the shared table first; then, for codes in the
/// ammo-disambiguation range, the base code with a count suffix;
/// finally the tech-base table selected by `tech` (per subsystem for
/// mixed designs). `hint` overrides the code's own subsystem
/// classification when the caller already knows it. A miss in every
/// tier returns `None` - the caller must treat that as unresolved, not
/// as empty.
pub fn resolve(code: CriticalCode, tech: &TechBase, hint: Option<Subsystem>) -> Option<String> {
    if code.is_empty() {
        return Some(EMPTY_LABEL.to_string());
    }

    let index = code.table_index();
    if let Some(label) = table_label(CodeTable::Shared, index) {
        return Some(label.to_string());
    }

    let sub = hint.unwrap_or_else(|| subsystem_of(index));
    let base = base_for(tech, sub);

    if code.has_ammo_subindex() {
        let label = table_label(CodeTable::PerBase(base), index)?;
        if label.ends_with(AMMO_NAME_SUFFIX) {
            return Some(format!("{} ({})", label, code.ammo_subindex()));
        }
        return Some(label.to_string());
    }

    table_label(CodeTable::PerBase(base), index).map(str::to_string)
}

/// Required critical count for weapons large enough to split across
/// two locations. Anything absent here never splits.
pub(crate) fn split_slot_count(base: BaseTech, index: u16) -> Option<usize> {
    match (base, index) {
        (BaseTech::InnerSphere, 0x3D) => Some(7),  // AC/10
        (BaseTech::InnerSphere, 0x3E) => Some(10), // AC/20
        (BaseTech::InnerSphere, 0x40) => Some(6),  // LB 10-X AC
        (BaseTech::InnerSphere, 0x41) => Some(7),  // Gauss Rifle
        (BaseTech::InnerSphere, 0x45) => Some(5),  // LRM 20
        (BaseTech::Clan, 0x3E) => Some(8),         // Ultra AC/20
        (BaseTech::Clan, 0x41) => Some(6),         // Gauss Rifle
        _ => None,
    }
}

/// Equipment whose repeated slot occurrences all belong to one logical
/// instance rather than separate pieces.
pub(crate) fn is_spreadable(index: u16) -> bool {
    matches!(index, 0x10 | 0x11 | 0x13 | 0x70 | 0x78)
}
