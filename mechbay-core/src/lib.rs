use std::fs;
use std::path::Path;

use thiserror::Error;

pub mod block;
pub mod codes;
pub mod export;
pub mod header;
pub mod resolver;
pub mod slots;
pub mod unit;

mod reader;
#[cfg(test)]
mod testutil;

pub use block::{load_unit_from_block, BlockSource};
pub use codes::{BaseTech, SubsystemBases, TechBase};
pub use export::export_text;
pub use header::{
    ArmorKind, ArmorProfile, ChassisType, CockpitKind, DesignHeader, EngineKind, GyroKind,
    HeatSinkKind, JumpJetKind, StructureKind, TargetingKind, TechLevel,
};
pub use resolver::{FailedEquipment, ResolvedEquipment, SlotEntry, SlotRef};
pub use slots::{CriticalCode, Location, LocationSlots, SLOTS_PER_LOCATION};
pub use unit::{LocationReport, UnitDesign, WeaponEntry};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "input truncated while reading {field}: needed {needed} bytes at offset {offset}, {remaining} remain"
    )]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("unsupported tech combination: {tech_base} at rules level {rules_level}")]
    UnsupportedTechCombination {
        tech_base: &'static str,
        rules_level: u32,
    },

    #[error("malformed design file: {0}")]
    Malformed(String),

    #[error("placement conflict: {label} would occupy already-filled slot {slot} in {location}")]
    PlacementConflict {
        label: String,
        location: &'static str,
        slot: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Decode a binary design file into a populated unit.
///
/// Header decoding happens first; its tech base, jump-jet variant and
/// chassis type steer slot resolution. Locations then resolve in a
/// fixed order (legs, arms, torsos, head), with arms skipped entirely
/// for armless chassis - those files still encode arm actuator codes,
/// which are ignored rather than validated.
///
/// Header-level problems (truncation, unknown field codes, impossible
/// tech pairings) abort with no partial result. Per-slot lookup misses
/// do not: the offending slots are emptied and reported on the
/// returned unit's failed-equipment list.
pub fn load_unit(bytes: &[u8]) -> Result<UnitDesign> {
    let decoded = header::decode_file(bytes)?;

    let mut ctx = resolver::ResolveContext::new(
        &decoded.header.tech_base,
        decoded.header.jump_jets,
        decoded.header.chassis_type,
    );

    let mut locations = Vec::with_capacity(Location::RESOLVE_ORDER.len());
    for location in Location::RESOLVE_ORDER {
        if decoded.header.chassis_type == ChassisType::Armless && location.is_arm() {
            continue;
        }
        let mut slots = decoded.criticals[location.file_index()];
        let entries = resolver::resolve_location(&mut ctx, location, &mut slots)?;
        locations.push(LocationReport {
            location,
            slots: entries,
        });
    }

    ctx.finish();
    let (equipment, failed_equipment) = ctx.into_parts();

    Ok(UnitDesign {
        header: decoded.header,
        armor: decoded.armor,
        weapons: decoded.weapons,
        locations,
        equipment,
        failed_equipment,
        overview: decoded.overview,
        capabilities: decoded.capabilities,
        history: decoded.history,
    })
}

pub fn load_unit_from_file(path: &Path) -> Result<UnitDesign> {
    let bytes = fs::read(path)?;
    load_unit(&bytes)
}
