//! Named-field access to the sibling block text format.
//!
//! That format arrives pre-tokenized; this module only defines the
//! accessor contract and maps named fields onto the same unit model
//! the binary decoder produces. Critical slots arrive as label lists,
//! already resolved by whatever wrote the file, so no code lookup or
//! split consolidation happens on this path.

use crate::codes::{self, BaseTech, SubsystemBases, TechBase};
use crate::export::ARMOR_FACING_KEYS;
use crate::header::{
    self, ArmorKind, ArmorProfile, ChassisType, CockpitKind, DesignHeader, EngineKind, GyroKind,
    HeatSinkKind, JumpJetKind, StructureKind, TargetingKind,
};
use crate::resolver::{ResolvedEquipment, SlotEntry};
use crate::slots::Location;
use crate::unit::{LocationReport, UnitDesign};
use crate::{LoadError, Result};

/// Read access to one parsed block. Field names are the exporter's
/// keys; locations are looked up by their full names.
pub trait BlockSource {
    fn has(&self, field: &str) -> bool;
    fn get_string(&self, field: &str) -> Option<String>;
    fn get_int(&self, field: &str) -> Option<i64>;
    fn get_float_array(&self, field: &str) -> Option<Vec<f64>>;
}

fn required_string(src: &impl BlockSource, field: &str) -> Result<String> {
    src.get_string(field)
        .ok_or_else(|| LoadError::Malformed(format!("block is missing the {field} field")))
}

fn required_int(src: &impl BlockSource, field: &str) -> Result<u32> {
    let raw = src
        .get_int(field)
        .ok_or_else(|| LoadError::Malformed(format!("block is missing the {field} field")))?;
    u32::try_from(raw)
        .map_err(|_| LoadError::Malformed(format!("{field} value {raw} is out of range")))
}

fn tech_base_from_name(name: &str) -> Result<TechBase> {
    // Block files carry no per-subsystem overrides; mixed designs
    // default every subsystem to the preferred base.
    match name {
        "Inner Sphere" => Ok(TechBase::InnerSphere),
        "Clan" => Ok(TechBase::Clan),
        "Mixed (IS Chassis)" => Ok(TechBase::Mixed {
            preferred: BaseTech::InnerSphere,
            subsystems: SubsystemBases::uniform(BaseTech::InnerSphere),
        }),
        "Mixed (Clan Chassis)" => Ok(TechBase::Mixed {
            preferred: BaseTech::Clan,
            subsystems: SubsystemBases::uniform(BaseTech::Clan),
        }),
        other => Err(LoadError::Malformed(format!(
            "unknown tech base name {other:?}"
        ))),
    }
}

fn chassis_type_from_name(name: &str) -> Result<ChassisType> {
    match name {
        "Biped" => Ok(ChassisType::Biped),
        "Quad" => Ok(ChassisType::Quad),
        "Armless" => Ok(ChassisType::Armless),
        other => Err(LoadError::Malformed(format!(
            "unknown chassis configuration {other:?}"
        ))),
    }
}

/// Split a `"<count> <kind>"` field like `Engine:300 Fusion`.
fn count_and_kind<'a>(field: &str, value: &'a str) -> Result<(u32, &'a str)> {
    let (count, kind) = value
        .split_once(' ')
        .ok_or_else(|| LoadError::Malformed(format!("{field} value {value:?} has no type")))?;
    let count = count
        .parse::<u32>()
        .map_err(|_| LoadError::Malformed(format!("{field} count {count:?} is not a number")))?;
    Ok((count, kind))
}

fn read_armor(src: &impl BlockSource) -> Result<ArmorProfile> {
    // Armor comes in two shapes. The array form packs all eleven
    // facings into one numeric field and carries no kind name; the
    // keyed form names the kind and lists one field per facing.
    let mut values = [0u32; 11];
    let kind = if let Some(array) = src.get_float_array("Armor") {
        if array.len() != values.len() {
            return Err(LoadError::Malformed(format!(
                "Armor array has {} values, expected {}",
                array.len(),
                values.len()
            )));
        }
        for (slot, raw) in values.iter_mut().zip(array) {
            *slot = raw as u32;
        }
        ArmorKind::Standard
    } else {
        let kind_name = required_string(src, "Armor")?;
        for (slot, key) in values.iter_mut().zip(ARMOR_FACING_KEYS) {
            *slot = required_int(src, key)?;
        }
        ArmorKind::from_name(&kind_name)
            .ok_or_else(|| LoadError::Malformed(format!("unknown armor type {kind_name:?}")))?
    };

    Ok(ArmorProfile {
        kind,
        patchwork: None,
        left_arm: values[0],
        left_torso: values[1],
        left_torso_rear: values[2],
        left_leg: values[3],
        right_arm: values[4],
        right_torso: values[5],
        right_torso_rear: values[6],
        right_leg: values[7],
        head: values[8],
        center_torso: values[9],
        center_torso_rear: values[10],
    })
}

fn read_location(
    src: &impl BlockSource,
    location: Location,
    equipment: &mut Vec<ResolvedEquipment>,
) -> Option<LocationReport> {
    let body = src.get_string(location.name())?;

    let mut slots = Vec::new();
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line == codes::EMPTY_LABEL {
            slots.push(SlotEntry::Empty);
        } else if codes::is_system_label(line) {
            slots.push(SlotEntry::System {
                label: line.to_string(),
            });
        } else {
            let (label, rear) = match line.strip_suffix(" (R)") {
                Some(stripped) => (stripped, true),
                None => (line, false),
            };
            slots.push(SlotEntry::Equipment {
                index: equipment.len(),
            });
            equipment.push(ResolvedEquipment {
                label: label.to_string(),
                location,
                secondary_location: None,
                rear_mounted: rear,
                slots: Vec::new(),
            });
        }
    }

    Some(LocationReport { location, slots })
}

/// Assemble a unit from a parsed block. Only the fields the block
/// format actually carries are populated: the weapon summary table is
/// binary-only and stays empty, and patchwork facing kinds are not
/// represented.
pub fn load_unit_from_block(src: &impl BlockSource) -> Result<UnitDesign> {
    let chassis = required_string(src, "chassis")?;
    let model = required_string(src, "model")?;
    let tonnage = required_int(src, "Mass")?;
    let year = required_int(src, "Era")?;
    let rules_level = required_int(src, "Rules Level")?;

    let tech_base = tech_base_from_name(&required_string(src, "TechBase")?)?;
    let tech_level = header::tech_level(&tech_base, rules_level)?;
    let chassis_type = chassis_type_from_name(&required_string(src, "Config")?)?;

    let structure_name = required_string(src, "Structure")?;
    let structure = StructureKind::from_name(&structure_name)
        .ok_or_else(|| LoadError::Malformed(format!("unknown structure type {structure_name:?}")))?;

    let engine_value = required_string(src, "Engine")?;
    let (engine_rating, engine_name) = count_and_kind("Engine", &engine_value)?;
    let engine = EngineKind::from_name(engine_name)
        .ok_or_else(|| LoadError::Malformed(format!("unknown engine type {engine_name:?}")))?;

    let sink_value = required_string(src, "Heat Sinks")?;
    let (heat_sink_count, sink_name) = count_and_kind("Heat Sinks", &sink_value)?;
    let heat_sinks = HeatSinkKind::from_name(sink_name)
        .ok_or_else(|| LoadError::Malformed(format!("unknown heat sink type {sink_name:?}")))?;

    let walk_mp = required_int(src, "Walk MP")?;
    let jump_mp = required_int(src, "Jump MP")?;

    let armor = read_armor(src)?;

    let mut equipment = Vec::new();
    let mut locations = Vec::new();
    for location in Location::FILE_ORDER {
        if let Some(report) = read_location(src, location, &mut equipment) {
            locations.push(report);
        }
    }

    let overview = src.get_string("overview").unwrap_or_default();
    let capabilities = src.get_string("capabilities").unwrap_or_default();
    let history = src.get_string("history").unwrap_or_default();

    Ok(UnitDesign {
        header: DesignHeader {
            chassis,
            model,
            tonnage,
            year,
            rules_level,
            tech_base,
            tech_level,
            chassis_type,
            structure,
            engine_rating,
            engine,
            walk_mp,
            jump_mp,
            jump_jets: JumpJetKind::Standard,
            heat_sink_count,
            heat_sinks,
            gyro: GyroKind::Standard,
            cockpit: CockpitKind::Standard,
            targeting: TargetingKind::Standard,
        },
        armor,
        weapons: Vec::new(),
        locations,
        equipment,
        failed_equipment: Vec::new(),
        overview,
        capabilities,
        history,
    })
}
