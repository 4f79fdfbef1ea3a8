//! Canonical unit-definition text output.
//!
//! The section order is fixed so exports diff cleanly: identity,
//! configuration, movement, armor by facing, the weapon summary, then
//! one critical section per location. Field names match the block
//! text format, so an export can be fed back through a `BlockSource`.

use std::fmt::Write;

use crate::codes::EMPTY_LABEL;
use crate::resolver::SlotEntry;
use crate::slots::Location;
use crate::unit::UnitDesign;

/// Key order for the per-facing armor lines. Rear facings use the
/// block format's `RTL`/`RTR`/`RTC` shorthand.
pub(crate) const ARMOR_FACING_KEYS: [&str; 11] = [
    "LA Armor",
    "LT Armor",
    "RTL Armor",
    "LL Armor",
    "RA Armor",
    "RT Armor",
    "RTR Armor",
    "RL Armor",
    "HD Armor",
    "CT Armor",
    "RTC Armor",
];

pub fn export_text(unit: &UnitDesign) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "chassis:{}", unit.header.chassis);
    let _ = writeln!(out, "model:{}", unit.header.model);
    out.push('\n');

    let _ = writeln!(out, "Config:{}", unit.header.chassis_type.name());
    let _ = writeln!(out, "TechBase:{}", unit.header.tech_base.name());
    let _ = writeln!(out, "Era:{}", unit.header.year);
    let _ = writeln!(out, "Rules Level:{}", unit.header.rules_level);
    out.push('\n');

    let _ = writeln!(out, "Mass:{}", unit.header.tonnage);
    let _ = writeln!(
        out,
        "Engine:{} {}",
        unit.header.engine_rating,
        unit.header.engine.name()
    );
    let _ = writeln!(out, "Structure:{}", unit.header.structure.name());
    let _ = writeln!(
        out,
        "Heat Sinks:{} {}",
        unit.header.heat_sink_count,
        unit.header.heat_sinks.name()
    );
    let _ = writeln!(out, "Walk MP:{}", unit.header.walk_mp);
    let _ = writeln!(out, "Jump MP:{}", unit.header.jump_mp);
    out.push('\n');

    let _ = writeln!(out, "Armor:{}", unit.armor.kind.name());
    for (key, value) in ARMOR_FACING_KEYS.iter().zip(unit.armor.facing_values()) {
        let _ = writeln!(out, "{key}:{value}");
    }
    out.push('\n');

    let _ = writeln!(out, "Weapons:{}", unit.weapons.len());
    for weapon in &unit.weapons {
        let _ = writeln!(
            out,
            "{} {}, {}",
            weapon.qty,
            weapon.label,
            weapon.location.name()
        );
    }

    for location in Location::FILE_ORDER {
        let Some(report) = unit.location(location) else {
            continue;
        };
        out.push('\n');
        let _ = writeln!(out, "{}:", location.name());
        for entry in &report.slots {
            let _ = writeln!(out, "{}", slot_label(unit, entry));
        }
    }

    if !unit.overview.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "overview:{}", unit.overview);
    }
    if !unit.capabilities.is_empty() {
        let _ = writeln!(out, "capabilities:{}", unit.capabilities);
    }
    if !unit.history.is_empty() {
        let _ = writeln!(out, "history:{}", unit.history);
    }

    out
}

fn slot_label(unit: &UnitDesign, entry: &SlotEntry) -> String {
    match entry {
        SlotEntry::Empty => EMPTY_LABEL.to_string(),
        SlotEntry::System { label } => label.clone(),
        SlotEntry::Equipment { index } => {
            let equip = &unit.equipment[*index];
            if equip.rear_mounted {
                format!("{} (R)", equip.label)
            } else {
                equip.label.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_unit;
    use crate::testutil::TestFile;

    #[test]
    fn export_carries_identity_and_config() {
        let unit = load_unit(&TestFile::default().encode()).unwrap();
        let text = export_text(&unit);

        assert!(text.starts_with("chassis:Marauder\nmodel:MAD-3R\n"));
        assert!(text.contains("Config:Biped\n"));
        assert!(text.contains("TechBase:Inner Sphere\n"));
        assert!(text.contains("Mass:75\n"));
        assert!(text.contains("Engine:300 Fusion\n"));
        assert!(text.contains("Heat Sinks:16 Single\n"));
    }

    #[test]
    fn export_lists_armor_per_facing() {
        let unit = load_unit(&TestFile::default().encode()).unwrap();
        let text = export_text(&unit);

        assert!(text.contains("Armor:Standard\n"));
        assert!(text.contains("LA Armor:16\n"));
        assert!(text.contains("RTL Armor:6\n"));
        assert!(text.contains("CT Armor:24\n"));
        assert!(text.contains("RTC Armor:8\n"));
        assert!(text.contains("HD Armor:9\n"));
    }

    #[test]
    fn export_writes_twelve_lines_per_location() {
        let unit = load_unit(&TestFile::default().encode()).unwrap();
        let text = export_text(&unit);

        let section = text
            .split("Left Arm:\n")
            .nth(1)
            .expect("left arm section")
            .split("\n\n")
            .next()
            .unwrap();
        let lines: Vec<&str> = section.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "Shoulder");
        assert_eq!(lines[4], "PPC");
        assert_eq!(lines[11], EMPTY_LABEL);
    }

    #[test]
    fn rear_mounted_equipment_is_marked() {
        let mut file = TestFile::default();
        file.crits[crate::Location::CenterTorso.file_index()][10] = 0x8000_0031;
        let unit = load_unit(&file.encode()).unwrap();
        let text = export_text(&unit);
        assert!(text.contains("Medium Laser (R)\n"));
    }

    #[test]
    fn weapon_summary_matches_table() {
        let unit = load_unit(&TestFile::default().encode()).unwrap();
        let text = export_text(&unit);
        assert!(text.contains("Weapons:2\n1 PPC, Left Arm\n1 PPC, Right Arm\n"));
    }
}
