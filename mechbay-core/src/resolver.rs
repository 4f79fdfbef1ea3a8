use serde::Serialize;

use crate::codes::{self, TechBase};
use crate::header::{ChassisType, JumpJetKind};
use crate::slots::{self, CriticalCode, Location, LocationSlots, SLOTS_PER_LOCATION};
use crate::{LoadError, Result};

/// One slot's final disposition. After a location resolves, every slot
/// is exactly one of these; nothing is left half-classified.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum SlotEntry {
    Empty,
    System { label: String },
    Equipment { index: usize },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SlotRef {
    pub location: Location,
    pub slot: usize,
}

/// A resolved piece of equipment, possibly owning several slots (one
/// logical spreadable instance) or spanning two locations (a split
/// weapon).
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedEquipment {
    pub label: String,
    pub location: Location,
    pub secondary_location: Option<Location>,
    pub rear_mounted: bool,
    pub slots: Vec<SlotRef>,
}

/// A code that missed every lookup tier. The slot it came from was
/// emptied and the unit still assembles; the miss is reported here
/// instead of being silently dropped.
#[derive(Clone, Debug, Serialize)]
pub struct FailedEquipment {
    pub location: Location,
    pub code: u32,
    pub label: String,
}

struct SplitTracker {
    table_index: u16,
    equip: usize,
    required: usize,
    found: usize,
    first: Location,
    second: Option<Location>,
}

struct SpreadTracker {
    table_index: u16,
    equip: usize,
}

/// Per-decode resolution state. All cross-slot and cross-location
/// bookkeeping lives here so concurrent decodes stay independent.
pub(crate) struct ResolveContext<'a> {
    tech: &'a TechBase,
    jump_jets: JumpJetKind,
    chassis: ChassisType,
    splits: Vec<SplitTracker>,
    spreads: Vec<SpreadTracker>,
    pub(crate) equipment: Vec<ResolvedEquipment>,
    pub(crate) failed: Vec<FailedEquipment>,
}

impl<'a> ResolveContext<'a> {
    pub(crate) fn new(
        tech: &'a TechBase,
        jump_jets: JumpJetKind,
        chassis: ChassisType,
    ) -> Self {
        Self {
            tech,
            jump_jets,
            chassis,
            splits: Vec::new(),
            spreads: Vec::new(),
            equipment: Vec::new(),
            failed: Vec::new(),
        }
    }

    fn push_equipment(
        &mut self,
        label: String,
        location: Location,
        slot: usize,
        rear_mounted: bool,
    ) -> usize {
        self.equipment.push(ResolvedEquipment {
            label,
            location,
            secondary_location: None,
            rear_mounted,
            slots: vec![SlotRef { location, slot }],
        });
        self.equipment.len() - 1
    }

    /// Retire every split tracker still open. A weapon that never saw
    /// its full slot count keeps the slots it did get; its canonical
    /// location is still recomputed so no entry is left dangling.
    pub(crate) fn finish(&mut self) {
        let open = std::mem::take(&mut self.splits);
        for tracker in open {
            retire_split(&mut self.equipment, &tracker);
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<ResolvedEquipment>, Vec<FailedEquipment>) {
        (self.equipment, self.failed)
    }
}

fn retire_split(equipment: &mut [ResolvedEquipment], tracker: &SplitTracker) {
    let item = &mut equipment[tracker.equip];
    match tracker.second {
        Some(second) => {
            // Canonical location is the more restrictive of the two;
            // the other is recorded as secondary.
            let (canonical, other) =
                if tracker.first.restrictiveness() <= second.restrictiveness() {
                    (tracker.first, second)
                } else {
                    (second, tracker.first)
                };
            item.location = canonical;
            item.secondary_location = Some(other);
        }
        None => {
            item.location = tracker.first;
            item.secondary_location = None;
        }
    }
}

/// Expected actuator codes at the two reconciled arm slots, by
/// locomotion mode. The authoring tool writes arm-style actuators even
/// for quad limb layouts; anything that does not match the mode is
/// dropped before general resolution.
fn expected_actuators(chassis: ChassisType) -> (u16, u16) {
    match chassis {
        ChassisType::Quad => (codes::LOWER_LEG_ACTUATOR, codes::FOOT_ACTUATOR),
        _ => (codes::LOWER_ARM_ACTUATOR, codes::HAND_ACTUATOR),
    }
}

fn actuator_prepass(chassis: ChassisType, slots_arr: &mut LocationSlots) {
    let (lower, end) = expected_actuators(chassis);
    let expected = [lower, end];
    let mut removed = false;
    for (idx, want) in [(2usize, expected[0]), (3usize, expected[1])] {
        let code = slots_arr[idx];
        if code.is_empty() {
            continue;
        }
        let index = code.table_index();
        if codes::is_limb_actuator(index) && index != want {
            slots_arr[idx] = slots::EMPTY;
            removed = true;
        }
    }
    if removed {
        slots::compact(slots_arr);
    }
}

fn place(
    entries: &mut [SlotEntry],
    location: Location,
    slot: usize,
    entry: SlotEntry,
    label: &str,
) -> Result<()> {
    if entries[slot] != SlotEntry::Empty {
        return Err(LoadError::PlacementConflict {
            label: label.to_string(),
            location: location.name(),
            slot,
        });
    }
    entries[slot] = entry;
    Ok(())
}

/// Resolve one location's compacted slot array into placements.
///
/// Slots are walked in order with a mutable cursor: the cursor only
/// stands still when an unresolved code is demoted to empty and the
/// array recompacted, since compaction can shift a previously unseen
/// code into the current position.
pub(crate) fn resolve_location(
    ctx: &mut ResolveContext<'_>,
    location: Location,
    slots_arr: &mut LocationSlots,
) -> Result<Vec<SlotEntry>> {
    if location.is_arm() {
        actuator_prepass(ctx.chassis, slots_arr);
    }
    slots::compact(slots_arr);

    let mut entries = vec![SlotEntry::Empty; SLOTS_PER_LOCATION];
    let mut i = 0;
    while i < SLOTS_PER_LOCATION {
        let code = slots_arr[i];
        if code.is_empty() {
            i += 1;
            continue;
        }

        let index = code.table_index();

        // Structural and system slots never go through equipment
        // lookup.
        if codes::is_system(index) {
            let label = codes::resolve(code, ctx.tech, None)
                .unwrap_or_else(|| format!("System (0x{index:02X})"));
            place(
                &mut entries,
                location,
                i,
                SlotEntry::System {
                    label: label.clone(),
                },
                &label,
            )?;
            i += 1;
            continue;
        }

        // Jump-capable propulsion honors the header's variant flag.
        if index == codes::JUMP_JET {
            let label = match ctx.jump_jets {
                JumpJetKind::Standard => "Jump Jet",
                JumpJetKind::Improved => "Improved Jump Jet",
            };
            let equip = ctx.push_equipment(label.to_string(), location, i, false);
            place(
                &mut entries,
                location,
                i,
                SlotEntry::Equipment { index: equip },
                label,
            )?;
            i += 1;
            continue;
        }

        match codes::resolve(code, ctx.tech, None) {
            Some(label) => {
                if codes::is_spreadable(index) {
                    // One logical instance no matter how many slots
                    // carry the code.
                    let equip = match ctx
                        .spreads
                        .iter()
                        .find(|t| t.table_index == index)
                        .map(|t| t.equip)
                    {
                        Some(equip) => {
                            ctx.equipment[equip].slots.push(SlotRef { location, slot: i });
                            equip
                        }
                        None => {
                            let equip = ctx.push_equipment(label.clone(), location, i, false);
                            ctx.spreads.push(SpreadTracker {
                                table_index: index,
                                equip,
                            });
                            equip
                        }
                    };
                    place(
                        &mut entries,
                        location,
                        i,
                        SlotEntry::Equipment { index: equip },
                        &label,
                    )?;
                } else {
                    let base = codes::base_for(ctx.tech, codes::subsystem_of(index));
                    if let Some(required) = codes::split_slot_count(base, index) {
                        let equip =
                            track_split(ctx, index, required, &label, location, i);
                        place(
                            &mut entries,
                            location,
                            i,
                            SlotEntry::Equipment { index: equip },
                            &label,
                        )?;
                    } else {
                        let equip = ctx.push_equipment(
                            label.clone(),
                            location,
                            i,
                            code.rear_mounted(),
                        );
                        place(
                            &mut entries,
                            location,
                            i,
                            SlotEntry::Equipment { index: equip },
                            &label,
                        )?;
                    }
                }
                i += 1;
            }
            None => {
                // Lookup miss: report the raw code, empty the slot,
                // recompact, and retry the same index.
                ctx.failed.push(FailedEquipment {
                    location,
                    code: code.0,
                    label: format!("Unknown (0x{:08X})", code.0),
                });
                slots_arr[i] = slots::EMPTY;
                slots::compact(slots_arr);
            }
        }
    }

    Ok(entries)
}

fn track_split(
    ctx: &mut ResolveContext<'_>,
    index: u16,
    required: usize,
    label: &str,
    location: Location,
    slot: usize,
) -> usize {
    // A partial instance matches if it already occupies this location,
    // or a structurally adjacent one it could have spilled over from.
    let existing = ctx.splits.iter().position(|t| {
        t.table_index == index
            && (t.first == location
                || t.second == Some(location)
                || (t.second.is_none() && t.first.adjacent(location)))
    });

    match existing {
        Some(pos) => {
            let equip = {
                let tracker = &mut ctx.splits[pos];
                tracker.found += 1;
                if tracker.first != location && tracker.second.is_none() {
                    tracker.second = Some(location);
                }
                tracker.equip
            };
            ctx.equipment[equip].slots.push(SlotRef { location, slot });

            if ctx.splits[pos].found >= required {
                let tracker = ctx.splits.swap_remove(pos);
                retire_split(&mut ctx.equipment, &tracker);
            }
            equip
        }
        None => {
            let equip = ctx.push_equipment(label.to_string(), location, slot, false);
            ctx.splits.push(SplitTracker {
                table_index: index,
                equip,
                required,
                found: 1,
                first: location,
                second: None,
            });
            equip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::SLOTS_PER_LOCATION;

    fn ctx(tech: &TechBase) -> ResolveContext<'_> {
        ResolveContext::new(tech, JumpJetKind::Standard, ChassisType::Biped)
    }

    fn raw(codes: &[u32]) -> LocationSlots {
        let mut slots = [CriticalCode(0); SLOTS_PER_LOCATION];
        for (slot, &code) in slots.iter_mut().zip(codes) {
            *slot = CriticalCode(code);
        }
        slots
    }

    #[test]
    fn every_slot_is_accounted_for() {
        let tech = TechBase::InnerSphere;
        let mut c = ctx(&tech);
        let mut slots = raw(&[0x05, 0x06, 0x07, 0x08, 0x31, 0x0E]);
        let entries = resolve_location(&mut c, Location::LeftLeg, &mut slots).unwrap();

        assert_eq!(entries.len(), SLOTS_PER_LOCATION);
        let systems = entries
            .iter()
            .filter(|e| matches!(e, SlotEntry::System { .. }))
            .count();
        let equipment = entries
            .iter()
            .filter(|e| matches!(e, SlotEntry::Equipment { .. }))
            .count();
        let empty = entries.iter().filter(|e| **e == SlotEntry::Empty).count();
        assert_eq!(systems, 4);
        assert_eq!(equipment, 2);
        assert_eq!(systems + equipment + empty, SLOTS_PER_LOCATION);
    }

    #[test]
    fn unresolved_code_is_reported_and_slot_emptied() {
        let tech = TechBase::InnerSphere;
        let mut c = ctx(&tech);
        // The bogus code sits between two valid ones; after demotion
        // and recompaction the trailing laser must still resolve.
        let mut slots = raw(&[0x31, 0xBEEF, 0x30]);
        let entries = resolve_location(&mut c, Location::RightArm, &mut slots).unwrap();

        assert_eq!(c.failed.len(), 1);
        assert_eq!(c.failed[0].code, 0xBEEF);
        assert_eq!(c.failed[0].label, "Unknown (0x0000BEEF)");
        assert_eq!(c.equipment.len(), 2);
        assert_eq!(c.equipment[1].label, "Small Laser");
        assert!(matches!(entries[1], SlotEntry::Equipment { .. }));
        assert_eq!(entries[2], SlotEntry::Empty);
    }

    #[test]
    fn spreadable_codes_share_one_instance() {
        let tech = TechBase::InnerSphere;
        let mut c = ctx(&tech);
        let mut left = raw(&[0x10, 0x10, 0x10]);
        resolve_location(&mut c, Location::LeftTorso, &mut left).unwrap();
        let mut right = raw(&[0x10, 0x10]);
        resolve_location(&mut c, Location::RightTorso, &mut right).unwrap();

        let endo: Vec<_> = c
            .equipment
            .iter()
            .filter(|e| e.label == "Endo Steel")
            .collect();
        assert_eq!(endo.len(), 1);
        assert_eq!(endo[0].slots.len(), 5);
    }

    #[test]
    fn split_weapon_consolidates_across_two_locations() {
        let tech = TechBase::InnerSphere;
        let mut c = ctx(&tech);
        // AC/10 needs seven slots: four in the right arm, three in the
        // right torso.
        let mut arm = raw(&[0x01, 0x02, 0x3D, 0x3D, 0x3D, 0x3D]);
        resolve_location(&mut c, Location::RightArm, &mut arm).unwrap();
        let mut torso = raw(&[0x3D, 0x3D, 0x3D]);
        resolve_location(&mut c, Location::RightTorso, &mut torso).unwrap();
        c.finish();

        let guns: Vec<_> = c.equipment.iter().filter(|e| e.label == "AC/10").collect();
        assert_eq!(guns.len(), 1);
        let gun = guns[0];
        assert_eq!(gun.slots.len(), 7);
        // Arm is the more restrictive of the pair.
        assert_eq!(gun.location, Location::RightArm);
        assert_eq!(gun.secondary_location, Some(Location::RightTorso));
    }

    #[test]
    fn split_weapon_in_one_location_has_no_secondary() {
        let tech = TechBase::InnerSphere;
        let mut c = ctx(&tech);
        let mut torso = raw(&[0x3D, 0x3D, 0x3D, 0x3D, 0x3D, 0x3D, 0x3D]);
        resolve_location(&mut c, Location::LeftTorso, &mut torso).unwrap();
        c.finish();

        let gun = c.equipment.iter().find(|e| e.label == "AC/10").unwrap();
        assert_eq!(gun.location, Location::LeftTorso);
        assert_eq!(gun.secondary_location, None);
        assert_eq!(gun.slots.len(), 7);
    }

    #[test]
    fn rear_mounted_flag_survives_resolution() {
        let tech = TechBase::InnerSphere;
        let mut c = ctx(&tech);
        let mut slots = raw(&[0x8000_0031]);
        resolve_location(&mut c, Location::CenterTorso, &mut slots).unwrap();
        assert_eq!(c.equipment[0].label, "Medium Laser");
        assert!(c.equipment[0].rear_mounted);
    }

    #[test]
    fn jump_jets_honor_improved_variant_flag() {
        let tech = TechBase::InnerSphere;
        let mut c =
            ResolveContext::new(&tech, JumpJetKind::Improved, ChassisType::Biped);
        let mut slots = raw(&[0x0F]);
        resolve_location(&mut c, Location::LeftLeg, &mut slots).unwrap();
        assert_eq!(c.equipment[0].label, "Improved Jump Jet");
    }

    #[test]
    fn biped_arm_prepass_drops_mismatched_actuators() {
        let tech = TechBase::InnerSphere;
        let mut c = ctx(&tech);
        // Leg-style actuators in a biped arm are authoring noise.
        let mut slots = raw(&[0x01, 0x02, 0x07, 0x08, 0x31]);
        let entries = resolve_location(&mut c, Location::LeftArm, &mut slots).unwrap();

        assert!(matches!(entries[0], SlotEntry::System { .. }));
        assert!(matches!(entries[1], SlotEntry::System { .. }));
        // Laser compacted into slot 2 after the bogus actuators left.
        assert!(matches!(entries[2], SlotEntry::Equipment { .. }));
        assert_eq!(entries[3], SlotEntry::Empty);
        assert_eq!(c.equipment.len(), 1);
    }

    #[test]
    fn quad_arm_prepass_keeps_leg_actuators() {
        let tech = TechBase::InnerSphere;
        let mut c = ResolveContext::new(&tech, JumpJetKind::Standard, ChassisType::Quad);
        let mut slots = raw(&[0x01, 0x02, 0x07, 0x08]);
        let entries = resolve_location(&mut c, Location::LeftArm, &mut slots).unwrap();
        let systems = entries
            .iter()
            .filter(|e| matches!(e, SlotEntry::System { .. }))
            .count();
        assert_eq!(systems, 4);
    }

    #[test]
    fn quad_arm_prepass_drops_arm_actuators() {
        let tech = TechBase::InnerSphere;
        let mut c = ResolveContext::new(&tech, JumpJetKind::Standard, ChassisType::Quad);
        let mut slots = raw(&[0x01, 0x02, 0x03, 0x04]);
        let entries = resolve_location(&mut c, Location::LeftArm, &mut slots).unwrap();
        let systems = entries
            .iter()
            .filter(|e| matches!(e, SlotEntry::System { .. }))
            .count();
        assert_eq!(systems, 2);
        assert_eq!(entries[2], SlotEntry::Empty);
    }
}
