use serde::Serialize;

use crate::codes::{self, BaseTech, SubsystemBases, TechBase};
use crate::reader::ByteCursor;
use crate::slots::{CriticalCode, Location, LocationSlots, SLOTS_PER_LOCATION};
use crate::unit::WeaponEntry;
use crate::{LoadError, Result};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum ChassisType {
    Biped,
    Quad,
    Armless,
}

impl ChassisType {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(ChassisType::Biped),
            1 => Ok(ChassisType::Quad),
            2 => Ok(ChassisType::Armless),
            other => Err(LoadError::Malformed(format!(
                "unknown chassis type code {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChassisType::Biped => "Biped",
            ChassisType::Quad => "Quad",
            ChassisType::Armless => "Armless",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum StructureKind {
    Standard,
    EndoSteel,
    Composite,
    Reinforced,
    Industrial,
}

impl StructureKind {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(StructureKind::Standard),
            1 => Ok(StructureKind::EndoSteel),
            2 => Ok(StructureKind::Composite),
            3 => Ok(StructureKind::Reinforced),
            4 => Ok(StructureKind::Industrial),
            other => Err(LoadError::Malformed(format!(
                "unknown structure type code {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Standard => "Standard",
            StructureKind::EndoSteel => "Endo Steel",
            StructureKind::Composite => "Composite",
            StructureKind::Reinforced => "Reinforced",
            StructureKind::Industrial => "Industrial",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "Standard" => Some(StructureKind::Standard),
            "Endo Steel" => Some(StructureKind::EndoSteel),
            "Composite" => Some(StructureKind::Composite),
            "Reinforced" => Some(StructureKind::Reinforced),
            "Industrial" => Some(StructureKind::Industrial),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum EngineKind {
    Fusion,
    Xl,
    Light,
    Compact,
    Xxl,
    Ice,
}

impl EngineKind {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(EngineKind::Fusion),
            1 => Ok(EngineKind::Xl),
            2 => Ok(EngineKind::Light),
            3 => Ok(EngineKind::Compact),
            4 => Ok(EngineKind::Xxl),
            5 => Ok(EngineKind::Ice),
            other => Err(LoadError::Malformed(format!(
                "unknown engine type code {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Fusion => "Fusion",
            EngineKind::Xl => "XL",
            EngineKind::Light => "Light",
            EngineKind::Compact => "Compact",
            EngineKind::Xxl => "XXL",
            EngineKind::Ice => "ICE",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "Fusion" => Some(EngineKind::Fusion),
            "XL" => Some(EngineKind::Xl),
            "Light" => Some(EngineKind::Light),
            "Compact" => Some(EngineKind::Compact),
            "XXL" => Some(EngineKind::Xxl),
            "ICE" => Some(EngineKind::Ice),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum HeatSinkKind {
    Single,
    Double,
    Compact,
}

impl HeatSinkKind {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(HeatSinkKind::Single),
            1 => Ok(HeatSinkKind::Double),
            2 => Ok(HeatSinkKind::Compact),
            other => Err(LoadError::Malformed(format!(
                "unknown heat sink type code {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeatSinkKind::Single => "Single",
            HeatSinkKind::Double => "Double",
            HeatSinkKind::Compact => "Compact",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "Single" => Some(HeatSinkKind::Single),
            "Double" => Some(HeatSinkKind::Double),
            "Compact" => Some(HeatSinkKind::Compact),
            _ => None,
        }
    }
}

/// The global jump-system variant flag. Jump jet criticals share one
/// code; this header field decides which label they carry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum JumpJetKind {
    Standard,
    Improved,
}

impl JumpJetKind {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(JumpJetKind::Standard),
            1 => Ok(JumpJetKind::Improved),
            other => Err(LoadError::Malformed(format!(
                "unknown jump jet type code {other}"
            ))),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum ArmorKind {
    Standard,
    FerroFibrous,
    LightFerroFibrous,
    HeavyFerroFibrous,
    Stealth,
    Hardened,
    Reactive,
    Patchwork,
}

const PATCHWORK_CODE: u32 = 7;

impl ArmorKind {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(ArmorKind::Standard),
            1 => Ok(ArmorKind::FerroFibrous),
            2 => Ok(ArmorKind::LightFerroFibrous),
            3 => Ok(ArmorKind::HeavyFerroFibrous),
            4 => Ok(ArmorKind::Stealth),
            5 => Ok(ArmorKind::Hardened),
            6 => Ok(ArmorKind::Reactive),
            PATCHWORK_CODE => Ok(ArmorKind::Patchwork),
            other => Err(LoadError::Malformed(format!(
                "unknown armor type code {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ArmorKind::Standard => "Standard",
            ArmorKind::FerroFibrous => "Ferro-Fibrous",
            ArmorKind::LightFerroFibrous => "Light Ferro-Fibrous",
            ArmorKind::HeavyFerroFibrous => "Heavy Ferro-Fibrous",
            ArmorKind::Stealth => "Stealth",
            ArmorKind::Hardened => "Hardened",
            ArmorKind::Reactive => "Reactive",
            ArmorKind::Patchwork => "Patchwork",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "Standard" => Some(ArmorKind::Standard),
            "Ferro-Fibrous" => Some(ArmorKind::FerroFibrous),
            "Light Ferro-Fibrous" => Some(ArmorKind::LightFerroFibrous),
            "Heavy Ferro-Fibrous" => Some(ArmorKind::HeavyFerroFibrous),
            "Stealth" => Some(ArmorKind::Stealth),
            "Hardened" => Some(ArmorKind::Hardened),
            "Reactive" => Some(ArmorKind::Reactive),
            "Patchwork" => Some(ArmorKind::Patchwork),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum GyroKind {
    Standard,
    Xl,
    Compact,
    HeavyDuty,
}

impl GyroKind {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(GyroKind::Standard),
            1 => Ok(GyroKind::Xl),
            2 => Ok(GyroKind::Compact),
            3 => Ok(GyroKind::HeavyDuty),
            other => Err(LoadError::Malformed(format!(
                "unknown gyro type code {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GyroKind::Standard => "Standard",
            GyroKind::Xl => "XL",
            GyroKind::Compact => "Compact",
            GyroKind::HeavyDuty => "Heavy Duty",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum CockpitKind {
    Standard,
    Small,
    CommandConsole,
    Torso,
}

impl CockpitKind {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(CockpitKind::Standard),
            1 => Ok(CockpitKind::Small),
            2 => Ok(CockpitKind::CommandConsole),
            3 => Ok(CockpitKind::Torso),
            other => Err(LoadError::Malformed(format!(
                "unknown cockpit type code {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CockpitKind::Standard => "Standard",
            CockpitKind::Small => "Small",
            CockpitKind::CommandConsole => "Command Console",
            CockpitKind::Torso => "Torso-Mounted",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TargetingKind {
    Standard,
    TargetingComputer,
    Artemis,
}

impl TargetingKind {
    fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(TargetingKind::Standard),
            1 => Ok(TargetingKind::TargetingComputer),
            2 => Ok(TargetingKind::Artemis),
            other => Err(LoadError::Malformed(format!(
                "unknown targeting system code {other}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TargetingKind::Standard => "Standard",
            TargetingKind::TargetingComputer => "Targeting Computer",
            TargetingKind::Artemis => "Artemis IV FCS",
        }
    }
}

/// Named tech level derived from the tech base and numeric rules
/// level. Pairings outside this set are a hard load failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TechLevel {
    Introductory,
    Standard,
    Advanced,
    ClanStandard,
    ClanAdvanced,
    MixedAdvanced,
}

impl TechLevel {
    pub fn name(self) -> &'static str {
        match self {
            TechLevel::Introductory => "Introductory",
            TechLevel::Standard => "Standard",
            TechLevel::Advanced => "Advanced",
            TechLevel::ClanStandard => "Clan Standard",
            TechLevel::ClanAdvanced => "Clan Advanced",
            TechLevel::MixedAdvanced => "Mixed Advanced",
        }
    }
}

pub(crate) fn tech_level(tech: &TechBase, rules_level: u32) -> Result<TechLevel> {
    match (tech, rules_level) {
        (TechBase::InnerSphere, 1) => Ok(TechLevel::Introductory),
        (TechBase::InnerSphere, 2) => Ok(TechLevel::Standard),
        (TechBase::InnerSphere, 3) => Ok(TechLevel::Advanced),
        (TechBase::Clan, 2) => Ok(TechLevel::ClanStandard),
        (TechBase::Clan, 3) => Ok(TechLevel::ClanAdvanced),
        (TechBase::Mixed { .. }, 3) => Ok(TechLevel::MixedAdvanced),
        (tech, rules_level) => Err(LoadError::UnsupportedTechCombination {
            tech_base: tech.name(),
            rules_level,
        }),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DesignHeader {
    pub chassis: String,
    pub model: String,
    pub tonnage: u32,
    pub year: u32,
    pub rules_level: u32,
    pub tech_base: TechBase,
    pub tech_level: TechLevel,
    pub chassis_type: ChassisType,
    pub structure: StructureKind,
    pub engine_rating: u32,
    pub engine: EngineKind,
    pub walk_mp: u32,
    pub jump_mp: u32,
    pub jump_jets: JumpJetKind,
    pub heat_sink_count: u32,
    pub heat_sinks: HeatSinkKind,
    pub gyro: GyroKind,
    pub cockpit: CockpitKind,
    pub targeting: TargetingKind,
}

/// Armor facings in file order: LA, LT, LT rear, LL, RA, RT, RT rear,
/// RL, HD, CT, CT rear.
pub(crate) const ARMOR_FACING_COUNT: usize = 11;

#[derive(Clone, Debug, Serialize)]
pub struct ArmorProfile {
    pub kind: ArmorKind,
    /// Per-facing armor kinds, present exactly when `kind` is
    /// patchwork.
    pub patchwork: Option<[ArmorKind; ARMOR_FACING_COUNT]>,
    pub left_arm: u32,
    pub right_arm: u32,
    pub left_torso: u32,
    pub left_torso_rear: u32,
    pub right_torso: u32,
    pub right_torso_rear: u32,
    pub center_torso: u32,
    pub center_torso_rear: u32,
    pub left_leg: u32,
    pub right_leg: u32,
    pub head: u32,
}

impl ArmorProfile {
    /// Facing values in file order, for the text export and for
    /// cross-format comparison.
    pub fn facing_values(&self) -> [u32; ARMOR_FACING_COUNT] {
        [
            self.left_arm,
            self.left_torso,
            self.left_torso_rear,
            self.left_leg,
            self.right_arm,
            self.right_torso,
            self.right_torso_rear,
            self.right_leg,
            self.head,
            self.center_torso,
            self.center_torso_rear,
        ]
    }
}

/// Everything the fixed-layout file yields before slot resolution.
#[derive(Debug)]
pub(crate) struct DecodedFile {
    pub header: DesignHeader,
    pub armor: ArmorProfile,
    pub weapons: Vec<WeaponEntry>,
    pub criticals: [LocationSlots; 8],
    pub overview: String,
    pub capabilities: String,
    pub history: String,
}

fn read_tech_base(cur: &mut ByteCursor<'_>) -> Result<TechBase> {
    let code = cur.read_u32_le("tech base")?;
    match code {
        0 => Ok(TechBase::InnerSphere),
        1 => Ok(TechBase::Clan),
        2 | 3 => {
            let preferred = if code == 2 {
                BaseTech::InnerSphere
            } else {
                BaseTech::Clan
            };
            // Mixed designs carry six per-subsystem base overrides, in
            // fixed order.
            let mut bases = [BaseTech::InnerSphere; 6];
            let fields = [
                "engine tech base",
                "heat sink tech base",
                "physical weapon tech base",
                "myomer tech base",
                "targeting computer tech base",
                "armor tech base",
            ];
            for (slot, field) in bases.iter_mut().zip(fields) {
                let raw = cur.read_u32_le(field)?;
                *slot = BaseTech::from_code(raw).ok_or_else(|| {
                    LoadError::Malformed(format!("{field} has invalid value {raw}"))
                })?;
            }
            Ok(TechBase::Mixed {
                preferred,
                subsystems: SubsystemBases {
                    engine: bases[0],
                    heat_sinks: bases[1],
                    physical_weapons: bases[2],
                    myomer: bases[3],
                    targeting_computer: bases[4],
                    armor: bases[5],
                },
            })
        }
        other => Err(LoadError::Malformed(format!(
            "unknown tech base code {other}"
        ))),
    }
}

fn read_armor(cur: &mut ByteCursor<'_>) -> Result<ArmorProfile> {
    let kind = ArmorKind::from_code(cur.read_u32_le("armor type")?)?;

    // Patchwork carries an explicit kind for every facing; any other
    // armor type carries none.
    let patchwork = if kind == ArmorKind::Patchwork {
        let mut kinds = [ArmorKind::Standard; ARMOR_FACING_COUNT];
        for slot in kinds.iter_mut() {
            let raw = cur.read_u32_le("patchwork armor type")?;
            let facing_kind = ArmorKind::from_code(raw)?;
            if facing_kind == ArmorKind::Patchwork {
                return Err(LoadError::Malformed(
                    "patchwork facing cannot itself be patchwork".to_string(),
                ));
            }
            *slot = facing_kind;
        }
        Some(kinds)
    } else {
        None
    };

    // Armor values interleaved with fixed-width authoring-tool scratch
    // words that carry no decoded meaning.
    let left_arm = cur.read_u32_le("left arm armor")?;
    cur.skip(4, "armor filler")?;
    let left_torso = cur.read_u32_le("left torso armor")?;
    let left_torso_rear = cur.read_u32_le("left torso rear armor")?;
    cur.skip(4, "armor filler")?;
    let left_leg = cur.read_u32_le("left leg armor")?;
    cur.skip(4, "armor filler")?;
    let right_arm = cur.read_u32_le("right arm armor")?;
    cur.skip(4, "armor filler")?;
    let right_torso = cur.read_u32_le("right torso armor")?;
    let right_torso_rear = cur.read_u32_le("right torso rear armor")?;
    cur.skip(4, "armor filler")?;
    let right_leg = cur.read_u32_le("right leg armor")?;
    cur.skip(4, "armor filler")?;
    let head = cur.read_u32_le("head armor")?;
    cur.skip(4, "armor filler")?;
    let center_torso = cur.read_u32_le("center torso armor")?;
    let center_torso_rear = cur.read_u32_le("center torso rear armor")?;

    Ok(ArmorProfile {
        kind,
        patchwork,
        left_arm,
        right_arm,
        left_torso,
        left_torso_rear,
        right_torso,
        right_torso_rear,
        center_torso,
        center_torso_rear,
        left_leg,
        right_leg,
        head,
    })
}

fn read_weapon_table(cur: &mut ByteCursor<'_>, tech: &TechBase) -> Result<Vec<WeaponEntry>> {
    let count = cur.read_u32_le("weapon count")?;
    let mut weapons = Vec::with_capacity(count.min(64) as usize);
    for _ in 0..count {
        let qty = cur.read_u32_le("weapon quantity")?;
        let type_code = cur.read_u32_le("weapon type")?;
        let location_code = cur.read_u32_le("weapon location")?;
        let ammo_index = cur.read_u32_le("weapon ammo index")?;

        let location = Location::from_table_code(location_code).ok_or_else(|| {
            LoadError::Malformed(format!(
                "weapon table location code {location_code} is out of range"
            ))
        })?;
        let label = codes::resolve(CriticalCode(type_code), tech, None)
            .unwrap_or_else(|| format!("Unknown (0x{type_code:04X})"));

        weapons.push(WeaponEntry {
            qty,
            type_code,
            location,
            ammo_index,
            label,
        });
    }
    Ok(weapons)
}

/// Minimum bytes beyond any advanced-ruleset tail for the optional
/// descriptive text sections to be considered present.
const FLUFF_MIN_LEN: usize = 6;

/// Byte width of the advanced-ruleset tail (gyro, cockpit, targeting).
const ADVANCED_TAIL_LEN: usize = 12;

/// Decode the complete fixed-layout file: header fields, armor,
/// weapon summary, raw critical arrays and optional text, in exactly
/// the order the authoring tool writes them.
pub(crate) fn decode_file(bytes: &[u8]) -> Result<DecodedFile> {
    let mut cur = ByteCursor::new(bytes);

    let chassis = cur.read_string("chassis name")?;
    let model = cur.read_string("model name")?;
    let tonnage = cur.read_u32_le("tonnage")?;
    let year = cur.read_u32_le("year")?;
    let rules_level = cur.read_u32_le("rules level")?;

    let tech_base = read_tech_base(&mut cur)?;
    let tech_level = tech_level(&tech_base, rules_level)?;

    let chassis_type = ChassisType::from_code(cur.read_u32_le("chassis type")?)?;
    let structure = StructureKind::from_code(cur.read_u32_le("structure type")?)?;
    let engine_rating = cur.read_u32_le("engine rating")?;
    let engine = EngineKind::from_code(cur.read_u32_le("engine type")?)?;
    let walk_mp = cur.read_u32_le("walk MP")?;
    let jump_mp = cur.read_u32_le("jump MP")?;
    let jump_jets = JumpJetKind::from_code(cur.read_u32_le("jump jet type")?)?;
    let heat_sink_count = cur.read_u32_le("heat sink count")?;
    let heat_sinks = HeatSinkKind::from_code(cur.read_u32_le("heat sink type")?)?;

    let armor = read_armor(&mut cur)?;
    let weapons = read_weapon_table(&mut cur, &tech_base)?;

    let mut criticals = [[CriticalCode(0); SLOTS_PER_LOCATION]; 8];
    for slots in criticals.iter_mut() {
        for slot in slots.iter_mut() {
            *slot = CriticalCode(cur.read_u32_le("critical slot")?);
        }
    }

    // Descriptive text is optional; its presence is gated on enough
    // bytes remaining beyond the advanced-ruleset tail.
    let tail = if rules_level >= 2 { ADVANCED_TAIL_LEN } else { 0 };
    let (overview, capabilities, history) = if cur.remaining() >= tail + FLUFF_MIN_LEN {
        (
            cur.read_string("overview")?,
            cur.read_string("capabilities")?,
            cur.read_string("history")?,
        )
    } else {
        (String::new(), String::new(), String::new())
    };

    // Rules level 1 files end here and imply the standard variants.
    let (gyro, cockpit, targeting) = if rules_level >= 2 {
        (
            GyroKind::from_code(cur.read_u32_le("gyro type")?)?,
            CockpitKind::from_code(cur.read_u32_le("cockpit type")?)?,
            TargetingKind::from_code(cur.read_u32_le("targeting system")?)?,
        )
    } else {
        (
            GyroKind::Standard,
            CockpitKind::Standard,
            TargetingKind::Standard,
        )
    };

    Ok(DecodedFile {
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
            jump_jets,
            heat_sink_count,
            heat_sinks,
            gyro,
            cockpit,
            targeting,
        },
        armor,
        weapons,
        criticals,
        overview,
        capabilities,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TestFile;

    #[test]
    fn decodes_standard_biped_header() {
        let bytes = TestFile::default().encode();
        let decoded = decode_file(&bytes).unwrap();

        let header = &decoded.header;
        assert_eq!(header.chassis, "Marauder");
        assert_eq!(header.model, "MAD-3R");
        assert_eq!(header.tonnage, 75);
        assert_eq!(header.year, 3025);
        assert_eq!(header.tech_base, TechBase::InnerSphere);
        assert_eq!(header.tech_level, TechLevel::Introductory);
        assert_eq!(header.chassis_type, ChassisType::Biped);
        assert_eq!(header.engine_rating, 300);
        assert_eq!(header.walk_mp, 4);
        assert_eq!(header.gyro, GyroKind::Standard);
        assert_eq!(header.cockpit, CockpitKind::Standard);
    }

    #[test]
    fn decodes_armor_values_in_facing_order() {
        let bytes = TestFile::default().encode();
        let decoded = decode_file(&bytes).unwrap();

        let armor = &decoded.armor;
        assert_eq!(armor.kind, ArmorKind::Standard);
        assert!(armor.patchwork.is_none());
        assert_eq!(armor.left_arm, 16);
        assert_eq!(armor.left_torso, 18);
        assert_eq!(armor.left_torso_rear, 6);
        assert_eq!(armor.center_torso, 24);
        assert_eq!(armor.center_torso_rear, 8);
        assert_eq!(armor.head, 9);
    }

    #[test]
    fn patchwork_reads_a_kind_for_every_facing() {
        let mut file = TestFile::default();
        file.armor_code = 7;
        file.patchwork_codes = [0, 0, 0, 1, 1, 0, 0, 1, 0, 4, 0];
        let decoded = decode_file(&file.encode()).unwrap();

        let kinds = decoded.armor.patchwork.expect("patchwork kinds");
        assert_eq!(kinds[3], ArmorKind::FerroFibrous);
        assert_eq!(kinds[9], ArmorKind::Stealth);
        assert_eq!(decoded.armor.kind, ArmorKind::Patchwork);
    }

    #[test]
    fn mixed_design_reads_subsystem_overrides() {
        let mut file = TestFile::default();
        file.rules_level = 3;
        file.tech_code = 2;
        file.mixed_overrides = [1, 0, 0, 0, 1, 0];
        let decoded = decode_file(&file.encode()).unwrap();

        match decoded.header.tech_base {
            TechBase::Mixed {
                preferred,
                subsystems,
            } => {
                assert_eq!(preferred, BaseTech::InnerSphere);
                assert_eq!(subsystems.engine, BaseTech::Clan);
                assert_eq!(subsystems.targeting_computer, BaseTech::Clan);
                assert_eq!(subsystems.myomer, BaseTech::InnerSphere);
            }
            other => panic!("expected mixed tech base, got {other:?}"),
        }
        assert_eq!(decoded.header.tech_level, TechLevel::MixedAdvanced);
    }

    #[test]
    fn clan_rules_level_one_is_unsupported() {
        let mut file = TestFile::default();
        file.tech_code = 1;
        file.rules_level = 1;
        let err = decode_file(&file.encode()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnsupportedTechCombination { rules_level: 1, .. }
        ));
    }

    #[test]
    fn advanced_rules_read_gyro_cockpit_targeting() {
        let mut file = TestFile::default();
        file.rules_level = 2;
        file.gyro_code = 1;
        file.cockpit_code = 1;
        file.targeting_code = 1;
        let decoded = decode_file(&file.encode()).unwrap();
        assert_eq!(decoded.header.gyro, GyroKind::Xl);
        assert_eq!(decoded.header.cockpit, CockpitKind::Small);
        assert_eq!(
            decoded.header.targeting,
            TargetingKind::TargetingComputer
        );
    }

    #[test]
    fn fluff_text_is_optional() {
        let mut file = TestFile::default();
        file.fluff = Some(("Assault mech.", "Twin PPCs.", "Built 3025."));
        let decoded = decode_file(&file.encode()).unwrap();
        assert_eq!(decoded.overview, "Assault mech.");
        assert_eq!(decoded.capabilities, "Twin PPCs.");
        assert_eq!(decoded.history, "Built 3025.");

        let bare = decode_file(&TestFile::default().encode()).unwrap();
        assert!(bare.overview.is_empty());
    }

    #[test]
    fn truncation_mid_header_is_fatal() {
        let bytes = TestFile::default().encode();
        for cut in [1, 8, 20, 60, bytes.len() / 2] {
            let err = decode_file(&bytes[..cut]).unwrap_err();
            assert!(matches!(err, LoadError::Truncated { .. }));
        }
    }

    #[test]
    fn weapon_table_location_out_of_range_is_malformed() {
        let mut file = TestFile::default();
        file.weapons = vec![[1, 0x31, 99, 0]];
        let err = decode_file(&file.encode()).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }
}
