//! Builders for synthesizing valid design files in tests.

/// An encodable design file with sensible defaults: an Inner Sphere
/// rules-level-1 biped with standard everything. Tests tweak fields
/// and call `encode`.
#[derive(Clone)]
pub(crate) struct TestFile {
    pub chassis: &'static str,
    pub model: &'static str,
    pub tonnage: u32,
    pub year: u32,
    pub rules_level: u32,
    pub tech_code: u32,
    pub mixed_overrides: [u32; 6],
    pub chassis_code: u32,
    pub structure_code: u32,
    pub engine_rating: u32,
    pub engine_code: u32,
    pub walk_mp: u32,
    pub jump_mp: u32,
    pub jump_code: u32,
    pub heat_sink_count: u32,
    pub heat_sink_code: u32,
    pub armor_code: u32,
    pub patchwork_codes: [u32; 11],
    /// Facing order: LA, LT, LT rear, LL, RA, RT, RT rear, RL, HD,
    /// CT, CT rear.
    pub armor: [u32; 11],
    /// Each entry: qty, type code, location code, ammo index.
    pub weapons: Vec<[u32; 4]>,
    /// File order: LA, LT, LL, RA, RT, RL, HD, CT.
    pub crits: [[u32; 12]; 8],
    pub fluff: Option<(&'static str, &'static str, &'static str)>,
    pub gyro_code: u32,
    pub cockpit_code: u32,
    pub targeting_code: u32,
}

impl Default for TestFile {
    fn default() -> Self {
        Self {
            chassis: "Marauder",
            model: "MAD-3R",
            tonnage: 75,
            year: 3025,
            rules_level: 1,
            tech_code: 0,
            mixed_overrides: [0; 6],
            chassis_code: 0,
            structure_code: 0,
            engine_rating: 300,
            engine_code: 0,
            walk_mp: 4,
            jump_mp: 0,
            jump_code: 0,
            heat_sink_count: 16,
            heat_sink_code: 0,
            armor_code: 0,
            patchwork_codes: [0; 11],
            armor: [16, 18, 6, 20, 16, 18, 6, 20, 9, 24, 8],
            weapons: vec![[1, 0x33, 0, 0], [1, 0x33, 3, 0]],
            crits: [
                // Left arm: actuators plus a PPC.
                [1, 2, 3, 4, 0x33, 0x33, 0x33, 0, 0, 0, 0, 0],
                // Left torso: heat sinks.
                [0x0E, 0x0E, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                // Left leg.
                [5, 6, 7, 8, 0, 0, 0, 0, 0, 0, 0, 0],
                // Right arm.
                [1, 2, 3, 4, 0x33, 0x33, 0x33, 0, 0, 0, 0, 0],
                // Right torso.
                [0x0E, 0x0E, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                // Right leg.
                [5, 6, 7, 8, 0, 0, 0, 0, 0, 0, 0, 0],
                // Head, with the authoring tool's hole at slot four.
                [0x09, 0x0A, 0x0B, 0, 0x0A, 0x09, 0, 0, 0, 0, 0, 0],
                // Center torso: engine and gyro.
                [0x0C, 0x0C, 0x0C, 0x0D, 0x0D, 0x0D, 0x0D, 0x0C, 0x0C, 0x0C, 0, 0],
            ],
            fluff: None,
            gyro_code: 0,
            cockpit_code: 0,
            targeting_code: 0,
        }
    }
}

impl TestFile {
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();

        push_string(&mut out, self.chassis);
        push_string(&mut out, self.model);
        push_u32(&mut out, self.tonnage);
        push_u32(&mut out, self.year);
        push_u32(&mut out, self.rules_level);

        push_u32(&mut out, self.tech_code);
        if self.tech_code == 2 || self.tech_code == 3 {
            for &base in &self.mixed_overrides {
                push_u32(&mut out, base);
            }
        }

        push_u32(&mut out, self.chassis_code);
        push_u32(&mut out, self.structure_code);
        push_u32(&mut out, self.engine_rating);
        push_u32(&mut out, self.engine_code);
        push_u32(&mut out, self.walk_mp);
        push_u32(&mut out, self.jump_mp);
        push_u32(&mut out, self.jump_code);
        push_u32(&mut out, self.heat_sink_count);
        push_u32(&mut out, self.heat_sink_code);

        push_u32(&mut out, self.armor_code);
        if self.armor_code == 7 {
            for &code in &self.patchwork_codes {
                push_u32(&mut out, code);
            }
        }

        // Armor values with the fixed filler words the authoring tool
        // leaves between them.
        let a = &self.armor;
        push_u32(&mut out, a[0]); // LA
        push_filler(&mut out);
        push_u32(&mut out, a[1]); // LT
        push_u32(&mut out, a[2]); // LT rear
        push_filler(&mut out);
        push_u32(&mut out, a[3]); // LL
        push_filler(&mut out);
        push_u32(&mut out, a[4]); // RA
        push_filler(&mut out);
        push_u32(&mut out, a[5]); // RT
        push_u32(&mut out, a[6]); // RT rear
        push_filler(&mut out);
        push_u32(&mut out, a[7]); // RL
        push_filler(&mut out);
        push_u32(&mut out, a[8]); // HD
        push_filler(&mut out);
        push_u32(&mut out, a[9]); // CT
        push_u32(&mut out, a[10]); // CT rear

        push_u32(&mut out, self.weapons.len() as u32);
        for entry in &self.weapons {
            for &word in entry {
                push_u32(&mut out, word);
            }
        }

        for slots in &self.crits {
            for &code in slots {
                push_u32(&mut out, code);
            }
        }

        if let Some((overview, capabilities, history)) = self.fluff {
            push_string(&mut out, overview);
            push_string(&mut out, capabilities);
            push_string(&mut out, history);
        }

        if self.rules_level >= 2 {
            push_u32(&mut out, self.gyro_code);
            push_u32(&mut out, self.cockpit_code);
            push_u32(&mut out, self.targeting_code);
        }

        out
    }
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u16).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

fn push_filler(out: &mut Vec<u8>) {
    out.extend_from_slice(&[0xFF; 4]);
}
