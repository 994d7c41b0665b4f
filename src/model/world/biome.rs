use serde::{Deserialize, Serialize};

use super::noise::{lerp, perlin};

/// Terrain shape parameters, interpolated per column between two presets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeParams {
    pub frequency: f32,
    pub amplitude: f32,
    pub persistence: f32,
    pub height_scale: f32,
}

impl BiomeParams {
    /// Component-wise linear interpolation.
    pub fn lerp(&self, other: &BiomeParams, t: f32) -> BiomeParams {
        BiomeParams {
            frequency: lerp(self.frequency, other.frequency, t),
            amplitude: lerp(self.amplitude, other.amplitude, t),
            persistence: lerp(self.persistence, other.persistence, t),
            height_scale: lerp(self.height_scale, other.height_scale, t),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomePreset {
    pub name: String,
    pub params: BiomeParams,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeId {
    Plains = 0,
    Hills = 1,
}

/// Two named presets and the noise field blending between them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeTable {
    /// Preset used where the blend factor is 0 (plains).
    pub low: BiomePreset,
    /// Preset used where the blend factor is 1 (hills).
    pub high: BiomePreset,
    pub blend_frequency: f32,
    pub blend_low_edge: f32,
    pub blend_high_edge: f32,
    pub transition_label: String,
}

impl Default for BiomeTable {
    fn default() -> Self {
        Self {
            low: BiomePreset {
                name: "Plains".to_string(),
                params: BiomeParams {
                    frequency: 0.01,
                    amplitude: 1.0,
                    persistence: 0.4,
                    height_scale: 6.0,
                },
            },
            high: BiomePreset {
                name: "Hills".to_string(),
                params: BiomeParams {
                    frequency: 0.03,
                    amplitude: 1.5,
                    persistence: 0.5,
                    height_scale: 14.0,
                },
            },
            blend_frequency: 0.02,
            blend_low_edge: 0.4,
            blend_high_edge: 0.6,
            transition_label: "Transition".to_string(),
        }
    }
}

impl BiomeTable {
    /// Same preset on both ends: no blending at all.
    pub fn uniform(preset: BiomePreset) -> Self {
        Self {
            low: preset.clone(),
            high: preset,
            ..Self::default()
        }
    }

    /// Continuous blend factor in [0, 1] at a world column.
    pub fn blend_factor(&self, x: f32, z: f32) -> f32 {
        let n = perlin(x * self.blend_frequency, 0.0, z * self.blend_frequency);
        smoothstep(self.blend_low_edge, self.blend_high_edge, n)
    }

    pub fn params_for_blend(&self, blend: f32) -> BiomeParams {
        self.low.params.lerp(&self.high.params, blend)
    }

    pub fn params(&self, x: f32, z: f32) -> BiomeParams {
        self.params_for_blend(self.blend_factor(x, z))
    }

    /// Dominant preset, used to tag chunks.
    pub fn biome_for_blend(&self, blend: f32) -> BiomeId {
        if blend >= 0.5 {
            BiomeId::Hills
        } else {
            BiomeId::Plains
        }
    }

    /// Display bucket of a blend factor. Never drives generation.
    pub fn label_for_blend(&self, blend: f32) -> &str {
        if blend < self.blend_low_edge {
            &self.low.name
        } else if blend > self.blend_high_edge {
            &self.high.name
        } else {
            &self.transition_label
        }
    }

    pub fn current_biome_text(&self, x: f32, z: f32) -> &str {
        self.label_for_blend(self.blend_factor(x, z))
    }
}

/// Cubic Hermite step; the normalised input is clamped to [0, 1].
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
