use serde::Serialize;

/// Side length of the classifier input grid
pub const GRID_SIDE: u32 = 28;

/// Number of cells in the classifier input grid (28 x 28)
pub const GRID_LEN: usize = (GRID_SIDE * GRID_SIDE) as usize;

/// 28x28 grayscale intensities in row-major order, each in [0, 255]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PixelGrid {
    values: Vec<f32>,
}

impl PixelGrid {
    /// Build a grid from exactly 784 intensities
    pub fn from_values(values: Vec<f32>) -> Result<Self, String> {
        if values.len() != GRID_LEN {
            return Err(format!(
                "Expected {} pixel values, got {}",
                GRID_LEN,
                values.len()
            ));
        }

        Ok(Self { values })
    }

    /// Wrap values produced by a 28x28 resize
    pub(crate) fn from_resized(values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), GRID_LEN);
        Self { values }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Intensity at column `x`, row `y`
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= GRID_SIDE || y >= GRID_SIDE {
            return None;
        }
        self.values.get((y * GRID_SIDE + x) as usize).copied()
    }

    /// Number of cells with any ink at all
    pub fn lit_cells(&self) -> usize {
        self.values.iter().filter(|v| **v > 0.0).count()
    }

    /// Render the grid as 28 lines of ASCII shading (darkest to brightest)
    pub fn to_ascii(&self) -> String {
        const RAMP: &[u8] = b" .:-=+*#%@";

        self.values
            .chunks(GRID_SIDE as usize)
            .map(|row| {
                row.iter()
                    .map(|v| {
                        let level = (v.clamp(0.0, 255.0) / 255.0 * (RAMP.len() - 1) as f32).round();
                        RAMP[level as usize] as char
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
