use serde::{Deserialize, Serialize};

/// Pointer position in pad pixel coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Parse "x,y" (whitespace around the numbers is allowed)
    pub fn parse(text: &str) -> Result<Self, String> {
        let (x, y) = text
            .split_once(',')
            .ok_or_else(|| format!("Expected 'x,y', got '{}'", text))?;

        let x = x
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("Invalid x in '{}': {}", text, e))?;
        let y = y
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("Invalid y in '{}': {}", text, e))?;

        Ok(Self::new(x, y))
    }
}
