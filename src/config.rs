use serde::{Deserialize, Serialize};

use crate::error::{FlowError, Result};
use crate::geometry::non_negative;
use crate::layout::{Alignment, FlowDirection};

/// Container settings applied uniformly to every line of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Horizontal gap between items on the same line.
    pub spacing: f32,
    /// Vertical gap between consecutive lines.
    pub line_spacing: f32,
    pub alignment: Alignment,
    pub direction: FlowDirection,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            spacing: 4.0,
            line_spacing: 4.0,
            alignment: Alignment::Leading,
            direction: FlowDirection::LeftToRight,
        }
    }
}

impl FlowConfig {
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_direction(mut self, direction: FlowDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Copy with negative or NaN spacings clamped to zero.
    pub fn sanitized(&self) -> Self {
        Self {
            spacing: finite_or_zero(self.spacing),
            line_spacing: finite_or_zero(self.line_spacing),
            ..*self
        }
    }

    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(source: &str) -> Result<Self> {
        let config: FlowConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("spacing", self.spacing), ("line_spacing", self.line_spacing)] {
            if !value.is_finite() || value < 0.0 {
                return Err(FlowError::Config(format!(
                    "`{name}` must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { non_negative(value) } else { 0.0 }
}
