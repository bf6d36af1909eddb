//! Editor configuration, loaded from JSON.

use crate::color::{Color, WHITE, parse_hex_color, to_hex};
use crate::geometry::Size;
use crate::history::DEFAULT_UNDO_CAPACITY;
use crate::widget::{GridMetrics, classic_colors};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Palette section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub row_length: usize,
    /// `#rrggbb` or `#rrggbbaa` strings, row-major.
    pub colors: Vec<String>,
    pub cell_size: f64,
    pub gap: f64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            row_length: 14,
            colors: classic_colors().into_iter().map(to_hex).collect(),
            cell_size: 16.0,
            gap: 2.0,
        }
    }
}

/// Tool box section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolBoxConfig {
    pub column_length: usize,
    pub cell_size: f64,
    pub gap: f64,
}

impl Default for ToolBoxConfig {
    fn default() -> Self {
        Self {
            column_length: 8,
            cell_size: 28.0,
            gap: 2.0,
        }
    }
}

/// Ribbon section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    pub font_size: f64,
    pub padding: f64,
    pub height: f64,
    pub gap: f64,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            padding: 10.0,
            height: 26.0,
            gap: 4.0,
        }
    }
}

/// Everything the editor needs to set itself up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Hex colour the canvas starts with and the eraser paints.
    pub background: String,
    pub undo_capacity: usize,
    pub ui_scale: f64,
    pub palette: PaletteConfig,
    pub toolbox: ToolBoxConfig,
    pub ribbon: RibbonConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: to_hex(WHITE),
            undo_capacity: DEFAULT_UNDO_CAPACITY,
            ui_scale: 1.0,
            palette: PaletteConfig::default(),
            toolbox: ToolBoxConfig::default(),
            ribbon: RibbonConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parsed background colour, white if the string is not a colour.
    pub fn background_color(&self) -> Color {
        parse_hex_color(&self.background).unwrap_or_else(|| {
            log::warn!("Invalid background colour {:?}, using white", self.background);
            WHITE
        })
    }

    /// Parsed palette colours; unparsable entries are skipped with a warning.
    pub fn palette_colors(&self) -> Vec<Color> {
        self.palette
            .colors
            .iter()
            .filter_map(|s| {
                let color = parse_hex_color(s);
                if color.is_none() {
                    log::warn!("Skipping invalid palette colour {:?}", s);
                }
                color
            })
            .collect()
    }

    pub fn palette_metrics(&self) -> GridMetrics {
        GridMetrics::square(self.palette.cell_size, self.palette.gap, self.ui_scale)
    }

    pub fn toolbox_metrics(&self) -> GridMetrics {
        GridMetrics::square(self.toolbox.cell_size, self.toolbox.gap, self.ui_scale)
    }

    /// Ribbon metrics; only the cell height is used, widths are measured.
    pub fn ribbon_metrics(&self) -> GridMetrics {
        GridMetrics::new(Size::new(0.0, self.ribbon.height), self.ribbon.gap, self.ui_scale)
    }
}
