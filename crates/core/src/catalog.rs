//! Level catalog - the fixed, ordered list of level descriptors
//!
//! Levels are immutable once loaded. Ids are ordinal: the first level is 1
//! and each following level is exactly one higher, so "next level" and
//! "highest unlocked level" are plain integer arithmetic.

use std::fmt;

use serde::Deserialize;

use crate::types::MAX_TILE_TYPES;

/// One level's parameters. Dimensions count interior cells only; the board
/// adds a one-cell empty border on every side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub id: u32,
    pub interior_rows: usize,
    pub interior_cols: usize,
    pub tile_type_count: u8,
    pub time_limit_seconds: u32,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl LevelConfig {
    /// Board height including the border
    pub fn board_rows(&self) -> usize {
        self.interior_rows + 2
    }

    /// Board width including the border
    pub fn board_cols(&self) -> usize {
        self.interior_cols + 2
    }

    /// Tiles on a freshly generated board
    pub fn tile_total(&self) -> usize {
        self.interior_rows * self.interior_cols
    }

    fn builtin(
        id: u32,
        rows: usize,
        cols: usize,
        types: u8,
        time: u32,
        label: &str,
        description: &str,
    ) -> Self {
        Self {
            id,
            interior_rows: rows,
            interior_cols: cols,
            tile_type_count: types,
            time_limit_seconds: time,
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

/// Reasons a catalog fails validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Parse(String),
    Empty,
    IdOutOfOrder { index: usize, expected: u32, found: u32 },
    ZeroDimension { id: u32 },
    TileTypesOutOfRange { id: u32, count: u8 },
    ZeroTimeLimit { id: u32 },
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Parse(_) => "parse",
            CatalogError::Empty => "empty",
            CatalogError::IdOutOfOrder { .. } => "id_out_of_order",
            CatalogError::ZeroDimension { .. } => "zero_dimension",
            CatalogError::TileTypesOutOfRange { .. } => "tile_types_out_of_range",
            CatalogError::ZeroTimeLimit { .. } => "zero_time_limit",
        }
    }

    pub fn message(&self) -> String {
        match self {
            CatalogError::Parse(e) => format!("invalid level catalog json: {}", e),
            CatalogError::Empty => "level catalog has no levels".to_string(),
            CatalogError::IdOutOfOrder {
                index,
                expected,
                found,
            } => format!(
                "level #{} has id {}, expected {}",
                index + 1,
                found,
                expected
            ),
            CatalogError::ZeroDimension { id } => {
                format!("level {} has a zero interior dimension", id)
            }
            CatalogError::TileTypesOutOfRange { id, count } => format!(
                "level {} uses {} tile types, expected 1..={}",
                id, count, MAX_TILE_TYPES
            ),
            CatalogError::ZeroTimeLimit { id } => format!("level {} has no time limit", id),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for CatalogError {}

/// Ordered, validated list of levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<LevelConfig>,
}

impl LevelCatalog {
    /// The nine stock levels
    pub fn builtin() -> Self {
        let levels = vec![
            LevelConfig::builtin(1, 6, 6, 4, 60, "Beginner", "An easy warm-up (6x6)"),
            LevelConfig::builtin(2, 6, 8, 6, 90, "Novice", "Finding the rhythm (6x8)"),
            LevelConfig::builtin(3, 8, 8, 8, 120, "Intermediate", "Standard difficulty (8x8)"),
            LevelConfig::builtin(4, 8, 10, 10, 150, "Advanced", "A test of sharp eyes (8x10)"),
            LevelConfig::builtin(5, 9, 12, 12, 180, "Extreme", "Every second counts (9x12)"),
            LevelConfig::builtin(6, 10, 12, 14, 200, "Divine", "Dazzling (10x12)"),
            LevelConfig::builtin(7, 10, 14, 15, 220, "Transcendent", "Densely packed (10x14)"),
            LevelConfig::builtin(8, 12, 14, 16, 240, "Summit", "Brain burner (12x14)"),
            LevelConfig::builtin(9, 12, 16, 16, 260, "Journey's End", "All becomes one (12x16)"),
        ];
        Self { levels }
    }

    /// Parse and validate a JSON array of level objects
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let levels: Vec<LevelConfig> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_levels(levels)
    }

    pub fn from_levels(levels: Vec<LevelConfig>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, level) in levels.iter().enumerate() {
            let expected = index as u32 + 1;
            if level.id != expected {
                return Err(CatalogError::IdOutOfOrder {
                    index,
                    expected,
                    found: level.id,
                });
            }
            if level.interior_rows == 0 || level.interior_cols == 0 {
                return Err(CatalogError::ZeroDimension { id: level.id });
            }
            if level.tile_type_count == 0 || level.tile_type_count > MAX_TILE_TYPES {
                return Err(CatalogError::TileTypesOutOfRange {
                    id: level.id,
                    count: level.tile_type_count,
                });
            }
            if level.time_limit_seconds == 0 {
                return Err(CatalogError::ZeroTimeLimit { id: level.id });
            }
        }
        Ok(Self { levels })
    }

    pub fn get(&self, id: u32) -> Option<&LevelConfig> {
        let index = (id as usize).checked_sub(1)?;
        self.levels.get(index)
    }

    /// The level after `id`, or `None` past the last one
    pub fn next_after(&self, id: u32) -> Option<&LevelConfig> {
        self.get(id.saturating_add(1))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Id of the final level
    pub fn last_id(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
