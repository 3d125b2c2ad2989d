use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{CatalogError, DatabaseError};

/// A single pitch type with its selection flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchOption {
    pub name: String,
    pub selected: bool,
}

/// A named group of pitch types (Fastballs, Breaking Balls, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchCategory {
    pub name: String,
    pub pitches: Vec<PitchOption>,
}

/// A selected pitch paired with the category it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPitch {
    pub name: String,
    pub category: String,
}

/// A named, saved subset of pitch selections for quick recall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCombination {
    pub name: String,
    pub pitches: Vec<String>,
}

/// The pitch catalog: ordered categories of toggleable pitch options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchCatalog {
    pub categories: Vec<PitchCategory>,
}

impl PitchCatalog {
    /// Toggle a pitch's selection flag. Returns the new flag value.
    /// Invalid indices reject the command without mutating anything.
    pub fn toggle_pitch(
        &mut self,
        category_index: usize,
        pitch_index: usize,
    ) -> Result<bool, CatalogError> {
        let category = self
            .categories
            .get_mut(category_index)
            .ok_or(CatalogError::InvalidCategory(category_index))?;

        let pitch = category
            .pitches
            .get_mut(pitch_index)
            .ok_or_else(|| CatalogError::InvalidPitch {
                category: category.name.clone(),
                pitch: pitch_index,
            })?;

        pitch.selected = !pitch.selected;
        Ok(pitch.selected)
    }

    /// Flat list of all selected pitches, preserving category-then-pitch order
    pub fn selected_pitches(&self) -> Vec<SelectedPitch> {
        let mut selected = Vec::new();
        for category in &self.categories {
            for pitch in &category.pitches {
                if pitch.selected {
                    selected.push(SelectedPitch {
                        name: pitch.name.clone(),
                        category: category.name.clone(),
                    });
                }
            }
        }
        selected
    }

    /// Number of currently selected pitches
    pub fn selected_count(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.pitches.iter().filter(|p| p.selected).count())
            .sum()
    }

    /// Overwrite the whole selection: every pitch whose name appears in
    /// `names` becomes selected, every other pitch is deselected.
    pub fn select_only(&mut self, names: &[String]) {
        for category in &mut self.categories {
            for pitch in &mut category.pitches {
                pitch.selected = names.contains(&pitch.name);
            }
        }
    }
}

/// The seed database: default catalog plus preset combinations.
///
/// Embedded in the binary and copied to the user config directory on first
/// run so users can edit their own catalog. Runtime state (toggles, saved
/// combinations) is never written back; a restart reloads this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchDatabase {
    pub categories: Vec<PitchCategory>,
    pub presets: Vec<SavedCombination>,
}

impl PitchDatabase {
    /// Load the pitch database from the user config directory, creating it
    /// from the embedded default on first run.
    pub fn load() -> Result<Self, DatabaseError> {
        let db_path = Self::database_path()?;

        if !db_path.exists() {
            tracing::info!(
                "pitches.json not found in user config directory, creating from embedded default"
            );
            let database = Self::load_embedded()?;
            database.save()?;
            return Ok(database);
        }

        let content = fs::read_to_string(&db_path).map_err(|e| DatabaseError::LoadFailed {
            path: db_path.display().to_string(),
            source: Box::new(e),
        })?;
        let database: PitchDatabase =
            serde_json::from_str(&content).map_err(|e| DatabaseError::LoadFailed {
                path: db_path.display().to_string(),
                source: Box::new(e),
            })?;
        database.validate()?;
        Ok(database)
    }

    /// Load the embedded default database (fallback)
    pub fn load_embedded() -> Result<Self, DatabaseError> {
        const EMBEDDED_DB: &str = include_str!("../config/pitches.json");
        let database: PitchDatabase = serde_json::from_str(EMBEDDED_DB)
            .map_err(|e| DatabaseError::Invalid(e.to_string()))?;
        database.validate()?;
        Ok(database)
    }

    /// Save the pitch database to the user config directory
    pub fn save(&self) -> Result<(), DatabaseError> {
        let db_path = Self::database_path()?;

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|e| DatabaseError::SaveFailed {
                path: db_path.display().to_string(),
                source: Box::new(e),
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| DatabaseError::SaveFailed {
            path: db_path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(&db_path, json).map_err(|e| DatabaseError::SaveFailed {
            path: db_path.display().to_string(),
            source: Box::new(e),
        })?;

        tracing::info!("Saved pitch database to: {}", db_path.display());
        Ok(())
    }

    /// Path to the pitch database file in the user-writable config directory
    pub fn database_path() -> Result<PathBuf, DatabaseError> {
        let base = dirs::config_dir().ok_or_else(|| {
            DatabaseError::Invalid("Could not determine user config directory".to_string())
        })?;
        Ok(base.join("PitchSigns").join("pitches.json"))
    }

    /// Split into the runtime catalog and the preset combinations
    pub fn into_parts(self) -> (PitchCatalog, Vec<SavedCombination>) {
        (
            PitchCatalog {
                categories: self.categories,
            },
            self.presets,
        )
    }

    /// Reject databases that would break catalog invariants: category names
    /// must be unique, pitch names unique within their category, and no
    /// category may be empty.
    fn validate(&self) -> Result<(), DatabaseError> {
        for (i, category) in self.categories.iter().enumerate() {
            if category.pitches.is_empty() {
                return Err(DatabaseError::Invalid(format!(
                    "category '{}' has no pitches",
                    category.name
                )));
            }
            if self.categories[..i].iter().any(|c| c.name == category.name) {
                return Err(DatabaseError::Invalid(format!(
                    "duplicate category name '{}'",
                    category.name
                )));
            }
            for (j, pitch) in category.pitches.iter().enumerate() {
                if category.pitches[..j].iter().any(|p| p.name == pitch.name) {
                    return Err(DatabaseError::Invalid(format!(
                        "duplicate pitch name '{}' in category '{}'",
                        pitch.name, category.name
                    )));
                }
            }
        }
        Ok(())
    }
}
