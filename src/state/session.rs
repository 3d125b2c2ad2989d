/// Session state manager
///
/// Owns all runtime state for one session: the pitch catalog, the current
/// sign, the bounded pitch history, the count, and the saved combinations.
/// Every command is synchronous and atomic; a rejected command leaves the
/// state exactly as it was.
use std::collections::VecDeque;

use chrono::{DateTime, Local};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{PitchCatalog, PitchDatabase, SavedCombination, SelectedPitch};
use crate::error::{CatalogError, ComboError, SignError};
use crate::grid::GridLocation;
use crate::state::count::{AtBatOutcome, Count};

/// History keeps the most recent signs, newest first
pub const HISTORY_CAPACITY: usize = 10;

/// One generated sign: the pitch to throw and where to locate it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sign {
    pub pitch: String,
    pub category: String,
    pub location: GridLocation,
    pub is_strike: bool,
    pub drawn_at: DateTime<Local>,
}

impl Sign {
    /// Wall-clock display time, matching how the sign is shown to the user
    pub fn time_display(&self) -> String {
        self.drawn_at.format("%H:%M:%S").to_string()
    }
}

/// All session state, owned by a single context and mutated only through
/// the command methods below
#[derive(Debug, Clone)]
pub struct SessionState {
    catalog: PitchCatalog,
    current_sign: Option<Sign>,
    history: VecDeque<Sign>,
    count: Count,
    saved_combinations: Vec<SavedCombination>,
}

impl SessionState {
    /// Build a session seeded from a pitch database: the database catalog
    /// becomes the live catalog and its presets become the initial saved
    /// combinations.
    pub fn from_database(database: PitchDatabase) -> Self {
        let (catalog, presets) = database.into_parts();
        Self {
            catalog,
            current_sign: None,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
            count: Count::new(),
            saved_combinations: presets,
        }
    }

    // --- Catalog commands -------------------------------------------------

    /// Toggle one pitch's selection flag. Returns the new flag value.
    pub fn toggle_pitch(
        &mut self,
        category_index: usize,
        pitch_index: usize,
    ) -> Result<bool, CatalogError> {
        self.catalog.toggle_pitch(category_index, pitch_index)
    }

    /// Flat ordered list of the currently selected pitches. Pure query.
    pub fn selected_pitches(&self) -> Vec<SelectedPitch> {
        self.catalog.selected_pitches()
    }

    pub fn catalog(&self) -> &PitchCatalog {
        &self.catalog
    }

    // --- The draw ---------------------------------------------------------

    /// Draw the next sign: one pitch uniformly at random from the selected
    /// set (no category weighting) and an independent uniform grid location.
    /// The new sign becomes current and is prepended to the history, which
    /// is truncated to the most recent ten.
    pub fn draw_sign(&mut self, rng: &mut impl Rng) -> Result<Sign, SignError> {
        let selected = self.catalog.selected_pitches();
        if selected.is_empty() {
            return Err(SignError::NoSelection);
        }

        let pick = &selected[rng.gen_range(0..selected.len())];
        let location = GridLocation::random(rng);

        let sign = Sign {
            pitch: pick.name.clone(),
            category: pick.category.clone(),
            location,
            is_strike: location.is_in_strike_zone(),
            drawn_at: Local::now(),
        };

        tracing::info!(
            "Drew sign: {} ({}) at {}{}",
            sign.pitch,
            sign.category,
            sign.location,
            if sign.is_strike { " [strike zone]" } else { "" }
        );

        self.current_sign = Some(sign.clone());
        self.history.push_front(sign.clone());
        self.history.truncate(HISTORY_CAPACITY);

        Ok(sign)
    }

    /// The most recently drawn sign, if any
    pub fn current_sign(&self) -> Option<&Sign> {
        self.current_sign.as_ref()
    }

    /// Drawn signs, newest first, at most ten
    pub fn history(&self) -> &VecDeque<Sign> {
        &self.history
    }

    // --- Count commands ---------------------------------------------------

    pub fn add_ball(&mut self) -> AtBatOutcome {
        self.count.add_ball()
    }

    pub fn add_strike(&mut self) -> AtBatOutcome {
        self.count.add_strike()
    }

    pub fn reset_count(&mut self) {
        self.count.reset();
    }

    pub fn count(&self) -> Count {
        self.count
    }

    // --- Saved combinations -----------------------------------------------

    /// Save the current selection under a name. The name must be non-blank
    /// and at least one pitch must be selected; names are not deduplicated.
    pub fn save_combination(&mut self, name: &str) -> Result<&SavedCombination, ComboError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ComboError::EmptyName);
        }

        let pitches: Vec<String> = self
            .catalog
            .selected_pitches()
            .into_iter()
            .map(|p| p.name)
            .collect();
        if pitches.is_empty() {
            return Err(ComboError::EmptySelection);
        }

        tracing::info!("Saved combination '{}' with {} pitches", name, pitches.len());
        self.saved_combinations.push(SavedCombination {
            name: name.to_string(),
            pitches,
        });
        Ok(self.saved_combinations.last().expect("just pushed"))
    }

    /// Load a saved combination by index: a full-catalog overwrite, not a
    /// merge. Every pitch named in the combination becomes selected and
    /// everything else is deselected.
    pub fn load_combination(&mut self, index: usize) -> Result<&SavedCombination, ComboError> {
        let combo = self
            .saved_combinations
            .get(index)
            .ok_or(ComboError::IndexOutOfRange(index))?;

        let pitches = combo.pitches.clone();
        self.catalog.select_only(&pitches);

        let combo = &self.saved_combinations[index];
        tracing::info!("Loaded combination '{}'", combo.name);
        Ok(combo)
    }

    /// Apply an ad-hoc pitch-name list as the whole selection
    pub fn apply_combination(&mut self, pitches: &[String]) {
        self.catalog.select_only(pitches);
    }

    /// Delete a saved combination by index
    pub fn delete_combination(&mut self, index: usize) -> Result<SavedCombination, ComboError> {
        if index >= self.saved_combinations.len() {
            return Err(ComboError::IndexOutOfRange(index));
        }
        let removed = self.saved_combinations.remove(index);
        tracing::info!("Deleted combination '{}'", removed.name);
        Ok(removed)
    }

    pub fn saved_combinations(&self) -> &[SavedCombination] {
        &self.saved_combinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> SessionState {
        SessionState::from_database(PitchDatabase::load_embedded().unwrap())
    }

    #[test]
    fn test_seeded_presets() {
        let session = session();
        assert_eq!(session.saved_combinations().len(), 3);
        assert_eq!(session.saved_combinations()[0].name, "Power Pitcher");
    }

    #[test]
    fn test_draw_picks_from_selected() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(7);

        let selected: Vec<String> = session
            .selected_pitches()
            .into_iter()
            .map(|p| p.name)
            .collect();

        for _ in 0..50 {
            let sign = session.draw_sign(&mut rng).unwrap();
            assert!(selected.contains(&sign.pitch));
        }
    }

    #[test]
    fn test_draw_sets_current_and_history() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(3);

        let sign = session.draw_sign(&mut rng).unwrap();
        assert_eq!(session.current_sign(), Some(&sign));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0], sign);
    }

    #[test]
    fn test_history_bounded_newest_first() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(11);

        let mut last = None;
        for _ in 0..HISTORY_CAPACITY + 1 {
            last = Some(session.draw_sign(&mut rng).unwrap());
        }

        assert_eq!(session.history().len(), HISTORY_CAPACITY);
        assert_eq!(session.history()[0], last.unwrap());
    }

    #[test]
    fn test_draw_with_empty_selection_changes_nothing() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(5);

        session.draw_sign(&mut rng).unwrap();
        let before_current = session.current_sign().cloned();
        let before_len = session.history().len();

        session.apply_combination(&[]);
        assert_eq!(session.draw_sign(&mut rng), Err(SignError::NoSelection));
        assert_eq!(session.current_sign(), before_current.as_ref());
        assert_eq!(session.history().len(), before_len);
    }

    #[test]
    fn test_strike_matches_location() {
        let mut session = session();
        let mut rng = StdRng::seed_from_u64(23);

        for _ in 0..100 {
            let sign = session.draw_sign(&mut rng).unwrap();
            assert_eq!(sign.is_strike, sign.location.is_in_strike_zone());
        }
    }

    #[test]
    fn test_save_combination() {
        let mut session = session();
        let combo = session.save_combination("My Mix").unwrap().clone();

        assert_eq!(combo.name, "My Mix");
        assert_eq!(combo.pitches.len(), 8);
        assert_eq!(session.saved_combinations().len(), 4);
    }

    #[test]
    fn test_save_rejects_blank_names() {
        let mut session = session();

        assert_eq!(session.save_combination(""), Err(ComboError::EmptyName));
        assert_eq!(session.save_combination("   "), Err(ComboError::EmptyName));
        assert_eq!(session.saved_combinations().len(), 3);
    }

    #[test]
    fn test_save_rejects_empty_selection() {
        let mut session = session();
        session.apply_combination(&[]);

        assert_eq!(
            session.save_combination("Nothing"),
            Err(ComboError::EmptySelection)
        );
        assert_eq!(session.saved_combinations().len(), 3);
    }

    #[test]
    fn test_save_trims_name() {
        let mut session = session();
        let combo = session.save_combination("  Heaters  ").unwrap();
        assert_eq!(combo.name, "Heaters");
    }

    #[test]
    fn test_duplicate_combination_names_allowed() {
        let mut session = session();
        session.save_combination("Same").unwrap();
        session.save_combination("Same").unwrap();
        assert_eq!(session.saved_combinations().len(), 5);
    }

    #[test]
    fn test_load_combination_overwrites() {
        let mut session = session();

        // "Power Pitcher" has none of the default off-speed selections
        session.load_combination(0).unwrap();
        let names: Vec<String> = session
            .selected_pitches()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["4-Seam FB", "Cutter", "Slider", "Splitter"]);
    }

    #[test]
    fn test_load_out_of_range() {
        let mut session = session();
        let before = session.selected_pitches();

        assert_eq!(
            session.load_combination(42).unwrap_err(),
            ComboError::IndexOutOfRange(42)
        );
        assert_eq!(session.selected_pitches(), before);
    }

    #[test]
    fn test_delete_combination() {
        let mut session = session();
        let removed = session.delete_combination(1).unwrap();

        assert_eq!(removed.name, "Finesse Pitcher");
        assert_eq!(session.saved_combinations().len(), 2);
        assert_eq!(session.saved_combinations()[1].name, "Breaking Ball Specialist");
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut session = session();
        assert_eq!(
            session.delete_combination(3).unwrap_err(),
            ComboError::IndexOutOfRange(3)
        );
        assert_eq!(session.saved_combinations().len(), 3);
    }
}
