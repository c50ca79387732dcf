//! Filter state holder
//!
//! Pure state transitions for the feed's filter bar. Every mutation of a
//! filter dimension sends the user back to page 1; changing only the page
//! leaves the selection alone.
//!
//! Dimensions combine with logical AND on the backend; an empty dimension
//! imposes no constraint. Values keep the order in which they were toggled
//! on, which is the order they are comma-joined into the query.

use crate::query::{join_values, MomentQuery};
use moments_common::EnergyLevel;
use tracing::debug;

/// Fixed feed page size
pub const PAGE_SIZE: u32 = 10;

/// Active filter dimensions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub tags: Vec<String>,
    /// `None` means "any energy"; neutral is never stored here
    pub energy_level: Option<EnergyLevel>,
    pub years: Vec<i32>,
    pub periods: Vec<String>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.energy_level.is_none()
            && self.years.is_empty()
            && self.periods.is_empty()
    }
}

/// Filter selection plus the current 1-based page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    selection: FilterSelection,
    current_page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selection: FilterSelection::default(),
            current_page: 1,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Whether any dimension constrains the feed
    pub fn has_active_filters(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        toggle(&mut self.selection.tags, tag.to_string());
        self.filters_changed();
    }

    pub fn toggle_year(&mut self, year: i32) {
        toggle(&mut self.selection.years, year);
        self.filters_changed();
    }

    pub fn toggle_period(&mut self, period: &str) {
        toggle(&mut self.selection.periods, period.to_string());
        self.filters_changed();
    }

    /// Slider input; the neutral position disables the energy filter
    pub fn set_energy_level(&mut self, level: i32) {
        let level = EnergyLevel::clamped(level);
        self.selection.energy_level = (!level.is_neutral()).then_some(level);
        self.filters_changed();
    }

    /// Replace the whole tag dimension (duplicates dropped, order kept)
    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.tags = dedup(tags.into_iter().map(Into::into));
        self.filters_changed();
    }

    pub fn set_years<I: IntoIterator<Item = i32>>(&mut self, years: I) {
        self.selection.years = dedup(years);
        self.filters_changed();
    }

    pub fn set_periods<I, S>(&mut self, periods: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.periods = dedup(periods.into_iter().map(Into::into));
        self.filters_changed();
    }

    /// Move to `page` (clamped to ≥ 1) without touching the selection
    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    /// Clear every dimension and return to page 1
    pub fn reset(&mut self) {
        self.selection = FilterSelection::default();
        self.current_page = 1;
        debug!("Filters reset");
    }

    /// List request for the current selection and page
    pub fn to_query(&self) -> MomentQuery {
        MomentQuery {
            page: self.current_page,
            limit: PAGE_SIZE,
            tags: join_values(&self.selection.tags),
            energy_level: self.selection.energy_level.map(EnergyLevel::value),
            year: join_values(&self.selection.years),
            period: join_values(&self.selection.periods),
        }
    }

    fn filters_changed(&mut self) {
        self.current_page = 1;
        debug!(selection = ?self.selection, "Filters changed, page reset to 1");
    }
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

fn dedup<T: PartialEq, I: IntoIterator<Item = T>>(values: I) -> Vec<T> {
    let mut out = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> FilterState {
        let mut state = FilterState::new();
        state.set_page(3);
        state
    }

    #[test]
    fn test_initial_state() {
        let state = FilterState::new();
        assert_eq!(state.current_page(), 1);
        assert!(!state.has_active_filters());
        assert_eq!(state.to_query(), MomentQuery::page(1, PAGE_SIZE));
    }

    #[test]
    fn test_every_mutation_resets_page() {
        let mutations: Vec<(&str, Box<dyn Fn(&mut FilterState)>)> = vec![
            ("toggle_tag", Box::new(|s: &mut FilterState| s.toggle_tag("治愈"))),
            ("toggle_year", Box::new(|s: &mut FilterState| s.toggle_year(2020))),
            ("toggle_period", Box::new(|s: &mut FilterState| s.toggle_period("高中"))),
            ("set_energy_level", Box::new(|s: &mut FilterState| s.set_energy_level(3))),
            ("set_energy_level neutral", Box::new(|s: &mut FilterState| s.set_energy_level(0))),
            ("set_tags", Box::new(|s: &mut FilterState| s.set_tags(["a"]))),
            ("set_years", Box::new(|s: &mut FilterState| s.set_years([2001]))),
            ("set_periods", Box::new(|s: &mut FilterState| s.set_periods(["大学"]))),
            ("reset", Box::new(|s: &mut FilterState| s.reset())),
        ];

        for (name, mutate) in mutations {
            let mut state = on_page_three();
            mutate(&mut state);
            assert_eq!(state.current_page(), 1, "{} should reset page", name);
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut state = FilterState::new();
        state.toggle_tag("治愈");
        state.toggle_tag("回忆");
        assert_eq!(state.selection().tags, vec!["治愈", "回忆"]);

        state.toggle_tag("治愈");
        assert_eq!(state.selection().tags, vec!["回忆"]);

        state.toggle_year(2020);
        state.toggle_year(2020);
        assert!(state.selection().years.is_empty());
    }

    #[test]
    fn test_neutral_energy_clears_filter() {
        let mut state = FilterState::new();
        state.set_energy_level(-2);
        assert_eq!(state.selection().energy_level.map(EnergyLevel::value), Some(-2));

        state.set_energy_level(0);
        assert_eq!(state.selection().energy_level, None);
        assert!(state.to_query().energy_level.is_none());
    }

    #[test]
    fn test_energy_is_clamped() {
        let mut state = FilterState::new();
        state.set_energy_level(12);
        assert_eq!(state.to_query().energy_level, Some(5));
    }

    #[test]
    fn test_set_page_does_not_touch_selection() {
        let mut state = FilterState::new();
        state.toggle_tag("治愈");
        state.set_page(4);
        assert_eq!(state.current_page(), 4);
        assert_eq!(state.selection().tags, vec!["治愈"]);

        state.set_page(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = FilterState::new();
        state.toggle_tag("a");
        state.toggle_year(1999);
        state.set_energy_level(4);
        state.set_page(2);

        state.reset();
        let once = state.clone();
        state.reset();

        assert_eq!(state, once);
        assert_eq!(state, FilterState::new());
    }

    #[test]
    fn test_scenario_query_string() {
        let mut state = FilterState::new();
        state.set_tags(["治愈"]);
        state.set_years([2020]);
        state.set_page(2);

        let query = state.to_query().to_string();
        assert!(query.contains("tags=治愈&page=2&limit=10&year=2020"), "{}", query);
        assert!(!query.contains("energyLevel"));
        assert!(!query.contains("period"));
    }

    #[test]
    fn test_set_dimension_dedups() {
        let mut state = FilterState::new();
        state.set_tags(["a", "b", "a"]);
        state.set_years([2020, 2020, 2019]);
        assert_eq!(state.selection().tags, vec!["a", "b"]);
        assert_eq!(state.selection().years, vec![2020, 2019]);
    }
}
