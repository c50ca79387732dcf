//! Filter bar: option chips per dimension

use crate::filters::FilterState;
use crate::options::FilterOptions;
use moments_common::EnergyLevel;

const ANY_ENERGY: &str = "全部";
const CLEAR_LABEL: &str = "清空";

fn chip(label: &str, selected: bool) -> String {
    if selected {
        format!("[{}]", label)
    } else {
        format!(" {} ", label)
    }
}

fn chip_row(title: &str, chips: Vec<String>) -> Option<String> {
    if chips.is_empty() {
        return None;
    }
    Some(format!("{}: {}", title, chips.join(" ")))
}

/// Render the filter bar
///
/// Selected values are bracketed. A selected value that is missing from the
/// option vocabulary is still shown so the user can deselect it.
pub fn render_filter_bar(options: &FilterOptions, filters: &FilterState) -> String {
    let selection = filters.selection();
    let mut rows = Vec::new();

    let mut tags: Vec<&str> = options.tags.iter().map(String::as_str).collect();
    for tag in &selection.tags {
        if !tags.contains(&tag.as_str()) {
            tags.push(tag);
        }
    }
    rows.extend(chip_row(
        "标签",
        tags.iter()
            .map(|t| chip(t, selection.tags.iter().any(|s| s == t)))
            .collect(),
    ));

    let energy = match selection.energy_level {
        Some(level) => format!("{} {}", level, level.label()),
        None => ANY_ENERGY.to_string(),
    };
    rows.push(format!(
        "能量: {}  ({}..{})",
        energy,
        EnergyLevel::MIN,
        EnergyLevel::MAX
    ));

    let mut years = options.years.clone();
    for year in &selection.years {
        if !years.contains(year) {
            years.push(*year);
        }
    }
    rows.extend(chip_row(
        "年份",
        years
            .iter()
            .map(|y| chip(&y.to_string(), selection.years.contains(y)))
            .collect(),
    ));

    let mut periods: Vec<&str> = options.periods.iter().map(String::as_str).collect();
    for period in &selection.periods {
        if !periods.contains(&period.as_str()) {
            periods.push(period);
        }
    }
    rows.extend(chip_row(
        "时期",
        periods
            .iter()
            .map(|p| chip(p, selection.periods.iter().any(|s| s == p)))
            .collect(),
    ));

    if filters.has_active_filters() {
        rows.push(format!("[{}]", CLEAR_LABEL));
    }

    let mut out = rows.join("\n");
    out.push('\n');
    out
}
