//! Moment cards and the two-column waterfall

use moments_common::energy::{energy_label, EnergyTone};
use moments_common::EnergyLevel;
use moments_common::{MomentComment, MusicMoment};
use std::fmt::Write;

const UNKNOWN_SONG: &str = "未知歌曲";
const UNKNOWN_ARTIST: &str = "未知艺术家";

/// Render one moment card
pub fn render_card(moment: &MusicMoment) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "♪ {} — {}",
        moment.song_title().unwrap_or(UNKNOWN_SONG),
        moment.artist_name().unwrap_or(UNKNOWN_ARTIST)
    );
    let _ = writeln!(out, "  “{}”", moment.content);

    let meta = metadata_line(moment);
    if !meta.is_empty() {
        let _ = writeln!(out, "  {}", meta);
    }

    let created = moment
        .created_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let _ = writeln!(out, "  ♥ {}    {}    [{}]", moment.like_count, created, moment.id);

    if !moment.comments.is_empty() {
        let _ = writeln!(out, "  跟评 ({})", moment.comments.len());
        for comment in &moment.comments {
            out.push_str(&render_comment(comment));
        }
    }

    out
}

/// Tags, energy label and first-heard context on one line
fn metadata_line(moment: &MusicMoment) -> String {
    let mut parts: Vec<String> = moment.tags.iter().map(|t| format!("#{}", t)).collect();

    if moment.energy_level != 0 {
        // Out-of-scale values from the backend keep their label but no arrow
        let arrow = match EnergyLevel::new(moment.energy_level).map(EnergyLevel::tone) {
            Some(EnergyTone::Restoring) => "↓",
            Some(EnergyTone::Energizing) => "↑",
            _ => "",
        };
        parts.push(format!("{}{}", arrow, energy_label(moment.energy_level)));
    }

    if let Some(year) = moment.first_heard_year {
        match moment.first_heard_period.as_deref().filter(|p| !p.is_empty()) {
            Some(period) => parts.push(format!("{} · {}", year, period)),
            None => parts.push(year.to_string()),
        }
    }

    parts.join("  ")
}

fn render_comment(comment: &MomentComment) -> String {
    let mut out = format!("    │ {}\n", comment.content);

    let date = comment
        .listen_day()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .or_else(|| comment.listen_date.clone());
    let detail = match (date, comment.location.as_deref()) {
        (Some(date), Some(location)) => Some(format!("{} · {}", date, location)),
        (Some(date), None) => Some(date),
        (None, Some(location)) => Some(location.to_string()),
        (None, None) => None,
    };
    if let Some(detail) = detail {
        out.push_str(&format!("    │   {}\n", detail));
    }

    out
}

/// Split moments into two columns by alternating index
///
/// Even positions go left, odd positions go right, preserving order within
/// each column.
pub fn waterfall(moments: &[MusicMoment]) -> (Vec<&MusicMoment>, Vec<&MusicMoment>) {
    let left = moments.iter().step_by(2).collect();
    let right = moments.iter().skip(1).step_by(2).collect();
    (left, right)
}

/// Render a list of cards, one or two columns wide
pub fn render_cards(moments: &[MusicMoment], columns: usize) -> String {
    if columns < 2 {
        return moments
            .iter()
            .map(render_card)
            .collect::<Vec<_>>()
            .join("\n");
    }

    let (left, right) = waterfall(moments);
    let left = render_column(&left);
    let right = render_column(&right);
    side_by_side(&left, &right)
}

fn render_column(moments: &[&MusicMoment]) -> Vec<String> {
    let mut lines = Vec::new();
    for moment in moments {
        lines.extend(render_card(moment).lines().map(str::to_string));
        lines.push(String::new());
    }
    lines
}

/// Column width in terminal cells
const COLUMN_WIDTH: usize = 48;

fn side_by_side(left: &[String], right: &[String]) -> String {
    let rows = left.len().max(right.len());
    let mut out = String::new();
    for i in 0..rows {
        let l = left.get(i).map(String::as_str).unwrap_or("");
        let r = right.get(i).map(String::as_str).unwrap_or("");
        let pad = COLUMN_WIDTH.saturating_sub(display_width(l));
        let line = format!("{}{}  {}", l, " ".repeat(pad), r);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Approximate terminal width: CJK and other wide characters take two cells
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| if (c as u32) >= 0x1100 { 2 } else { 1 })
        .sum()
}
