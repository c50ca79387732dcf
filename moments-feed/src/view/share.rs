//! Share dialog

use crate::api::MomentsApi;
use crate::compose::{ComposeMode, ShareDialog};
use std::fmt::Write;

/// Render the dialog's current mode and form
pub fn render_share_dialog<A: MomentsApi + ?Sized>(dialog: &ShareDialog<A>) -> String {
    let mut out = String::new();
    let song = dialog.song();
    let form = dialog.form();

    let _ = writeln!(out, "== {} ==", dialog.title());
    match (&song.title, &song.artist_name) {
        (Some(title), Some(artist)) => {
            let _ = writeln!(out, "♪ {} — {}", title, artist);
        }
        (Some(title), None) => {
            let _ = writeln!(out, "♪ {}", title);
        }
        _ => {
            let _ = writeln!(out, "♪ {}", song.id);
        }
    }

    match dialog.mode() {
        ComposeMode::Unknown => {
            let _ = writeln!(out, "检查中...");
        }
        ComposeMode::Create => {
            let _ = writeln!(out, "内容: {}", form.content);
            let _ = writeln!(out, "标签: {}", form.tags.join(", "));
            let _ = writeln!(
                out,
                "能量: {} {}",
                form.energy_level,
                form.energy_level.label()
            );
            let _ = writeln!(out, "初次听到: {} {}", form.first_heard_year, form.first_heard_period);
        }
        ComposeMode::Append(existing) => {
            let _ = writeln!(out, "原文: “{}”", existing.content);
            let _ = writeln!(out, "内容: {}", form.content);
            let date = if form.listen_date.trim().is_empty() {
                "今天"
            } else {
                form.listen_date.trim()
            };
            let _ = writeln!(out, "聆听日期: {}", date);
            let _ = writeln!(out, "地点: {}", form.location);
        }
    }

    if dialog.is_submitting() {
        let _ = writeln!(out, "提交中...");
    }

    out
}
