//! Feed page: status messages, cards and pagination control

use crate::feed::{FeedState, FeedStatus};
use crate::pagination::Pager;
use crate::view::cards::render_cards;

pub const LOADING_MESSAGE: &str = "加载中...";
pub const EMPTY_MESSAGE: &str = "还没有任何音乐时刻";
pub const RETRY_HINT: &str = "重试";

/// Render the feed body for `state`
pub fn render_feed(state: &FeedState, columns: usize) -> String {
    match &state.status {
        FeedStatus::Loading => format!("{}\n", LOADING_MESSAGE),
        FeedStatus::Error(message) => format!("加载失败: {}\n[{}]\n", message, RETRY_HINT),
        FeedStatus::Empty => format!("{}\n", EMPTY_MESSAGE),
        FeedStatus::Loaded if state.moments.is_empty() => format!("{}\n", EMPTY_MESSAGE),
        FeedStatus::Loaded => {
            let mut out = render_cards(&state.moments, columns);
            if let Some(pager) = render_pager(&state.pager()) {
                out.push('\n');
                out.push_str(&pager);
                out.push('\n');
            }
            out
        }
    }
}

/// Pagination control, or `None` when there is only one page
pub fn render_pager(pager: &Pager) -> Option<String> {
    if !pager.is_visible() {
        return None;
    }
    let previous = if pager.can_go_previous() { "‹ 上一页" } else { "  上一页" };
    let next = if pager.can_go_next() { "下一页 ›" } else { "下一页  " };
    Some(format!(
        "{}    {} / {}    {}",
        previous, pager.page, pager.total_pages, next
    ))
}
