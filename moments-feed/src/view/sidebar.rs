//! Navigation sidebar

/// One navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub icon: &'static str,
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem { icon: "♥", label: "音乐朋友圈", href: "/moments" },
    NavItem { icon: "▶", label: "播放器", href: "/play" },
    NavItem { icon: "♫", label: "所有歌曲", href: "/songs" },
    NavItem { icon: "≡", label: "热门歌单", href: "/playlists" },
    NavItem { icon: "☺", label: "热门艺术家", href: "/artists" },
    NavItem { icon: "✿", label: "心情音乐", href: "/moods" },
];

/// Sidebar display state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sidebar {
    collapsed: bool,
    mobile_open: bool,
    current_path: String,
}

impl Sidebar {
    pub fn new(current_path: impl Into<String>) -> Self {
        Self {
            current_path: current_path.into(),
            ..Default::default()
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn is_mobile_open(&self) -> bool {
        self.mobile_open
    }

    pub fn toggle_mobile(&mut self) {
        self.mobile_open = !self.mobile_open;
    }

    /// Following a link closes the mobile drawer
    pub fn navigate(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
        self.mobile_open = false;
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Entry whose href is a path prefix of the current path
    pub fn active_item(&self) -> Option<&'static NavItem> {
        NAV_ITEMS.iter().find(|item| {
            self.current_path
                .strip_prefix(item.href)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    pub fn render(&self) -> String {
        let active = self.active_item().map(|item| item.href);
        let mut out = String::new();
        for item in &NAV_ITEMS {
            let marker = if Some(item.href) == active { '>' } else { ' ' };
            if self.collapsed {
                out.push_str(&format!("{} {}\n", marker, item.icon));
            } else {
                out.push_str(&format!("{} {} {}\n", marker, item.icon, item.label));
            }
        }
        out
    }
}
