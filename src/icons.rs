use spdlog::warn;

/// Icons the service cards can use. The set is closed: configuration names
/// one of these keys, anything else falls back to [`Icon::Cloud`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Server,
    Box,
    GitBranch,
    Code,
    BarChart,
    ShieldCheck,
    Cloud,
}

const SVG_OPEN: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">"#;

impl Icon {
    pub const ALL: [Icon; 7] = [
        Icon::Server,
        Icon::Box,
        Icon::GitBranch,
        Icon::Code,
        Icon::BarChart,
        Icon::ShieldCheck,
        Icon::Cloud,
    ];

    pub fn parse(key: &str) -> Option<Icon> {
        let key = key.trim().to_ascii_lowercase();
        Icon::ALL.into_iter().find(|icon| icon.key() == key)
    }

    pub fn from_key(key: &str) -> Icon {
        Icon::parse(key).unwrap_or_else(|| {
            warn!("Unknown icon {:?}, using {:?}", key, Icon::Cloud.key());
            Icon::Cloud
        })
    }

    pub fn key(&self) -> &'static str {
        match self {
            Icon::Server => "server",
            Icon::Box => "box",
            Icon::GitBranch => "git-branch",
            Icon::Code => "code",
            Icon::BarChart => "bar-chart",
            Icon::ShieldCheck => "shield-check",
            Icon::Cloud => "cloud",
        }
    }

    fn shapes(&self) -> &'static str {
        match self {
            Icon::Server => r#"<rect x="2" y="2" width="20" height="8" rx="2"/><rect x="2" y="14" width="20" height="8" rx="2"/><line x1="6" y1="6" x2="6.01" y2="6"/><line x1="6" y1="18" x2="6.01" y2="18"/>"#,
            Icon::Box => r#"<path d="M21 8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16Z"/><path d="m3.3 7 8.7 5 8.7-5"/><path d="M12 22V12"/>"#,
            Icon::GitBranch => r#"<line x1="6" y1="3" x2="6" y2="15"/><circle cx="18" cy="6" r="3"/><circle cx="6" cy="18" r="3"/><path d="M18 9a9 9 0 0 1-9 9"/>"#,
            Icon::Code => r#"<path d="m18 16 4-4-4-4"/><path d="m6 8-4 4 4 4"/><path d="m14.5 4-5 16"/>"#,
            Icon::BarChart => r#"<line x1="18" y1="20" x2="18" y2="10"/><line x1="12" y1="20" x2="12" y2="4"/><line x1="6" y1="20" x2="6" y2="14"/>"#,
            Icon::ShieldCheck => r#"<path d="M20 13c0 5-3.5 7.5-7.66 8.95a1 1 0 0 1-.67-.01C7.5 20.5 4 18 4 13V6a1 1 0 0 1 1-1c2 0 4.5-1.2 6.24-2.72a1.17 1.17 0 0 1 1.52 0C14.51 3.81 17 5 19 5a1 1 0 0 1 1 1z"/><path d="m9 12 2 2 4-4"/>"#,
            Icon::Cloud => r#"<path d="M17.5 19H9a7 7 0 1 1 6.71-9h1.79a4.5 4.5 0 1 1 0 9Z"/>"#,
        }
    }

    /// Inline SVG markup, sized by CSS through `currentColor`.
    pub fn svg(&self) -> String {
        format!("{}{}</svg>", SVG_OPEN, self.shapes())
    }
}
