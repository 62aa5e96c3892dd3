//! 页面上的展示区域

use serde::Serialize;

use crate::{
    domain::ScoreBand,
    service::DownloadLink,
    utils::string_utils::{format_number, group_thousands},
};

pub const PENDING_TEXT: &str = "Validating…";

/// 评分徽标
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreBadge {
    pub text: String,
}

/// 评分进度条：宽度为百分比，档位决定颜色
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreFill {
    pub width_pct: f64,
    pub band: Option<ScoreBand>,
}

impl ScoreFill {
    /// 样式类名，形如 `fill ok`
    pub fn class_name(&self) -> String {
        match self.band {
            Some(band) => format!("fill {}", band.as_class()),
            None => "fill".to_string(),
        }
    }

    /// 终端进度条
    pub fn bar(&self, cells: usize) -> String {
        let filled = ((self.width_pct / 100.0) * cells as f64).round() as usize;
        let filled = filled.min(cells);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(cells - filled))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum FlagsList {
    #[default]
    Empty,
    None,
    Items(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "json", rename_all = "snake_case")]
pub enum SourcesList {
    #[default]
    Empty,
    Unavailable,
    Json(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RwaPanel {
    pub text: Option<String>,
}

/// 下载链接，默认隐藏
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DownloadAnchor {
    pub link: Option<DownloadLink>,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum StatsBadge {
    #[default]
    Hidden,
    Count(u64),
    Unavailable,
}

impl StatsBadge {
    pub fn text(&self) -> Option<String> {
        match self {
            StatsBadge::Hidden => None,
            StatsBadge::Count(n) => Some(format!("Validations: {}", group_thousands(*n))),
            StatsBadge::Unavailable => Some("Stats unavailable".to_string()),
        }
    }
}

/// 控制器持有的全部展示区域
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub panel_hidden: bool,
    pub score_badge: ScoreBadge,
    pub score_fill: ScoreFill,
    pub flags: FlagsList,
    pub sources: SourcesList,
    pub rwa: RwaPanel,
    pub download: DownloadAnchor,
    pub stats: StatsBadge,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            panel_hidden: true,
            score_badge: ScoreBadge::default(),
            score_fill: ScoreFill::default(),
            flags: FlagsList::default(),
            sources: SourcesList::default(),
            rwa: RwaPanel::default(),
            download: DownloadAnchor::default(),
            stats: StatsBadge::default(),
        }
    }

    /// 提交后、发出请求前的待定状态（统计区域保持不变）
    pub fn reset_pending(&mut self) {
        self.panel_hidden = true;
        self.score_badge.text = PENDING_TEXT.to_string();
        self.score_fill = ScoreFill::default();
        self.flags = FlagsList::Empty;
        self.sources = SourcesList::Empty;
        self.rwa = RwaPanel::default();
        self.download = DownloadAnchor::default();
    }

    /// 纯文本形式，每个非空区域一行
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.score_badge.text.is_empty() {
            lines.push(self.score_badge.text.clone());
        }
        if self.panel_hidden {
            if let Some(stats) = self.stats.text() {
                lines.push(stats);
            }
            return lines;
        }

        let band = self
            .score_fill
            .band
            .map(|b| format!(" {}", b.as_class()))
            .unwrap_or_default();
        lines.push(format!(
            "{} {}%{}",
            self.score_fill.bar(20),
            format_number(self.score_fill.width_pct),
            band
        ));

        match &self.flags {
            FlagsList::Empty => {}
            FlagsList::None => lines.push("Flags: none".to_string()),
            FlagsList::Items(items) => {
                lines.push("Flags:".to_string());
                lines.extend(items.iter().map(|f| format!("  - {}", f)));
            }
        }
        match &self.sources {
            SourcesList::Empty => {}
            SourcesList::Unavailable => lines.push("Sources: unavailable".to_string()),
            SourcesList::Json(json) => lines.push(format!("Sources: {}", json)),
        }
        if let Some(rwa) = &self.rwa.text {
            lines.push(rwa.clone());
        }
        if let (true, Some(link)) = (self.download.visible, &self.download.link) {
            if link.is_inline() {
                lines.push(format!("ISO 20022 pacs.008: inline ({})", link.filename));
            } else {
                lines.push(format!("ISO 20022 pacs.008: {}", link.href));
            }
        }
        if let Some(stats) = self.stats.text() {
            lines.push(stats);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page_is_hidden() {
        let page = Page::new();
        assert!(page.panel_hidden);
        assert!(!page.download.visible);
        assert!(page.text_lines().is_empty());
    }

    #[test]
    fn test_reset_pending_keeps_stats() {
        let mut page = Page::new();
        page.panel_hidden = false;
        page.flags = FlagsList::Items(vec!["low_tx".into()]);
        page.score_fill = ScoreFill {
            width_pct: 82.0,
            band: Some(ScoreBand::Ok),
        };
        page.stats = StatsBadge::Count(12);

        page.reset_pending();
        assert!(page.panel_hidden);
        assert_eq!(page.score_badge.text, PENDING_TEXT);
        assert_eq!(page.score_fill.width_pct, 0.0);
        assert_eq!(page.score_fill.class_name(), "fill");
        assert_eq!(page.flags, FlagsList::Empty);
        assert_eq!(page.stats, StatsBadge::Count(12));
        assert_eq!(
            page.text_lines(),
            vec![PENDING_TEXT.to_string(), "Validations: 12".to_string()]
        );
    }

    #[test]
    fn test_fill_bar() {
        let fill = ScoreFill {
            width_pct: 30.0,
            band: Some(ScoreBand::Bad),
        };
        assert_eq!(fill.bar(10), "[###-------]");
        assert_eq!(fill.class_name(), "fill bad");
        let full = ScoreFill {
            width_pct: 100.0,
            band: Some(ScoreBand::Ok),
        };
        assert_eq!(full.bar(4), "[####]");
    }

    #[test]
    fn test_stats_text() {
        assert_eq!(StatsBadge::Hidden.text(), None);
        assert_eq!(
            StatsBadge::Count(1234).text().as_deref(),
            Some("Validations: 1,234")
        );
        assert_eq!(
            StatsBadge::Unavailable.text().as_deref(),
            Some("Stats unavailable")
        );
    }
}
