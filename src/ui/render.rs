//! 渲染函数：每个函数只写入显式传入的区域

use crate::{
    domain::{RwaHoldings, ScoreReading, UsageStats},
    service::DownloadLink,
    utils::string_utils::format_number,
};

use super::page::{DownloadAnchor, FlagsList, RwaPanel, ScoreBadge, ScoreFill, SourcesList, StatsBadge};

/// 徽标显示 `shown`，进度条宽度与颜色取归一化评分
pub fn render_score(badge: &mut ScoreBadge, fill: &mut ScoreFill, reading: &ScoreReading, shown: f64) {
    badge.text = format!("Score: {}", format_number(shown));
    fill.width_pct = reading.normalized;
    fill.band = Some(reading.band);
}

pub fn render_flags(list: &mut FlagsList, flags: &[String]) {
    *list = if flags.is_empty() {
        FlagsList::None
    } else {
        FlagsList::Items(flags.to_vec())
    };
}

/// 数据来源是不透明的 JSON 值，原样序列化展示
pub fn render_sources(list: &mut SourcesList, sources: Option<&serde_json::Value>) {
    *list = match sources.filter(|v| !v.is_null()) {
        Some(value) => match serde_json::to_string(value) {
            Ok(json) => SourcesList::Json(json),
            Err(_) => SourcesList::Unavailable,
        },
        None => SourcesList::Unavailable,
    };
}

/// 无可展示内容时面板保持为空
pub fn render_rwa(panel: &mut RwaPanel, holdings: &RwaHoldings) {
    panel.text = holdings.summary().map(|text| format!("RWA: {}", text));
}

pub fn render_download(anchor: &mut DownloadAnchor, link: DownloadLink) {
    anchor.link = Some(link);
    anchor.visible = true;
}

pub fn render_stats(badge: &mut StatsBadge, stats: Option<UsageStats>) {
    *badge = match stats {
        Some(stats) => StatsBadge::Count(stats.validations),
        None => StatsBadge::Unavailable,
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{RwaAsset, ScoreBand};

    #[test]
    fn test_render_score_on_large_scale() {
        let mut badge = ScoreBadge::default();
        let mut fill = ScoreFill::default();
        let reading = ScoreReading::from_raw(82.0);
        render_score(&mut badge, &mut fill, &reading, reading.normalized);
        assert_eq!(badge.text, "Score: 82");
        assert_eq!(fill.width_pct, 82.0);
        assert_eq!(fill.band, Some(ScoreBand::Ok));
    }

    #[test]
    fn test_render_score_shows_raw_value() {
        let mut badge = ScoreBadge::default();
        let mut fill = ScoreFill::default();
        let reading = ScoreReading::from_raw(3.0);
        render_score(&mut badge, &mut fill, &reading, reading.raw);
        assert_eq!(badge.text, "Score: 3");
        assert_eq!(fill.width_pct, 30.0);
        assert_eq!(fill.class_name(), "fill bad");
    }

    #[test]
    fn test_render_warn_band() {
        let mut badge = ScoreBadge::default();
        let mut fill = ScoreFill::default();
        let reading = ScoreReading::from_raw(55.0);
        render_score(&mut badge, &mut fill, &reading, reading.normalized);
        assert_eq!(fill.band, Some(ScoreBand::Warn));
    }

    #[test]
    fn test_render_flags() {
        let mut list = FlagsList::Empty;
        render_flags(&mut list, &[]);
        assert_eq!(list, FlagsList::None);

        render_flags(&mut list, &["scamdb".to_string(), "low_tx".to_string()]);
        assert_eq!(
            list,
            FlagsList::Items(vec!["scamdb".to_string(), "low_tx".to_string()])
        );
    }

    #[test]
    fn test_render_sources() {
        let mut list = SourcesList::Empty;
        let sources = json!(["chainalysis"]);
        render_sources(&mut list, Some(&sources));
        assert_eq!(list, SourcesList::Json("[\"chainalysis\"]".to_string()));

        render_sources(&mut list, None);
        assert_eq!(list, SourcesList::Unavailable);

        render_sources(&mut list, Some(&serde_json::Value::Null));
        assert_eq!(list, SourcesList::Unavailable);
    }

    #[test]
    fn test_render_rwa() {
        let mut panel = RwaPanel::default();
        render_rwa(
            &mut panel,
            &RwaHoldings {
                tokens: vec!["KDX".into()],
                assets: vec![RwaAsset {
                    name: Some("Gold Vault".into()),
                    ..Default::default()
                }],
            },
        );
        assert_eq!(panel.text.as_deref(), Some("RWA: KDX • Gold Vault"));

        render_rwa(&mut panel, &RwaHoldings::default());
        assert_eq!(panel.text, None);
    }

    #[test]
    fn test_render_stats() {
        let mut badge = StatsBadge::Hidden;
        render_stats(&mut badge, Some(UsageStats { validations: 42 }));
        assert_eq!(badge, StatsBadge::Count(42));
        render_stats(&mut badge, None);
        assert_eq!(badge, StatsBadge::Unavailable);
    }
}
