//! 展示层
//!
//! [`Page`] 持有全部展示区域，由控制器在初始化时创建；渲染函数显式接收区域句柄。
//! [`Surface`] 负责把页面呈现出来（终端、HTML 片段或测试记录）。

pub mod html;
pub mod page;
pub mod render;
pub mod surface;

pub use page::{DownloadAnchor, FlagsList, Page, RwaPanel, ScoreBadge, ScoreFill, SourcesList, StatsBadge};
pub use surface::{OutputFormat, RecordingSurface, Surface, TerminalSurface};
