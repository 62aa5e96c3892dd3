//! 页面呈现方式

use std::io::Write;

use super::{html, page::Page};

/// 呈现页面并展示阻断式提示
pub trait Surface: Send {
    fn present(&mut self, page: &Page);
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// 终端呈现，写入任意 `Write`（通常是 stdout）
pub struct TerminalSurface<W: Write + Send> {
    out: W,
    format: OutputFormat,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, block: &str) {
        if let Err(e) = writeln!(self.out, "{}", block).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> Surface for TerminalSurface<W> {
    fn present(&mut self, page: &Page) {
        let block = match self.format {
            OutputFormat::Text => page.text_lines().join("\n"),
            OutputFormat::Html => html::render_page(page),
        };
        if !block.is_empty() {
            self.write_block(&block);
        }
    }

    fn alert(&mut self, message: &str) {
        let block = match self.format {
            OutputFormat::Text => format!("! {}", message),
            OutputFormat::Html => html::render_alert(message),
        };
        self.write_block(&block);
    }
}

/// 记录每一帧与提示，不做任何输出
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub frames: Vec<Page>,
    pub alerts: Vec<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn present(&mut self, page: &Page) {
        self.frames.push(page.clone());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
