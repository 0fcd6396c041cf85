//! Dashboard input state and the output of one render pass

use std::fmt;
use std::path::PathBuf;

use super::chart::ChartKind;
use crate::utils::Table;

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 90;
pub const DEFAULT_DAYS: u32 = 30;

/// Everything the user can set. A render pass is a pure function of this
/// plus whatever the caches hold.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub search: String,
    /// Explicitly chosen display name; `None` means the first filtered coin
    pub selected: Option<String>,
    pub days: u32,
    pub chart_kind: ChartKind,
    pub show_raw: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            selected: None,
            days: DEFAULT_DAYS,
            chart_kind: ChartKind::default(),
            show_raw: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    fn icon(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "✅",
            NoticeLevel::Info => "ℹ️ ",
            NoticeLevel::Warning => "⚠️ ",
            NoticeLevel::Error => "❌",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Caption(String),
    Table(Table),
    Notice(NoticeLevel, String),
    Chart(PathBuf),
    Raw(String),
}

/// Ordered blocks produced by one render pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedView {
    pub blocks: Vec<Block>,
}

impl RenderedView {
    pub fn heading(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Heading(text.into()));
    }

    pub fn caption(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Caption(text.into()));
    }

    pub fn table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.blocks.push(Block::Notice(level, text.into()));
    }

    pub fn chart(&mut self, path: PathBuf) {
        self.blocks.push(Block::Chart(path));
    }

    pub fn raw(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Raw(text.into()));
    }

    /// Texts of all notices at `level`, in order
    pub fn notices(&self, level: NoticeLevel) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Notice(l, text) if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn charts(&self) -> Vec<&PathBuf> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Chart(path) => Some(path),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            match block {
                Block::Heading(text) => writeln!(f, "\n== {} ==", text)?,
                Block::Caption(text) => writeln!(f, "{}", text)?,
                Block::Table(table) => writeln!(f, "{}", table.render())?,
                Block::Notice(level, text) => writeln!(f, "{} {}", level.icon(), text)?,
                Block::Chart(path) => writeln!(f, "📈 Chart saved to {}", path.display())?,
                Block::Raw(text) => writeln!(f, "{}", text)?,
            }
        }
        Ok(())
    }
}
