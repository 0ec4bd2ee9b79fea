//! Frame drawing.
//!
//! ```text
//! ┌ sortvis ────────────────────────────┐
//! │  Bubble Sort - Ascending            │
//! ├ Controls ───────────────────────────┤
//! │ R - Reset | SPACE - Start ...       │
//! │ 1 - Insertion Sort | 2 - ...        │
//! ├ Sequence ───────────────────────────┤
//! │        █                            │
//! │     █  █ █    █                     │
//! │  █ ██ ███ █ █ ██                    │
//! ├─────────────────────────────────────┤
//! │ IDLE  steps 0  comparisons 0 ...    │
//! └─────────────────────────────────────┘
//! ```

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::config::{BarColor, LayoutConfig, Palette};
use crate::driver::{FrameRequest, Phase};
use crate::engine::{Algorithm, Highlights, Role};

const BAR_SYMBOL: &str = "█";

/// Terminal color for a palette entry.
#[must_use]
pub const fn terminal_color(color: BarColor) -> Color {
    match color {
        BarColor::Black => Color::Black,
        BarColor::Red => Color::Red,
        BarColor::Green => Color::Green,
        BarColor::Yellow => Color::Yellow,
        BarColor::Blue => Color::Blue,
        BarColor::Magenta => Color::Magenta,
        BarColor::Cyan => Color::Cyan,
        BarColor::Gray => Color::Gray,
        BarColor::DarkGray => Color::DarkGray,
        BarColor::White => Color::White,
    }
}

/// Draw a whole frame.
pub fn ui(f: &mut Frame, frame: &FrameRequest<'_>, palette: &Palette, layout: LayoutConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_title(f, chunks[0], frame);
    render_controls(f, chunks[1], frame);

    let block = Block::default().borders(Borders::ALL).title("Sequence");
    let inner = block.inner(chunks[2]);
    f.render_widget(block, chunks[2]);
    f.render_widget(
        SequenceChart::new(frame.values, frame.highlights, palette, layout),
        inner,
    );

    render_status_bar(f, chunks[3], frame);
}

fn render_title(f: &mut Frame, area: Rect, frame: &FrameRequest<'_>) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", frame.algorithm.name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("- "),
        Span::styled(
            frame.order.label(),
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .centered()
    .block(Block::default().borders(Borders::ALL).title("sortvis"));
    f.render_widget(title, area);
}

fn render_controls(f: &mut Frame, area: Rect, frame: &FrameRequest<'_>) {
    let locked = frame.phase == Phase::Sorting;
    let menu: Vec<Span> = Algorithm::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, algorithm)| {
            let style = if *algorithm == frame.algorithm {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if locked {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            let separator = if i == 0 { "" } else { " | " };
            [
                Span::raw(separator),
                Span::styled(format!("{} - {}", algorithm.key(), algorithm.name()), style),
            ]
        })
        .collect();

    let controls = Paragraph::new(vec![
        Line::from(" R - Reset | SPACE - Start Sorting | A - Ascending | D - Descending | Q - Quit")
            .centered(),
        Line::from(menu).centered(),
    ])
    .block(Block::default().borders(Borders::ALL).title("Controls"));
    f.render_widget(controls, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, frame: &FrameRequest<'_>) {
    let (status, color) = match frame.phase {
        Phase::Idle => ("IDLE", Color::Gray),
        Phase::Sorting => ("SORTING", Color::Green),
    };
    let stats = frame.stats;
    let action = frame
        .action
        .map_or_else(String::new, |action| format!("  last {action:?}"));

    let line = Line::from(vec![
        Span::styled(
            format!(" {status} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " n {}  steps {}  comparisons {}  swaps {}  shifts {}  frame {}",
            frame.values.len(),
            stats.steps,
            stats.comparisons,
            stats.swaps,
            stats.shifts,
            frame.frame
        )),
        Span::styled(action, Style::default().fg(Color::Gray)),
    ]);
    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(bar, area);
}

/// Bar chart of the sequence with highlighted indices.
///
/// When there are more values than columns, each column stands for a run of
/// adjacent values and shows the tallest; a highlighted value colors its
/// whole column.
#[derive(Debug, Clone, Copy)]
pub struct SequenceChart<'a> {
    values: &'a [u32],
    highlights: &'a Highlights,
    palette: &'a Palette,
    layout: LayoutConfig,
}

impl<'a> SequenceChart<'a> {
    /// Create a chart.
    #[must_use]
    pub const fn new(
        values: &'a [u32],
        highlights: &'a Highlights,
        palette: &'a Palette,
        layout: LayoutConfig,
    ) -> Self {
        Self {
            values,
            highlights,
            palette,
            layout,
        }
    }

    fn color_of(&self, indices: Range<usize>) -> Color {
        let mut role = None;
        for index in indices.clone() {
            match self.highlights.role_of(index) {
                Some(Role::Primary) => {
                    role = Some(Role::Primary);
                    break;
                }
                Some(Role::Secondary) => role = Some(Role::Secondary),
                None => {}
            }
        }
        let color = match role {
            Some(Role::Primary) => self.palette.primary,
            Some(Role::Secondary) => self.palette.secondary,
            None => self.palette.plain(indices.start),
        };
        terminal_color(color)
    }
}

impl Widget for SequenceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let padding = self.layout.side_padding;
        let usable = area.width.saturating_sub(padding.saturating_mul(2));
        let Some(top) = self.values.iter().copied().max() else {
            return;
        };
        if usable == 0 || area.height == 0 || top == 0 {
            return;
        }

        let slots = bar_slots(self.values.len(), usable, self.layout.bar_gap);
        let mut x = area.x.saturating_add(padding);
        for slot in slots {
            let value = self.values[slot.bars.clone()]
                .iter()
                .copied()
                .max()
                .unwrap_or(0);
            let height = bar_height(value, top, area.height);
            let color = self.color_of(slot.bars);

            for column in x..x.saturating_add(slot.width) {
                for row in 0..height {
                    let y = area.bottom() - 1 - row;
                    if let Some(cell) = buf.cell_mut((column, y)) {
                        cell.set_symbol(BAR_SYMBOL).set_fg(color);
                    }
                }
            }
            x = x.saturating_add(slot.width).saturating_add(slot.gap);
        }
    }
}

/// Columns assigned to a run of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSlot {
    /// Indices drawn in this slot.
    pub bars: Range<usize>,
    /// Columns occupied.
    pub width: u16,
    /// Empty columns after the slot.
    pub gap: u16,
}

/// Split `usable` columns among `count` values.
///
/// Values get equal widths of at least one column. If even that does not fit,
/// gaps are dropped and adjacent values share a column.
#[must_use]
pub fn bar_slots(count: usize, usable: u16, gap: u16) -> Vec<BarSlot> {
    if count == 0 || usable == 0 {
        return Vec::new();
    }
    let columns = usize::from(usable);
    let gap_cols = usize::from(gap);

    if count * (1 + gap_cols) - gap_cols <= columns {
        let width = (columns + gap_cols) / count - gap_cols;
        return (0..count)
            .map(|i| BarSlot {
                bars: i..i + 1,
                width: u16::try_from(width).unwrap_or(1),
                gap,
            })
            .collect();
    }

    let shared = columns.min(count);
    (0..shared)
        .map(|c| BarSlot {
            bars: c * count / shared..(c + 1) * count / shared,
            width: 1,
            gap: 0,
        })
        .collect()
}

/// Rows filled for `value` when `top` fills `rows`. Nonzero values get at
/// least one row.
#[must_use]
pub fn bar_height(value: u32, top: u32, rows: u16) -> u16 {
    if value == 0 || top == 0 {
        return 0;
    }
    let scaled = (u64::from(value) * u64::from(rows)).div_ceil(u64::from(top));
    u16::try_from(scaled).unwrap_or(rows).clamp(1, rows)
}
