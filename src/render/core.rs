use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;

use crate::display_width;
use crate::error::Result;
use crate::layout::Placement;

// Terminal rows are addressed with u16.
const MAX_ROW: usize = u16::MAX as usize;

/// Renderer runtime parameters.
#[derive(Debug, Clone, Default)]
pub struct RendererSettings {
    /// Zero-based terminal `(row, column)` of the flow's top-left corner.
    pub origin: (u16, u16),
    /// Cells of blank space inside each chip, left and right of the label.
    pub padding: u16,
}

/// Draws a placed flow of text labels into terminal cells.
pub struct ChipRenderer {
    settings: RendererSettings,
}

impl ChipRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    /// Compose the flow into plain rows of text, one per terminal row.
    ///
    /// `labels` is the same sequence that was packed; placed indices refer into it.
    /// Items without a finite position, or below the last addressable terminal
    /// row, are not drawn. Only the rows that drawn items occupy are produced.
    pub fn render_rows<S: AsRef<str>>(&self, labels: &[S], placement: &Placement) -> Vec<String> {
        let mut drawn: Vec<(usize, usize, &str)> = Vec::new();

        for placed in &placement.items {
            let Some(label) = labels.get(placed.index) else {
                continue;
            };
            let rect = placed.rect;
            if !rect.x.is_finite() || !rect.y.is_finite() {
                continue;
            }
            let col = rect.x.round().max(0.0) as usize + self.settings.padding as usize;
            let top = rect.y.round().max(0.0) as usize;
            for (offset, text) in label.as_ref().lines().enumerate() {
                let row = top.saturating_add(offset);
                if row > MAX_ROW {
                    break;
                }
                drawn.push((row, col, text));
            }
        }

        let row_count = drawn.iter().map(|(row, _, _)| row + 1).max().unwrap_or(0);
        let mut segments: Vec<Vec<(usize, &str)>> = vec![Vec::new(); row_count];
        for (row, col, text) in drawn {
            segments[row].push((col, text));
        }

        segments
            .into_iter()
            .map(|mut row| {
                row.sort_by_key(|(col, _)| *col);
                compose_row(&row)
            })
            .collect()
    }

    /// Single unwrapped row of every label, for hosts still waiting on the
    /// first measurement (see [`WrapFlow::is_measuring`]).
    ///
    /// [`WrapFlow::is_measuring`]: crate::WrapFlow::is_measuring
    pub fn unwrapped_row<S: AsRef<str>>(&self, labels: &[S], spacing: u16) -> String {
        let pad = " ".repeat(self.settings.padding as usize);
        let gap = " ".repeat(spacing as usize);
        labels
            .iter()
            .filter_map(|label| label.as_ref().lines().next())
            .map(|text| format!("{pad}{text}{pad}"))
            .collect::<Vec<_>>()
            .join(&gap)
    }

    /// Write the flow at the configured origin using cursor addressing.
    pub fn render<S: AsRef<str>>(
        &mut self,
        writer: &mut impl Write,
        labels: &[S],
        placement: &Placement,
    ) -> Result<()> {
        let (row, col) = self.settings.origin;
        for (offset, line) in self.render_rows(labels, placement).iter().enumerate() {
            queue!(writer, MoveTo(col, row.saturating_add(offset as u16)), Print(line))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn compose_row(segments: &[(usize, &str)]) -> String {
    let mut line = String::new();
    let mut cursor = 0;
    for (col, text) in segments {
        while cursor < *col {
            line.push(' ');
            cursor += 1;
        }
        line.push_str(text);
        cursor += display_width(text);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlowConfig;
    use crate::flow::WrapFlow;
    use crate::geometry::{Rect, Size};
    use crate::layout::{Alignment, PlacedItem, pack, place};
    use crate::width::measure_label;

    fn placement_for(labels: &[&str], width: f32, config: &FlowConfig, padding: u16) -> Placement {
        let lines = pack(
            labels,
            |label| Some(measure_label(label, padding)),
            width,
            config.spacing,
        );
        place(&lines, width, config)
    }

    #[test]
    fn rows_follow_packed_lines() {
        let labels = ["Swift", "Rust", "Go", "Kotlin"];
        let config = FlowConfig::default().with_spacing(1.0).with_line_spacing(0.0);
        let placement = placement_for(&labels, 12.0, &config, 0);

        let rows = ChipRenderer::with_default().render_rows(&labels, &placement);
        assert_eq!(rows, vec!["Swift Rust".to_string(), "Go Kotlin".to_string()]);
    }

    #[test]
    fn padding_and_alignment_shift_text() {
        let labels = ["ab", "cd"];
        let config = FlowConfig::default()
            .with_spacing(0.0)
            .with_alignment(Alignment::Trailing);
        let placement = placement_for(&labels, 10.0, &config, 1);

        let mut renderer = ChipRenderer::with_default();
        renderer.settings_mut().padding = 1;
        let rows = renderer.render_rows(&labels, &placement);
        assert_eq!(rows, vec!["   ab  cd".to_string()]);
    }

    #[test]
    fn unbounded_item_height_draws_nothing() {
        let mut flow: WrapFlow<&str> = WrapFlow::default();
        flow.set_width(20.0);
        flow.record("A", Size::new(3.0, f32::INFINITY));
        let layout = flow.layout(&["A"]);
        assert_eq!(layout.height(), f32::INFINITY);

        let rows = ChipRenderer::with_default().render_rows(&["A"], layout.placement());
        assert!(rows.is_empty());
    }

    #[test]
    fn rows_stop_at_last_occupied_row() {
        let labels = ["top", "far"];
        let placement = Placement {
            items: vec![
                PlacedItem {
                    index: 0,
                    line: 0,
                    rect: Rect::new(0.0, 0.0, 3.0, 1.0),
                },
                PlacedItem {
                    index: 1,
                    line: 1,
                    rect: Rect::new(0.0, 1.0e9, 3.0, 1.0),
                },
            ],
            height: 1.0e9 + 1.0,
        };

        let rows = ChipRenderer::with_default().render_rows(&labels, &placement);
        assert_eq!(rows, vec!["top".to_string()]);
    }

    #[test]
    fn unwrapped_row_keeps_every_label() {
        let mut renderer = ChipRenderer::with_default();
        renderer.settings_mut().padding = 1;
        let row = renderer.unwrapped_row(&["Swift", "Go", "two\nlines"], 1);
        assert_eq!(row, " Swift   Go   two ");
    }

    #[test]
    fn render_writes_cursor_sequences() {
        let labels = ["hi"];
        let placement = placement_for(&labels, 20.0, &FlowConfig::default(), 0);

        let mut renderer = ChipRenderer::new(RendererSettings {
            origin: (2, 3),
            padding: 0,
        });
        let mut output = Vec::new();
        renderer.render(&mut output, &labels, &placement).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("\u{1b}[3;4Hhi"));
    }
}
