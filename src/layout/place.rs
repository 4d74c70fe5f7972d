use serde::{Deserialize, Serialize};

use crate::config::FlowConfig;
use crate::geometry::{Rect, non_negative};

use super::Line;

/// Horizontal placement of each whole line within the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// Reading direction. Right-to-left only swaps which edge is leading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlowDirection {
    #[default]
    #[serde(rename = "ltr")]
    LeftToRight,
    #[serde(rename = "rtl")]
    RightToLeft,
}

impl Alignment {
    /// Left offset of a line given the free space beside it.
    pub fn offset(self, fill: f32, direction: FlowDirection) -> f32 {
        let fill = if fill.is_finite() { non_negative(fill) } else { 0.0 };
        match (self, direction) {
            (Alignment::Center, _) => fill / 2.0,
            (Alignment::Leading, FlowDirection::LeftToRight)
            | (Alignment::Trailing, FlowDirection::RightToLeft) => 0.0,
            (Alignment::Leading, FlowDirection::RightToLeft)
            | (Alignment::Trailing, FlowDirection::LeftToRight) => fill,
        }
    }
}

/// Final position of one packed item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedItem {
    /// Position in the input sequence.
    pub index: usize,
    /// Line the item was packed into.
    pub line: usize,
    pub rect: Rect,
}

/// Geometry of a packed flow.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placement {
    pub items: Vec<PlacedItem>,
    /// Total content height, lines plus the spacing between them.
    pub height: f32,
}

impl Placement {
    pub fn rect_of(&self, index: usize) -> Option<Rect> {
        self.items
            .iter()
            .find(|placed| placed.index == index)
            .map(|placed| placed.rect)
    }
}

/// Lay packed lines out top to bottom.
///
/// Each line is as tall as its tallest item and shorter items are centred
/// vertically in it. Alignment moves whole lines only; membership is fixed by
/// [`pack`](super::pack).
pub fn place(lines: &[Line], container_width: f32, config: &FlowConfig) -> Placement {
    let config = config.sanitized();
    let container_width = non_negative(container_width);

    let mut items = Vec::with_capacity(lines.iter().map(Line::len).sum());
    let mut y = 0.0;

    for (line_no, line) in lines.iter().enumerate() {
        if line_no > 0 {
            y += config.line_spacing;
        }

        let line_height = line.height();
        let offset = config
            .alignment
            .offset(container_width - line.width(), config.direction);

        let mut advance = 0.0;
        for entry in line.entries() {
            let width = entry.size.width;
            let height = non_negative(entry.size.height);
            let x = match config.direction {
                FlowDirection::LeftToRight => offset + advance,
                FlowDirection::RightToLeft => offset + line.width() - advance - width,
            };
            items.push(PlacedItem {
                index: entry.index,
                line: line_no,
                rect: Rect::new(x, y + (line_height - height) / 2.0, width, height),
            });
            advance += width + config.spacing;
        }

        y += line_height;
    }

    Placement { items, height: y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::layout::pack;
    use std::collections::HashMap;

    fn layout(config: &FlowConfig, width: f32) -> Placement {
        let table: HashMap<&str, Size> = [
            ("A", Size::new(50.0, 20.0)),
            ("B", Size::new(60.0, 30.0)),
            ("C", Size::new(40.0, 10.0)),
        ]
        .into_iter()
        .collect();
        let lines = pack(&["A", "B", "C"], |key| table.get(key).copied(), width, config.spacing);
        place(&lines, width, config)
    }

    fn xs(placement: &Placement) -> Vec<f32> {
        placement.items.iter().map(|placed| placed.rect.x).collect()
    }

    #[test]
    fn leading_anchors_lines_at_start() {
        let config = FlowConfig::default().with_spacing(10.0).with_line_spacing(5.0);
        let placement = layout(&config, 140.0);
        assert_eq!(xs(&placement), vec![0.0, 60.0, 0.0]);
        assert_eq!(placement.items[2].line, 1);
    }

    #[test]
    fn trailing_and_center_shift_by_fill() {
        let base = FlowConfig::default().with_spacing(10.0);

        let trailing = layout(&base.with_alignment(Alignment::Trailing), 140.0);
        assert_eq!(xs(&trailing), vec![20.0, 80.0, 100.0]);

        let center = layout(&base.with_alignment(Alignment::Center), 140.0);
        assert_eq!(xs(&center), vec![10.0, 70.0, 50.0]);
    }

    #[test]
    fn alignment_never_changes_membership() {
        let base = FlowConfig::default().with_spacing(10.0);
        let lines_of = |placement: &Placement| {
            placement.items.iter().map(|p| (p.index, p.line)).collect::<Vec<_>>()
        };
        let leading = layout(&base, 120.0);
        for alignment in [Alignment::Center, Alignment::Trailing] {
            let other = layout(&base.with_alignment(alignment), 120.0);
            assert_eq!(lines_of(&leading), lines_of(&other));
        }
    }

    #[test]
    fn lines_stack_with_spacing_and_center_vertically() {
        let config = FlowConfig::default().with_spacing(10.0).with_line_spacing(5.0);
        let placement = layout(&config, 120.0);

        let a = placement.rect_of(0).unwrap();
        let b = placement.rect_of(1).unwrap();
        let c = placement.rect_of(2).unwrap();
        assert_eq!(a.y, 5.0);
        assert_eq!(b.y, 0.0);
        assert_eq!(c.y, 35.0);
        assert_eq!(placement.height, 45.0);
    }

    #[test]
    fn right_to_left_mirrors_within_line() {
        let config = FlowConfig::default()
            .with_spacing(10.0)
            .with_direction(FlowDirection::RightToLeft);
        let placement = layout(&config, 140.0);
        assert_eq!(xs(&placement), vec![90.0, 20.0, 100.0]);
    }

    #[test]
    fn overflowing_line_has_no_fill() {
        let config = FlowConfig::default()
            .with_spacing(10.0)
            .with_alignment(Alignment::Center);
        let placement = layout(&config, 40.0);
        assert_eq!(xs(&placement), vec![0.0, 0.0, 0.0]);
        assert_eq!(placement.height, 20.0 + 4.0 + 30.0 + 4.0 + 10.0);
    }

    #[test]
    fn no_lines_no_height() {
        let placement = place(&[], 100.0, &FlowConfig::default());
        assert!(placement.items.is_empty());
        assert_eq!(placement.height, 0.0);
    }
}
