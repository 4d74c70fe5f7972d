use crate::geometry::{Size, non_negative};
use crate::item::FlowItem;

/// One packed item: its position in the input sequence and the size it was packed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEntry {
    pub index: usize,
    pub size: Size,
}

/// Ordered, non-empty run of items placed side by side.
///
/// Derived per pack call; lines carry no identity between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    entries: Vec<LineEntry>,
    width: f32,
}

impl Line {
    fn start(entry: LineEntry) -> Self {
        Self {
            width: entry.size.width,
            entries: vec![entry],
        }
    }

    pub fn entries(&self) -> &[LineEntry] {
        &self.entries
    }

    /// Input positions of the items on this line, in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occupied width: item widths plus spacing between them.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height of the tallest item.
    pub fn height(&self) -> f32 {
        self.entries
            .iter()
            .map(|entry| non_negative(entry.size.height))
            .fold(0.0, f32::max)
    }

    /// Only a singleton line may be wider than its container.
    pub fn overflows(&self, container_width: f32) -> bool {
        self.width > container_width
    }
}

/// Partition `items` into lines with single-pass greedy first-fit.
///
/// Items whose size is unknown or whose width is not strictly positive are
/// skipped. Nothing is packed while `container_width` is zero. An item wider
/// than the container still gets a line to itself, and an exact fit stays on
/// the current line. Negative or NaN width and spacing are treated as zero.
pub fn pack<T, F>(items: &[T], size_of: F, container_width: f32, spacing: f32) -> Vec<Line>
where
    T: FlowItem,
    F: Fn(&T::Key) -> Option<Size>,
{
    let container_width = non_negative(container_width);
    let spacing = non_negative(spacing);
    if container_width == 0.0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current: Option<Line> = None;

    for (index, item) in items.iter().enumerate() {
        let Some(size) = size_of(item.key()).filter(Size::is_measured) else {
            continue;
        };
        let entry = LineEntry { index, size };

        match current.as_mut() {
            Some(line) if line.width + size.width + spacing <= container_width => {
                line.width = line.width + size.width + spacing;
                line.entries.push(entry);
            }
            _ => {
                if let Some(finished) = current.replace(Line::start(entry)) {
                    lines.push(finished);
                }
            }
        }
    }

    lines.extend(current);
    lines
}
