//! Tag Cloud Demo
//!
//! Packs a list of tags into wrapping lines that follow the terminal width.
//! Resize the window to watch lines merge and split.
//!
//! ```bash
//! cargo run --example tag_cloud
//! ```
//!
//! Keys: `a` cycles alignment, `d` toggles direction, `+`/`-` adds or removes
//! a tag, `q` or `Esc` quits. Set `WRAPFLOW_LOG=path` to capture repack events.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use wrapflow::logging::FileSink;
use wrapflow::{
    Alignment, ChipRenderer, FlowConfig, FlowDirection, Keyed, LogLevel, Logger, RendererSettings,
    ValueKey, WrapFlow, keyed, measure_label,
};

const TAGS: &[&str] = &[
    "Swift", "SwiftUI", "iOS", "Xcode", "UIKit", "Combine", "Core Data", "Kotlin", "Python",
    "Android", "Web", "Junior", "Senior", "Rust", "terminal", "layout", "标签", "reflow",
];
const CHIP_PADDING: u16 = 1;
const HEADER_ROWS: u16 = 2;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut flow: WrapFlow<ValueKey> =
        WrapFlow::new(FlowConfig::default().with_spacing(1.0).with_line_spacing(0.0));
    if let Ok(path) = std::env::var("WRAPFLOW_LOG") {
        let logger = Logger::new(FileSink::new(path, 1 << 20)?).with_min_level(LogLevel::Debug);
        flow = flow.with_logger(logger);
    }
    flow.enable_metrics();

    let mut visible = TAGS.len();
    let mut renderer = ChipRenderer::new(RendererSettings {
        origin: (HEADER_ROWS, 0),
        padding: CHIP_PADDING,
    });

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let outcome = run(&mut flow, &mut renderer, &mut visible, &mut stdout);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    flow.emit_metrics("wrapflow::metrics")?;
    if let Some(metrics) = flow.metrics_handle() {
        if let Ok(metrics) = metrics.lock() {
            println!("{:?}", metrics.snapshot());
        }
    }
    outcome
}

fn run(
    flow: &mut WrapFlow<ValueKey>,
    renderer: &mut ChipRenderer,
    visible: &mut usize,
    stdout: &mut io::Stdout,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (columns, _) = terminal::size().unwrap_or((80, 24));
    flow.set_width(columns as f32);

    let items = keyed(TAGS[..*visible].iter().copied());
    if flow.is_measuring() {
        draw_unwrapped(flow, renderer, &items, stdout)?;
    }

    loop {
        let items = keyed(TAGS[..*visible].iter().copied());
        measure(flow, &items);
        flow.prune(&items);
        draw(flow, renderer, &items, stdout)?;

        match event::read()? {
            Event::Resize(columns, _) => {
                flow.set_width(columns as f32);
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('a') => {
                    let next = match flow.config().alignment {
                        Alignment::Leading => Alignment::Center,
                        Alignment::Center => Alignment::Trailing,
                        Alignment::Trailing => Alignment::Leading,
                    };
                    flow.set_config(flow.config().with_alignment(next));
                }
                KeyCode::Char('d') => {
                    let next = match flow.config().direction {
                        FlowDirection::LeftToRight => FlowDirection::RightToLeft,
                        FlowDirection::RightToLeft => FlowDirection::LeftToRight,
                    };
                    flow.set_config(flow.config().with_direction(next));
                }
                KeyCode::Char('+') => *visible = (*visible + 1).min(TAGS.len()),
                KeyCode::Char('-') => *visible = visible.saturating_sub(1),
                _ => {}
            },
            _ => {}
        }
    }
}

// Stands in for the host's measurement pass: only real changes invalidate.
fn measure(flow: &mut WrapFlow<ValueKey>, items: &[Keyed<&str>]) {
    for item in items {
        flow.record(item.key, measure_label(item.value, CHIP_PADDING));
    }
}

fn draw(
    flow: &mut WrapFlow<ValueKey>,
    renderer: &mut ChipRenderer,
    items: &[Keyed<&str>],
    stdout: &mut io::Stdout,
) -> wrapflow::Result<()> {
    let config = *flow.config();
    let layout = flow.layout(items);

    execute!(stdout, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    write!(
        stdout,
        "{} tags | {} lines | {:?} {:?} | a/d/+/-/q",
        items.len(),
        layout.lines().len(),
        config.alignment,
        config.direction,
    )?;

    let labels: Vec<&str> = items.iter().map(|item| item.value).collect();
    renderer.render(stdout, &labels, layout.placement())
}

// First frame before any size is known: every tag on one row.
fn draw_unwrapped(
    flow: &WrapFlow<ValueKey>,
    renderer: &ChipRenderer,
    items: &[Keyed<&str>],
    stdout: &mut io::Stdout,
) -> wrapflow::Result<()> {
    let labels: Vec<&str> = items.iter().map(|item| item.value).collect();
    let gap = flow.config().spacing.round() as u16;
    execute!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, HEADER_ROWS),
    )?;
    write!(stdout, "{}", renderer.unwrapped_row(&labels, gap))?;
    stdout.flush()?;
    Ok(())
}
