//! Full-frame render engine.
//!
//! `build_frame` is pure: it reads the model and produces a `Frame`. `render`
//! builds, emits through a `Writer` and flushes. The text area follows
//! `view.scroll_top`; the runtime keeps that in range with
//! `EditorModel::auto_scroll` before rendering.

use crate::layout::{self, Glyph};
use crate::status::{self, FooterContext};
use crate::theme::{self, Palette};
use crate::toolbar::{self, ToolbarContext};
use crate::writer::Writer;
use crate::{Frame, Row, RowKind, SpanFlags, clip_to_width, text_rows};
use anyhow::Result;
use core_model::EditorModel;
use core_terminal::TerminalCapabilities;
use core_text::{display_width, line_col};

pub struct RenderEngine {
    caps: TerminalCapabilities,
    frames: u64,
}

impl RenderEngine {
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self { caps, frames: 0 }
    }

    pub fn capabilities(&self) -> TerminalCapabilities {
        self.caps
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn render(&mut self, model: &EditorModel, width: u16, height: u16) -> Result<()> {
        let frame = self.build_frame(model, width, height);
        let palette = theme::palette(model.view.theme, self.caps);
        emit(&frame, &palette).flush()?;
        self.frames += 1;
        tracing::trace!(
            target: "render",
            frame = self.frames,
            width,
            height,
            cursor = ?frame.cursor,
            "frame_rendered"
        );
        Ok(())
    }

    pub fn build_frame(&self, model: &EditorModel, width: u16, height: u16) -> Frame {
        let mut frame = Frame {
            width,
            height,
            rows: Vec::with_capacity(height as usize),
            cursor: None,
        };
        if width == 0 || height == 0 {
            return frame;
        }
        let w = width as usize;
        let view = &model.view;

        let text_top = if height >= 2 {
            let ctx = ToolbarContext {
                theme: view.theme,
                autosave: view.autosave,
                font_size: view.font_size,
                alignment: view.alignment,
                search_query: &view.search_query,
                can_undo: model.text.can_undo(),
                can_redo: model.text.can_redo(),
            };
            let row = toolbar::toolbar_row(&toolbar::compose_toolbar(&ctx));
            frame.rows.push(clip_row(row, w));
            1
        } else {
            0
        };

        let rows = text_rows(height);
        let text = model.text.text();
        let cursor_pos = line_col(text, view.cursor);
        let mut starts = Vec::new();
        let mut start = 0usize;
        for line in core_text::lines(text) {
            starts.push((start, line));
            start += line.chars().count() + 1;
        }

        // Horizontal scroll derives from the cursor line only.
        let h_scroll = starts
            .get(cursor_pos.line)
            .map(|(s, line)| {
                let glyphs = layout::layout_line(line, *s);
                let offset = line_offset(&glyphs, w, view.alignment);
                layout::horizontal_scroll(layout::cursor_column(&glyphs, view.cursor, offset), w)
            })
            .unwrap_or(0);

        for screen_row in 0..rows {
            let idx = view.scroll_top + screen_row;
            let Some((s, line)) = starts.get(idx) else {
                frame.rows.push(Row::new(RowKind::Text));
                continue;
            };
            let glyphs = layout::layout_line(line, *s);
            let offset = line_offset(&glyphs, w, view.alignment);
            frame.rows.push(layout::text_row(
                &glyphs,
                offset,
                h_scroll,
                w,
                view.selection,
            ));
            if idx == cursor_pos.line && view.prompt.is_none() {
                let col = layout::cursor_column(&glyphs, view.cursor, offset);
                let x = col.saturating_sub(h_scroll).min(w - 1);
                frame.cursor = Some((x as u16, (text_top + screen_row) as u16));
            }
        }

        let footer_y = height - 1;
        match &view.prompt {
            Some(prompt) => {
                let text = status::prompt_text(prompt);
                let x = display_width(&text).min(w - 1);
                let mut row = Row::new(RowKind::Chrome);
                row.push(&text, SpanFlags::EMPHASIS);
                frame.rows.push(clip_row(row, w));
                frame.cursor = Some((x as u16, footer_y));
            }
            None => {
                let ctx = FooterContext {
                    counts: model.text.counts(),
                    last_saved: &view.last_saved,
                    message: view.status.as_ref().map(|m| (m.text.as_str(), m.level)),
                };
                let row = status::footer_row(&status::compose_footer(&ctx));
                frame.rows.push(clip_row(row, w));
            }
        }
        frame
    }
}

/// Alignment offset within the area minus one column kept free for the caret
/// at the end of a right-aligned line.
fn line_offset(glyphs: &[Glyph], width: usize, alignment: core_config::Alignment) -> usize {
    layout::align_offset(layout::line_width(glyphs), width.saturating_sub(1), alignment)
}

/// Clip a row's spans to `width` columns.
fn clip_row(row: Row, width: usize) -> Row {
    let mut out = Row::new(row.kind);
    let mut remaining = width;
    for span in row.spans {
        if remaining == 0 {
            break;
        }
        let clipped = clip_to_width(&span.text, remaining);
        remaining -= display_width(clipped);
        out.push(clipped, span.flags);
    }
    out
}

/// Translate a frame into writer commands.
pub fn emit(frame: &Frame, palette: &Palette) -> Writer {
    let mut w = Writer::new();
    w.show_cursor(false);
    for (y, row) in frame.rows.iter().enumerate() {
        let (fg, bg) = match row.kind {
            RowKind::Chrome => (palette.chrome_fg, palette.chrome_bg),
            RowKind::Text => (palette.text_fg, palette.text_bg),
        };
        w.move_to(0, y as u16);
        w.colors(fg, bg);
        w.clear_line();
        for span in &row.spans {
            if span.flags.contains(SpanFlags::SELECTED) {
                w.colors(palette.selection_fg, palette.selection_bg);
            } else if span.flags.contains(SpanFlags::ERROR) {
                w.colors(palette.error_fg, bg);
            } else {
                w.colors(fg, bg);
            }
            let bold = span.flags.contains(SpanFlags::EMPHASIS);
            if bold {
                w.bold(true);
            }
            w.print(span.text.clone());
            if bold {
                w.bold(false);
            }
        }
    }
    if let Some((x, y)) = frame.cursor {
        w.move_to(x, y);
        w.show_cursor(true);
    }
    w
}
