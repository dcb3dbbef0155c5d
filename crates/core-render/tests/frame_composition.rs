use core_config::{Alignment, Theme};
use core_model::{EditorModel, Selection, StatusLevel};
use core_render::{RenderEngine, SpanFlags, theme, writer::Command};
use core_terminal::TerminalCapabilities;
use pretty_assertions::assert_eq;
use std::time::Instant;

fn model(text: &str) -> EditorModel {
    let mut m = EditorModel::default();
    m.replace_all(text.to_string());
    m
}

#[test]
fn wide_clusters_shift_cursor_by_display_width() {
    let m = model("世界!");
    let engine = RenderEngine::new(TerminalCapabilities::ansi_only());
    let frame = engine.build_frame(&m, 20, 3);
    assert_eq!(frame.rows[1].text(), "世界!");
    assert_eq!(frame.cursor, Some((5, 1)));
}

#[test]
fn centered_tabbed_line() {
    let mut m = model("\tx");
    m.view.alignment = Alignment::Center;
    let engine = RenderEngine::new(TerminalCapabilities::ansi_only());
    let frame = engine.build_frame(&m, 11, 3);
    // width 5 in a 10-column alignment area -> 2 leading columns
    assert_eq!(frame.rows[1].text(), "      x");
}

#[test]
fn status_message_appears_in_footer() {
    let mut m = model("abc");
    m.view
        .set_status(StatusLevel::Error, "Could not read a.txt", Instant::now());
    let engine = RenderEngine::new(TerminalCapabilities::ansi_only());
    let frame = engine.build_frame(&m, 120, 3);
    let footer = &frame.rows[2];
    assert!(footer.text().ends_with("  Could not read a.txt"));
    assert!(footer.spans.iter().any(|s| s.flags.contains(SpanFlags::ERROR)));
}

#[test]
fn light_theme_uses_light_palette_in_emission() {
    let mut m = model("x");
    m.view.theme = Theme::Light;
    m.view.selection = Selection::new(0, 1);
    let caps = TerminalCapabilities::from_colorterm(Some("truecolor"));
    let engine = RenderEngine::new(caps);
    let frame = engine.build_frame(&m, 10, 3);
    let palette = theme::palette(Theme::Light, caps);
    let writer = core_render::render_engine::emit(&frame, &palette);
    assert!(writer.commands().contains(&Command::Colors {
        fg: palette.selection_fg,
        bg: palette.selection_bg,
    }));
    assert!(writer.commands().contains(&Command::Colors {
        fg: palette.text_fg,
        bg: palette.text_bg,
    }));
}
