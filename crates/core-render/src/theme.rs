//! Theme palettes.
//!
//! Each theme has an RGB palette for truecolor terminals and a 16-colour
//! fallback picked from the standard ANSI set.

use core_config::Theme;
use core_terminal::TerminalCapabilities;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text_fg: Color,
    pub text_bg: Color,
    pub chrome_fg: Color,
    pub chrome_bg: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub error_fg: Color,
}

pub fn palette(theme: Theme, caps: TerminalCapabilities) -> Palette {
    match (theme, caps.truecolor) {
        (Theme::Dark, true) => Palette {
            text_fg: rgb(212, 212, 212),
            text_bg: rgb(30, 30, 30),
            chrome_fg: rgb(204, 204, 204),
            chrome_bg: rgb(51, 51, 51),
            selection_fg: rgb(255, 255, 255),
            selection_bg: rgb(38, 79, 120),
            error_fg: rgb(244, 71, 71),
        },
        (Theme::Light, true) => Palette {
            text_fg: rgb(30, 30, 30),
            text_bg: rgb(255, 255, 255),
            chrome_fg: rgb(51, 51, 51),
            chrome_bg: rgb(230, 230, 230),
            selection_fg: rgb(0, 0, 0),
            selection_bg: rgb(173, 214, 255),
            error_fg: rgb(205, 49, 49),
        },
        (Theme::Dark, false) => Palette {
            text_fg: Color::White,
            text_bg: Color::Black,
            chrome_fg: Color::White,
            chrome_bg: Color::DarkGrey,
            selection_fg: Color::White,
            selection_bg: Color::DarkBlue,
            error_fg: Color::Red,
        },
        (Theme::Light, false) => Palette {
            text_fg: Color::Black,
            text_bg: Color::White,
            chrome_fg: Color::Black,
            chrome_bg: Color::Grey,
            selection_fg: Color::Black,
            selection_bg: Color::Cyan,
            error_fg: Color::DarkRed,
        },
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}
