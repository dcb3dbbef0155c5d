//! Terminal capability probing.
//!
//! Detection runs once at startup and must be cheap: it only inspects the
//! environment. The renderer uses the result to choose between RGB theme
//! colours and the 16-colour ANSI fallback palette.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub truecolor: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        Self::from_colorterm(std::env::var("COLORTERM").ok().as_deref())
    }

    /// Interpret a `COLORTERM` value (`truecolor` / `24bit` enable RGB).
    pub fn from_colorterm(value: Option<&str>) -> Self {
        let truecolor = matches!(
            value.map(|v| v.to_ascii_lowercase()).as_deref(),
            Some("truecolor") | Some("24bit")
        );
        Self { truecolor }
    }

    pub fn ansi_only() -> Self {
        Self { truecolor: false }
    }
}
