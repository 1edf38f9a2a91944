//! Color strategies for terminal output

use colored::Colorize;

/// Semantic style of a piece of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    Warning,
    Emphasis,
}

/// Turns text plus a [`Tone`] into what gets written to the terminal
pub trait Palette: Send + Sync {
    fn paint(&self, text: &str, tone: Tone) -> String;
}

/// ANSI colors via `colored`
///
/// `colored` honours `NO_COLOR` and `CLICOLOR_FORCE` on its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiPalette;

impl Palette for AnsiPalette {
    fn paint(&self, text: &str, tone: Tone) -> String {
        match tone {
            Tone::Positive => text.green().to_string(),
            Tone::Negative => text.red().to_string(),
            Tone::Neutral => text.cyan().to_string(),
            Tone::Warning => text.yellow().to_string(),
            Tone::Emphasis => text.bold().to_string(),
        }
    }
}

/// No escape codes at all, for `--no-color`
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainPalette;

impl Palette for PlainPalette {
    fn paint(&self, text: &str, _tone: Tone) -> String {
        text.to_string()
    }
}

/// Picks the palette for the `--no-color` flag
pub fn palette_for(color: bool) -> Box<dyn Palette> {
    if color {
        Box::new(AnsiPalette)
    } else {
        Box::new(PlainPalette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TONES: [Tone; 5] = [
        Tone::Positive,
        Tone::Negative,
        Tone::Neutral,
        Tone::Warning,
        Tone::Emphasis,
    ];

    #[test]
    fn test_plain_palette_is_identity() {
        let palette = palette_for(false);
        for tone in TONES {
            assert_eq!(palette.paint("$1.0000", tone), "$1.0000");
        }
    }

    #[test]
    fn test_ansi_palette_wraps_text() {
        colored::control::set_override(true);
        let palette = palette_for(true);
        for tone in TONES {
            let painted = palette.paint("N/A", tone);
            assert!(painted.contains("N/A"));
            assert!(painted.starts_with("\x1b["), "{:?} not colored", tone);
        }
    }
}
