//! Terminal output: the price table and status lines
//!
//! The presenter only decides *what* tone each cell gets; the [`Palette`]
//! strategy decides how a tone looks.

pub mod palette;

pub use palette::{palette_for, AnsiPalette, Palette, PlainPalette, Tone};

use crate::{
    constants::{TABLE_WIDTH, TIMESTAMP_FORMAT},
    delta::{format_change, PriceRow, Trend},
    error::CycleError,
    resolver::Resolution,
};
use chrono::NaiveDateTime;
use std::io::{self, Write};
use std::time::Duration;

/// Placeholder shown in the change column when there is nothing to compare
const NO_CHANGE: &str = "   N/A   ";

/// Writes tracker output to a sink through a [`Palette`]
pub struct Presenter {
    out: Box<dyn Write + Send>,
    palette: Box<dyn Palette>,
}

impl Presenter {
    pub fn new(out: Box<dyn Write + Send>, palette: Box<dyn Palette>) -> Self {
        Self { out, palette }
    }

    /// Presenter writing to stdout, colored unless `color` is false
    pub fn stdout(color: bool) -> Self {
        Self::new(Box::new(io::stdout()), palette_for(color))
    }

    /// Shows how the user's tokens were resolved
    pub fn announce(&mut self, resolution: &Resolution) -> io::Result<()> {
        writeln!(self.out, "Resolved coin inputs:")?;
        for (token, id) in resolution.mapping() {
            writeln!(self.out, "  {} -> {}", token, id)?;
        }
        writeln!(
            self.out,
            "Starting tracker for: {}",
            resolution.identifiers().join(", ")
        )?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Startup banner followed by a warning per unrecognized identifier
    pub fn startup(&mut self, resolution: &Resolution) -> io::Result<()> {
        self.announce(resolution)?;
        for id in resolution.unrecognized() {
            self.unrecognized(id)?;
        }
        Ok(())
    }

    /// Startup warning for an identifier that matched no known symbol
    pub fn unrecognized(&mut self, id: &str) -> io::Result<()> {
        let line = format!(
            "Warning: '{}' is not a known symbol; querying it as a raw CoinGecko id",
            id
        );
        self.line(&line, Tone::Warning)
    }

    /// Renders the comparison table
    pub fn render_table(&mut self, rows: &[PriceRow]) -> io::Result<()> {
        let rule = "-".repeat(TABLE_WIDTH);

        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "{:<12}{:>16}{:>14}", "Crypto", "Price (USD)", "Change")?;
        writeln!(self.out, "{}", rule)?;

        for row in rows {
            let name = format!("{:<12}", capitalize(&row.id));
            let price = self
                .palette
                .paint(&format!("{:>16}", format_price(row.price)), price_tone(row.price));
            let change = self.palette.paint(
                &format!("{:>14}", format_change_cell(row.delta)),
                trend_tone(row.trend),
            );
            writeln!(self.out, "{}{}{}", name, price, change)?;
        }

        writeln!(self.out, "{}", rule)?;
        self.out.flush()
    }

    pub fn last_updated(&mut self, now: NaiveDateTime) -> io::Result<()> {
        let line = format!("Last updated: {}", now.format(TIMESTAMP_FORMAT));
        self.line(&line, Tone::Neutral)
    }

    pub fn next_update(&mut self, interval: Duration) -> io::Result<()> {
        let line = format!("Next update in {} seconds...", interval.as_secs());
        self.line(&line, Tone::Warning)
    }

    /// Reports a failed cycle and the upcoming retry
    pub fn cycle_failed(&mut self, error: &CycleError, interval: Duration) -> io::Result<()> {
        let line = if error.is_transient() {
            format!("Network/API error: {}", error)
        } else {
            format!("Unexpected error: {}", error)
        };
        self.line(&line, Tone::Negative)?;
        let retry = format!("Retrying in {} seconds...", interval.as_secs());
        self.line(&retry, Tone::Warning)
    }

    pub fn fatal(&mut self, message: &str) -> io::Result<()> {
        self.line(message, Tone::Negative)
    }

    pub fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.line("Exiting (keyboard interrupt). Goodbye!", Tone::Emphasis)
    }

    fn line(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        writeln!(self.out, "{}", self.palette.paint(text, tone))?;
        self.out.flush()
    }
}

/// `$` + thousands separators + 4 decimals, or `N/A`
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("${}", group_thousands(&format!("{:.4}", p))),
        None => "N/A".to_string(),
    }
}

/// Change column text, padded so the numeric part is 7 characters wide
pub fn format_change_cell(delta: Option<f64>) -> String {
    match delta {
        Some(d) => format!("{:>9}", format_change(d)),
        None => NO_CHANGE.to_string(),
    }
}

/// Price coloring is a display heuristic: sub-dollar coins show red
fn price_tone(price: Option<f64>) -> Tone {
    match price {
        Some(p) if p > 1.0 => Tone::Positive,
        Some(_) => Tone::Negative,
        None => Tone::Warning,
    }
}

fn trend_tone(trend: Trend) -> Tone {
    match trend {
        Trend::Up => Tone::Positive,
        Trend::Down => Tone::Negative,
        Trend::Flat => Tone::Neutral,
        Trend::Missing | Trend::NoBaseline => Tone::Warning,
    }
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn group_thousands(fixed: &str) -> String {
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Cloneable in-memory sink so tests can read what a presenter wrote
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Sink whose every write fails, like a closed stdout
    pub struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
