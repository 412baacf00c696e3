// Rust guideline compliant 2026-08-03

//! Small output helpers shared by commands.

use cairn_core::StatusColor;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Maps a workflow status color to a terminal color. Gray stays
/// unstyled.
pub fn terminal_color(color: StatusColor) -> Option<Color> {
    match color {
        StatusColor::Red => Some(Color::Red),
        StatusColor::Yellow => Some(Color::Yellow),
        StatusColor::Green => Some(Color::Green),
        StatusColor::Cyan => Some(Color::Cyan),
        StatusColor::Blue => Some(Color::Blue),
        StatusColor::Magenta => Some(Color::Magenta),
        StatusColor::Gray => None,
    }
}

/// Writes `text` to stdout in the given status color, without a
/// trailing newline. Falls back to plain output when coloring fails.
pub fn print_status(text: &str, color: StatusColor) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut spec = ColorSpec::new();
    if let Some(color) = terminal_color(color) {
        spec.set_fg(Some(color)).set_bold(true);
    }

    if stdout.set_color(&spec).is_ok() {
        let _ = write!(stdout, "{}", text);
        let _ = stdout.reset();
    } else {
        print!("{}", text);
    }
}
