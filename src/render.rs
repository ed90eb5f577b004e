//! Terminal rendering of colored brackets
//!
//! `TerminalRenderer` is a render target that keeps the latest ranges for
//! each color and paints the document to any writer with crossterm
//! styling. Colors are CSS names or `#rgb` / `#rrggbb` hex strings.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::colorizer::RenderTarget;
use crate::document::{Position, Range, TextSource};
use crate::error::Result;

/// CSS color names understood by the renderer (lowercase)
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("orange", (255, 165, 0)),
    ("gold", (255, 215, 0)),
    ("orchid", (218, 112, 214)),
    ("lightskyblue", (135, 206, 250)),
    ("deepskyblue", (0, 191, 255)),
    ("dodgerblue", (30, 144, 255)),
    ("limegreen", (50, 205, 50)),
    ("springgreen", (0, 255, 127)),
    ("hotpink", (255, 105, 180)),
    ("violet", (238, 130, 238)),
    ("tomato", (255, 99, 71)),
    ("coral", (255, 127, 80)),
    ("salmon", (250, 128, 114)),
    ("khaki", (240, 230, 140)),
    ("plum", (221, 160, 221)),
    ("turquoise", (64, 224, 208)),
    ("crimson", (220, 20, 60)),
];

/// Parse a CSS color name or hex string
pub fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = name.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == lower)
        .map(|&(_, (r, g, b))| Color::Rgb { r, g, b })
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Color::Rgb {
                r: digits.next()??,
                g: digits.next()??,
                b: digits.next()??,
            })
        }
        6 if hex.is_ascii() => Some(Color::Rgb {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        _ => None,
    }
}

/// Render target that paints to a terminal
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    /// Latest ranges per color
    decorations: HashMap<String, Vec<Range>>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranges currently styled with `color`
    pub fn ranges(&self, color: &str) -> &[Range] {
        self.decorations.get(color).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Map each styled character position to its terminal color
    fn styled_positions(&self) -> HashMap<Position, Color> {
        let mut styled = HashMap::new();
        for (name, ranges) in &self.decorations {
            let Some(color) = parse_color(name) else {
                tracing::warn!(color = %name, "unknown color, brackets left unstyled");
                continue;
            };
            for range in ranges {
                if range.start.line != range.end.line {
                    continue;
                }
                for character in range.start.character..range.end.character {
                    styled.insert(Position::new(range.start.line, character), color);
                }
            }
        }
        styled
    }

    /// Write the whole document with bracket colors
    pub fn paint<W: Write>(&self, source: &dyn TextSource, out: &mut W) -> Result<()> {
        let styled = self.styled_positions();
        let line_count = source.line_count();

        for line in 0..line_count {
            for (character, ch) in source.line_text(line).chars().enumerate() {
                match styled.get(&Position::new(line, character)) {
                    Some(&color) => queue!(out, SetForegroundColor(color), Print(ch), ResetColor)?,
                    None => queue!(out, Print(ch))?,
                }
            }
            if line + 1 < line_count {
                queue!(out, Print('\n'))?;
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Clear the screen and paint from the top-left corner
    pub fn repaint<W: Write>(&self, source: &dyn TextSource, out: &mut W) -> Result<()> {
        queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.paint(source, out)
    }
}

impl RenderTarget for TerminalRenderer {
    fn set_ranges(&mut self, color: &str, ranges: Vec<Range>) {
        if ranges.is_empty() {
            self.decorations.remove(color);
        } else {
            self.decorations.insert(color.to_string(), ranges);
        }
    }
}
