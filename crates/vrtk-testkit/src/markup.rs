//! Console colour and style markup
//!
//! The host console understands rich-text tags (`<color=teal>`, `<b>`, `<i>`).
//! Lines are styled here and handed to the sink as opaque text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How styled lines are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupMode {
    /// Wrap text in the host's rich-text tags
    #[default]
    RichText,
    /// Emit bare text
    Plain,
}

impl FromStr for MarkupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rich_text" | "rich-text" | "richtext" => Ok(Self::RichText),
            "plain" => Ok(Self::Plain),
            other => Err(format!("unknown markup mode '{other}'")),
        }
    }
}

/// Colours used by the reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Test group headings
    DarkBlue,
    /// Setup headings
    Blue,
    /// Passed assertions
    Teal,
    /// Failed assertions
    Maroon,
    /// Success detail lines
    Purple,
}

impl Color {
    /// Colour name as understood by the console
    pub fn name(self) -> &'static str {
        match self {
            Color::DarkBlue => "darkblue",
            Color::Blue => "blue",
            Color::Teal => "teal",
            Color::Maroon => "maroon",
            Color::Purple => "purple",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A colour plus emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Text colour
    pub color: Color,
    /// Bold emphasis
    pub bold: bool,
    /// Italic emphasis
    pub italic: bool,
}

impl Style {
    /// Bold text in the given colour
    pub const fn bold(color: Color) -> Self {
        Self {
            color,
            bold: true,
            italic: false,
        }
    }

    /// Italic text in the given colour
    pub const fn italic(color: Color) -> Self {
        Self {
            color,
            bold: false,
            italic: true,
        }
    }

    /// Render `text` with this style
    pub fn render(&self, mode: MarkupMode, text: &str) -> String {
        match mode {
            MarkupMode::Plain => text.to_string(),
            MarkupMode::RichText => {
                let mut out = format!("<color={}>", self.color);
                if self.bold {
                    out.push_str("<b>");
                }
                if self.italic {
                    out.push_str("<i>");
                }
                out.push_str(text);
                if self.italic {
                    out.push_str("</i>");
                }
                if self.bold {
                    out.push_str("</b>");
                }
                out.push_str("</color>");
                out
            }
        }
    }
}
