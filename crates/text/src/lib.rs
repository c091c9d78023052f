//! Chat markup handling shared by the broadcast plugins.
//!
//! Messages are written in tag markup (`<gold>Hello`). Servers that still
//! expect legacy color codes get them through [`to_legacy`], which maps the
//! closed set of tags in [`ColorCode`] to `&`-prefixed codes.

use std::fmt;

/// Marker used by the legacy dialect before it reaches the client.
pub const LEGACY_MARKER: char = '&';
/// Marker the client understands for legacy codes.
pub const SECTION_SIGN: char = '§';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Black,
    Gold,
    Gray,
    Blue,
    Green,
    Red,
    Yellow,
    White,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl ColorCode {
    pub const ALL: [ColorCode; 13] = [
        ColorCode::Gold,
        ColorCode::Yellow,
        ColorCode::Gray,
        ColorCode::Red,
        ColorCode::Green,
        ColorCode::Blue,
        ColorCode::White,
        ColorCode::Black,
        ColorCode::Bold,
        ColorCode::Italic,
        ColorCode::Underline,
        ColorCode::Strikethrough,
        ColorCode::Reset,
    ];

    /// The legacy code character, e.g. `6` for gold.
    pub fn code(self) -> char {
        match self {
            ColorCode::Black => '0',
            ColorCode::Blue => '9',
            ColorCode::Gold => '6',
            ColorCode::Gray => '7',
            ColorCode::Green => 'a',
            ColorCode::Red => 'c',
            ColorCode::Yellow => 'e',
            ColorCode::White => 'f',
            ColorCode::Strikethrough => 'm',
            ColorCode::Underline => 'n',
            ColorCode::Bold => 'l',
            ColorCode::Italic => 'o',
            ColorCode::Reset => 'r',
        }
    }

    /// The tag name without angle brackets, e.g. `gold`.
    pub fn tag_name(self) -> &'static str {
        match self {
            ColorCode::Black => "black",
            ColorCode::Blue => "blue",
            ColorCode::Gold => "gold",
            ColorCode::Gray => "gray",
            ColorCode::Green => "green",
            ColorCode::Red => "red",
            ColorCode::Yellow => "yellow",
            ColorCode::White => "white",
            ColorCode::Strikethrough => "strike",
            ColorCode::Underline => "underline",
            ColorCode::Bold => "bold",
            ColorCode::Italic => "italic",
            ColorCode::Reset => "reset",
        }
    }

    pub fn from_code(code: char) -> Option<ColorCode> {
        ColorCode::ALL
            .into_iter()
            .find(|color| color.code() == code.to_ascii_lowercase())
    }

    pub fn from_tag_name(name: &str) -> Option<ColorCode> {
        ColorCode::ALL
            .into_iter()
            .find(|color| color.tag_name() == name)
    }
}

/// Replaces every known `<tag>` with its `&x` legacy code.
///
/// Closing tags and unknown tags are left alone. The output is not meant to
/// be fed back in; it is computed once per message.
pub fn to_legacy(markup: &str) -> String {
    replace_tags(markup, |color, closing| {
        (!closing).then(|| format!("{}{}", LEGACY_MARKER, color.code()))
    })
}

/// Removes every known opening and closing tag, leaving unknown tags.
pub fn strip_tags(markup: &str) -> String {
    replace_tags(markup, |_, _| Some(String::new()))
}

/// Removes `&x` codes for the known colors and formats.
pub fn strip_legacy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == LEGACY_MARKER {
            if let Some(&next) = chars.peek() {
                if ColorCode::from_code(next).is_some() {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

fn replace_tags<F>(markup: &str, replacement: F) -> String
where
    F: Fn(ColorCode, bool) -> Option<String>,
{
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let replaced = candidate.find('>').and_then(|end| {
            let name = &candidate[1..end];
            let (name, closing) = match name.strip_prefix('/') {
                Some(name) => (name, true),
                None => (name, false),
            };
            let color = ColorCode::from_tag_name(name)?;
            replacement(color, closing).map(|text| (text, end))
        });
        match replaced {
            Some((text, end)) => {
                out.push_str(&text);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('<');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);

    out
}

/// A message in one of the two markup dialects the proxy accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Tag(String),
    Legacy(String),
}

impl Markup {
    pub fn tag(text: impl Into<String>) -> Self {
        Markup::Tag(text.into())
    }

    pub fn legacy(text: impl Into<String>) -> Self {
        Markup::Legacy(text.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Markup::Tag(text) | Markup::Legacy(text) => text,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Markup::Legacy(_))
    }

    /// The text as the client receives it: legacy `&` codes become `§` codes,
    /// tag markup is returned unchanged.
    pub fn to_section_codes(&self) -> String {
        match self {
            Markup::Tag(text) => text.clone(),
            Markup::Legacy(text) => text.replace(LEGACY_MARKER, &SECTION_SIGN.to_string()),
        }
    }
}

impl Markup {
    /// The text without any markup, for plain terminals.
    pub fn to_plain_text(&self) -> String {
        match self {
            Markup::Tag(text) => strip_tags(text),
            Markup::Legacy(text) => strip_legacy(text),
        }
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
