//! Cosmetic themes - a fixed set of named palettes

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Selectable theme names
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Modern,
    Space,
    Comic,
    Cyberpunk,
    Sap,
}

impl ThemeName {
    pub const ALL: [ThemeName; 5] = [
        ThemeName::Modern,
        ThemeName::Space,
        ThemeName::Comic,
        ThemeName::Cyberpunk,
        ThemeName::Sap,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ThemeName::Modern => "Modern",
            ThemeName::Space => "Space",
            ThemeName::Comic => "Comic",
            ThemeName::Cyberpunk => "Cyberpunk",
            ThemeName::Sap => "SAP",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ThemeName::Modern => "✨",
            ThemeName::Space => "🚀",
            ThemeName::Comic => "💥",
            ThemeName::Cyberpunk => "🌃",
            ThemeName::Sap => "💼",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<ThemeName> {
        Self::ALL.get(index).copied()
    }

    pub fn palette(&self) -> Palette {
        match self {
            ThemeName::Modern => Palette {
                accent: Color::Rgb(0x00, 0x78, 0xd4),
                text: Color::White,
                muted: Color::DarkGray,
                highlight: Color::Yellow,
                success: Color::Rgb(0x10, 0x7c, 0x10),
                error_fg: Color::Red,
                error_bg: Color::Rgb(0x3a, 0x10, 0x10),
                popup_bg: Color::Black,
            },
            ThemeName::Space => Palette {
                accent: Color::Rgb(0x7b, 0x68, 0xee),
                text: Color::Rgb(0xe6, 0xe6, 0xfa),
                muted: Color::Rgb(0x5c, 0x5c, 0x8a),
                highlight: Color::Rgb(0x00, 0xff, 0xff),
                success: Color::Rgb(0x7f, 0xff, 0xd4),
                error_fg: Color::Rgb(0xff, 0x63, 0x47),
                error_bg: Color::Rgb(0x19, 0x19, 0x40),
                popup_bg: Color::Rgb(0x0b, 0x0b, 0x2b),
            },
            ThemeName::Comic => Palette {
                accent: Color::Rgb(0xff, 0xd7, 0x00),
                text: Color::White,
                muted: Color::Gray,
                highlight: Color::Rgb(0xff, 0x45, 0x00),
                success: Color::Rgb(0x32, 0xcd, 0x32),
                error_fg: Color::Rgb(0xff, 0x14, 0x93),
                error_bg: Color::Black,
                popup_bg: Color::Rgb(0x1e, 0x1e, 0x1e),
            },
            ThemeName::Cyberpunk => Palette {
                accent: Color::Rgb(0xff, 0x00, 0xff),
                text: Color::Rgb(0x00, 0xff, 0x9f),
                muted: Color::Rgb(0x60, 0x60, 0x80),
                highlight: Color::Rgb(0xf3, 0xe6, 0x00),
                success: Color::Rgb(0x00, 0xff, 0x9f),
                error_fg: Color::Rgb(0xff, 0x2a, 0x6d),
                error_bg: Color::Rgb(0x1a, 0x00, 0x1a),
                popup_bg: Color::Rgb(0x0d, 0x02, 0x21),
            },
            ThemeName::Sap => Palette {
                accent: Color::Rgb(0x0a, 0x6e, 0xd1),
                text: Color::Rgb(0x32, 0x36, 0x3a),
                muted: Color::Rgb(0x6a, 0x6d, 0x70),
                highlight: Color::Rgb(0xe9, 0x73, 0x0c),
                success: Color::Rgb(0x25, 0x6f, 0x3a),
                error_fg: Color::Rgb(0xbb, 0x00, 0x00),
                error_bg: Color::Rgb(0xff, 0xeb, 0xeb),
                popup_bg: Color::Rgb(0xf7, 0xf7, 0xf7),
            },
        }
    }
}

/// Terminal colors a theme resolves to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub highlight: Color,
    pub success: Color,
    pub error_fg: Color,
    pub error_bg: Color,
    pub popup_bg: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_modern() {
        assert_eq!(ThemeName::default(), ThemeName::Modern);
    }

    #[test]
    fn test_index_roundtrip_covers_all() {
        for (i, theme) in ThemeName::ALL.iter().enumerate() {
            assert_eq!(theme.index(), i);
            assert_eq!(ThemeName::from_index(i), Some(*theme));
        }
        assert_eq!(ThemeName::from_index(ThemeName::ALL.len()), None);
    }

    #[test]
    fn test_serialized_as_lowercase() {
        assert_eq!(serde_yaml::to_string(&ThemeName::Cyberpunk).unwrap().trim(), "cyberpunk");
        let parsed: ThemeName = serde_yaml::from_str("sap").unwrap();
        assert_eq!(parsed, ThemeName::Sap);
    }
}
