//! Brand palette: the six semantic colors every generated asset is drawn from.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AppError;

/// Semantic color roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteRole {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
    TextSecondary,
}

impl PaletteRole {
    /// All roles in palette order.
    pub const ALL: [PaletteRole; 6] = [
        PaletteRole::Primary,
        PaletteRole::Secondary,
        PaletteRole::Accent,
        PaletteRole::Background,
        PaletteRole::Text,
        PaletteRole::TextSecondary,
    ];

    /// Key used in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            PaletteRole::Primary => "primary",
            PaletteRole::Secondary => "secondary",
            PaletteRole::Accent => "accent",
            PaletteRole::Background => "background",
            PaletteRole::Text => "text",
            PaletteRole::TextSecondary => "text_secondary",
        }
    }

    /// Human-readable label.
    pub fn display_name(&self) -> &'static str {
        match self {
            PaletteRole::Primary => "Primary",
            PaletteRole::Secondary => "Secondary",
            PaletteRole::Accent => "Accent",
            PaletteRole::Background => "Background",
            PaletteRole::Text => "Text",
            PaletteRole::TextSecondary => "Text (secondary)",
        }
    }
}

impl fmt::Display for PaletteRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Role → color mapping. Every role is always present; values are validated on load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BrandPalette {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_secondary")]
    pub secondary: String,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_text_secondary")]
    pub text_secondary: String,
}

impl Default for BrandPalette {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            accent: default_accent(),
            background: default_background(),
            text: default_text(),
            text_secondary: default_text_secondary(),
        }
    }
}

fn default_primary() -> String {
    "#6366f1".to_string()
}

fn default_secondary() -> String {
    "#8b5cf6".to_string()
}

fn default_accent() -> String {
    "#06b6d4".to_string()
}

fn default_background() -> String {
    "#1e1b4b".to_string()
}

fn default_text() -> String {
    "#ffffff".to_string()
}

fn default_text_secondary() -> String {
    "#e2e8f0".to_string()
}

impl BrandPalette {
    /// Color assigned to a role.
    pub fn get(&self, role: PaletteRole) -> &str {
        match role {
            PaletteRole::Primary => &self.primary,
            PaletteRole::Secondary => &self.secondary,
            PaletteRole::Accent => &self.accent,
            PaletteRole::Background => &self.background,
            PaletteRole::Text => &self.text,
            PaletteRole::TextSecondary => &self.text_secondary,
        }
    }

    /// Roles and colors in palette order.
    pub fn entries(&self) -> impl Iterator<Item = (PaletteRole, &str)> {
        PaletteRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// Reject any role whose value is not a hex color.
    pub fn validate(&self) -> Result<(), AppError> {
        for (role, value) in self.entries() {
            if !is_hex_color(value) {
                return Err(AppError::InvalidColor {
                    role: role.key().to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
