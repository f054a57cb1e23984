use std::fs;
use std::path::PathBuf;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

pub const DEFAULT_THEME: &str = "midnight";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub text_cursor_bg: String,
    pub text_cursor_fg: String,
    pub accent: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// User themes in the config dir shadow the bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Some(dir) = Self::user_dir() {
            if let Ok(content) = fs::read_to_string(dir.join(&filename)) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn user_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("typemaster").join("themes"))
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: "fallback".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#0f1117".to_string(),
            fg: "#e6e6f0".to_string(),
            text_correct: "#7ee787".to_string(),
            text_incorrect: "#ff7b72".to_string(),
            text_incorrect_bg: "#3d1f24".to_string(),
            text_pending: "#6e7681".to_string(),
            text_cursor_bg: "#c9d1d9".to_string(),
            text_cursor_fg: "#0f1117".to_string(),
            accent: "#a371f7".to_string(),
            border: "#30363d".to_string(),
            border_focused: "#a371f7".to_string(),
            header_bg: "#161b22".to_string(),
            header_fg: "#e6e6f0".to_string(),
            bar_filled: "#a371f7".to_string(),
            bar_empty: "#21262d".to_string(),
            error: "#ff7b72".to_string(),
            warning: "#e3b341".to_string(),
            success: "#7ee787".to_string(),
        }
    }
}

/// `name(&self) -> Color` for each hex string field.
macro_rules! color_accessors {
    ($($field:ident),+ $(,)?) => {
        impl ThemeColors {
            $(
                pub fn $field(&self) -> Color {
                    Self::parse_color(&self.$field)
                }
            )+
        }
    };
}

color_accessors!(
    bg,
    fg,
    text_correct,
    text_incorrect,
    text_incorrect_bg,
    text_pending,
    text_cursor_bg,
    text_cursor_fg,
    accent,
    border,
    border_focused,
    header_bg,
    header_fg,
    bar_filled,
    bar_empty,
    error,
    warning,
    success,
);

impl ThemeColors {
    /// `#rrggbb` to RGB. Anything else falls back to white.
    pub fn parse_color(hex: &str) -> Color {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Color::White;
        }
        match u32::from_str_radix(digits, 16) {
            Ok(rgb) => Color::from_u32(rgb),
            Err(_) => Color::White,
        }
    }

    /// Green for clean typing, amber for shaky, red below that.
    pub fn accuracy(&self, accuracy: u32) -> Color {
        match accuracy {
            95.. => self.success(),
            85..=94 => self.warning(),
            _ => self.error(),
        }
    }
}
