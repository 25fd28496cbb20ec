use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

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
    pub text_pending: String,
    pub token_bg: String,
    pub token_used: String,
    pub accent: String,
    pub accent_dim: String,
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
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("satzbau")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => tracing::warn!(
                        path = %user_theme_path.display(),
                        error = %err,
                        "ignoring malformed user theme"
                    ),
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
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
        Self::load("catppuccin-mocha").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            text_correct: "#a6e3a1".to_string(),
            text_incorrect: "#f38ba8".to_string(),
            text_pending: "#585b70".to_string(),
            token_bg: "#313244".to_string(),
            token_used: "#45475a".to_string(),
            accent: "#89b4fa".to_string(),
            accent_dim: "#45475a".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#89b4fa".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            bar_filled: "#89b4fa".to_string(),
            bar_empty: "#313244".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

macro_rules! color_accessors {
    ($($field:ident),* $(,)?) => {
        $(
            pub fn $field(&self) -> Color {
                Self::parse_color(&self.$field)
            }
        )*
    };
}

impl ThemeColors {
    /// Accepts `#rrggbb`, ANSI names such as `green` or `reset`, and palette
    /// indices. Anything else renders white.
    pub fn parse_color(value: &str) -> Color {
        value.trim().parse().unwrap_or(Color::White)
    }

    color_accessors!(
        bg,
        fg,
        text_correct,
        text_incorrect,
        text_pending,
        token_bg,
        token_used,
        accent,
        accent_dim,
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_themes_parse() {
        let names = Theme::available_themes();
        assert!(names.contains(&"catppuccin-mocha".to_string()));
        for name in names {
            let theme = Theme::load(&name).unwrap_or_else(|| panic!("theme {name} failed to load"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn parse_color_accepts_hex_and_names() {
        assert_eq!(ThemeColors::parse_color("#89b4fa"), Color::Rgb(0x89, 0xb4, 0xfa));
        assert_eq!(ThemeColors::parse_color("reset"), Color::Reset);
        assert_eq!(ThemeColors::parse_color(" green "), Color::Green);
        assert_eq!(ThemeColors::parse_color("nope"), Color::White);
    }
}
