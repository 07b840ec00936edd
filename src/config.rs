//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a sparse user file in the content root; only the keys you
//! want to change need to appear.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "content"  # Path to content directory
//! assets_dir = "assets"     # Copied verbatim to the output root
//!
//! [site]
//! title = "Untitled"
//! description = ""
//! lang = "en"
//! favicon = "favicon.ico"
//! base_url = ""
//!
//! [code]
//! collapsed_height = 350    # Taller blocks get a "Show more" toggle
//! expanded_height = 1000    # Cap for expanded blocks
//! line_height = 24          # Build-time height estimate per line
//! padding = 32              # Build-time vertical padding estimate
//! themes = ["dark", "light"]
//! default_theme = "dark"    # Assumed preference for the initial render
//!
//! [colors.light]
//! background = "#f9fafb"
//! text = "#374151"
//! text_muted = "#6b7280"
//! border = "#d1d5db"
//! link = "#1f2937"
//! link_hover = "#000000"
//! code_background = "#f3f4f6"
//!
//! [colors.dark]
//! background = "#0c0a09"
//! text = "#d1d5db"
//! text_muted = "#9ca3af"
//! border = "#374151"
//! link = "#e5e7eb"
//! link_hover = "#ffffff"
//! code_background = "#111827"
//!
//! [footer]
//! text = ""
//! links = []                # [{ label = "GitHub", url = "https://..." }]
//!
//! [processing]
//! max_processes = 4         # Max parallel page renders (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::viewer::{OverflowDetector, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the content root directory.
    #[serde(default = "default_content_root")]
    pub content_root: String,
    /// Directory under the content root copied verbatim to the output root.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Site metadata used by the layout shell.
    pub site: SiteMeta,
    /// Code block viewer settings.
    pub code: CodeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Footer content.
    pub footer: FooterConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

fn default_content_root() -> String {
    "content".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            assets_dir: default_assets_dir(),
            site: SiteMeta::default(),
            code: CodeConfig::default(),
            colors: ColorConfig::default(),
            footer: FooterConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let code = &self.code;
        if code.collapsed_height == 0 {
            return Err(ConfigError::Validation(
                "code.collapsed_height must be greater than 0".into(),
            ));
        }
        if code.expanded_height < code.collapsed_height {
            return Err(ConfigError::Validation(
                "code.expanded_height must be >= code.collapsed_height".into(),
            ));
        }
        if code.line_height == 0 {
            return Err(ConfigError::Validation(
                "code.line_height must be greater than 0".into(),
            ));
        }
        if code.themes.is_empty() {
            return Err(ConfigError::Validation(
                "code.themes must not be empty".into(),
            ));
        }
        for (i, theme) in code.themes.iter().enumerate() {
            if code.themes[..i].contains(theme) {
                return Err(ConfigError::Validation(format!(
                    "code.themes lists '{theme}' more than once"
                )));
            }
        }
        if !code.themes.contains(&code.default_theme) {
            return Err(ConfigError::Validation(format!(
                "code.default_theme '{}' is not one of code.themes",
                code.default_theme
            )));
        }
        if let Some(link) = self.footer.links.iter().find(|l| l.url.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "footer link '{}' has an empty url",
                link.label
            )));
        }
        Ok(())
    }
}

/// Site metadata for the layout shell (`<head>` tags and header).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Site name: header brand and title suffix.
    pub title: String,
    /// Meta description for pages without their own.
    pub description: String,
    /// `<html lang>` value.
    pub lang: String,
    /// Favicon path relative to the output root. Empty disables the link.
    pub favicon: String,
    /// Absolute site URL prefix for canonical links. Empty means relative only.
    pub base_url: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            description: String::new(),
            lang: "en".to_string(),
            favicon: "favicon.ico".to_string(),
            base_url: String::new(),
        }
    }
}

/// Code block viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeConfig {
    /// Blocks taller than this overflow and start collapsed at this height.
    pub collapsed_height: u32,
    /// Maximum height of an expanded, overflowing block.
    pub expanded_height: u32,
    /// Estimated height of one code line, for the build-time render.
    pub line_height: u32,
    /// Estimated vertical padding of a block, for the build-time render.
    pub padding: u32,
    /// Themes each code block is rendered for, unless the fence restricts them.
    pub themes: Vec<Theme>,
    /// Preference assumed when rendering the initial page.
    pub default_theme: Theme,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            collapsed_height: OverflowDetector::DEFAULT_THRESHOLD,
            expanded_height: OverflowDetector::DEFAULT_EXPANDED_CAP,
            line_height: 24,
            padding: 32,
            themes: Theme::ALL.to_vec(),
            default_theme: Theme::Dark,
        }
    }
}

impl CodeConfig {
    pub fn detector(&self) -> OverflowDetector {
        OverflowDetector::new(self.collapsed_height, self.expanded_height)
    }
}

/// Footer content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    /// Free text shown above the links.
    pub text: String,
    /// Links rendered in order.
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page renders.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text: nav, footer, code toolbar.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Code block background.
    pub code_background: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f9fafb".to_string(),
            text: "#374151".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#d1d5db".to_string(),
            link: "#1f2937".to_string(),
            link_hover: "#000000".to_string(),
            code_background: "#f3f4f6".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0c0a09".to_string(),
            text: "#d1d5db".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#374151".to_string(),
            link: "#e5e7eb".to_string(),
            link_hover: "#ffffff".to_string(),
            code_background: "#111827".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of the
/// stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(
        root = %root.display(),
        themes = ?config.code.themes,
        "loaded site config"
    );
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# codepage configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Path to content directory
content_root = "content"

# Directory (inside the content root) copied verbatim to the output root.
# Put favicon.ico, images and fonts here.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Site metadata
# ---------------------------------------------------------------------------
[site]
# Header brand and <title> suffix; also used for og:/twitter: title tags.
title = "Untitled"

# Default meta description.
description = ""

# <html lang="...">
lang = "en"

# Favicon path relative to the output root. Set to "" to omit the link.
favicon = "favicon.ico"

# Absolute URL prefix for canonical links, e.g. "https://example.com".
base_url = ""

# ---------------------------------------------------------------------------
# Code blocks
# ---------------------------------------------------------------------------
[code]
# Blocks taller than this (px) start collapsed with a "Show more" toggle.
collapsed_height = 350

# Expanded blocks never grow past this height (px).
expanded_height = 1000

# Build-time estimate of one line's height and the block padding (px).
line_height = 24
padding = 32

# Themes every block is rendered for. A fence can narrow this with
# ```rust theme=dark
themes = ["dark", "light"]

# Color scheme assumed for the initial page render.
default_theme = "dark"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f9fafb"
text = "#374151"
text_muted = "#6b7280"    # Nav, footer, code toolbar
border = "#d1d5db"
link = "#1f2937"
link_hover = "#000000"
code_background = "#f3f4f6"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0c0a09"
text = "#d1d5db"
text_muted = "#9ca3af"
border = "#374151"
link = "#e5e7eb"
link_hover = "#ffffff"
code_background = "#111827"

# ---------------------------------------------------------------------------
# Footer
# ---------------------------------------------------------------------------
[footer]
text = ""
# links = [{ label = "GitHub", url = "https://github.com/you/site" }]
links = []

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page renders.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    fn vars(scheme: &ColorScheme, indent: &str) -> String {
        [
            ("--color-bg", &scheme.background),
            ("--color-text", &scheme.text),
            ("--color-text-muted", &scheme.text_muted),
            ("--color-border", &scheme.border),
            ("--color-link", &scheme.link),
            ("--color-link-hover", &scheme.link_hover),
            ("--color-code-bg", &scheme.code_background),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    }

    format!(
        ":root {{\n{light}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{dark}\n    }}\n}}",
        light = vars(&colors.light, "    "),
        dark = vars(&colors.dark, "        "),
    )
}

/// Generate CSS custom properties from code config.
pub fn generate_code_css(code: &CodeConfig) -> String {
    format!(
        ":root {{\n    --code-collapsed-height: {}px;\n    --code-expanded-height: {}px;\n    --code-line-height: {}px;\n}}",
        code.collapsed_height, code.expanded_height, code.line_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.content_root, "content");
        assert_eq!(config.assets_dir, "assets");
        assert_eq!(config.site.lang, "en");
        assert_eq!(config.code.collapsed_height, 350);
        assert_eq!(config.code.expanded_height, 1000);
        assert_eq!(config.code.themes, vec![Theme::Dark, Theme::Light]);
        assert_eq!(config.code.default_theme, Theme::Dark);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.light.background, "#fafafa");
        assert_eq!(config.colors.light.text, "#374151");
        assert_eq!(config.colors.dark.background, "#0c0a09");
        assert_eq!(config.code.line_height, 24);
    }

    #[test]
    fn parse_code_settings() {
        let toml = r#"
[code]
collapsed_height = 200
themes = ["light"]
default_theme = "light"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.code.collapsed_height, 200);
        assert_eq!(config.code.themes, vec![Theme::Light]);
        assert_eq!(config.code.detector().threshold, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_footer_links() {
        let toml = r#"
[footer]
text = "Written by hand."
links = [{ label = "GitHub", url = "https://github.com/example" }]
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.footer.links.len(), 1);
        assert_eq!(config.footer.links[0].label, "GitHub");
    }

    #[test]
    fn unknown_theme_rejected() {
        let toml = r#"
[code]
themes = ["sepia"]
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Untitled");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[site]
title = "Server Components"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Server Components");
        assert_eq!(config.site.lang, "en");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[code]
collapsed_height = 0
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_expanded_below_collapsed() {
        let mut config = SiteConfig::default();
        config.code.expanded_height = 100;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("expanded_height"));
    }

    #[test]
    fn validate_zero_line_height() {
        let mut config = SiteConfig::default();
        config.code.line_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_and_duplicate_themes() {
        let mut config = SiteConfig::default();
        config.code.themes = vec![];
        assert!(config.validate().is_err());

        config.code.themes = vec![Theme::Dark, Theme::Dark];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn validate_default_theme_must_be_rendered() {
        let mut config = SiteConfig::default();
        config.code.themes = vec![Theme::Light];
        config.code.default_theme = Theme::Dark;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_footer_link_url() {
        let mut config = SiteConfig::default();
        config.footer.links.push(FooterLink {
            label: "Nowhere".into(),
            url: " ".into(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Nowhere"));
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str(r#"themes = ["dark", "light"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"themes = ["light"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("themes").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str(
            r#"
[code]
expanded_height = 1200
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.code.expanded_height, 1200);
        assert_eq!(config.code.collapsed_height, 350);
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[code]
colapsed_height = 300
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[sites]\ntitle = \"x\"\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // stock_config_toml / CSS tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.code.collapsed_height, defaults.code.collapsed_height);
        assert_eq!(config.code.themes, defaults.code.themes);
        assert_eq!(config.colors.dark.code_background, defaults.colors.dark.code_background);
        assert_eq!(config.site.favicon, defaults.site.favicon);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[site]",
            "[code]",
            "[colors.light]",
            "[colors.dark]",
            "[footer]",
            "[processing]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn generate_color_css_includes_both_schemes() {
        let mut colors = ColorConfig::default();
        colors.light.code_background = "#eeeeee".to_string();
        colors.dark.code_background = "#222222".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-code-bg: #eeeeee;"));
        assert!(css.contains("--color-code-bg: #222222;"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn generate_code_css_uses_heights() {
        let css = generate_code_css(&CodeConfig::default());
        assert!(css.contains("--code-collapsed-height: 350px;"));
        assert!(css.contains("--code-expanded-height: 1000px;"));
    }
}
