//! `deckwm` general configuration

mod checks;
mod default;
mod keybind;

pub use self::keybind::{Keybind, Modifier};

use deckwm_core::layouts::Layout;
use deckwm_core::AppRule;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::Path;
use thiserror::Error;
use xdg::BaseDirectories;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot locate the configuration directory: {0}")]
    BaseDirectories(#[from] xdg::BaseDirectoriesError),
    #[error("Cannot read the configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Placement of the windows whose title matches `title`.
///
/// # Example
///
/// In `config.toml`
///
/// ```toml
/// [[rule]]
/// title = "GNU Image"
/// floating = true
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WindowRule {
    #[serde(deserialize_with = "from_regex", serialize_with = "to_config_string")]
    pub title: Regex,
    /// Zero based. Missing or out of range means the current desktop.
    pub desktop: Option<usize>,
    #[serde(default)]
    pub follow: bool,
    #[serde(default)]
    pub floating: bool,
    pub border_width: Option<i32>,
}

impl WindowRule {
    fn app_rule(&self) -> AppRule {
        AppRule {
            desktop: self.desktop,
            follow: self.follow,
            floating: self.floating,
            border_width: self.border_width,
        }
    }
}

/// General configuration
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub desktops: usize,
    pub default_desktop: usize,
    pub default_layout: Layout,
    pub border_width: i32,
    pub focus_color: String,
    pub unfocus_color: String,
    pub scratchpad_color: String,
    pub master_size: f64,
    pub gaps: i32,
    pub min_window_size: i32,
    pub panel_height: i32,
    pub top_panel: bool,
    pub show_panel: bool,
    pub invert: bool,
    pub attach_aside: bool,
    pub follow_mouse: bool,
    pub follow_window: bool,
    pub click_to_focus: bool,
    pub monocle_borders: bool,
    pub auto_center: bool,
    pub global_gaps: bool,
    pub output_title: bool,
    pub scratchpad_name: String,
    pub scratchpad_command: String,
    pub scratchpad_border_width: i32,
    pub close_scratchpad: bool,
    /// Replaces `modkey` in the modifiers of the key bindings.
    pub modkey: String,
    pub mousekey: Modifier,
    pub keybind: Vec<Keybind>,
    pub rule: Vec<WindowRule>,
}

/// Loads `$XDG_CONFIG_HOME/deckwm/config.toml`. Without a file the defaults are used.
///
/// # Errors
///
/// Function will throw an error if `BaseDirectories` doesn't exist, if config.toml cannot be read
/// or if its content is not a valid configuration.
pub fn load() -> Result<Config> {
    let path = BaseDirectories::with_prefix("deckwm")?;
    match path.find_config_file("config.toml") {
        Some(config_filename) => load_from_file(&config_filename),
        None => {
            tracing::info!("No config.toml found, using the defaults");
            Ok(Config::default())
        }
    }
}

/// # Errors
///
/// Will error if the file cannot be read or if its content is not a valid configuration.
pub fn load_from_file(config_filename: &Path) -> Result<Config> {
    tracing::debug!("Loading config from {}", config_filename.display());
    let contents = fs::read_to_string(config_filename)?;
    let config: Config = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Rejects values the window manager cannot work with. Softer problems are only logged.
    ///
    /// # Errors
    ///
    /// Will error on an empty desktop list, a default desktop out of range or a master size
    /// outside `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if self.desktops == 0 {
            return Err(ConfigError::Invalid("at least one desktop is needed".to_owned()));
        }
        if self.default_desktop >= self.desktops {
            return Err(ConfigError::Invalid(format!(
                "default_desktop {} is out of range for {} desktops",
                self.default_desktop, self.desktops
            )));
        }
        if !(self.master_size > 0.0 && self.master_size < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "master_size {} must be between 0 and 1",
                self.master_size
            )));
        }
        for problem in self.check_mousekey().into_iter().chain(self.check_keybinds()) {
            tracing::warn!("{problem}");
        }
        Ok(())
    }
}

impl deckwm_core::Config for Config {
    fn desktops(&self) -> usize {
        self.desktops
    }

    fn default_desktop(&self) -> usize {
        self.default_desktop
    }

    fn default_layout(&self) -> Layout {
        self.default_layout
    }

    fn border_width(&self) -> i32 {
        self.border_width
    }

    fn focus_color(&self) -> String {
        self.focus_color.clone()
    }

    fn unfocus_color(&self) -> String {
        self.unfocus_color.clone()
    }

    fn scratchpad_color(&self) -> String {
        self.scratchpad_color.clone()
    }

    fn master_size(&self) -> f64 {
        self.master_size
    }

    fn gaps(&self) -> i32 {
        self.gaps
    }

    fn min_window_size(&self) -> i32 {
        self.min_window_size
    }

    fn panel_height(&self) -> i32 {
        self.panel_height
    }

    fn top_panel(&self) -> bool {
        self.top_panel
    }

    fn show_panel(&self) -> bool {
        self.show_panel
    }

    fn invert(&self) -> bool {
        self.invert
    }

    fn attach_aside(&self) -> bool {
        self.attach_aside
    }

    fn follow_mouse(&self) -> bool {
        self.follow_mouse
    }

    fn follow_window(&self) -> bool {
        self.follow_window
    }

    fn click_to_focus(&self) -> bool {
        self.click_to_focus
    }

    fn monocle_borders(&self) -> bool {
        self.monocle_borders
    }

    fn auto_center(&self) -> bool {
        self.auto_center
    }

    fn global_gaps(&self) -> bool {
        self.global_gaps
    }

    fn output_title(&self) -> bool {
        self.output_title
    }

    fn scratchpad_name(&self) -> String {
        self.scratchpad_name.clone()
    }

    fn scratchpad_command(&self) -> String {
        self.scratchpad_command.clone()
    }

    fn scratchpad_border_width(&self) -> i32 {
        self.scratchpad_border_width
    }

    fn close_scratchpad(&self) -> bool {
        self.close_scratchpad
    }

    fn mousekey(&self) -> Vec<String> {
        self.mousekey.substitute(&self.modkey).into()
    }

    // copy keybinds substituting "modkey" modifier with the configured one.
    fn keybinds(&self) -> Vec<deckwm_core::Keybind> {
        self.keybind
            .iter()
            .map(|keybind| keybind.to_core_keybind(&self.modkey))
            .collect()
    }

    fn app_rule(&self, title: &str) -> Option<AppRule> {
        let rule = self.rule.iter().find(|rule| rule.title.is_match(title))?;
        tracing::debug!("Window {:?} matched rule {}", title, rule.title);
        Some(rule.app_rule())
    }
}

fn from_regex<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Regex, D::Error> {
    let res: String = Deserialize::deserialize(deserializer)?;
    Regex::new(&res).map_err(serde::de::Error::custom)
}

fn to_config_string<S: Serializer>(re: &Regex, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(re.as_str())
}
