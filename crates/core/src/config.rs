//! Application Configuration
//! 
//! Manages all Wikipad settings including:
//! - Editor preferences (text size, which form field is edited)
//! - Popup windows for the link, image and help dialogs
//! - Modal overlay options and the page display mode
//! - Upload progress endpoint

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use tracing::{info, debug};

use crate::error::{Result, WikipadError};

/// Font size preference of the edit area
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TextSize {
    /// Font scale in `em`
    pub fn font_scale(&self) -> f32 {
        match self {
            TextSize::Small => 1.2,
            TextSize::Medium => 1.4,
            TextSize::Large => 1.6,
        }
    }

    /// Parse a stored preference value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "small" => Some(TextSize::Small),
            "medium" => Some(TextSize::Medium),
            "large" => Some(TextSize::Large),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextSize::Small => "small",
            TextSize::Medium => "medium",
            TextSize::Large => "large",
        }
    }
}

/// How followed links are presented
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Replace the current view
    #[default]
    Direct,
    /// Open inside a modal overlay
    Modal,
}

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size preference
    pub text_size: TextSize,
    /// Name of the form holding the main edit area
    pub edit_form: String,
    /// Name of the edit area inside that form
    pub edit_field: String,
    /// Maximum undo history size
    pub max_undo_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            text_size: TextSize::default(),
            edit_form: "editform".to_string(),
            edit_field: "data".to_string(),
            max_undo_history: 1000,
        }
    }
}

/// A popup window target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopupTarget {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl PopupTarget {
    fn new(url: &str, width: u32, height: u32) -> Self {
        Self {
            url: url.to_string(),
            width,
            height,
        }
    }
}

/// Popup window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Window name shared by every popup, so only one is open at a time
    pub window_name: String,
    /// Add-link dialog
    pub link: PopupTarget,
    /// Add-image dialog
    pub image: PopupTarget,
    /// Markup help page
    pub help: PopupTarget,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            window_name: "itools_popup".to_string(),
            link: PopupTarget::new("../;add_link?mode=wiki", 700, 480),
            image: PopupTarget::new("../;add_image?mode=wiki", 700, 480),
            help: PopupTarget::new(";help?popup=1", 600, 400),
        }
    }
}

/// Modal overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub width: u32,
    pub height: u32,
    pub overlay_color: String,
    pub overlay_opacity: f32,
    /// Query parameter telling the server to render without chrome
    pub marker_param: String,
    /// Reload the underlying page once the overlay closes
    pub reload_on_close: bool,
    pub hide_on_overlay_click: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 550,
            overlay_color: "#333".to_string(),
            overlay_opacity: 0.8,
            marker_param: "fancybox=1".to_string(),
            reload_on_close: true,
            hide_on_overlay_click: false,
        }
    }
}

/// Navigation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NavigationConfig {
    pub display_mode: DisplayMode,
}

/// Upload progress configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Status endpoint, queried with `?upload_id=<id>`
    pub status_endpoint: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            status_endpoint: "/;upload_stats".to_string(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Editor settings
    pub editor: EditorConfig,
    /// Popup settings
    pub popup: PopupConfig,
    /// Modal overlay settings
    pub modal: ModalConfig,
    /// Navigation settings
    pub navigation: NavigationConfig,
    /// Upload settings
    pub upload: UploadConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            editor: EditorConfig::default(),
            popup: PopupConfig::default(),
            modal: ModalConfig::default(),
            navigation: NavigationConfig::default(),
            upload: UploadConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("org", "wikipad", "Wikipad")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| WikipadError::Config("Cannot determine config path".into()))?;
        Self::load_from(&config_file).await
    }

    /// Load configuration from a file, writing defaults if it does not exist
    pub async fn load_from(config_file: &Path) -> Result<Self> {
        if config_file.exists() {
            debug!("Loading config from {:?}", config_file);
            let contents = tokio::fs::read_to_string(config_file).await?;
            let config: AppConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            info!("Config file not found, using defaults");
            let config = AppConfig::default();
            config.save_to(config_file).await?;
            Ok(config)
        }
    }

    /// Save configuration to the default location
    pub async fn save(&self) -> Result<()> {
        let config_file = Self::config_file()
            .ok_or_else(|| WikipadError::Config("Cannot determine config path".into()))?;
        self.save_to(&config_file).await
    }

    /// Save configuration to a file
    pub async fn save_to(&self, config_file: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = config_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(config_file, contents).await?;
        
        debug!("Config saved to {:?}", config_file);
        Ok(())
    }

    /// Status URL for an upload id
    pub fn upload_status_url(&self, upload_id: u64) -> String {
        format!("{}?upload_id={}", self.upload.status_endpoint, upload_id)
    }
}
