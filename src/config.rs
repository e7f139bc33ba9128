use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::render::{Color, StyleConfig};

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub style: StyleSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    /// カメラのデバイス番号
    #[serde(default)]
    pub index: i32,
    #[serde(default = "default_camera_width")]
    pub width: u32,
    #[serde(default = "default_camera_height")]
    pub height: u32,
    #[serde(default = "default_camera_fps")]
    pub fps: u32,
}

fn default_camera_width() -> u32 { 640 }
fn default_camera_height() -> u32 { 480 }
fn default_camera_fps() -> u32 { 30 }

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: default_camera_width(),
            height: default_camera_height(),
            fps: default_camera_fps(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// MoveNet ONNX モデルのパス
    #[serde(default = "default_model_path")]
    pub path: String,
}

fn default_model_path() -> String { "models/movenet_lightning.onnx".to_string() }

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    #[serde(default = "default_window_title")]
    pub title: String,
    #[serde(default = "default_window_width")]
    pub width: usize,
    #[serde(default = "default_window_height")]
    pub height: usize,
}

fn default_window_title() -> String { "Body Pose".to_string() }
fn default_window_width() -> usize { 540 }
fn default_window_height() -> usize { 960 }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

/// 骨格スタイルの初期値 (色は "#RRGGBB")
#[derive(Debug, Deserialize, Clone)]
pub struct StyleSettings {
    #[serde(default = "default_line_color")]
    pub line_color: Color,
    #[serde(default = "default_point_color")]
    pub point_color: Color,
    /// 線幅・点の半径 (1〜10)
    #[serde(default = "default_width")]
    pub width: f32,
}

fn default_line_color() -> Color { StyleConfig::default().line_color }
fn default_point_color() -> Color { StyleConfig::default().point_color }
fn default_width() -> f32 { StyleConfig::default().width }

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            line_color: default_line_color(),
            point_color: default_point_color(),
            width: default_width(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// 読み込めなければ既定値
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }

    /// 起動時のスタイル。幅は推奨範囲に収める
    pub fn style(&self) -> StyleConfig {
        let width = StyleConfig::clamp_width(self.style.width);
        if width != self.style.width {
            log::warn!("style.width {} out of range, clamped to {}", self.style.width, width);
        }
        StyleConfig::new(self.style.line_color, self.style.point_color, width)
    }
}
