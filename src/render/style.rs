use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::{Arc, PoisonError, RwLock};

/// RGB色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const RED: Color = Color(255, 0, 0);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const BLUE: Color = Color(0, 0, 255);
    pub const YELLOW: Color = Color(255, 255, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    /// `"#RRGGBB"` または `"RRGGBB"` をパース
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("Invalid color '{}': expected #RRGGBB", s);
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// minifb のバッファ形式 (0RGB)
    pub fn to_u32(self) -> u32 {
        ((self.0 as u32) << 16) | ((self.1 as u32) << 8) | self.2 as u32
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// 骨格描画のスタイル
///
/// `width` はレンダラー側では制約しない。0 以下などの値もそのまま描画指示に流れる。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleConfig {
    pub line_color: Color,
    pub point_color: Color,
    pub width: f32,
}

impl StyleConfig {
    /// 入力側 (UI / 設定ファイル) が守るべき幅の推奨範囲
    pub const WIDTH_RANGE: RangeInclusive<f32> = 1.0..=10.0;

    pub fn new(line_color: Color, point_color: Color, width: f32) -> Self {
        Self {
            line_color,
            point_color,
            width,
        }
    }

    pub fn line_color(&self) -> Color {
        self.line_color
    }

    pub fn point_color(&self) -> Color {
        self.point_color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.line_color = color;
    }

    pub fn set_point_color(&mut self, color: Color) {
        self.point_color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// 推奨範囲に収めた幅。NaN は下限に寄せる
    pub fn clamp_width(width: f32) -> f32 {
        if width.is_nan() {
            return *Self::WIDTH_RANGE.start();
        }
        width.clamp(*Self::WIDTH_RANGE.start(), *Self::WIDTH_RANGE.end())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_color: Color::RED,
            point_color: Color::GREEN,
            width: 10.0,
        }
    }
}

/// スレッド間で共有するスタイル
///
/// 描画パスは `snapshot()` で3フィールドの一貫したコピーを1回だけ取る。
#[derive(Debug, Clone, Default)]
pub struct SharedStyle {
    inner: Arc<RwLock<StyleConfig>>,
}

impl SharedStyle {
    pub fn new(style: StyleConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(style)),
        }
    }

    pub fn snapshot(&self) -> StyleConfig {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_line_color(&self, color: Color) {
        self.update(|s| s.set_line_color(color));
    }

    pub fn set_point_color(&self, color: Color) {
        self.update(|s| s.set_point_color(color));
    }

    pub fn set_width(&self, width: f32) {
        self.update(|s| s.set_width(width));
    }

    /// 複数フィールドをまとめて更新
    pub fn update<F: FnOnce(&mut StyleConfig)>(&self, f: F) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard);
    }
}
