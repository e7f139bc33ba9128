use anyhow::Result;
use minifb::{Key, Window, WindowOptions};
use opencv::core::{Mat, Size, Vec3b};
use opencv::imgproc;
use opencv::prelude::*;

use super::primitive::RenderPrimitive;
use super::raster::Canvas;
use super::style::Color;
use super::viewport::AspectFillViewport;

/// minifbを使用したレンダラー
///
/// カメラ映像をアスペクトフィルで描き、その上に骨格の描画指示を重ねる。
pub struct MinifbRenderer {
    window: Window,
    canvas: Canvas,
}

impl MinifbRenderer {
    /// ウィンドウを作成
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        Ok(Self {
            window,
            canvas: Canvas::new(width, height),
        })
    }

    /// ウィンドウが開いているか
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// 前フレームの描画をすべて消す
    pub fn clear(&mut self) {
        self.canvas.clear(Color::BLACK);
    }

    /// 画面サイズ (幅, 高さ)
    pub fn view_size(&self) -> (u32, u32) {
        (self.canvas.width() as u32, self.canvas.height() as u32)
    }

    /// BGR Mat を指定の変換 (アスペクトフィル) でバッファに描画
    ///
    /// 骨格と同じ変換を渡すこと。
    pub fn draw_frame(&mut self, frame: &Mat, viewport: &AspectFillViewport) -> Result<()> {
        let (scaled_w, scaled_h) = viewport.scaled_size();
        let (scaled_w, scaled_h) = (scaled_w.round() as i32, scaled_h.round() as i32);
        if scaled_w <= 0 || scaled_h <= 0 {
            return Ok(());
        }

        let mut resized = Mat::default();
        imgproc::resize(
            frame,
            &mut resized,
            Size::new(scaled_w, scaled_h),
            0.0,
            0.0,
            imgproc::INTER_LINEAR,
        )?;

        // はみ出した分だけ映像側をずらしてクロップ
        let offset = viewport.offset();
        let src_x0 = (-offset.x).max(0.0).round() as usize;
        let src_y0 = (-offset.y).max(0.0).round() as usize;
        let dst_x0 = offset.x.max(0.0).round() as usize;
        let dst_y0 = offset.y.max(0.0).round() as usize;

        let width = self.canvas.width();
        let height = self.canvas.height();
        let copy_w = (width.saturating_sub(dst_x0)).min((scaled_w as usize).saturating_sub(src_x0));
        let copy_h = (height.saturating_sub(dst_y0)).min((scaled_h as usize).saturating_sub(src_y0));

        let buffer = self.canvas.buffer_mut();
        for y in 0..copy_h {
            for x in 0..copy_w {
                let pixel = resized.at_2d::<Vec3b>((src_y0 + y) as i32, (src_x0 + x) as i32)?;
                // BGR -> RGB -> u32
                let color = Color(pixel[2], pixel[1], pixel[0]);
                buffer[(dst_y0 + y) * width + dst_x0 + x] = color.to_u32();
            }
        }

        Ok(())
    }

    /// 描画指示を出現順に重ねる
    pub fn draw_primitives(&mut self, primitives: &[RenderPrimitive]) {
        self.canvas.paint(primitives);
    }

    /// バッファをウィンドウに表示
    pub fn update(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(self.canvas.buffer(), self.canvas.width(), self.canvas.height())?;
        Ok(())
    }
}
