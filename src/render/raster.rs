use crate::pose::Point2;

use super::primitive::RenderPrimitive;
use super::style::Color;

/// ソフトウェア描画用のピクセルバッファ (0RGB)
///
/// 半径・幅が 0 以下 / NaN、または座標が非有限の描画指示は何も描かない。
pub struct Canvas {
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: vec![0u32; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [u32] {
        &mut self.buffer
    }

    pub fn clear(&mut self, color: Color) {
        self.buffer.fill(color.to_u32());
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.buffer[y * self.width + x])
        } else {
            None
        }
    }

    /// 描画指示を出現順に描く (後のものが上に重なる)
    pub fn paint<'p, I>(&mut self, primitives: I)
    where
        I: IntoIterator<Item = &'p RenderPrimitive>,
    {
        for primitive in primitives {
            match *primitive {
                RenderPrimitive::Dot { center, radius, fill } => {
                    self.fill_circle(center, radius, fill.to_u32());
                }
                RenderPrimitive::LineSegment {
                    from,
                    to,
                    stroke,
                    width,
                } => {
                    self.draw_line(from, to, width, stroke.to_u32());
                }
            }
        }
    }

    /// 円を描画（塗りつぶし）
    fn fill_circle(&mut self, center: Point2, radius: f32, color: u32) {
        if !(radius > 0.0) || !is_finite(center) {
            return;
        }
        let Some((x0, x1, y0, y1)) = self.clip_box(
            center.x - radius,
            center.x + radius,
            center.y - radius,
            center.y + radius,
        ) else {
            return;
        };

        let r2 = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.buffer[y * self.width + x] = color;
                }
            }
        }
    }

    /// 太さ付きの線分。幅 1 未満は 1px 幅で描く
    fn draw_line(&mut self, from: Point2, to: Point2, width: f32, color: u32) {
        if !(width > 0.0) || !is_finite(from) || !is_finite(to) {
            return;
        }
        let half = (width * 0.5).max(0.5);
        let Some((x0, x1, y0, y1)) = self.clip_box(
            from.x.min(to.x) - half,
            from.x.max(to.x) + half,
            from.y.min(to.y) - half,
            from.y.max(to.y) + half,
        ) else {
            return;
        };

        let half2 = half * half;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_sq_to_segment(p, from, to) <= half2 {
                    self.buffer[y * self.width + x] = color;
                }
            }
        }
    }

    /// 浮動小数の矩形をバッファ内のピクセル範囲に切り詰める
    fn clip_box(&self, min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Option<(usize, usize, usize, usize)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if max_x < 0.0 || max_y < 0.0 || min_x >= self.width as f32 || min_y >= self.height as f32 {
            return None;
        }
        let x0 = min_x.max(0.0) as usize;
        let y0 = min_y.max(0.0) as usize;
        let x1 = (max_x.min((self.width - 1) as f32)) as usize;
        let y1 = (max_y.min((self.height - 1) as f32)) as usize;
        Some((x0, x1, y0, y1))
    }
}

fn is_finite(p: Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn distance_sq_to_segment(p: Point2, a: Point2, b: Point2) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = p.x - (a.x + t * abx);
    let dy = p.y - (a.y + t * aby);
    dx * dx + dy * dy
}
