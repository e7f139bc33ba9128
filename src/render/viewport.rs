use crate::pose::{ObservedSkeleton, Point2};

/// 正規化カメラ座標 (左上原点) → 画面座標の変換
///
/// ライブ映像を画面に配置したのと同じ変換でなければならない。
pub trait ViewportTransform {
    fn forward(&self, point: Point2) -> Point2;
}

impl<F: Fn(Point2) -> Point2> ViewportTransform for F {
    fn forward(&self, point: Point2) -> Point2 {
        self(point)
    }
}

/// アスペクト比を保って画面を埋める配置 (はみ出し部分はクロップ)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectFillViewport {
    scale: f32,
    offset: Point2,
    image_width: f32,
    image_height: f32,
}

impl AspectFillViewport {
    pub fn new(image_width: u32, image_height: u32, view_width: u32, view_height: u32) -> Self {
        let (iw, ih) = (image_width as f32, image_height as f32);
        let (vw, vh) = (view_width as f32, view_height as f32);
        let scale = if iw > 0.0 && ih > 0.0 {
            (vw / iw).max(vh / ih)
        } else {
            0.0
        };
        let offset = Point2::new((vw - iw * scale) * 0.5, (vh - ih * scale) * 0.5);
        Self {
            scale,
            offset,
            image_width: iw,
            image_height: ih,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// 拡大後の画像の左上位置 (画面外なら負)
    pub fn offset(&self) -> Point2 {
        self.offset
    }

    /// 拡大後の画像サイズ (px)
    pub fn scaled_size(&self) -> (f32, f32) {
        (self.image_width * self.scale, self.image_height * self.scale)
    }
}

impl ViewportTransform for AspectFillViewport {
    fn forward(&self, point: Point2) -> Point2 {
        Point2::new(
            point.x * self.image_width * self.scale + self.offset.x,
            point.y * self.image_height * self.scale + self.offset.y,
        )
    }
}

/// 左下原点 (y 上向き) → 左上原点
pub fn flip_vertical(point: Point2) -> Point2 {
    Point2::new(point.x, 1.0 - point.y)
}

/// 検出器空間の点を画面座標に変換
pub fn to_display<V: ViewportTransform + ?Sized>(point: Point2, viewport: &V) -> Point2 {
    viewport.forward(flip_vertical(point))
}

/// 全キーポイントを独立に画面座標へ変換 (信頼度はそのまま)
pub fn map_skeleton<V: ViewportTransform + ?Sized>(
    observed: &ObservedSkeleton,
    viewport: &V,
) -> ObservedSkeleton {
    observed
        .iter()
        .map(|(joint, kp)| {
            let mut mapped = *kp;
            mapped.position = to_display(kp.position, viewport);
            (joint, mapped)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{JointName, Keypoint};

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn identity(p: Point2) -> Point2 {
        p
    }

    #[test]
    fn test_flip_vertical() {
        assert!(approx_eq(flip_vertical(Point2::new(0.3, 0.9)).y, 0.1));
        assert!(approx_eq(flip_vertical(Point2::new(0.3, 0.1)).y, 0.9));
        assert_eq!(flip_vertical(Point2::new(0.3, 0.1)).x, 0.3);
    }

    #[test]
    fn test_to_display_flips_before_transform() {
        let p = to_display(Point2::new(0.25, 0.9), &identity);
        assert!(approx_eq(p.x, 0.25));
        assert!(approx_eq(p.y, 0.1));

        let scale = |p: Point2| Point2::new(p.x * 100.0, p.y * 200.0);
        let p = to_display(Point2::new(0.5, 0.1), &scale);
        assert!(approx_eq(p.x, 50.0));
        assert!(approx_eq(p.y, 180.0));
    }

    #[test]
    fn test_to_display_is_stateless() {
        let viewport = AspectFillViewport::new(640, 480, 480, 640);
        let a = Point2::new(0.2, 0.7);
        let b = Point2::new(0.9, 0.1);

        let a_first = to_display(a, &viewport);
        let _ = to_display(b, &viewport);
        let a_again = to_display(a, &viewport);
        assert_eq!(a_first, a_again);
    }

    #[test]
    fn test_aspect_fill_same_aspect() {
        let viewport = AspectFillViewport::new(640, 480, 1280, 960);
        assert!(approx_eq(viewport.scale(), 2.0));
        assert_eq!(viewport.offset(), Point2::new(0.0, 0.0));
        let p = viewport.forward(Point2::new(0.5, 0.5));
        assert!(approx_eq(p.x, 640.0));
        assert!(approx_eq(p.y, 480.0));
    }

    #[test]
    fn test_aspect_fill_crops_horizontally() {
        // 4:3 の映像を縦長画面へ: 高さに合わせて左右をクロップ
        let viewport = AspectFillViewport::new(640, 480, 480, 960);
        assert!(approx_eq(viewport.scale(), 2.0));
        let (sw, sh) = viewport.scaled_size();
        assert!(approx_eq(sw, 1280.0));
        assert!(approx_eq(sh, 960.0));
        assert!(approx_eq(viewport.offset().x, -400.0));

        let center = viewport.forward(Point2::new(0.5, 0.5));
        assert!(approx_eq(center.x, 240.0));
        assert!(approx_eq(center.y, 480.0));

        let left = viewport.forward(Point2::new(0.0, 0.0));
        assert!(approx_eq(left.x, -400.0));
    }

    #[test]
    fn test_aspect_fill_zero_image() {
        let viewport = AspectFillViewport::new(0, 0, 640, 480);
        let p = viewport.forward(Point2::new(0.5, 0.5));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn test_map_skeleton_maps_every_keypoint() {
        let observed: ObservedSkeleton = [
            (JointName::Nose, Keypoint::new(0.5, 0.8, 0.9)),
            (JointName::Neck, Keypoint::new(0.5, 0.6, 0.8)),
        ]
        .into_iter()
        .collect();
        let scale = |p: Point2| Point2::new(p.x * 100.0, p.y * 100.0);

        let mapped = map_skeleton(&observed, &scale);
        assert_eq!(mapped.len(), 2);
        let nose = mapped.get(JointName::Nose).unwrap();
        assert!(approx_eq(nose.position.x, 50.0));
        assert!(approx_eq(nose.position.y, 20.0));
        assert_eq!(nose.confidence, 0.9);
        let neck = mapped.get(JointName::Neck).unwrap();
        assert!(approx_eq(neck.position.y, 40.0));
    }
}
