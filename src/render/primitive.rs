use crate::pose::Point2;

use super::style::Color;

/// 描画 API に依存しない描画指示
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderPrimitive {
    Dot {
        center: Point2,
        radius: f32,
        fill: Color,
    },
    LineSegment {
        from: Point2,
        to: Point2,
        stroke: Color,
        width: f32,
    },
}

impl RenderPrimitive {
    pub fn is_dot(&self) -> bool {
        matches!(self, Self::Dot { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Self::LineSegment { .. })
    }
}
