use crate::pose::{JointName, ObservedSkeleton};

use super::primitive::RenderPrimitive;
use super::skeleton::BoneEdge;
use super::style::StyleConfig;

/// 骨格から描画指示列を生成する (遅延評価)
///
/// 先に観測された全関節の点 (JointName 順)、次に両端が観測されている接続の線
/// (topology 順) を返す。`clone()` すれば最初からやり直せる。
pub fn render<'a>(
    observed: &'a ObservedSkeleton,
    topology: &'a [BoneEdge],
    style: StyleConfig,
) -> Primitives<'a> {
    Primitives {
        observed,
        topology,
        style,
        next_joint: 0,
        next_edge: 0,
    }
}

#[derive(Debug, Clone)]
pub struct Primitives<'a> {
    observed: &'a ObservedSkeleton,
    topology: &'a [BoneEdge],
    style: StyleConfig,
    next_joint: usize,
    next_edge: usize,
}

impl Iterator for Primitives<'_> {
    type Item = RenderPrimitive;

    fn next(&mut self) -> Option<RenderPrimitive> {
        while let Some(joint) = JointName::from_index(self.next_joint) {
            self.next_joint += 1;
            if let Some(kp) = self.observed.get(joint) {
                return Some(RenderPrimitive::Dot {
                    center: kp.position,
                    radius: self.style.width,
                    fill: self.style.point_color,
                });
            }
        }

        while let Some(edge) = self.topology.get(self.next_edge) {
            self.next_edge += 1;
            if let (Some(a), Some(b)) = (self.observed.get(edge.a), self.observed.get(edge.b)) {
                log::trace!("draw {}-{}", edge.a.as_str(), edge.b.as_str());
                return Some(RenderPrimitive::LineSegment {
                    from: a.position,
                    to: b.position,
                    stroke: self.style.line_color,
                    width: self.style.width,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Keypoint, Point2};
    use crate::render::skeleton::SKELETON_CONNECTIONS;
    use crate::render::style::Color;

    fn skeleton(joints: &[JointName]) -> ObservedSkeleton {
        joints
            .iter()
            .enumerate()
            .map(|(i, j)| (*j, Keypoint::new(i as f32 * 10.0, i as f32 * 20.0, 0.9)))
            .collect()
    }

    fn lines(primitives: &[RenderPrimitive]) -> Vec<(Point2, Point2)> {
        primitives
            .iter()
            .filter_map(|p| match p {
                RenderPrimitive::LineSegment { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_end_to_end_nose_neck() {
        let observed: ObservedSkeleton = [
            (JointName::Nose, Keypoint::new(0.5, 0.8, 0.9)),
            (JointName::Neck, Keypoint::new(0.5, 0.6, 0.8)),
        ]
        .into_iter()
        .collect();

        let out: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, StyleConfig::default()).collect();
        assert_eq!(out.iter().filter(|p| p.is_dot()).count(), 2);
        assert_eq!(
            lines(&out),
            vec![(Point2::new(0.5, 0.8), Point2::new(0.5, 0.6))]
        );
    }

    #[test]
    fn test_empty_observed() {
        let observed = ObservedSkeleton::new();
        assert_eq!(render(&observed, &SKELETON_CONNECTIONS, StyleConfig::default()).count(), 0);
    }

    #[test]
    fn test_each_edge_requires_both_endpoints() {
        for edge in SKELETON_CONNECTIONS.iter() {
            let only_a = skeleton(&[edge.a]);
            let only_b = skeleton(&[edge.b]);
            let both = skeleton(&[edge.a, edge.b]);

            for missing in [&only_a, &only_b] {
                let out: Vec<_> = render(missing, &SKELETON_CONNECTIONS, StyleConfig::default()).collect();
                assert!(lines(&out).is_empty(), "{:?}", edge);
                assert_eq!(out.len(), 1);
            }

            let out: Vec<_> = render(&both, &SKELETON_CONNECTIONS, StyleConfig::default()).collect();
            let a = both.get(edge.a).unwrap().position;
            let b = both.get(edge.b).unwrap().position;
            assert_eq!(lines(&out), vec![(a, b)], "{:?}", edge);
        }
    }

    #[test]
    fn test_full_skeleton_draws_all_edges_in_order() {
        let observed = skeleton(&JointName::ALL);
        let out: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, StyleConfig::default()).collect();

        assert_eq!(out.len(), JointName::COUNT + SKELETON_CONNECTIONS.len());
        // 点が先、線が後
        assert!(out[..JointName::COUNT].iter().all(|p| p.is_dot()));
        assert!(out[JointName::COUNT..].iter().all(|p| p.is_line()));

        let expected: Vec<_> = SKELETON_CONNECTIONS
            .iter()
            .map(|e| (observed.get(e.a).unwrap().position, observed.get(e.b).unwrap().position))
            .collect();
        assert_eq!(lines(&out), expected);
    }

    #[test]
    fn test_dots_use_point_style() {
        let observed = skeleton(&[JointName::LeftWrist]);
        let style = StyleConfig::new(Color::BLUE, Color::YELLOW, 4.0);
        let out: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, style).collect();
        assert_eq!(
            out,
            vec![RenderPrimitive::Dot {
                center: Point2::new(0.0, 0.0),
                radius: 4.0,
                fill: Color::YELLOW,
            }]
        );
    }

    #[test]
    fn test_lines_use_line_style() {
        let observed = skeleton(&[JointName::Neck, JointName::Root]);
        let style = StyleConfig::new(Color::BLUE, Color::YELLOW, 4.0);
        let out: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, style).collect();
        match out.last() {
            Some(RenderPrimitive::LineSegment { stroke, width, .. }) => {
                assert_eq!(*stroke, Color::BLUE);
                assert_eq!(*width, 4.0);
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_render_is_idempotent_and_restartable() {
        let observed = skeleton(&[JointName::Nose, JointName::Neck, JointName::LeftShoulder]);
        let style = StyleConfig::default();

        let first: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, style).collect();
        let second: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, style).collect();
        assert_eq!(first, second);

        let mut iter = render(&observed, &SKELETON_CONNECTIONS, style);
        let restart = iter.clone();
        let _ = iter.next();
        assert_eq!(restart.collect::<Vec<_>>(), first);
    }

    #[test]
    fn test_style_change_affects_next_render_only() {
        let observed = skeleton(&[JointName::Nose, JointName::Neck]);
        let mut style = StyleConfig::default();

        let before: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, style).collect();
        style.set_width(2.5);
        let after: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, style).collect();

        for p in &before {
            match p {
                RenderPrimitive::Dot { radius, .. } => assert_eq!(*radius, 10.0),
                RenderPrimitive::LineSegment { width, .. } => assert_eq!(*width, 10.0),
            }
        }
        for p in &after {
            match p {
                RenderPrimitive::Dot { radius, .. } => assert_eq!(*radius, 2.5),
                RenderPrimitive::LineSegment { width, .. } => assert_eq!(*width, 2.5),
            }
        }
    }

    #[test]
    fn test_degenerate_width_passes_through() {
        let observed = skeleton(&[JointName::Nose, JointName::Neck]);
        for width in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let style = StyleConfig::new(Color::RED, Color::GREEN, width);
            let out: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, style).collect();
            assert_eq!(out.len(), 3);
        }
    }

    #[test]
    fn test_custom_topology() {
        let observed = skeleton(&[JointName::LeftEye, JointName::RightEye]);
        let topology = [BoneEdge::new(JointName::LeftEye, JointName::RightEye)];
        let out: Vec<_> = render(&observed, &topology, StyleConfig::default()).collect();
        assert_eq!(lines(&out).len(), 1);
        // 既定の接続定義には目の線はない
        let out: Vec<_> = render(&observed, &SKELETON_CONNECTIONS, StyleConfig::default()).collect();
        assert!(lines(&out).is_empty());
    }
}
