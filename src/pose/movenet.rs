use super::joint::{JointName, Keypoint, ObservedSkeleton, Point2};

/// MoveNet の出力キーポイント数
pub const MOVENET_KEYPOINT_COUNT: usize = 17;

/// MoveNet の出力インデックス順 (COCO) に対応する関節
const MOVENET_JOINTS: [JointName; MOVENET_KEYPOINT_COUNT] = [
    JointName::Nose,
    JointName::LeftEye,
    JointName::RightEye,
    JointName::LeftEar,
    JointName::RightEar,
    JointName::LeftShoulder,
    JointName::RightShoulder,
    JointName::LeftElbow,
    JointName::RightElbow,
    JointName::LeftWrist,
    JointName::RightWrist,
    JointName::LeftHip,
    JointName::RightHip,
    JointName::LeftKnee,
    JointName::RightKnee,
    JointName::LeftAnkle,
    JointName::RightAnkle,
];

/// MoveNet の生出力 `[y, x, confidence]` × 17 を検出器空間の骨格に変換
///
/// MoveNet は左上原点の画像座標を返すので、左下原点 (y 上向き) に反転する。
/// MoveNet にない neck / root は左右の肩・腰の中点から合成し、
/// 信頼度は両端の小さい方を使う。
pub fn skeleton_from_movenet(raw: &[[f32; 3]; MOVENET_KEYPOINT_COUNT]) -> ObservedSkeleton {
    let mut skeleton: ObservedSkeleton = MOVENET_JOINTS
        .iter()
        .zip(raw.iter())
        .map(|(joint, [y, x, confidence])| (*joint, Keypoint::new(*x, 1.0 - *y, *confidence)))
        .collect();

    for (joint, left, right) in [
        (JointName::Neck, JointName::LeftShoulder, JointName::RightShoulder),
        (JointName::Root, JointName::LeftHip, JointName::RightHip),
    ] {
        if let (Some(l), Some(r)) = (skeleton.get(left).copied(), skeleton.get(right).copied()) {
            skeleton.insert(joint, midpoint(&l, &r));
        }
    }

    skeleton
}

fn midpoint(a: &Keypoint, b: &Keypoint) -> Keypoint {
    Keypoint {
        position: Point2::new(
            (a.position.x + b.position.x) * 0.5,
            (a.position.y + b.position.y) * 0.5,
        ),
        confidence: a.confidence.min(b.confidence),
    }
}
