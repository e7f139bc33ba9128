use crate::pose::JointName;

/// 骨格の接続 (順序なしの関節ペア)
#[derive(Debug, Clone, Copy)]
pub struct BoneEdge {
    pub a: JointName,
    pub b: JointName,
}

impl BoneEdge {
    pub const fn new(a: JointName, b: JointName) -> Self {
        Self { a, b }
    }

    pub fn connects(&self, joint: JointName) -> bool {
        self.a == joint || self.b == joint
    }
}

impl PartialEq for BoneEdge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for BoneEdge {}

/// 骨格の接続定義。描画順もこの順
pub const SKELETON_CONNECTIONS: [BoneEdge; 14] = [
    // 頭・腕
    BoneEdge::new(JointName::Nose, JointName::Neck),
    BoneEdge::new(JointName::Neck, JointName::LeftShoulder),
    BoneEdge::new(JointName::LeftShoulder, JointName::LeftElbow),
    BoneEdge::new(JointName::LeftElbow, JointName::LeftWrist),
    BoneEdge::new(JointName::Neck, JointName::RightShoulder),
    BoneEdge::new(JointName::RightShoulder, JointName::RightElbow),
    BoneEdge::new(JointName::RightElbow, JointName::RightWrist),
    // 背骨
    BoneEdge::new(JointName::Neck, JointName::Root),
    // 脚
    BoneEdge::new(JointName::Root, JointName::RightHip),
    BoneEdge::new(JointName::RightHip, JointName::RightKnee),
    BoneEdge::new(JointName::RightKnee, JointName::RightAnkle),
    BoneEdge::new(JointName::Root, JointName::LeftHip),
    BoneEdge::new(JointName::LeftHip, JointName::LeftKnee),
    BoneEdge::new(JointName::LeftKnee, JointName::LeftAnkle),
];
