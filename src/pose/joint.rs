/// 身体ランドマークの名前 (19 関節)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum JointName {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    Neck = 5,
    LeftShoulder = 6,
    RightShoulder = 7,
    LeftElbow = 8,
    RightElbow = 9,
    LeftWrist = 10,
    RightWrist = 11,
    Root = 12,
    LeftHip = 13,
    RightHip = 14,
    LeftKnee = 15,
    RightKnee = 16,
    LeftAnkle = 17,
    RightAnkle = 18,
}

impl JointName {
    pub const COUNT: usize = 19;

    pub const ALL: [JointName; JointName::COUNT] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::Neck,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::Root,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::Neck => "neck",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::Root => "root",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

/// 2次元座標。空間 (検出器の正規化座標 / 画面座標) は文脈で決まる
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 単一キーポイント
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub position: Point2,
    /// 信頼度スコア (0.0〜1.0)
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            confidence,
        }
    }
}

/// 1フレーム分の観測関節 (JointName → Keypoint)
///
/// 関節ごとに最大1エントリ。存在しない関節は「このフレームでは未検出」を意味する。
/// 反復順は JointName の定義順で固定。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservedSkeleton {
    joints: [Option<Keypoint>; JointName::COUNT],
}

impl ObservedSkeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存エントリがあれば置き換え、古い値を返す
    pub fn insert(&mut self, joint: JointName, keypoint: Keypoint) -> Option<Keypoint> {
        self.joints[joint.index()].replace(keypoint)
    }

    pub fn get(&self, joint: JointName) -> Option<&Keypoint> {
        self.joints[joint.index()].as_ref()
    }

    pub fn contains(&self, joint: JointName) -> bool {
        self.joints[joint.index()].is_some()
    }

    pub fn remove(&mut self, joint: JointName) -> Option<Keypoint> {
        self.joints[joint.index()].take()
    }

    pub fn len(&self) -> usize {
        self.joints.iter().filter(|k| k.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.iter().all(|k| k.is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointName, &Keypoint)> + Clone + '_ {
        JointName::ALL
            .iter()
            .zip(self.joints.iter())
            .filter_map(|(joint, kp)| kp.as_ref().map(|kp| (*joint, kp)))
    }
}

impl FromIterator<(JointName, Keypoint)> for ObservedSkeleton {
    fn from_iter<T: IntoIterator<Item = (JointName, Keypoint)>>(iter: T) -> Self {
        let mut skeleton = Self::new();
        for (joint, kp) in iter {
            skeleton.insert(joint, kp);
        }
        skeleton
    }
}
