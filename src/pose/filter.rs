use super::joint::ObservedSkeleton;

/// 信頼度の閾値。これを「超える」キーポイントだけを残す
pub const CONFIDENCE_THRESHOLD: f32 = 0.3;

/// 信頼度が閾値を超えるキーポイントだけを残した骨格を返す
///
/// 比較は厳密 (`>`) で、閾値ちょうどの値は除外される。NaN も除外。
pub fn filter_keypoints(raw: &ObservedSkeleton, threshold: f32) -> ObservedSkeleton {
    raw.iter()
        .filter(|(_, kp)| kp.confidence > threshold)
        .map(|(joint, kp)| (joint, *kp))
        .collect()
}
