use anyhow::{Context, Result};
use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;

use super::joint::ObservedSkeleton;
use super::movenet::{skeleton_from_movenet, MOVENET_KEYPOINT_COUNT};

/// MoveNet を使用した姿勢検出器
pub struct PoseDetector {
    session: Session,
}

impl PoseDetector {
    /// ONNXモデルを読み込んで初期化
    pub fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load ONNX model: {}", model_path.display()))?;

        log::info!("Pose model loaded from {}", model_path.display());
        Ok(Self { session })
    }

    /// 前処理済みテンソルから生の骨格 (検出器空間、未フィルタ) を検出
    ///
    /// 入力: [1, 192, 192, 3] の f32 テンソル
    pub fn detect(&mut self, input: Array4<f32>) -> Result<ObservedSkeleton> {
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs!["serving_default_input_0" => input_tensor])
            .context("Inference failed")?;

        // 出力は [1, 1, 17, 3] (y, x, confidence)
        let output: ndarray::ArrayViewD<f32> = outputs["StatefulPartitionedCall_0"]
            .try_extract_array()
            .context("Failed to extract output tensor")?;

        if output.shape() != [1, 1, MOVENET_KEYPOINT_COUNT, 3] {
            anyhow::bail!("Unexpected output shape: {:?}", output.shape());
        }

        let mut raw = [[0.0f32; 3]; MOVENET_KEYPOINT_COUNT];
        for (i, entry) in raw.iter_mut().enumerate() {
            for (c, value) in entry.iter_mut().enumerate() {
                *value = output[[0, 0, i, c]];
            }
        }

        Ok(skeleton_from_movenet(&raw))
    }
}
