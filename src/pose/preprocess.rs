use anyhow::Result;
use ndarray::Array4;
use opencv::{
    core::{AlgorithmHint, Mat, Size, Vec3f, CV_32FC3},
    imgproc,
    prelude::*,
};

/// MoveNet用の入力サイズ
pub const MOVENET_INPUT_SIZE: i32 = 192;

/// カメラフレーム (BGR) を MoveNet 用の入力テンソルに変換
///
/// BGR -> RGB、192x192 へ引き伸ばし、[1, 192, 192, 3] の f32 (0.0-255.0)。
/// 引き伸ばしなので出力キーポイントはそのまま元フレームの正規化座標になる。
pub fn preprocess_for_movenet(frame: &Mat) -> Result<Array4<f32>> {
    let mut rgb = Mat::default();
    imgproc::cvt_color(frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0, AlgorithmHint::ALGO_HINT_DEFAULT)?;

    let mut resized = Mat::default();
    imgproc::resize(
        &rgb,
        &mut resized,
        Size::new(MOVENET_INPUT_SIZE, MOVENET_INPUT_SIZE),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;

    let mut float_mat = Mat::default();
    resized.convert_to(&mut float_mat, CV_32FC3, 1.0, 0.0)?;

    // resize の出力は連続領域なので行優先でそのまま並べ替える
    let pixels = float_mat.data_typed::<Vec3f>()?;
    let size = MOVENET_INPUT_SIZE as usize;
    let values: Vec<f32> = pixels.iter().flat_map(|p| [p[0], p[1], p[2]]).collect();
    let tensor = Array4::from_shape_vec((1, size, size, 3), values)?;

    Ok(tensor)
}
