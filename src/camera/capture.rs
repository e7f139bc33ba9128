use anyhow::{Context, Result};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, VideoCaptureAPIs},
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::config::CameraConfig;
use crate::pipeline::{
    observed_or_empty, FailureCounter, FrameMessage, FrameSlot, CAPTURE_RETRY_DELAY,
    MAX_CONSECUTIVE_CAPTURE_FAILURES,
};
use crate::pose::{preprocess_for_movenet, PoseDetector};

/// OpenCVを使用したカメラキャプチャ
pub struct OpenCvCamera {
    capture: VideoCapture,
}

impl OpenCvCamera {
    /// 解像度とFPSを指定してカメラを開く
    pub fn open(config: &CameraConfig) -> Result<Self> {
        let mut capture = VideoCapture::new(config.index, VideoCaptureAPIs::CAP_ANY as i32)
            .context("Failed to open camera")?;

        if !capture.is_opened()? {
            anyhow::bail!("Camera {} is not available", config.index);
        }

        capture.set(videoio::CAP_PROP_FRAME_WIDTH, config.width as f64)?;
        capture.set(videoio::CAP_PROP_FRAME_HEIGHT, config.height as f64)?;
        capture.set(videoio::CAP_PROP_FPS, config.fps as f64)?;
        capture.set(videoio::CAP_PROP_BUFFERSIZE, 1.0)?;

        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        log::info!("Camera {} opened: {}x{} @ {} fps", config.index, width, height, fps);

        Ok(Self { capture })
    }

    /// フレームを読み込む（BGR形式）
    pub fn read_frame(&mut self) -> Result<Mat> {
        let mut frame = Mat::default();
        self.capture
            .read(&mut frame)
            .context("Failed to read frame")?;

        if frame.empty() {
            anyhow::bail!("Empty frame received");
        }

        Ok(frame)
    }
}

/// 別スレッドでキャプチャと姿勢検出を行い、最新フレームを slot に置く
pub struct CaptureSession {
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl CaptureSession {
    pub fn start(
        mut camera: OpenCvCamera,
        mut detector: PoseDetector,
        slot: FrameSlot<FrameMessage<Mat>>,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_ref = running.clone();

        let handle = thread::spawn(move || {
            let mut sequence = 0u64;
            let mut failures = FailureCounter::new(MAX_CONSECUTIVE_CAPTURE_FAILURES);
            while running_ref.load(Ordering::Acquire) {
                let frame = match camera.read_frame() {
                    Ok(frame) => {
                        failures.record_success();
                        frame
                    }
                    Err(e) => {
                        if failures.record_failure() {
                            log::error!(
                                "Giving up capture after {} consecutive failures: {:#}",
                                failures.consecutive(),
                                e
                            );
                            running_ref.store(false, Ordering::Release);
                            break;
                        }
                        if failures.consecutive() == 1 {
                            log::warn!("Frame capture error: {:#}", e);
                        }
                        thread::sleep(CAPTURE_RETRY_DELAY);
                        continue;
                    }
                };

                let observed = observed_or_empty(
                    preprocess_for_movenet(&frame).and_then(|input| detector.detect(input)),
                );

                sequence += 1;
                slot.publish(FrameMessage {
                    sequence,
                    image: frame,
                    observed,
                });
            }
            log::info!("Capture stopped after {} frames", sequence);
        });

        log::info!("Capture session started");
        Self {
            running,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// キャプチャを止めてスレッドの終了を待つ
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Capture thread panicked");
            }
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
