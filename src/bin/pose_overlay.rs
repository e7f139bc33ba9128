use anyhow::Result;
use opencv::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

use body_pose_overlay::camera::{CaptureSession, OpenCvCamera};
use body_pose_overlay::config::Config;
use body_pose_overlay::pipeline::{process_frame_in_view, FrameSlot, Overlay};
use body_pose_overlay::pose::PoseDetector;
use body_pose_overlay::render::{MinifbRenderer, SharedStyle};

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load_or_default(CONFIG_PATH);
    let style = SharedStyle::new(config.style());
    log::info!("Press ESC to exit");

    let camera = OpenCvCamera::open(&config.camera)?;
    let detector = PoseDetector::new(&config.model.path)?;

    let mut renderer = MinifbRenderer::new(&config.window.title, config.window.width, config.window.height)?;

    let slot = FrameSlot::new();
    let session = CaptureSession::start(camera, detector, slot.clone());

    let mut overlay = Overlay::new();
    let mut frame_count = 0u32;
    let mut fps_timer = Instant::now();

    while renderer.is_open() && session.is_running() {
        if let Some(msg) = slot.take() {
            // 実フレームのサイズで変換を作り、映像と骨格の両方に使う
            let image_size = (msg.image.cols().max(0) as u32, msg.image.rows().max(0) as u32);
            let (viewport, primitives) =
                process_frame_in_view(&msg.observed, image_size, renderer.view_size(), style.snapshot());
            overlay.redraw(primitives);

            // 全消去 → 映像 → 骨格
            renderer.clear();
            renderer.draw_frame(&msg.image, &viewport)?;
            renderer.draw_primitives(overlay.primitives());
            frame_count += 1;
        } else {
            thread::sleep(Duration::from_millis(2));
        }
        renderer.update()?;

        let elapsed = fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            log::info!(
                "FPS: {:.1}, captured: {}, primitives: {}",
                frame_count as f32 / elapsed,
                slot.sequence(),
                overlay.primitives().len()
            );
            frame_count = 0;
            fps_timer = Instant::now();
        }
    }

    if !session.is_running() {
        log::error!("Capture stopped; exiting");
    }
    log::info!("Shutting down...");
    session.stop();
    Ok(())
}
