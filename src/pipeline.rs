//! キャプチャスレッドと UI スレッド間のフレーム受け渡し

use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::pose::{filter_keypoints, ObservedSkeleton, CONFIDENCE_THRESHOLD};
use crate::render::{
    map_skeleton, render, AspectFillViewport, RenderPrimitive, StyleConfig, ViewportTransform,
    SKELETON_CONNECTIONS,
};

/// キャプチャ失敗後の待ち時間
pub const CAPTURE_RETRY_DELAY: Duration = Duration::from_millis(100);

/// 連続でこの回数失敗したらキャプチャを諦める
pub const MAX_CONSECUTIVE_CAPTURE_FAILURES: u32 = 30;

/// 1要素だけ保持するチャネル (latest-wins)
///
/// 未消費の値があるうちに publish すると古い値は捨てられる。
pub struct FrameSlot<T> {
    latest: Arc<Mutex<Option<T>>>,
    sequence: Arc<AtomicU64>,
}

impl<T> Clone for FrameSlot<T> {
    fn clone(&self) -> Self {
        Self {
            latest: self.latest.clone(),
            sequence: self.sequence.clone(),
        }
    }
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self {
            latest: Arc::new(Mutex::new(None)),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<T> FrameSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を置く。未消費の古い値を捨てた場合は true
    pub fn publish(&self, value: T) -> bool {
        let stale = self
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(value)
            .is_some();
        let seq = self.sequence.fetch_add(1, Ordering::Release) + 1;
        if stale {
            log::debug!("frame {} replaced a stale pending frame", seq);
        }
        stale
    }

    /// 最新の値を取り出す。空なら None
    pub fn take(&self) -> Option<T> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// これまでに publish された回数
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Acquire)
    }
}

/// キャプチャスレッド → UI スレッドへ渡す1フレーム分
#[derive(Debug, Clone)]
pub struct FrameMessage<I> {
    pub sequence: u64,
    pub image: I,
    /// 検出器空間の生キーポイント (フィルタは UI 側の process_frame で行う)
    pub observed: ObservedSkeleton,
}

/// 検出失敗は空の骨格として扱う
pub fn observed_or_empty(result: Result<ObservedSkeleton>) -> ObservedSkeleton {
    match result {
        Ok(observed) => observed,
        Err(e) => {
            log::warn!("Pose detection failed: {:#}", e);
            ObservedSkeleton::new()
        }
    }
}

/// 生キーポイント → フィルタ → 画面座標 → 描画指示
pub fn process_frame<V: ViewportTransform + ?Sized>(
    raw: &ObservedSkeleton,
    viewport: &V,
    style: StyleConfig,
) -> Vec<RenderPrimitive> {
    let observed = filter_keypoints(raw, CONFIDENCE_THRESHOLD);
    let mapped = map_skeleton(&observed, viewport);
    render(&mapped, &SKELETON_CONNECTIONS, style).collect()
}

/// 実フレームのサイズから表示変換を作り、描画指示を生成する
///
/// 返した変換で映像も描けば、骨格と映像の配置が必ず一致する。
pub fn process_frame_in_view(
    raw: &ObservedSkeleton,
    image_size: (u32, u32),
    view_size: (u32, u32),
    style: StyleConfig,
) -> (AspectFillViewport, Vec<RenderPrimitive>) {
    let viewport = AspectFillViewport::new(image_size.0, image_size.1, view_size.0, view_size.1);
    let primitives = process_frame(raw, &viewport, style);
    (viewport, primitives)
}

/// 連続したキャプチャ失敗の回数
#[derive(Debug)]
pub struct FailureCounter {
    consecutive: u32,
    limit: u32,
}

impl FailureCounter {
    pub fn new(limit: u32) -> Self {
        Self {
            consecutive: 0,
            limit,
        }
    }

    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }

    /// 失敗を記録する。上限に達したら true
    pub fn record_failure(&mut self) -> bool {
        self.consecutive = self.consecutive.saturating_add(1);
        self.consecutive >= self.limit
    }

    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }
}

/// 現在表示中の描画指示
///
/// 毎フレーム全消去してから全描画する。部分更新はしない。
#[derive(Debug, Default)]
pub struct Overlay {
    primitives: Vec<RenderPrimitive>,
    frames: u64,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redraw<I: IntoIterator<Item = RenderPrimitive>>(&mut self, primitives: I) {
        self.primitives.clear();
        self.primitives.extend(primitives);
        self.frames += 1;
    }

    pub fn primitives(&self) -> &[RenderPrimitive] {
        &self.primitives
    }

    /// 再描画した回数
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
