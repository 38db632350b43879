use std::time::Instant;

use crate::renderer::RenderStats;
use crate::scene_graph::scene::Scene;

const EMA_ALPHA: f32 = 0.05;
const LOG_INTERVAL: u64 = 120;

/// Frame-path counter aggregator. `update` runs once per rendered frame and
/// must stay O(1) and panic-free; all it does is advance a counter, fold one
/// sample into a moving average and occasionally emit a log line.
pub struct PerformanceMonitor {
    started: Instant,
    last_frame: Instant,
    frames: u64,
    ema_frame_ms: f32,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            frames: 0,
            ema_frame_ms: 0.0,
        }
    }

    pub fn update(&mut self, stats: &RenderStats, scene: &Scene) {
        let now = Instant::now();
        let frame_ms = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;

        self.frames += 1;
        if self.frames == 1 {
            self.ema_frame_ms = frame_ms;
        } else {
            self.ema_frame_ms += (frame_ms - self.ema_frame_ms) * EMA_ALPHA;
        }

        if self.frames % LOG_INTERVAL == 0 {
            log::debug!(
                "frame {}: {:.3} ms avg, {}/{} lod nodes drawn, {} primitives, {} triangles",
                self.frames,
                self.ema_frame_ms,
                stats.nodes_drawn,
                scene.lod_count(),
                stats.primitives_drawn,
                stats.triangles_drawn
            );
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn average_frame_ms(&self) -> f32 {
        self.ema_frame_ms
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}
