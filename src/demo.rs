use std::path::Path;
use std::sync::mpsc::{Receiver, TryRecvError};

use glam::Vec3;

use crate::camera::{Camera, OrbitController};
use crate::loader::{self, LoadedModel};
use crate::lod::builder::assemble;
use crate::perf::PerformanceMonitor;
use crate::renderer::{RenderStats, Renderer};
use crate::scene_graph::scene::Scene;

/// Per-tick simulation context. The frame loop owns time; everything the
/// frame call needs is passed in explicitly.
pub struct FrameContext {
    pub frame: u64,
    pub dt: f32,
    pub elapsed: f32,
}

pub struct DemoState {
    pub camera: Camera,
    pub orbit: OrbitController,
    pub scene: Scene,
    renderer: Renderer,
    perf: PerformanceMonitor,
    pending_load: Option<Receiver<anyhow::Result<LoadedModel>>>,
}

impl DemoState {
    pub fn new(model_path: &Path) -> Self {
        Self::with_load(loader::spawn_load(model_path.to_path_buf()))
    }

    fn with_load(pending_load: Receiver<anyhow::Result<LoadedModel>>) -> Self {
        let camera = Camera {
            eye: Vec3::new(40.0, 10.0, 25.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        };

        Self {
            camera,
            orbit: OrbitController::new(),
            scene: Scene::new(),
            renderer: Renderer::new(),
            perf: PerformanceMonitor::new(),
            pending_load: Some(pending_load),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Consumes the load result if it has arrived. Assembly and attachment
    /// run to completion here, on the loop thread, before this frame reads
    /// the scene.
    fn poll_load(&mut self) -> anyhow::Result<()> {
        let Some(pending) = &self.pending_load else {
            return Ok(());
        };

        match pending.try_recv() {
            Ok(result) => {
                self.pending_load = None;
                let model = result?;

                let assembly = assemble(model);
                for issue in &assembly.report.issues {
                    log::warn!("{issue}");
                }
                log::info!(
                    "assembled {} lod nodes, {} of {} primitives placed",
                    assembly.report.nodes_built,
                    assembly.report.primitives_placed,
                    assembly.report.primitives_in
                );

                self.scene.attach(assembly);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending_load = None;
                anyhow::bail!("asset loader exited without delivering a result");
            }
        }

        Ok(())
    }

    pub fn frame(&mut self, ctx: &FrameContext) -> anyhow::Result<RenderStats> {
        self.poll_load()?;

        self.orbit.update(&mut self.camera, ctx.dt, ctx.elapsed);
        let stats = self.renderer.draw(&self.scene, &self.camera);
        log::trace!("frame {} drew {} lod nodes", ctx.frame, stats.nodes_drawn);
        self.perf.update(&stats, &self.scene);

        Ok(stats)
    }

    pub fn perf(&self) -> &PerformanceMonitor {
        &self.perf
    }
}

pub fn run(model_path: &Path, frames: u64) -> anyhow::Result<()> {
    let mut state = DemoState::new(model_path);

    const DT: f32 = 1.0 / 60.0;

    let mut frame = 0;
    while frame < frames || state.is_loading() {
        let ctx = FrameContext {
            frame,
            dt: DT,
            elapsed: frame as f32 * DT,
        };
        state.frame(&ctx)?;
        frame += 1;
    }

    log::info!(
        "rendered {} frames over {:.2} s, {} lod nodes in scene, {:.3} ms avg frame",
        state.perf().frames(),
        state.perf().elapsed_secs(),
        state.scene.lod_count(),
        state.perf().average_frame_ms()
    );

    Ok(())
}
