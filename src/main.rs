use std::path::PathBuf;

use anyhow::Result;

mod camera;
mod demo;
mod loader;
mod lod;
mod model;
mod perf;
mod renderer;
mod scene_graph;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let mut args = std::env::args().skip(1);
    let model_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/piperacks_lod.glb"));
    let frames = args
        .next()
        .map(|arg| arg.parse::<u64>())
        .transpose()?
        .unwrap_or(600);

    demo::run(&model_path, frames)
}
