use anyhow::Result;
use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;
use winit::{
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod app;
mod core;
mod engine;
mod game;

use app::App;
use engine::renderer::GpuInitError;
use game::AppConfig;

/// Exit status when the GPU cannot be brought up
const GPU_INIT_FAILURE: i32 = -1;

fn main() -> ExitCode {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting bouncing circle...");

    match run(AppConfig::default()) {
        Ok(()) => {
            info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) if e.downcast_ref::<GpuInitError>().is_some() => {
            error!("{:#}", e);
            std::process::exit(GPU_INIT_FAILURE);
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: AppConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .with_resizable(config.window.resizable)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut app = pollster::block_on(App::new(window, &config))?;

    event_loop
        .run(move |event, elwt| app.handle_event(event, elwt))
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
