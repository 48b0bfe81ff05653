use std::time::Instant;

use anyhow::Context;
use whack_core::{ClipPlanes, FramePump, GameConfig, HmdRuntime, StereoLayout};
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod controls;
mod hmd;
mod render;

use controls::{ControlAction, ControlKey};
use hmd::DesktopHmd;
use render::GpuPresenter;

fn control_key(code: KeyCode) -> Option<ControlKey> {
    match code {
        KeyCode::Space => Some(ControlKey::Trigger),
        KeyCode::KeyX => Some(ControlKey::Grab),
        KeyCode::KeyR => Some(ControlKey::Recenter),
        KeyCode::ArrowLeft => Some(ControlKey::TurnLeft),
        KeyCode::ArrowRight => Some(ControlKey::TurnRight),
        KeyCode::ArrowUp => Some(ControlKey::LookUp),
        KeyCode::ArrowDown => Some(ControlKey::LookDown),
        KeyCode::Escape => Some(ControlKey::Quit),
        _ => None,
    }
}

fn run() -> anyhow::Result<()> {
    let hmd = DesktopHmd::new();
    let layout = StereoLayout::new(hmd.calibration(), ClipPlanes::default())
        .context("headset calibration rejected")?;
    let preview = layout.preview_size();

    let event_loop = EventLoop::new().context("could not create event loop")?;
    let window = WindowBuilder::new()
        .with_title("sphere-whack")
        .with_inner_size(PhysicalSize::new(preview.x, preview.y))
        .build(&event_loop)
        .context("could not create window")?;

    let presenter = pollster::block_on(GpuPresenter::new(&window, &layout))
        .context("could not initialise the GPU")?;
    log::info!(
        "eye target {}x{}, preview {}x{}",
        presenter.target_size().x,
        presenter.target_size().y,
        preview.x,
        preview.y
    );
    let mut pump = FramePump::new(hmd, presenter, layout, &GameConfig::default())
        .context("could not build the scene")?;
    log::info!("touch the trigger (space / left mouse) to start a round");

    let clock = Instant::now();
    let mut last_frame = clock;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => pump.presenter_mut().resize(size),
            WindowEvent::Focused(false) => pump.runtime_mut().controls_mut().release_all(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let Some(key) = control_key(code) else {
                    return;
                };
                let pressed = state == ElementState::Pressed;
                match pump.runtime_mut().controls_mut().key(key, pressed) {
                    ControlAction::Quit => elwt.exit(),
                    ControlAction::Recenter => pump.recenter(),
                    ControlAction::None => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = pump.presenter().window().inner_size();
                let uv = [
                    position.x as f32 / size.width.max(1) as f32,
                    position.y as f32 / size.height.max(1) as f32,
                ];
                pump.runtime_mut().controls_mut().pointer_moved(uv);
            }
            WindowEvent::CursorLeft { .. } => pump.runtime_mut().controls_mut().pointer_left(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => pump
                .runtime_mut()
                .controls_mut()
                .mouse_button(state == ElementState::Pressed),
            WindowEvent::MouseWheel { delta, .. } => {
                let controls = pump.runtime_mut().controls_mut();
                match delta {
                    MouseScrollDelta::LineDelta(_, y) => controls.scroll(y),
                    MouseScrollDelta::PixelDelta(p) => controls.scroll_pixels(p.y as f32),
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = now - last_frame;
            last_frame = now;
            pump.runtime_mut().advance(dt.as_secs_f32());
            pump.frame(now - clock);
            pump.presenter().window().request_redraw();
        }
        _ => {}
    })?;
    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
