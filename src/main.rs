use std::process::ExitCode;

use rasterkit::engine::{Engine, RenderMode};
use rasterkit::math::Vec3;
use rasterkit::projection::ProjectionMode;
use rasterkit::window::{FpsCounter, FrameLimiter, InputState, Key, Window, WINDOW_HEIGHT, WINDOW_WIDTH};

/// Radians per pixel of mouse drag, and scale-per-wheel-tick for mesh zoom.
const ORBIT_SENSITIVITY: f32 = 0.005;
const TRANSLATE_SPEED: f32 = 0.05;
const WHEEL_SCALE_STEP: f32 = 0.1;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mesh_path = args.next();
    let texture_path = args.next();

    let mut window = match Window::new("rasterkit", WINDOW_WIDTH, WINDOW_HEIGHT) {
        Ok(w) => w,
        Err(e) => {
            log::error!("failed to create window: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = Engine::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    if let Some(path) = &mesh_path {
        if let Err(e) = engine.load_mesh(path) {
            log::error!("failed to load mesh {path}: {e}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = &texture_path {
        if let Err(e) = engine.load_texture(path) {
            log::error!("failed to load texture {path}: {e}");
            return ExitCode::FAILURE;
        }
    }

    let mut limiter = FrameLimiter::new(&window);
    let mut fps_counter = FpsCounter::new();
    let mut paused = false;

    loop {
        let input = window.poll_input();

        if input.quit {
            return ExitCode::SUCCESS;
        }

        if let Some((w, h)) = input.resized {
            engine.resize(w, h);
            if let Err(e) = window.resize(w, h) {
                log::error!("failed to resize window: {e}");
                return ExitCode::FAILURE;
            }
        }

        handle_key_presses(&input, &mut engine, &mut paused);

        if !paused {
            apply_movement(&input, &mut engine);
            apply_orbit(&input, &mut engine);
            apply_zoom(&input, &mut engine);
        }

        engine.update();
        engine.render();

        if let Err(e) = window.present(engine.frame_buffer()) {
            log::error!("failed to present frame: {e}");
            return ExitCode::FAILURE;
        }

        if let Some(fps) = fps_counter.tick() {
            window.set_title(&format!("rasterkit - {fps:.0} fps"));
        }

        limiter.wait_and_get_delta(&window);
    }
}

fn handle_key_presses(input: &InputState, engine: &mut Engine, paused: &mut bool) {
    for key in &input.key_presses {
        match key {
            Key::Num1 => engine.set_render_mode(RenderMode::WireVertex),
            Key::Num2 => engine.set_render_mode(RenderMode::Wire),
            Key::Num3 => engine.set_render_mode(RenderMode::Solid),
            Key::Num4 => engine.set_render_mode(RenderMode::SolidWire),
            Key::Num5 => engine.set_render_mode(RenderMode::Textured),
            Key::Num6 => engine.set_render_mode(RenderMode::TexturedWire),
            Key::B => engine.backface_culling = !engine.backface_culling,
            Key::O => engine.set_projection_mode(ProjectionMode::Orthographic),
            Key::P => engine.set_projection_mode(ProjectionMode::Perspective),
            Key::Space => *paused = !*paused,
        }
    }
}

fn apply_movement(input: &InputState, engine: &mut Engine) {
    let m = input.movement;
    if !(m.w || m.a || m.s || m.d) {
        return;
    }

    let mesh_translation = engine.mesh().translation();
    let mut delta = Vec3::ZERO;
    if m.w {
        delta.y += TRANSLATE_SPEED;
    }
    if m.s {
        delta.y -= TRANSLATE_SPEED;
    }
    if m.d {
        delta.x += TRANSLATE_SPEED;
    }
    if m.a {
        delta.x -= TRANSLATE_SPEED;
    }

    let new_translation = mesh_translation + delta;
    *engine.mesh_mut().translation_mut() = new_translation;
    engine.camera_mut().set_target(new_translation);
}

fn apply_orbit(input: &InputState, engine: &mut Engine) {
    if !input.mouse_held {
        return;
    }
    let (dx, dy) = input.mouse_delta;
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    engine
        .camera_mut()
        .orbit(dx * ORBIT_SENSITIVITY, dy * ORBIT_SENSITIVITY);
}

fn apply_zoom(input: &InputState, engine: &mut Engine) {
    if input.wheel_delta == 0.0 {
        return;
    }
    let factor = (1.0 + input.wheel_delta * WHEEL_SCALE_STEP).max(0.01);
    let scale = engine.mesh().scale() * factor;
    const MIN_SCALE: f32 = 0.01;
    *engine.mesh_mut().scale_mut() = Vec3::new(
        scale.x.max(MIN_SCALE),
        scale.y.max(MIN_SCALE),
        scale.z.max(MIN_SCALE),
    );
}
