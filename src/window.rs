//! SDL2 window management and event handling.
//!
//! Provides the [`Window`] struct for creating and managing the display
//! window, and [`InputState`], a single per-frame snapshot of everything the
//! orchestrator needs: discrete key presses (mode switches, toggles), held
//! movement keys, mouse drag delta, and wheel delta.

use std::time::Instant;

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

/// A discrete, edge-triggered key press: render-mode and toggle keys, not
/// the held movement keys (tracked separately in [`InputState::movement`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    B,
    O,
    P,
    Space,
}

/// Held WASD state, sampled once per frame for continuous mesh translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Movement {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
}

/// One frame's worth of input, accumulated from the SDL2 event pump so the
/// orchestrator reads a single coherent snapshot instead of handling events
/// itself.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub quit: bool,
    pub resized: Option<(u32, u32)>,
    pub key_presses: Vec<Key>,
    pub movement: Movement,
    /// Relative mouse motion this frame, in pixels.
    pub mouse_delta: (f32, f32),
    /// Whether the left mouse button is currently held (drag-to-orbit).
    pub mouse_held: bool,
    /// Accumulated mouse wheel motion this frame.
    pub wheel_delta: f32,
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    /// Delta time represents the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

/// Tracks frames per second with once-per-second updates.
pub struct FpsCounter {
    frame_count: u32,
    last_update: Instant,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            last_update: Instant::now(),
        }
    }

    /// Call each frame. Returns `Some(fps)` once per second, `None` otherwise.
    pub fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();
        if elapsed.as_secs() >= 1 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    texture: sdl2::render::Texture<'static>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // We ensure texture is dropped before texture_creator by struct field order.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture_creator,
            texture,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains the SDL2 event queue and samples held-key state, returning one
    /// coherent [`InputState`] for the frame.
    pub fn poll_input(&mut self) -> InputState {
        let mut input = InputState::default();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => input.quit = true,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => input.resized = Some((w as u32, h as u32)),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => match keycode {
                    Keycode::Escape => input.quit = true,
                    Keycode::Num1 => input.key_presses.push(Key::Num1),
                    Keycode::Num2 => input.key_presses.push(Key::Num2),
                    Keycode::Num3 => input.key_presses.push(Key::Num3),
                    Keycode::Num4 => input.key_presses.push(Key::Num4),
                    Keycode::Num5 => input.key_presses.push(Key::Num5),
                    Keycode::Num6 => input.key_presses.push(Key::Num6),
                    Keycode::B => input.key_presses.push(Key::B),
                    Keycode::O => input.key_presses.push(Key::O),
                    Keycode::P => input.key_presses.push(Key::P),
                    Keycode::Space => input.key_presses.push(Key::Space),
                    _ => {}
                },
                Event::MouseMotion { xrel, yrel, .. } => {
                    input.mouse_delta.0 += xrel as f32;
                    input.mouse_delta.1 += yrel as f32;
                }
                Event::MouseWheel { y, .. } => {
                    input.wheel_delta += y as f32;
                }
                _ => {}
            }
        }

        let keyboard = self.event_pump.keyboard_state();
        input.movement = Movement {
            w: keyboard.is_scancode_pressed(Scancode::W),
            a: keyboard.is_scancode_pressed(Scancode::A),
            s: keyboard.is_scancode_pressed(Scancode::S),
            d: keyboard.is_scancode_pressed(Scancode::D),
        };
        input.mouse_held = self
            .event_pump
            .mouse_state()
            .is_mouse_button_pressed(MouseButton::Left);

        input
    }

    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(
            &self.texture,
            None,
            Some(Rect::new(0, 0, self.width, self.height)),
        )?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }

    pub fn set_title(&mut self, title: &str) {
        let _ = self.canvas.window_mut().set_title(title);
    }
}
