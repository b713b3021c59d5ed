//! Glow Letters: type the glowing letters before they pile up.

mod config;
mod cues;
mod mode;
mod script;
mod stage;
mod world;

use anyhow::Result;
use audio::{AudioSystem, SilentOutput, SoundOutput};
use engine_core::{Time, UVec2};
use input::{KeyCode, KeyPress};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use config::GameConfig;
use mode::Mode;
use script::MessageScript;
use stage::GameMode;
use world::{GlyphTable, World, CAMERA_POSITION, GLYPH_VERTICES};

/// Application handler for winit.
struct App<'w> {
    mode: GameMode<'w>,
    window: Option<Window>,
    time: Time,
    window_size: (u32, u32),
    title: String,
}

impl<'w> App<'w> {
    fn new(mode: GameMode<'w>, config: &GameConfig) -> Self {
        Self {
            mode,
            window: None,
            time: Time::new(),
            window_size: (config.window_width, config.window_height),
            title: String::new(),
        }
    }

    /// Progress and score in the title bar, since the stage draws no HUD.
    fn refresh_title(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let score = self.mode.score();
        let progress = match self.mode.current_index() {
            _ if self.mode.is_finished() => "done".to_string(),
            None => "ready".to_string(),
            Some(i) => format!("message {}, word {}", i + 1, self.mode.current_word() + 1),
        };
        let title = format!("Glow Letters - {} - {} right, {} wrong", progress, score.right, score.wrong);
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }

    fn frame(&mut self) {
        self.time.update();
        self.mode.update(self.time.delta_seconds());
        if let Some(window) = &self.window {
            let size = window.inner_size();
            self.mode.draw(UVec2::new(size.width, size.height));
        }
        self.refresh_title();
    }
}

impl ApplicationHandler for App<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let (width, height) = self.window_size;
        let window_attrs = Window::default_attributes()
            .with_title("Glow Letters")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
                self.time = Time::new();
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape) && event.state.is_pressed() {
                    event_loop.exit();
                    return;
                }
                if let Some(press) = KeyPress::from_key_event(&event) {
                    if self.mode.handle_event(&press) {
                        log::debug!(
                            "On stage {:?}, queued {:?}",
                            self.mode.displayed().iter().map(|d| d.letter).collect::<String>(),
                            self.mode.queued().collect::<String>()
                        );
                    }
                }
            }
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn open_audio(config: &GameConfig) -> Box<dyn SoundOutput> {
    match AudioSystem::new() {
        Ok(mut audio) => {
            let loaded = cues::load_cues(&mut audio, &config.data_dir);
            log::info!("Audio ready, {} samples loaded", loaded);
            audio.update_listener(CAMERA_POSITION);
            Box::new(audio)
        }
        Err(e) => {
            log::warn!("No audio device ({}), playing silently", e);
            Box::new(SilentOutput::new())
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Glow Letters: type the letters you see. Escape quits.");

    let config = GameConfig::load();
    let script = MessageScript::load(&config.script_path());
    log::debug!("Script: {:?}", script.messages());
    let audio = open_audio(&config);

    let mut world = World::new(
        World::stage_scene(CAMERA_POSITION),
        audio,
        GlyphTable::contiguous(GLYPH_VERTICES),
    )?;
    let mode = GameMode::new(&mut world, script, config.stage.clone(), config.rng());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(mode, &config);
    event_loop.run_app(&mut app)?;

    let score = app.mode.score();
    log::info!("Final score: {} right, {} wrong", score.right, score.wrong);

    Ok(())
}
