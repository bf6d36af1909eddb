//! Main application: hosts the editor inside an eframe window.

use std::path::PathBuf;

use egui::{CentralPanel, CursorIcon, Frame, Sense};
use gridpaint_core::{ConfigError, Editor, EditorCommand, EditorConfig, Response, ShortcutRegistry};
use gridpaint_widgets::{EguiSurface, TextureCache};
use thiserror::Error;

use crate::file_ops;
use crate::input::{EditorInput, translate};

/// Environment variable naming a JSON editor config.
pub const CONFIG_ENV: &str = "GRIDPAINT_CONFIG";

/// Errors that stop the application from starting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("window: {0}")]
    Window(#[from] eframe::Error),
}

/// Window settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "GridPaint".to_string(),
            width: 1100.0,
            height: 760.0,
        }
    }
}

/// Editor config from the file named by [`CONFIG_ENV`], or the defaults.
pub fn load_editor_config() -> Result<EditorConfig, ConfigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => EditorConfig::load(&PathBuf::from(path)),
        None => {
            log::debug!("{} not set, using default config", CONFIG_ENV);
            Ok(EditorConfig::default())
        }
    }
}

/// The eframe application.
pub struct GridPaintApp {
    editor: Editor,
    textures: TextureCache,
}

impl GridPaintApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        ShortcutRegistry::log_all();
        Self {
            editor: Editor::new(config),
            textures: TextureCache::new(),
        }
    }

    /// Feed the frame's input to the editor, in arrival order.
    fn handle_input(&mut self, ctx: &egui::Context, origin: egui::Pos2) {
        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            let Some(input) = translate(event, origin) else {
                continue;
            };
            let response = match input {
                EditorInput::Pointer(event) => self.editor.handle_pointer(event),
                EditorInput::Key(key, modifiers) => self.editor.handle_key(key, modifiers),
                EditorInput::PointerGone => Response {
                    dirty: self.editor.pointer_left(),
                    command: None,
                },
            };
            self.run_command(response.command);
            if response.dirty.any() {
                ctx.request_repaint();
            }
        }
    }

    fn run_command(&mut self, command: Option<EditorCommand>) {
        match command {
            Some(EditorCommand::OpenImage) => {
                file_ops::open_image(&mut self.editor);
            }
            Some(EditorCommand::SaveImage) => file_ops::save_image(&self.editor),
            None => {}
        }
    }
}

impl eframe::App for GridPaintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        CentralPanel::default()
            .frame(Frame::NONE.fill(egui::Color32::from_gray(228)))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
                let origin = response.rect.min;

                // Hit-testing uses the bounds from the previous frame's render.
                self.handle_input(ctx, origin);

                let mut surface = EguiSurface::new(&painter, &mut self.textures, origin.to_vec2());
                self.editor.render(&mut surface);

                if self.editor.pointer_over_canvas() {
                    ctx.set_cursor_icon(CursorIcon::None);
                }
            });
    }
}
