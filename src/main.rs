#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![allow(unsafe_code)]
#![allow(clippy::undocumented_unsafe_blocks)]

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

mod gfx;
mod tutorial;

use gfx::{FrameClock, Model};
use tutorial::input::{self, InputEvent};
use tutorial::{Scene, SceneConfig, SetupError, Variant};

const WIDTH: f32 = 379f32;
const HEIGHT: f32 = 480f32;
const TITLE: &str = "OGL tst";

const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Renders one of the OpenGL tutorial steps.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Which tutorial step to run.
    #[arg(long, value_enum, default_value_t = Variant::Textured)]
    variant: Variant,

    /// Vertex stage source file; replaces the variant's own shaders.
    #[arg(long, requires = "fragment_shader")]
    vertex_shader: Option<PathBuf>,

    /// Fragment stage source file; replaces the variant's own shaders.
    #[arg(long, requires = "vertex_shader")]
    fragment_shader: Option<PathBuf>,

    /// Image to put on the textured quad.
    #[arg(long)]
    texture: Option<PathBuf>,
}

impl Args {
    fn scene_config(self) -> SceneConfig {
        let mut config = SceneConfig::new(self.variant);
        if let (Some(vtx), Some(frag)) = (self.vertex_shader, self.fragment_shader) {
            config = config.with_shader_files(vtx, frag);
        }
        if let Some(texture) = self.texture {
            config = config.with_texture(texture);
        }
        config
    }
}

fn main() -> ExitCode {
    // Log to stderr; `RUST_LOG=debug` for more
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().scene_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WIDTH, HEIGHT])
            .with_title(TITLE),

        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    let result = eframe::run_native(
        TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(TutorialApp::new(cc, &config)?))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

struct TutorialApp {
    /// Behind an `Arc<Mutex<…>>` so we can pass it to [`egui::PaintCallback`] and paint later.
    scene: Arc<Mutex<Scene>>,
    clock: FrameClock,
}

impl TutorialApp {
    fn new(cc: &eframe::CreationContext<'_>, config: &SceneConfig) -> Result<Self, SetupError> {
        let gl = cc.gl.as_ref().ok_or(SetupError::NoGlContext)?;
        let scene = Scene::new(gl, config, WIDTH / HEIGHT)?;

        Ok(Self {
            scene: Arc::new(Mutex::new(scene)),
            clock: FrameClock::new(),
        })
    }
}

impl eframe::App for TutorialApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = self.clock.tick();

        // Input first, so this frame is drawn with the camera it produced
        let events: Vec<InputEvent> =
            ctx.input(|i| i.events.iter().filter_map(input::translate).collect());
        let close_requested = input::apply_input(self.scene.lock().camera.as_mut(), &events, dt);
        if close_requested {
            log::info!("escape pressed, closing after {} frames", self.clock.frame_index());
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.custom_painting(ui);
            });
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.scene.lock().destroy_gl(gl);
        }
    }
}

impl TutorialApp {
    fn custom_painting(&mut self, ui: &mut egui::Ui) {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());

        // Clone to Give to callback
        let scene = self.scene.clone();

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
                let gl = painter.gl();
                unsafe {
                    use glow::HasContext as _;
                    let [r, g, b, a] = CLEAR_COLOR;
                    gl.clear_color(r, g, b, a);
                    gl.clear(glow::COLOR_BUFFER_BIT);
                }

                scene.lock().draw(gl);
            })),
        };
        ui.painter().add(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutorial::variant::ShaderSource;

    #[test]
    fn defaults_to_textured_variant() {
        let config = Args::try_parse_from(["ogl-tst"]).unwrap().scene_config();
        assert_eq!(config, SceneConfig::new(Variant::Textured));
    }

    #[test]
    fn shader_files_override_inline_sources() {
        let config = Args::try_parse_from([
            "ogl-tst",
            "--variant",
            "triangles",
            "--vertex-shader",
            "a.vs",
            "--fragment-shader",
            "a.fs",
        ])
        .unwrap()
        .scene_config();

        assert_eq!(config.variant, Variant::Triangles);
        assert_eq!(
            config.shaders,
            ShaderSource::Files {
                vtx: "a.vs".into(),
                frag: "a.fs".into()
            }
        );
    }

    #[test]
    fn shader_paths_come_in_pairs() {
        assert!(Args::try_parse_from(["ogl-tst", "--vertex-shader", "a.vs"]).is_err());
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(Args::try_parse_from(["ogl-tst", "--variant", "lighting"]).is_err());
    }

    #[test]
    fn texture_flag_reaches_textured_scene() {
        let config = Args::try_parse_from(["ogl-tst", "--texture", "cat.jpg"])
            .unwrap()
            .scene_config();
        assert_eq!(config.texture, Some(PathBuf::from("cat.jpg")));
    }
}
