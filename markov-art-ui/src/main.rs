use std::collections::BTreeSet;
use std::time::Duration;

use eframe::{egui, Frame};
use egui::Context;

use log::warn;
use reqwest::blocking::Client;
use reqwest::Result;

use markov_art_core::render::scene::Scene;

mod painter;

use painter::{PainterCanvas, background_color};

const SERVER: &str = "http://127.0.0.1:5000";

/// Start mode on the UI side, turned into the server's `seed` parameter.
#[derive(Debug, PartialEq)]
enum StartMode {
    Random,
    Custom,
}

/// REST context holding a reusable blocking HTTP client.
struct RESTContext {
    client: Client,
}

impl RESTContext {
    /// Creates a new REST context with a timeout.
    fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::new(10, 0))
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET request to `/v1/render` and decodes the scene.
    fn get_render(&self, params: &[(String, String)]) -> Result<Scene> {
        self.client
            .get(format!("{SERVER}/v1/render"))
            .query(params)
            .send()?
            .error_for_status()?
            .json()
    }

    /// Sends a GET request to `/v1/models`.
    fn get_models(&self) -> Result<String> {
        self.client
            .get(format!("{SERVER}/v1/models"))
            .send()?
            .error_for_status()?
            .text()
    }

    /// Sends a GET request to `/v1/loaded_models`.
    fn get_loaded_models(&self) -> Result<String> {
        self.client
            .get(format!("{SERVER}/v1/loaded_models"))
            .send()?
            .error_for_status()?
            .text()
    }

    /// Sends a PUT request to `/v1/load_models` with the model names.
    fn put_load_models(&self, names: &str) -> Result<String> {
        self.client
            .put(format!("{SERVER}/v1/load_models"))
            .query(&[("names", names)])
            .send()?
            .error_for_status()?
            .text()
    }
}

/// Global UI state (persists between frames in egui).
struct ArtUI {
    rest: RESTContext,
    scene: Option<Scene>,
    status: Option<String>,
    show_text: bool,

    selected_models: BTreeSet<String>,
    available_models: Vec<String>,

    length: i64,
    start_mode: StartMode,
    custom_start: String,
    fixed_seed: bool,
    rng_seed: u64,

    font_size: f32,
    step: f32,
    line_step: f32,
}

impl ArtUI {
    fn new() -> Result<Self> {
        let mut ui = Self {
            rest: RESTContext::new()?,
            scene: None,
            status: None,
            show_text: false,

            selected_models: BTreeSet::new(),
            available_models: Vec::new(),

            length: 2000,
            start_mode: StartMode::Custom,
            custom_start: "t".to_owned(),
            fixed_seed: false,
            rng_seed: 0,

            font_size: 22.0,
            step: 10.0,
            line_step: 10.0,
        };
        ui.get_models();
        ui.get_loaded_models();
        Ok(ui)
    }

    /// Builds the query parameters for `/v1/render`.
    fn build_query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("length".to_owned(), self.length.to_string()),
            ("font_size".to_owned(), self.font_size.to_string()),
            ("step".to_owned(), self.step.to_string()),
            ("line_step".to_owned(), self.line_step.to_string()),
        ];

        match self.start_mode {
            StartMode::Custom if !self.custom_start.is_empty() => {
                params.push(("seed".to_owned(), format!("custom:{}", self.custom_start)));
            }
            _ => params.push(("seed".to_owned(), "random".to_owned())),
        }
        if self.fixed_seed {
            params.push(("rng_seed".to_owned(), self.rng_seed.to_string()));
        }
        params
    }

    fn get_render(&mut self) {
        match self.rest.get_render(&self.build_query()) {
            Ok(scene) => {
                self.status = Some(format!("Seed: {}", scene.seed));
                self.scene = Some(scene);
            }
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }

    fn get_models(&mut self) {
        match self.rest.get_models() {
            Ok(names) => self.available_models = split_lines(&names),
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }

    fn get_loaded_models(&mut self) {
        match self.rest.get_loaded_models() {
            Ok(names) => self.selected_models = split_lines(&names).into_iter().collect(),
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }

    fn put_load_models(&mut self) {
        let names = self.selected_models.iter().cloned().collect::<Vec<_>>().join(",");
        match self.rest.put_load_models(&names) {
            Ok(message) => self.status = Some(message),
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("art_grid")
            .num_columns(2)
            .spacing([20.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label("Characters");
                ui.add(egui::DragValue::new(&mut self.length).range(0..=20000).speed(10));
                ui.end_row();

                ui.label("Start");
                ui.vertical(|ui| {
                    ui.radio_value(&mut self.start_mode, StartMode::Random, "Random");
                    ui.radio_value(&mut self.start_mode, StartMode::Custom, "Custom");
                });
                ui.end_row();

                if self.start_mode == StartMode::Custom {
                    ui.label("Start text");
                    ui.text_edit_singleline(&mut self.custom_start);
                    ui.end_row();
                }

                ui.checkbox(&mut self.fixed_seed, "Fixed random seed");
                if self.fixed_seed {
                    ui.add(egui::DragValue::new(&mut self.rng_seed));
                } else {
                    ui.label("New seed on every run");
                }
                ui.end_row();

                ui.separator();
                ui.end_row();

                ui.label("Font size");
                ui.add(egui::DragValue::new(&mut self.font_size).range(1.0..=100.0).speed(0.5));
                ui.end_row();

                ui.label("Step");
                ui.add(egui::DragValue::new(&mut self.step).range(1.0..=100.0).speed(0.5));
                ui.end_row();

                ui.label("Line step");
                ui.add(egui::DragValue::new(&mut self.line_step).range(1.0..=100.0).speed(0.5));
                ui.end_row();
            });

        ui.separator();
        ui.label("Training texts");
        let mut selection_changed = false;
        for model in &self.available_models {
            let mut checked = self.selected_models.contains(model);
            if ui.checkbox(&mut checked, model).changed() {
                // At least one text stays selected
                if checked {
                    selection_changed = true;
                    self.selected_models.insert(model.clone());
                } else if self.selected_models.len() > 1 {
                    selection_changed = true;
                    self.selected_models.remove(model);
                }
            }
        }
        if selection_changed {
            self.put_load_models();
        }

        ui.separator();
        if ui.add_sized([200.0, 40.0], egui::Button::new("Generate")).clicked() {
            self.get_render();
        }
        ui.checkbox(&mut self.show_text, "Show text");
        ui.label(self.status.as_deref().unwrap_or("Click Generate to start"));
    }

    fn artwork(&self, ui: &mut egui::Ui) {
        let Some(scene) = &self.scene else { return };

        if self.show_text {
            egui::ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                ui.label(scene.text.as_str());
            });
        }

        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        painter.rect_filled(response.rect, egui::CornerRadius::ZERO, background_color(&scene.background));

        let mut canvas = PainterCanvas::new(scene.bounds, response.rect);
        match scene.replay(&mut canvas) {
            Ok(()) => painter.extend(canvas.into_shapes()),
            Err(e) => warn!("Replay failed: {e}"),
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

impl eframe::App for ArtUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| self.controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.artwork(ui));
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1560.0, 700.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "markov-art",
        options,
        Box::new(|_| Ok(Box::new(ArtUI::new()?))),
    )
}
