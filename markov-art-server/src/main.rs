use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use markov_art_core::error::ArtError;
use markov_art_core::io::{self, list_files};
use markov_art_core::model::synthesizer::{StartSeed, TextSynthesizer, checked_length};
use markov_art_core::model::transition_model::TransitionModel;
use markov_art_core::render::scene::Scene;
use markov_art_core::render::svg_canvas::SvgCanvas;
use markov_art_core::settings::Settings;

/// Query parameters shared by the generation and rendering endpoints.
///
/// Every parameter is optional and falls back to the server settings.
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<i64>,
	seed: Option<String>, // "random", "none" or "custom:<text>"
	rng_seed: Option<u64>,
	width: Option<f32>,
	height: Option<f32>,
	step: Option<f32>,
	line_step: Option<f32>,
	font_size: Option<f32>,
	background: Option<String>,
	shape: Option<String>,
}

#[derive(Deserialize)]
struct ModelQuery {
	names: Option<String>
}

struct SharedData {
	model: TransitionModel,
	model_names: Vec<String>,
	settings: Settings,
}

impl GenerateParams {
	/// Server settings with the query values applied on top.
	fn settings(&self, base: &Settings) -> Result<Settings, ArtError> {
		let mut settings = base.clone();
		if let Some(v) = self.length { settings.num_chars = v; }
		if let Some(v) = self.width { settings.window_width = v; }
		if let Some(v) = self.height { settings.window_height = v; }
		if let Some(v) = self.step { settings.horizontal_step = v; }
		if let Some(v) = self.line_step { settings.vertical_step = v; }
		if let Some(v) = self.font_size { settings.font_size = v; }
		if let Some(v) = &self.background { settings.background = v.clone(); }
		if let Some(v) = &self.shape { settings.shape = v.clone(); }
		settings.validate()?;
		Ok(settings)
	}

	/// Determines the starting seed strategy for text generation.
	fn start_seed(&self, settings: &Settings) -> Result<StartSeed, ArtError> {
		match &self.seed {
			None => Ok(settings.start_seed()),
			Some(s) => s.parse(),
		}
	}
}

/// Maps a pipeline error onto an HTTP response.
fn error_response(e: ArtError) -> HttpResponse {
	match e {
		ArtError::EmptyModel => HttpResponse::Conflict().body(e.to_string()),
		ArtError::UnknownCharacter(_) | ArtError::InvalidLength(_) | ArtError::Settings(_) | ArtError::Canvas(_) => {
			HttpResponse::BadRequest().body(e.to_string())
		}
		ArtError::Io(_) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// Generates text with the shared model; returns the text, the settings used
/// and the random seed.
fn generate(shared_data: &SharedData, query: &GenerateParams) -> Result<(String, Settings, u64), ArtError> {
	let settings = query.settings(&shared_data.settings)?;
	let start_seed = query.start_seed(&settings)?;
	let length = checked_length(settings.num_chars)?;

	let seed = query.rng_seed.or(settings.rng_seed).unwrap_or_else(rand::random::<u64>);
	let mut rng = StdRng::seed_from_u64(seed);
	let text = TextSynthesizer::new(&shared_data.model).generate_from(length, &start_seed, &mut rng)?;
	Ok((text, settings, seed))
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates text using the loaded model based on query parameters.
/// Returns the generated text as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match generate(&shared_data, &query) {
		Ok((text, _, _)) => HttpResponse::Ok().body(text),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/render`
///
/// Generates text and renders it; returns the recorded scene as JSON.
#[get("/v1/render")]
async fn get_render(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let scene = generate(&shared_data, &query).and_then(|(text, settings, seed)| {
		Scene::record(&text, seed, settings.layout(), settings.pen_style()?, &settings.background)
	});
	match scene {
		Ok(scene) => HttpResponse::Ok().json(scene),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/svg`
///
/// Same as `/v1/render`, as an SVG image.
#[get("/v1/svg")]
async fn get_svg(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let svg = generate(&shared_data, &query).and_then(|(text, settings, seed)| {
		let scene = Scene::record(&text, seed, settings.layout(), settings.pen_style()?, &settings.background)?;
		let mut canvas = SvgCanvas::new(settings.bounds(), &settings.background);
		scene.replay(&mut canvas)?;
		Ok(canvas.document().to_string())
	});
	match svg {
		Ok(svg) => HttpResponse::Ok().content_type("image/svg+xml").body(svg),
		Err(e) => error_response(e),
	}
}

#[get("/v1/models")]
async fn get_models(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let data_dir = match data.lock() {
		Ok(m) => io::normalize_folder(&m.settings.data_dir),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&data_dir, "txt") {
		Ok(files) => HttpResponse::Ok().body(training_names(&files).join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models")
	}
}

/// Training text names: `.txt` stems, without the `<stem>.out.txt` files
/// written by text export.
fn training_names(files: &[String]) -> Vec<String> {
	files
		.iter()
		.filter_map(|f| f.strip_suffix(".txt"))
		.filter(|stem| !stem.ends_with(".out"))
		.map(str::to_owned)
		.collect()
}

#[get("/v1/loaded_models")]
async fn get_loaded_models(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.model_names.join("\n"))
}

/// Trains a model on one training file of the data folder.
fn train(settings: &Settings, name: &str) -> Result<TransitionModel, ArtError> {
	let path = io::normalize_folder(&settings.data_dir).join(format!("{name}.txt"));
	let mut model = TransitionModel::new();
	model.observe_file(&path, settings.fold_accents)?;
	info!("Trained '{}' ({} keys)", name, model.len());
	Ok(model)
}

#[put("/v1/load_models")]
async fn put_model(data: web::Data<Mutex<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};

	let model_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	let mut model = TransitionModel::new();
	for name in &model_names {
		match train(&shared_data.settings, name) {
			Ok(partial_model) => model.merge(&partial_model),
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load model: {e}"))
		}
	}
	shared_data.model = model;
	shared_data.model_names = model_names.iter().map(|s| s.to_string()).collect();

	HttpResponse::Ok().body("Models loaded successfully")
}

/// Main entry point for the server.
///
/// Reads the settings (from the file named by `MARKOV_ART_SETTINGS` if set),
/// trains on the configured training file when present, and starts an
/// Actix-web HTTP server on 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let settings = match std::env::var("MARKOV_ART_SETTINGS") {
		Ok(path) => Settings::load(&path).map_err(|e| std::io::Error::other(e.to_string()))?,
		Err(_) => Settings::default(),
	};

	let mut shared_data = SharedData {
		model: TransitionModel::new(),
		model_names: Vec::new(),
		settings,
	};
	let name = io::get_filename(&shared_data.settings.training_file)?;
	match train(&shared_data.settings, &name) {
		Ok(model) => {
			shared_data.model = model;
			shared_data.model_names.push(name);
		}
		Err(e) => warn!("Starting with an empty model: {e}"),
	}
	let shared_model = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_render)
			.service(get_svg)
			.service(get_models)
			.service(put_model)
			.service(get_loaded_models)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params() -> GenerateParams {
		GenerateParams {
			length: None,
			seed: None,
			rng_seed: Some(1),
			width: None,
			height: None,
			step: None,
			line_step: None,
			font_size: None,
			background: None,
			shape: None,
		}
	}

	fn shared(text: &str) -> SharedData {
		let mut model = TransitionModel::new();
		model.observe(text);
		SharedData { model, model_names: vec!["test".to_owned()], settings: Settings::default() }
	}

	#[test]
	fn test_generate_uses_query_values() {
		let data = shared("aba");
		let query = GenerateParams { length: Some(4), seed: Some("custom:a".to_owned()), ..params() };
		let (text, settings, seed) = generate(&data, &query).unwrap();
		assert_eq!(text, "baba");
		assert_eq!(settings.num_chars, 4);
		assert_eq!(seed, 1);
	}

	#[test]
	fn test_generate_reports_typed_errors() {
		let data = shared("aba");
		let query = GenerateParams { length: Some(-2), ..params() };
		assert!(matches!(generate(&data, &query), Err(ArtError::InvalidLength(-2))));

		let query = GenerateParams { shape: Some("blob".to_owned()), ..params() };
		assert!(matches!(generate(&data, &query), Err(ArtError::Canvas(_))));

		let empty = shared("");
		assert!(matches!(generate(&empty, &params()), Err(ArtError::EmptyModel)));
	}

	#[test]
	fn test_exported_text_is_not_a_training_text() {
		let files = ["lyrics.out.txt", "lyrics.txt", "poems.txt"].map(str::to_owned);
		assert_eq!(training_names(&files), vec!["lyrics".to_owned(), "poems".to_owned()]);
	}

	#[test]
	fn test_error_status_codes() {
		assert_eq!(error_response(ArtError::EmptyModel).status(), 409);
		assert_eq!(error_response(ArtError::UnknownCharacter('x')).status(), 400);
	}
}
