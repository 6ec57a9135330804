// Markov text art: command-line entry point.
//
// Learns a character model from a training text, generates new text, saves it
// and renders it as an SVG image next to the training file.
//
// Usage:
//   cargo run -p markov-art-exemple -- [--config settings.json] [--data DIR]
//     [--input FILE] [--chars N] [--start TEXT] [--seed N] [--width W]
//     [--height H] [--step N] [--line-step N] [--font-size N]
//     [--background COLOR] [--shape NAME]

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use markov_art_core::io;
use markov_art_core::model::synthesizer::TextSynthesizer;
use markov_art_core::model::transition_model::TransitionModel;
use markov_art_core::render::art::ArtGenerator;
use markov_art_core::render::svg_canvas::SvgCanvas;
use markov_art_core::settings::Settings;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    // Settings file first, flags override it
    let mut settings = match parse_flag::<String>(&args, "--config") {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    override_settings(&mut settings, &args);
    settings.validate()?;

    // Train
    let training_path = settings.training_path();
    let mut model = TransitionModel::new();
    model.observe_file(&training_path, settings.fold_accents)?;
    info!("Trained on {} ({} keys)", training_path.display(), model.len());

    // Generate; the seed is printed so a run can be reproduced
    let seed = settings.rng_seed.unwrap_or_else(rand::random::<u64>);
    println!("Seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let synthesizer = TextSynthesizer::new(&model);
    let generated = synthesizer.generate_from(settings.length()?, &settings.start_seed(), &mut rng)?;
    println!();
    println!("{generated}");
    println!();

    let text_path = io::build_output_path(&training_path, "out.txt")?;
    io::write_text(&text_path, &generated)?;
    println!("Wrote {}", text_path.display());

    // Render
    let svg_path = io::build_output_path(&training_path, "svg")?;
    let canvas = SvgCanvas::new(settings.bounds(), &settings.background).with_output(&svg_path);
    let mut art = ArtGenerator::new(canvas, settings.layout(), settings.pen_style()?);
    art.render(&generated)?;
    art.finish()?;
    println!("Wrote {}", svg_path.display());

    Ok(())
}

/// Applies the command-line flags on top of `settings`.
fn override_settings(settings: &mut Settings, args: &[String]) {
    if let Some(v) = parse_flag(args, "--data") { settings.data_dir = v; }
    if let Some(v) = parse_flag(args, "--input") { settings.training_file = v; }
    if let Some(v) = parse_flag(args, "--chars") { settings.num_chars = v; }
    if let Some(v) = parse_flag(args, "--start") { settings.start = v; }
    if let Some(v) = parse_flag(args, "--seed") { settings.rng_seed = Some(v); }
    if let Some(v) = parse_flag(args, "--width") { settings.window_width = v; }
    if let Some(v) = parse_flag(args, "--height") { settings.window_height = v; }
    if let Some(v) = parse_flag(args, "--step") { settings.horizontal_step = v; }
    if let Some(v) = parse_flag(args, "--line-step") { settings.vertical_step = v; }
    if let Some(v) = parse_flag(args, "--font-size") { settings.font_size = v; }
    if let Some(v) = parse_flag(args, "--background") { settings.background = v; }
    if let Some(v) = parse_flag(args, "--shape") { settings.shape = v; }
    if args.iter().any(|a| a == "--keep-accents") { settings.fold_accents = false; }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn test_flags_override_defaults() {
        let mut settings = Settings::default();
        override_settings(&mut settings, &args("exe --chars 50 --seed 7 --shape arrow --keep-accents"));
        assert_eq!(settings.num_chars, 50);
        assert_eq!(settings.rng_seed, Some(7));
        assert_eq!(settings.shape, "arrow");
        assert!(!settings.fold_accents);
        assert_eq!(settings.font_size, 22.0);
    }

    #[test]
    fn test_unparsable_flag_is_ignored() {
        assert_eq!(parse_flag::<u64>(&args("exe --seed abc"), "--seed"), None);
        assert_eq!(parse_flag::<i64>(&args("exe --chars -3"), "--chars"), Some(-3));
    }
}
