use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Reads a whole text file into a `String`.
pub fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Writes `text` to `filename` in one go, replacing any previous content.
pub fn write_text<P: AsRef<Path>>(filename: P, text: &str) -> io::Result<()> {
	fs::write(filename, text)
}

/// Replaces accented letters by their base letter.
///
/// Decomposes the text (NFD) and drops the combining marks, so `"Fête"`
/// becomes `"Fete"`. Characters without a decomposition are kept.
pub fn fold_accents(text: &str) -> String {
	text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/input.txt` + `"svg"` → `data/input.svg`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/lyrics.txt"` → `"lyrics"`
/// - `"lyrics.txt"` → `"lyrics"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fold_accents() {
		assert_eq!(fold_accents("Fête à Noël, ça va?"), "Fete a Noel, ca va?");
		assert_eq!(fold_accents("plain\ntext"), "plain\ntext");
	}

	#[test]
	fn test_output_path() {
		assert_eq!(build_output_path("data/input.txt", "svg").unwrap(), PathBuf::from("data/input.svg"));
		assert_eq!(get_filename("./data/lyrics.txt").unwrap(), "lyrics");
	}

	#[test]
	fn test_write_overwrites_and_lists() {
		let dir = env::temp_dir().join(format!("markov-art-io-{}", std::process::id()));
		fs::create_dir_all(&dir).unwrap();
		let file = dir.join("out.txt");

		write_text(&file, "first, longer content").unwrap();
		write_text(&file, "second").unwrap();
		assert_eq!(read_text(&file).unwrap(), "second");
		assert_eq!(list_files(&dir, "txt").unwrap(), vec!["out.txt".to_owned()]);

		fs::remove_dir_all(&dir).unwrap();
	}
}
