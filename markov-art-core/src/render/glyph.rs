use super::pen::Rgb;

/// Visual class of a character. Each class maps to one effect of the glyph
/// renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
	/// Latin letter, with its fixed color.
	Letter(Rgb),
	Space,
	Period,
	Comma,
	/// `'` or `"`.
	Quote,
	Question,
	Exclamation,
	/// `:` or `;`.
	ColonSemicolon,
	Dash,
	Newline,
	/// Decimal digit and its value.
	Digit(u8),
	Other,
}

impl CharClass {
	/// Classifies one character.
	///
	/// Only the 52 ASCII letters have a color; any other alphabetic character
	/// (accented or non-Latin) falls into `Other`.
	pub fn of(c: char) -> Self {
		match c {
			' ' => Self::Space,
			'.' => Self::Period,
			',' => Self::Comma,
			'\'' | '"' => Self::Quote,
			'?' => Self::Question,
			'!' => Self::Exclamation,
			':' | ';' => Self::ColonSemicolon,
			'-' => Self::Dash,
			'\n' => Self::Newline,
			'0'..='9' => Self::Digit(c as u8 - b'0'),
			_ => match letter_color(c) {
				Some(color) => Self::Letter(color),
				None => Self::Other,
			},
		}
	}
}

/// Color bound to each ASCII letter, spread across the visible spectrum
/// from dark red to pale grey.
const LETTER_COLORS: [(char, Rgb); 52] = [
	('a', Rgb(128, 0, 0)), ('A', Rgb(178, 34, 34)),
	('b', Rgb(255, 0, 0)), ('B', Rgb(205, 92, 92)),
	('c', Rgb(233, 150, 122)), ('C', Rgb(255, 69, 0)),
	('d', Rgb(255, 165, 0)), ('D', Rgb(218, 165, 32)),
	('e', Rgb(189, 183, 107)), ('E', Rgb(255, 255, 0)),
	('f', Rgb(85, 107, 47)), ('F', Rgb(127, 255, 0)),
	('g', Rgb(0, 100, 0)), ('G', Rgb(0, 255, 0)),
	('h', Rgb(144, 238, 144)), ('H', Rgb(0, 250, 154)),
	('i', Rgb(46, 139, 87)), ('I', Rgb(32, 178, 170)),
	('j', Rgb(0, 128, 128)), ('J', Rgb(0, 255, 255)),
	('k', Rgb(0, 206, 209)), ('K', Rgb(175, 238, 238)),
	('l', Rgb(176, 224, 230)), ('L', Rgb(100, 149, 237)),
	('m', Rgb(30, 144, 255)), ('M', Rgb(135, 206, 250)),
	('n', Rgb(0, 0, 128)), ('N', Rgb(0, 0, 255)),
	('o', Rgb(138, 43, 226)), ('O', Rgb(106, 90, 205)),
	('p', Rgb(147, 112, 219)), ('P', Rgb(153, 50, 204)),
	('q', Rgb(128, 0, 128)), ('Q', Rgb(238, 130, 238)),
	('r', Rgb(218, 112, 214)), ('R', Rgb(255, 20, 147)),
	('s', Rgb(255, 182, 193)), ('S', Rgb(139, 69, 19)),
	('t', Rgb(255, 235, 205)), ('T', Rgb(222, 184, 135)),
	('u', Rgb(250, 250, 210)), ('U', Rgb(255, 228, 225)),
	('v', Rgb(244, 164, 96)), ('V', Rgb(255, 245, 238)),
	('w', Rgb(255, 222, 173)), ('W', Rgb(230, 230, 250)),
	('x', Rgb(253, 245, 230)), ('X', Rgb(255, 255, 240)),
	('y', Rgb(119, 136, 153)), ('Y', Rgb(105, 105, 105)),
	('z', Rgb(248, 248, 255)), ('Z', Rgb(220, 220, 220)),
];

/// Returns the fixed color of an ASCII letter (case-sensitive).
pub fn letter_color(c: char) -> Option<Rgb> {
	if !c.is_ascii_alphabetic() {
		return None;
	}
	// Table is ordered 'a', 'A', 'b', 'B', ...
	let index = (c.to_ascii_lowercase() as u8 - b'a') as usize * 2 + usize::from(c.is_ascii_uppercase());
	Some(LETTER_COLORS[index].1)
}
