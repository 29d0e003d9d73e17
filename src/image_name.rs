use std::sync::LazyLock;
use regex::Regex;

pub const IMAGE_EXTENSION: &str = ".jpg";

/// Accented Latin letters that survive sanitization alongside `a-z`, `0-9` and `_`.
pub const ACCENTED_LETTERS: &str = "àáâãäåèéêëìíîïòóôõöùúûüýÿç";

const BYTE_ORDER_MARK: char = '\u{FEFF}';

// Unicode whitespace plus the byte order mark, which pasted product names sometimes carry.
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s\x{FEFF}]+").expect("whitespace pattern is valid")
});

static UNDERSCORE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_{2,}").expect("underscore pattern is valid")
});

fn is_separator(character: char) -> bool {
    character.is_whitespace() || character == BYTE_ORDER_MARK
}

fn is_allowed(character: char) -> bool {
    character.is_ascii_lowercase()
        || character.is_ascii_digit()
        || character == '_'
        || ACCENTED_LETTERS.contains(character)
}

/// File name without extension. May be empty for inputs with no allowed characters.
pub fn image_stem(display_name: &str) -> String {
    let lowered = display_name.to_lowercase();
    let underscored = WHITESPACE_RUN.replace_all(lowered.trim_matches(is_separator), "_");

    let filtered = underscored
        .chars()
        .filter(|&character| is_allowed(character))
        .collect::<String>();

    let collapsed = UNDERSCORE_RUN.replace_all(&filtered, "_");
    collapsed.trim_matches('_').to_string()
}

pub fn image_file_name(display_name: &str) -> String {
    format!("{stem}{IMAGE_EXTENSION}", stem = image_stem(display_name))
}

pub fn image_path(base: &str, display_name: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{base}/{file_name}", file_name = image_file_name(display_name))
}

/// Maps the accented allow-list onto plain ASCII, the way image files are often renamed on disk.
pub fn fold_accents(name: &str) -> String {
    name.chars()
        .map(|character| match character {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ý' | 'ÿ' => 'y',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
