use core::ops::RangeInclusive;

/// The Ethiopic Unicode block.
pub const ETHIOPIC_BLOCK: RangeInclusive<char> = '\u{1200}'..='\u{137F}';

/// Character class used by both normalization modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
enum CharClass {
    /// Anything not covered below.
    Other,
    /// Unicode whitespace.
    Space,
    /// Member of the stripped punctuation/numeral set.
    Strip,
    /// Ethiopic letter (block member that is not stripped).
    Ethiopic,
}

const ASCII_CLASS: [CharClass; 128] = {
    let mut table = [CharClass::Other; 128];
    let mut i = 0;
    while i < 128 {
        if matches!(i as u8, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c | 0x1c..=0x1f) {
            table[i] = CharClass::Space;
        }
        i += 1;
    }
    table[b',' as usize] = CharClass::Strip;
    table
};

/// Returns `true` for characters of the Ethiopic block.
#[inline(always)]
pub fn is_ethiopic(c: char) -> bool {
    ETHIOPIC_BLOCK.contains(&c)
}

/// Returns `true` for characters removed by every normalization mode:
/// the ASCII comma, Ethiopic punctuation (U+1360..=U+1368) and Ethiopic
/// numerals (U+1369..=U+137B, U+137F).
///
/// U+137C (ETHIOPIC NUMBER TEN THOUSAND) is intentionally not in the set.
#[inline(always)]
pub fn is_stripped_symbol(c: char) -> bool {
    matches!(c, ',' | '\u{1360}'..='\u{137B}' | '\u{137F}')
}

#[inline(always)]
fn classify(c: char) -> CharClass {
    if c.is_ascii() {
        return ASCII_CLASS[c as usize];
    }
    if is_stripped_symbol(c) {
        CharClass::Strip
    } else if is_ethiopic(c) {
        CharClass::Ethiopic
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Other
    }
}

/// What survives normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalizationMode {
    /// Remove the stripped symbol set and collapse whitespace. Everything
    /// else, including Latin text and digits, is kept.
    #[default]
    Clean,
    /// Keep only maximal runs of Ethiopic letters, joined by single spaces.
    /// Mixed-script content (Latin, digits, emoji) is dropped entirely.
    ScriptOnly,
}

/// Configuration options for text normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalizerConfig {
    pub mode: NormalizationMode,
}

impl NormalizerConfig {
    /// Symbol stripping and whitespace collapse only.
    pub const fn clean() -> Self {
        Self {
            mode: NormalizationMode::Clean,
        }
    }

    /// Ethiopic-only extraction.
    pub const fn script_only() -> Self {
        Self {
            mode: NormalizationMode::ScriptOnly,
        }
    }
}

/// Amharic text normalizer.
///
/// Performs the following operations:
/// - Removes the ASCII comma, Ethiopic punctuation and Ethiopic numerals
/// - Collapses runs of Unicode whitespace into single spaces
/// - Removes leading/trailing whitespace
/// - In [`NormalizationMode::ScriptOnly`], additionally drops everything
///   outside the Ethiopic block
///
/// Symbol removal happens before whitespace collapse, so `"ሰላም፡ዓለም"`
/// becomes `"ሰላምዓለም"` while `"a , b"` becomes `"a b"`.
///
/// # Examples
///
/// ```
/// use amharic_ner_core::analyzer::normalizer::{NormalizerConfig, TextNormalizer};
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("  ሰላም።\n ዓለም  "), "ሰላም ዓለም");
///
/// let script = TextNormalizer::new(NormalizerConfig::script_only());
/// assert_eq!(script.normalize("ዋጋ 100ብር ok"), "ዋጋ ብር");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    #[inline(always)]
    pub const fn mode(&self) -> NormalizationMode {
        self.config.mode
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Reuses the buffer's capacity if sufficient, growing only when necessary.
    /// Clears the buffer before writing.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let script_only = self.config.mode == NormalizationMode::ScriptOnly;
        // A separator is owed once something was written and a gap followed.
        let mut pending_space = false;

        for ch in input.chars() {
            let keep = match classify(ch) {
                CharClass::Strip => continue,
                CharClass::Ethiopic => true,
                CharClass::Other => !script_only,
                CharClass::Space => false,
            };

            if keep {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(ch);
            } else if !out.is_empty() {
                pending_space = true;
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }

    /// Normalizes an optional value.
    ///
    /// `None` stays `None`. Input that is reduced to nothing yields
    /// `Some("")`, never `None`.
    #[inline]
    pub fn normalize_opt(&self, input: Option<&str>) -> Option<String> {
        input.map(|s| self.normalize(s))
    }
}
