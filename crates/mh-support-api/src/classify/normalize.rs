//! Text canonicalization for rule matching.

use unicode_normalization::UnicodeNormalization;

/// Canonicalize raw input for pattern matching.
///
/// NFKD decomposition folds stylized and full-width characters into base
/// forms the ASCII patterns can see, everything is lowercased, and curly
/// apostrophes become the plain ASCII apostrophe so contractions match the
/// same whether typed or pasted. Total: any input yields a string.
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfkd().collect();
    folded.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'")
}
