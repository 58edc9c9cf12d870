/// Splits free text into lowercase tokens
///
/// `/` and `-` act as separators in addition to whitespace. No stemming or
/// stop-word removal is applied. `None` and empty text produce no tokens.
pub fn tokenize<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    let Some(text) = text.into() else {
        return Vec::new();
    };

    text.replace(['/', '-'], " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}
