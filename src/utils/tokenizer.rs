/// Split document text into tokens.
/// A token is a maximal run of alphanumeric characters; every other
/// character separates tokens. Case is preserved and duplicates are kept,
/// the index collapses them.
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize every argument of an `index` command, in order
pub fn extract_tokens<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .flat_map(|arg| split_tokens(arg.as_ref()))
        .collect()
}
