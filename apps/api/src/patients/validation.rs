/// A patient identifier is non-empty and made only of letters and digits.
///
/// Letters and digits are Unicode-aware, so `"Müller7"` passes. Anything
/// carrying the key delimiter or whitespace fails.
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.chars().all(char::is_alphanumeric)
}
