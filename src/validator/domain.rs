/// Trims and lower-cases `domain`, then derives its ASCII form.
///
/// Returns `(lowercase, ascii)`. A failed IDNA conversion is not an error
/// here: the lower-cased form is reused and DNS decides whether it exists.
pub(crate) fn normalize_domain(domain: &str) -> (String, String) {
    let lowered = domain.trim().to_lowercase();
    if lowered.is_empty() {
        return (lowered, String::new());
    }
    let ascii = match idna::domain_to_ascii(&lowered) {
        Ok(ascii) if !ascii.is_empty() => ascii,
        _ => lowered.clone(),
    };
    (lowered, ascii)
}
