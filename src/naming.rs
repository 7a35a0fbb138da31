use chrono::Utc;

/// Prefix used when an image reference sanitizes down to nothing
pub const FALLBACK_PREFIX: &str = "layer_";

/// Converts an image reference to a Bedrock layer name
/// Keeps only the last path segment, turns tag/digest separators and any other
/// unsafe character into `_`, and trims underscores from both ends
/// Falls back to `layer_<unix-timestamp>` if nothing usable is left
pub fn sanitize_layer_name(image_ref: &str) -> String {
    let base = match image_ref.rfind('/') {
        Some(pos) => &image_ref[pos + 1..],
        None => image_ref,
    };

    let sanitized: String = base
        .chars()
        .map(|c| match c {
            ':' | '@' => '_',
            c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => c,
            _ => '_',
        })
        .collect();

    let trimmed = sanitized.trim_matches('_');
    if trimmed.is_empty() {
        return fallback_layer_name();
    }

    trimmed.to_string()
}

fn fallback_layer_name() -> String {
    format!("{}{}", FALLBACK_PREFIX, Utc::now().timestamp())
}

/// Returns true if `name` has the shape produced by the fallback branch
pub fn is_fallback_name(name: &str) -> bool {
    name.strip_prefix(FALLBACK_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}
