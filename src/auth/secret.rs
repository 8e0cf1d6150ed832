use subtle::ConstantTimeEq;

/// Constant-time check of the shared admin-panel password. An empty
/// configured secret never matches.
pub fn secret_matches(expected: &str, provided: Option<&str>) -> bool {
    let Some(provided) = provided else {
        return false;
    };

    let expected = expected.as_bytes();
    let provided = provided.as_bytes();

    !expected.is_empty() && expected.len() == provided.len() && expected.ct_eq(provided).into()
}
