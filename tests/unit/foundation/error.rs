use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CoverError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CoverError::decode("x").to_string().contains("decode error:"));
    assert!(
        CoverError::capture("x")
            .to_string()
            .contains("capture error:")
    );
    assert!(CoverError::export("x").to_string().contains("export error:"));
    assert!(
        CoverError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CoverError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
