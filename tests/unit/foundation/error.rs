use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MaskforgeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(MaskforgeError::asset("x").to_string().contains("asset error:"));
    assert!(
        MaskforgeError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MaskforgeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
