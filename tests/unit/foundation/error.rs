use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PocketError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PocketError::data("x").to_string().contains("data error:"));
    assert!(
        PocketError::template("x")
            .to_string()
            .contains("template error:")
    );
    assert!(PocketError::render("x").to_string().contains("render error:"));
    assert!(PocketError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PocketError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
