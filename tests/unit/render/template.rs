use super::*;

#[test]
fn builtin_templates_validate_and_expose_their_layers() {
    let facts = FrameTemplate::fake_news();
    facts.validate().unwrap();
    assert!(facts.layer(FACT_LAYER).is_ok());

    let reviews = FrameTemplate::lightly_steamed();
    reviews.validate().unwrap();
    for name in [USERNAME_LAYER, HOURS_LAYER, REVIEW_LAYER] {
        assert!(reviews.layer(name).is_ok(), "missing {name}");
    }
}

#[test]
fn missing_layer_is_a_template_error() {
    let err = FrameTemplate::fake_news().layer(REVIEW_LAYER).unwrap_err();
    assert!(matches!(err, PocketError::Template(_)));
    assert!(err.to_string().contains("REVIEW"));
}

#[test]
fn json_round_trip_fills_defaults() {
    let json = r##"{
        "canvas": { "width": 64, "height": 32 },
        "background": "#000000",
        "layers": {
            "FACT": { "x": 0, "y": 0, "width": 64, "height": 32, "font_size": 12, "color": "#ffffff" }
        },
        "indicator": { "x": 50, "y": 20, "size": 8, "color": "#ff0000" }
    }"##;
    let template = FrameTemplate::from_json(json).unwrap();
    let layer = template.layer(FACT_LAYER).unwrap();
    assert_eq!(layer.font_family, "sans-serif");
    assert!(!layer.bold);
    assert_eq!(layer.metrics, TextMetrics::default());
}

#[test]
fn zero_sized_layers_are_rejected() {
    let mut template = FrameTemplate::fake_news();
    template.layers.get_mut(FACT_LAYER).unwrap().height = 0.0;
    assert!(template.validate().is_err());
}

#[test]
fn fitting_long_reviews_never_grows_the_font() {
    let template = FrameTemplate::lightly_steamed();
    let short = template.fit_font_size(REVIEW_LAYER, "Fine.").unwrap();
    assert_eq!(short, 40.0);

    let long = "This game ate my weekend and I regret nothing. ".repeat(60);
    let fitted = template.fit_font_size(REVIEW_LAYER, &long).unwrap();
    assert!(fitted < 40.0);
    assert!(fitted >= crate::text::fit::MIN_FONT_SIZE);
}
