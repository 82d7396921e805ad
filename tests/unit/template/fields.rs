use super::*;

#[test]
fn defaults_follow_schema_order() {
    let study = TextFields::defaults(TemplateKind::Study);
    let keys: Vec<_> = study.iter().map(|(k, _)| k).collect();
    assert_eq!(
        keys,
        vec![
            FieldKey::Title,
            FieldKey::Subtitle,
            FieldKey::Year,
            FieldKey::Feature1,
            FieldKey::Author,
            FieldKey::BottomText
        ]
    );
    assert_eq!(study.get(FieldKey::Title), Some("VTNE"));

    let teas = TextFields::defaults(TemplateKind::Teas);
    assert_eq!(teas.iter().count(), 7);
    assert_eq!(teas.get(FieldKey::Feature3), Some("50 HRs E-Learning"));
    assert_eq!(teas.get(FieldKey::Author), None);
}

#[test]
fn set_overwrites_and_is_idempotent() {
    let mut once = TextFields::defaults(TemplateKind::Teas);
    once.set(FieldKey::Title, "X").unwrap();

    let mut twice = TextFields::defaults(TemplateKind::Teas);
    twice.set(FieldKey::Title, "X").unwrap();
    twice.set(FieldKey::Title, "X").unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.get(FieldKey::Title), Some("X"));
}

#[test]
fn set_accepts_empty_and_unbounded_values() {
    let mut f = TextFields::defaults(TemplateKind::Study);
    f.set(FieldKey::Author, "").unwrap();
    assert_eq!(f.get(FieldKey::Author), Some(""));

    let long = "✓".repeat(10_000);
    f.set(FieldKey::BottomText, long.clone()).unwrap();
    assert_eq!(f.text(FieldKey::BottomText), long);
}

#[test]
fn set_rejects_keys_outside_schema() {
    let mut study = TextFields::defaults(TemplateKind::Study);
    let before = study.clone();
    let err = study.set(FieldKey::Feature2, "nope").unwrap_err();
    assert!(matches!(err, CoverError::Validation(_)));
    assert_eq!(study, before);

    let mut teas = TextFields::defaults(TemplateKind::Teas);
    assert!(teas.set(FieldKey::Author, "nope").is_err());
}

#[test]
fn field_key_parses_its_own_name() {
    for field in schema(TemplateKind::Study)
        .iter()
        .chain(schema(TemplateKind::Teas))
    {
        let parsed: FieldKey = field.key.as_str().parse().unwrap();
        assert_eq!(parsed, field.key);
    }
    assert!("bottomtext".parse::<FieldKey>().is_err());
}

#[test]
fn only_teas_bottom_text_is_multiline() {
    let multi: Vec<_> = TemplateKind::ALL
        .into_iter()
        .flat_map(|k| schema(k).iter().map(move |f| (k, f)))
        .filter(|(_, f)| f.multiline)
        .map(|(k, f)| (k, f.key))
        .collect();
    assert_eq!(multi, vec![(TemplateKind::Teas, FieldKey::BottomText)]);
}
