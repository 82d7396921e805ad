use super::*;

#[test]
fn routes_resolve_both_ways() {
    for kind in TemplateKind::ALL {
        assert_eq!(TemplateKind::from_route(kind.route()).unwrap(), kind);
        assert_eq!(kind.as_str().parse::<TemplateKind>().unwrap(), kind);
    }
    assert_eq!(TemplateKind::from_route("/").unwrap(), TemplateKind::Study);
    assert_eq!(TemplateKind::from_route("/teas").unwrap(), TemplateKind::Teas);
}

#[test]
fn unknown_routes_and_names_are_rejected() {
    for route in ["/TEAS", "/teas/", "", "/teas?x=1"] {
        assert!(matches!(
            TemplateKind::from_route(route),
            Err(CoverError::Validation(_))
        ));
    }
    assert!("vtne".parse::<TemplateKind>().is_err());
}

#[test]
fn serializes_as_lowercase_name() {
    assert_eq!(serde_json::to_string(&TemplateKind::Teas).unwrap(), "\"teas\"");
    let back: TemplateKind = serde_json::from_str("\"study\"").unwrap();
    assert_eq!(back, TemplateKind::Study);
}
