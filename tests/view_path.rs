use orthoview::{decode, encode, Converter, GeoCoord, LocalCoord, ViewPath};

#[test]
fn encodes_latitude_first() {
    let converter = Converter::standard();
    let center = converter.to_local(GeoCoord::new(-87.33081, 79.49346)).unwrap();

    assert_eq!(encode(&converter, center).unwrap(), "/79.49346/-87.33081");
}

#[test]
fn encodes_five_decimals() {
    let converter = Converter::standard();
    let center = converter.to_local(GeoCoord::new(19., 50.)).unwrap();

    assert_eq!(encode(&converter, center).unwrap(), "/50.00000/19.00000");
}

#[test]
fn encode_rejects_centers_outside_the_projection() {
    let converter = Converter::standard();

    for x in [1e10, 1e12, 1e14, 1e300] {
        let err = encode(&converter, LocalCoord::new(x, 0.)).unwrap_err();
        assert!(matches!(err, orthoview::Error::NonFinite(_)), "{x} gave {err}");
    }
    assert!(converter.to_geographic(LocalCoord::new(1e10, 0.)).is_err());
}

#[test]
fn decode_absent_cases() {
    let converter = Converter::standard();

    for path in ["", "abc/def", "12.3", "12.3/", "/", "NaN/19", "52/inf", "52,1/19"] {
        assert!(decode(&converter, path).is_none(), "{path:?} should not decode");
    }
}

#[test]
fn decode_matches_to_local() {
    let converter = Converter::standard();

    let decoded = decode(&converter, "79.49346/-87.33081").unwrap();
    let expected = converter.to_local(GeoCoord::new(-87.33081, 79.49346)).unwrap();

    assert!((decoded.x() - expected.x()).abs() < 1e-9);
    assert!((decoded.y() - expected.y()).abs() < 1e-9);
}

#[test]
fn decode_ignores_extra_segments() {
    let converter = Converter::standard();

    assert_eq!(
        decode(&converter, "52.2297/21.0122/extra"),
        decode(&converter, "52.2297/21.0122"),
    );
    assert_eq!(
        decode(&converter, "/52.2297/21.0122"),
        decode(&converter, "52.2297/21.0122"),
    );
}

#[test]
fn encoded_path_decodes_to_same_place() {
    let converter = Converter::standard();
    let center = converter.to_local(GeoCoord::new(20.6915, 49.6249)).unwrap();

    let path = encode(&converter, center).unwrap();
    let restored = decode(&converter, &path).unwrap();

    // Five decimals of a degree are about a meter; LOCAL units are ~1/18 m
    assert!((restored.x() - center.x()).abs() < 30.);
    assert!((restored.y() - center.y()).abs() < 30.);
}

#[test]
fn view_path_parse_errors() {
    let err = "52.1".parse::<ViewPath>().unwrap_err();
    assert!(matches!(err, orthoview::Error::InvalidPath(_)));
    assert_eq!(err.to_string(), "View path is invalid: Missing Longitude");

    let err = "x/19".parse::<ViewPath>().unwrap_err();
    assert_eq!(err.to_string(), "View path is invalid: Latitude x is not a number");
}
