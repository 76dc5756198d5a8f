use orthoview::{Calibration, Converter, GeoCoord, LocalCoord};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "{actual} differs from {expected} by more than {tol}"
    );
}

/// Deterministic spread of points over [-range, range]^2
fn sample_points(range: f64, count: usize) -> impl Iterator<Item = LocalCoord> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    (0..count).map(move |_| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            #[allow(clippy::cast_precision_loss)]
            let unit = (state >> 11) as f64 / (1_u64 << 53) as f64;
            (unit * 2. - 1.) * range
        };
        let x = next();
        let y = next();
        LocalCoord::new(x, y)
    })
}

#[test]
fn local_round_trip() {
    let converter = Converter::standard();

    let points = sample_points(2_000_000., 5_000)
        .chain([LocalCoord::new(0., 0.), LocalCoord::new(2e6, -2e6), LocalCoord::new(-2e6, 2e6)]);

    for local in points {
        let geo = converter.to_geographic(local).unwrap();
        let back = converter.to_local(geo).unwrap();

        assert_close(back.x(), local.x(), 1e-6 * local.x().abs().max(1.));
        assert_close(back.y(), local.y(), 1e-6 * local.y().abs().max(1.));
    }
}

#[test]
fn origin_maps_to_reference_point() {
    // Inverse projection of the grid point (1209745.0812, -259745.172)
    let geo = orthoview::to_geographic(0., 0.).unwrap();

    assert_close(geo.longitude(), 28.035_028_194_415, 1e-8);
    assert_close(geo.latitude(), 45.170_606_279_512, 1e-8);

    let converter = Converter::standard();
    let direct = converter.unproject(1_209_745.081_2, -259_745.172);
    assert_close(geo.longitude(), direct.longitude(), 1e-12);
    assert_close(geo.latitude(), direct.latitude(), 1e-12);
}

#[test]
fn grid_matches_published_coordinates() {
    let converter = Converter::standard();

    // Warsaw in PUWG 1992
    let (easting, northing) = converter.project(GeoCoord::new(21.0122, 52.2297));
    assert_close(easting, 637_382.204, 1e-3);
    assert_close(northing, 486_757.209, 1e-3);

    let geo = converter.unproject(easting, northing);
    assert_close(geo.longitude(), 21.0122, 1e-9);
    assert_close(geo.latitude(), 52.2297, 1e-9);

    // On the central meridian, at the equator the grid origin sits at
    // (500000, -5300000)
    let (easting, northing) = converter.project(GeoCoord::new(19., 0.));
    assert_close(easting, 500_000., 1e-6);
    assert_close(northing, -5_300_000., 1e-6);
}

#[test]
fn geographic_round_trip_across_poland() {
    let converter = Converter::standard();

    for lon in [14.1, 16.5, 19., 21.0122, 24.15] {
        for lat in [49.0, 50.5, 52.2297, 54.8] {
            let local = orthoview::to_local(lon, lat).unwrap();
            let geo = converter.to_geographic(local).unwrap();

            assert_close(geo.longitude(), lon, 1e-9);
            assert_close(geo.latitude(), lat, 1e-9);
            assert!(geo.haversine(&GeoCoord::new(lon, lat)) < 1e-3);
        }
    }
}

#[test]
fn calibration_is_not_mirrored() {
    let calibration = Calibration::standard();

    let scale_a = calibration.to_geographic_scale;
    let scale_b = calibration.to_local_scale;
    let offset_a = calibration.to_geographic_offset;
    let offset_b = calibration.to_local_offset;

    // The scales are reciprocal, but the offsets are not applied mirrored:
    // the local offset is the geographic one pre-multiplied by its scale.
    assert_close(scale_a * scale_b, 1., 1e-12);
    assert!((scale_a - scale_b).abs() > 1.);
    assert_close(offset_b[0], offset_a[0] * scale_b, 1e-6);
    assert_close(offset_b[1], offset_a[1] * scale_b, 1e-6);
    assert!((offset_b[0] - offset_a[0]).abs() > 1e6);
    assert!((offset_b[1] - offset_a[1]).abs() > 1e6);

    // A naively symmetrized inverse that subtracts the unscaled offset lands
    // far away from the real one
    let converter = Converter::standard();
    let geo = GeoCoord::new(21.0122, 52.2297);
    let (x, y) = converter.project(geo);
    let naive = LocalCoord::new(x * scale_b - offset_a[0], y * scale_b - offset_a[1]);
    let local = converter.to_local(geo).unwrap();

    assert!((naive.x() - local.x()).abs() > 1e6);
    assert!((naive.y() - local.y()).abs() > 1e6);
}

#[test]
fn non_finite_input_is_rejected() {
    let converter = Converter::standard();

    assert!(converter.to_geographic(LocalCoord::new(f64::NAN, 0.)).is_err());
    assert!(converter.to_geographic(LocalCoord::new(0., f64::INFINITY)).is_err());
    assert!(converter.to_local(GeoCoord::new(f64::NEG_INFINITY, 52.)).is_err());
    assert!(matches!(
        orthoview::to_local(21., f64::NAN),
        Err(orthoview::Error::NonFinite(_))
    ));
}

#[test]
fn custom_registry() {
    let registry = orthoview::ProjectionRegistry::from_definitions(
        "+proj=tmerc +lat_0=0 +lon_0=21 +k=0.999923 +x_0=7500000 +y_0=0 +ellps=GRS80 +units=m",
        orthoview::GEOGRAPHIC_DEFINITION,
    )
    .unwrap();
    let converter = Converter::new(registry, Calibration::standard()).unwrap();

    // PL-2000 zone 7: the central meridian maps to the false easting
    let (easting, northing) = converter.project(GeoCoord::new(21., 52.));
    assert_close(easting, 7_500_000., 1e-6);

    let geo = converter.unproject(easting + 25_000., northing);
    assert!(geo.longitude() > 21.);
    assert_close(geo.latitude(), 52., 1e-2);

    let (back_easting, back_northing) = converter.project(geo);
    assert_close(back_easting, easting + 25_000., 1e-6);
    assert_close(back_northing, northing, 1e-6);
}
