use super::*;

const ALL: [Ease; 3] = [Ease::Linear, Ease::OutCubic, Ease::InOutCubic];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
        assert_eq!(ease.apply(f64::NAN), 0.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn in_out_cubic_is_symmetric_around_half() {
    let e = Ease::InOutCubic;
    assert_eq!(e.apply(0.5), 0.5);
    assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    assert!(Ease::OutCubic.apply(0.25) > Ease::Linear.apply(0.25));
}

#[test]
fn progress_clamps_past_duration() {
    assert_eq!(Ease::Linear.progress(400, 800), 0.5);
    assert_eq!(Ease::InOutCubic.progress(2_000, 800), 1.0);
    assert_eq!(Ease::Linear.progress(5, 0), 1.0);
}

#[test]
fn serde_names_are_snake_case() {
    let e: Ease = serde_json::from_str("\"out_cubic\"").unwrap();
    assert_eq!(e, Ease::OutCubic);
    assert_eq!(serde_json::to_string(&Ease::default()).unwrap(), "\"in_out_cubic\"");
    assert!(serde_json::from_str::<Ease>("\"in_quad\"").is_err());
}
