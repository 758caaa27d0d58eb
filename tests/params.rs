use cubesubdiv::{SeedPolicy, SubdivError, SubdivisionParams, DEFAULT_JOIN_TOLERANCE};

#[test]
fn test_params_from_json() {
    let json = r#"{
        "subdiv_dist": 2.0,
        "subdiv_random_rate": 0.25,
        "reduce_dist": 0.5,
        "reduce_random_rate": 0.75,
        "loops": 4,
        "seed": { "fixed": 99 }
    }"#;
    let params: SubdivisionParams = serde_json::from_str(json).unwrap();
    assert_eq!(params.subdiv_dist, 2.0);
    assert_eq!(params.reduce_random_rate, 0.75);
    assert_eq!(params.loops, 4);
    assert_eq!(params.seed, SeedPolicy::Fixed(99));
    // Omitted fields fall back to their defaults.
    assert_eq!(params.join_tolerance, DEFAULT_JOIN_TOLERANCE);
    assert!(params.validate().is_ok());
}

#[test]
fn test_entropy_seed_from_json() {
    let params: SubdivisionParams = serde_json::from_str(r#"{ "loops": 1, "seed": "entropy" }"#).unwrap();
    assert_eq!(params.seed, SeedPolicy::Entropy);
}

#[test]
fn test_json_round_trip_keeps_seed() {
    let params = SubdivisionParams::new(1.0, 0.1, 0.2, 0.3, 2).seeded(5);
    let json = serde_json::to_string(&params).unwrap();
    let back: SubdivisionParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}

#[test]
fn test_negative_loops_from_json_rejected() {
    assert!(serde_json::from_str::<SubdivisionParams>(r#"{ "loops": -2 }"#).is_err());
    assert_eq!(
        SubdivisionParams::with_signed_loops(1.0, 0.0, 0.0, 0.0, -2),
        Err(SubdivError::InvalidRange { name: "loops", value: -2.0 })
    );
}

#[test]
fn test_default_params_round_trip() {
    let params = SubdivisionParams::default();
    let json = serde_json::to_string(&params).unwrap();
    assert!(json.contains(r#""reduce_dist":null"#));
    let back: SubdivisionParams = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
    assert_eq!(back.reduce_dist, f64::NEG_INFINITY);
}

#[test]
fn test_null_reduce_dist_keeps_every_cell() {
    let params: SubdivisionParams = serde_json::from_str(r#"{ "reduce_dist": null, "loops": 2 }"#).unwrap();
    assert_eq!(params.reduce_dist, f64::NEG_INFINITY);
    assert!(params.validate().is_ok());
}
