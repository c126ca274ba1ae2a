// Integration tests for anomx
use anomx::prelude::*;
use std::time::Duration;

/// Deterministic feature window: `quiet` low-jitter rows followed by
/// `spikes` strong outliers, `dim` features each.
fn window(quiet: usize, spikes: usize, dim: usize) -> FeatureMatrix {
    let mut rows = Vec::with_capacity(quiet + spikes);
    for i in 0..quiet {
        let jitter = (i as f32 * 0.37).sin() * 0.05;
        rows.push((0..dim).map(|j| jitter * (j as f32 + 1.0)).collect::<Vec<f32>>());
    }
    for i in 0..spikes {
        let spike = 12.0 + i as f32;
        rows.push(vec![spike; dim]);
    }
    FeatureMatrix::from_rows(&rows).unwrap()
}

#[test]
fn test_pure_numeric_scenario() {
    // Fit on 100 rows of 5-dim features with no explanations, then predict
    // a 20-row window: pure base-scorer logic, length preserved.
    let mut detector = SemiSupervisedDetector::with_defaults(DetectorConfig::default()).unwrap();
    detector.fit(&window(95, 5, 5), None).unwrap();

    let infer = window(18, 2, 5);
    let labels = detector.predict(&infer, None).unwrap();
    assert_eq!(labels.len(), 20);

    let scores = detector.score_samples(&infer).unwrap();
    assert_eq!(scores.len(), 20);
    // Spike rows score strictly more anomalous than quiet rows.
    assert!(scores[19] > scores[0]);
    assert_eq!(labels[19], Label::Anomaly);
}

#[test]
fn test_supervision_off_matches_bare_scorer() {
    let train = window(95, 5, 3);
    let infer = window(10, 2, 3);

    let config = DetectorConfig {
        use_text_supervision: false,
        ..DetectorConfig::default()
    };
    let mut bare = DeviationEnsemble::new(
        config.contamination,
        config.n_estimators,
        config.random_state,
    );
    bare.fit(&train).unwrap();

    let mut detector = SemiSupervisedDetector::with_defaults(config).unwrap();
    detector
        .fit(&train, Some(&[Explanation::new("ignored when off", true)]))
        .unwrap();

    let exps: Vec<Explanation> = (0..infer.rows())
        .map(|_| Explanation::new("ignored when off", true))
        .collect();
    assert_eq!(
        detector.predict(&infer, Some(&exps)).unwrap(),
        bare.predict(&infer).unwrap()
    );
}

#[test]
fn test_seeded_store_promotes_matching_row() {
    let mut detector = SemiSupervisedDetector::with_defaults(DetectorConfig::default()).unwrap();
    let seed = vec![Explanation::new(
        "flash crash triggered by cascading liquidations",
        true,
    )];
    detector.fit(&window(95, 5, 4), Some(&seed)).unwrap();
    assert_eq!(detector.store().len(), 1);

    // Row 0 is quiet: the base scorer calls it normal.
    let infer = window(3, 0, 4);
    let base = detector.predict(&infer, None).unwrap();
    assert_eq!(base[0], Label::Normal);

    // Identical explanation text embeds to cosine 1.0 against the store,
    // comfortably over the 0.7 threshold, and asserts anomaly itself.
    let exps = vec![
        Explanation::new("flash crash triggered by cascading liquidations", true),
        Explanation::new("", false),
        Explanation::new("", false),
    ];
    let fused = detector.predict(&infer, Some(&exps)).unwrap();
    assert_eq!(fused[0], Label::Anomaly);
    // Empty-text rows keep their base labels.
    assert_eq!(fused[1], base[1]);
    assert_eq!(fused[2], base[2]);
}

#[test]
fn test_override_is_monotone_on_base_anomalies() {
    let mut detector = SemiSupervisedDetector::with_defaults(DetectorConfig::default()).unwrap();
    let seed = vec![Explanation::new("calm rebalancing, nothing unusual", false)];
    detector.fit(&window(95, 5, 4), Some(&seed)).unwrap();

    // The last row is a strong spike: base label anomaly. A highly similar
    // stored record tagged "normal" must not demote it.
    let infer = window(2, 1, 4);
    let exps = vec![
        Explanation::new("", false),
        Explanation::new("", false),
        Explanation::new("calm rebalancing, nothing unusual", true),
    ];
    let labels = detector.predict(&infer, Some(&exps)).unwrap();
    assert_eq!(labels[2], Label::Anomaly);
}

#[test]
fn test_feedback_is_append_only() {
    let mut detector = SemiSupervisedDetector::with_defaults(DetectorConfig::default()).unwrap();
    let seed = vec![Explanation::new("exchange outage halted trading", true)];
    detector.fit(&window(95, 5, 2), Some(&seed)).unwrap();

    let infer = window(1, 0, 2);
    let exps = vec![Explanation::new("weekend liquidity gap", true)];

    // Rejected feedback leaves the store untouched.
    detector
        .update_with_feedback(&infer, &exps, &[false])
        .unwrap();
    assert_eq!(detector.store().len(), 1);

    // Confirmed feedback grows it by exactly the confirmed entries.
    detector
        .update_with_feedback(&infer, &exps, &[true])
        .unwrap();
    assert_eq!(detector.store().len(), 2);
}

#[test]
fn test_snapshot_round_trip_reproduces_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SnapshotManager::new(dir.path()).unwrap();

    let mut detector = SemiSupervisedDetector::with_defaults(DetectorConfig::default()).unwrap();
    let seed = vec![Explanation::new("flash crash", true)];
    detector.fit(&window(95, 5, 3), Some(&seed)).unwrap();

    let infer = window(8, 2, 3);
    let exps: Vec<Explanation> = (0..infer.rows())
        .map(|i| {
            if i == 0 {
                Explanation::new("flash crash", true)
            } else {
                Explanation::default()
            }
        })
        .collect();
    let labels = detector.predict(&infer, Some(&exps)).unwrap();
    let scores = detector.score_samples(&infer).unwrap();

    manager
        .save("round-trip", &DetectorSnapshot::capture(&detector))
        .unwrap();
    let restored = manager
        .load::<DeviationEnsemble>("round-trip")
        .unwrap()
        .unwrap()
        .restore(HashingEmbedder::default())
        .unwrap();

    assert_eq!(restored.predict(&infer, Some(&exps)).unwrap(), labels);
    assert_eq!(restored.score_samples(&infer).unwrap(), scores);
    assert_eq!(restored.store().len(), detector.store().len());
}

#[test]
fn test_result_cache_flow() {
    let mut detector = SemiSupervisedDetector::with_defaults(DetectorConfig::default()).unwrap();
    detector.fit(&window(95, 5, 3), None).unwrap();

    let infer = window(10, 1, 3);
    let cache = ResultCache::new(Duration::from_secs(300));
    let key = window_fingerprint(&infer);

    // Miss: run detection and fill the cache.
    assert!(cache.get(&key).is_none());
    let result = CachedResult {
        labels: detector.predict(&infer, None).unwrap(),
        scores: detector.score_samples(&infer).unwrap(),
    };
    cache.insert(key.clone(), result.clone());

    // Hit: identical window, identical result, no detector call needed.
    assert_eq!(cache.get(&key), Some(result));

    // A different window misses.
    let other = window(10, 2, 3);
    assert!(cache.get(&window_fingerprint(&other)).is_none());
}
