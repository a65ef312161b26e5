use agrisk_assessment::estimator::StressEstimator;
use agrisk_assessment::gateway::ModelGateway;
use agrisk_assessment::model::{
    Capability, DecisionTree, ModelArtifact, ModelKind, RandomForest, TreeNode,
};
use agrisk_kernel::domain::observation::{
    EstimateSource, FallbackReason, ObservationInput, RiskTier,
};
use agrisk_kernel::domain::ward::WardRegistry;
use std::sync::Arc;
use std::io::Write;
use std::path::Path;

fn dry_soil_forest() -> ModelArtifact {
    ModelArtifact::RandomForest(RandomForest {
        n_features: 3,
        n_classes: 2,
        trees: vec![DecisionTree {
            nodes: vec![
                TreeNode::Split { feature: 1, threshold: 50.0, left: 1, right: 2 },
                TreeNode::Leaf { value: vec![1.0, 3.0] },
                TreeNode::Leaf { value: vec![4.0, 1.0] },
            ],
        }],
    })
}

fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("create artifact");
    file.write_all(bytes).expect("write artifact");
    path
}

#[test]
fn json_forest_returns_positive_class_probability() {
    let dir = tempfile::tempdir().unwrap();
    let json = serde_json::to_vec(&dry_soil_forest()).unwrap();
    let path = write_artifact(dir.path(), "stress.json", &json);

    let gateway = ModelGateway::new(Some(path));
    let dry = gateway.infer(&ObservationInput::new(30.0, 40.0, 0.5)).unwrap();
    let wet = gateway.infer(&ObservationInput::new(30.0, 80.0, 0.5)).unwrap();
    assert!((dry - 0.75).abs() < 1e-12);
    assert!((wet - 0.2).abs() < 1e-12);

    let status = gateway.status();
    assert!(status.loaded);
    assert_eq!(status.kind, Some(ModelKind::RandomForest));
    assert_eq!(status.capability, Some(Capability::Probability));
}

#[test]
fn binary_artifacts_are_decoded_with_postcard() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = postcard::to_stdvec(&dry_soil_forest()).unwrap();
    let path = write_artifact(dir.path(), "stress.bin", &bytes);

    let gateway = ModelGateway::new(Some(path));
    assert!((gateway.infer(&ObservationInput::new(30.0, 40.0, 0.5)).unwrap() - 0.75).abs() < 1e-12);
}

#[test]
fn artifact_is_loaded_once() {
    let dir = tempfile::tempdir().unwrap();
    let json = serde_json::to_vec(&dry_soil_forest()).unwrap();
    let path = write_artifact(dir.path(), "stress.json", &json);

    let gateway = ModelGateway::new(Some(path.clone()));
    assert!(gateway.warm_up());

    std::fs::write(&path, b"corrupted").unwrap();
    assert!(gateway.infer(&ObservationInput::new(30.0, 40.0, 0.5)).is_ok());
    assert!(gateway.status().loaded);
}

#[test]
fn undecodable_artifact_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(dir.path(), "stress.json", b"{ \"gradient_boosting\": {} }");

    let gateway = ModelGateway::new(Some(path));
    let err = gateway.infer(&ObservationInput::new(30.0, 40.0, 0.5)).unwrap_err();
    assert_eq!(err.fallback_reason(), FallbackReason::ModelUnavailable);

    let status = gateway.status();
    assert!(!status.loaded);
    assert!(status.reason.unwrap().contains("JSON"));
}

#[test]
fn missing_artifact_is_unavailable() {
    let gateway = ModelGateway::new(Some("/nonexistent/stress.json".into()));
    let err = gateway.infer(&ObservationInput::new(30.0, 40.0, 0.5)).unwrap_err();
    assert_eq!(err.fallback_reason(), FallbackReason::ModelUnavailable);
}

#[test]
fn feature_mismatch_is_an_inference_error() {
    let dir = tempfile::tempdir().unwrap();
    let json = br#"{ "logistic_regression": { "coefficients": [0.1, 0.2], "intercept": 0.0 } }"#;
    let path = write_artifact(dir.path(), "stress.json", json);

    let gateway = ModelGateway::new(Some(path));
    let err = gateway.infer(&ObservationInput::new(30.0, 40.0, 0.5)).unwrap_err();
    assert_eq!(err.fallback_reason(), FallbackReason::InferenceError);
    assert!(gateway.status().loaded);
}

#[test]
fn negative_leaf_weights_fall_back_instead_of_exceeding_one() {
    let dir = tempfile::tempdir().unwrap();
    let json = br#"{ "random_forest": { "n_classes": 2, "trees": [ { "nodes": [ { "leaf": { "value": [-1.0, 3.0] } } ] } ] } }"#;
    let path = write_artifact(dir.path(), "stress.json", json);

    let gateway = Arc::new(ModelGateway::new(Some(path)));
    let observation = ObservationInput::new(28.0, 60.0, 0.65);
    let err = gateway.infer(&observation).unwrap_err();
    assert_eq!(err.fallback_reason(), FallbackReason::InferenceError);

    let registry = WardRegistry::gatundu_north();
    let chania = registry.get("Chania Ward").unwrap();
    let estimate = StressEstimator::new(gateway, false).estimate(chania, &observation);
    assert!((estimate.probability - 0.475).abs() < 1e-9);
    assert_eq!(estimate.tier, RiskTier::Moderate);
    assert_eq!(estimate.source, EstimateSource::Fallback { reason: FallbackReason::InferenceError });
}
