//! Retraining threshold behaviour against a real artifact path.

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use triage_core::dataset::{DatasetSnapshot, TrainingRow};
use triage_model::{ClassifierArtifact, FullRefitRetrainer, RetrainOutcome, Retrainer, TrainingParams};

fn snapshot(rows: &[(&str, &str)]) -> DatasetSnapshot {
    DatasetSnapshot {
        rows: rows
            .iter()
            .map(|(text, label)| TrainingRow {
                anamnesis: (*text).to_string(),
                label: (*label).to_string(),
            })
            .collect(),
        dropped: 0,
    }
}

fn retrainer(temp: &TempDir) -> FullRefitRetrainer {
    FullRefitRetrainer::new(temp.path().join(".triage/model.json"), TrainingParams::default())
}

#[test]
fn below_threshold_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let retrainer = retrainer(&temp);

    let outcome = retrainer
        .maybe_retrain(&snapshot(&[("febre", "admit"), ("tosse", "discharge_with_medication")]))
        .unwrap();

    assert_eq!(
        outcome,
        RetrainOutcome::NotReady {
            valid_rows: 2,
            min_rows: 3
        }
    );
    assert!(!retrainer.artifact_path().exists());
}

#[test]
fn empty_history_is_not_ready() {
    let temp = TempDir::new().unwrap();
    let retrainer = FullRefitRetrainer::new(
        temp.path().join("model.json"),
        TrainingParams {
            min_rows: 0,
            ..TrainingParams::default()
        },
    );
    let outcome = retrainer.maybe_retrain(&DatasetSnapshot::default()).unwrap();
    assert!(matches!(outcome, RetrainOutcome::NotReady { valid_rows: 0, .. }));
}

#[test]
fn third_row_creates_artifact() {
    let temp = TempDir::new().unwrap();
    let retrainer = retrainer(&temp);

    let outcome = retrainer
        .maybe_retrain(&snapshot(&[
            ("febre alta", "admit"),
            ("tosse leve", "discharge_with_medication"),
            ("vômito", "admit"),
        ]))
        .unwrap();

    match outcome {
        RetrainOutcome::Retrained {
            rows,
            vocabulary_size,
            classes,
        } => {
            assert_eq!(rows, 3);
            assert_eq!(vocabulary_size, 5);
            assert_eq!(classes, vec!["admit", "discharge_with_medication"]);
        }
        other => panic!("expected a retrain, got {other:?}"),
    }

    let artifact = ClassifierArtifact::load(retrainer.artifact_path())
        .unwrap()
        .unwrap();
    assert_eq!(artifact.rows, 3);
}

#[test]
fn single_class_history_still_writes_artifact() {
    let temp = TempDir::new().unwrap();
    let retrainer = retrainer(&temp);

    retrainer
        .maybe_retrain(&snapshot(&[("febre", "admit"), ("vômito", "admit"), ("apatia", "admit")]))
        .unwrap();

    let artifact = ClassifierArtifact::load(retrainer.artifact_path())
        .unwrap()
        .unwrap();
    assert_eq!(artifact.predict("tosse").unwrap().label, "admit");
}

#[test]
fn later_retrain_overwrites_previous_artifact() {
    let temp = TempDir::new().unwrap();
    let retrainer = retrainer(&temp);
    let mut rows = vec![("febre", "admit"), ("vômito", "admit"), ("apatia", "admit")];

    retrainer.maybe_retrain(&snapshot(&rows)).unwrap();
    rows.push(("tosse", "discharge_with_medication"));
    retrainer.maybe_retrain(&snapshot(&rows)).unwrap();

    let artifact = ClassifierArtifact::load(retrainer.artifact_path())
        .unwrap()
        .unwrap();
    assert_eq!(artifact.rows, 4);
    assert_eq!(artifact.classifier.classes().len(), 2);
}

#[test]
fn retrainer_is_usable_as_trait_object() {
    let temp = TempDir::new().unwrap();
    let boxed: Box<dyn Retrainer> = Box::new(retrainer(&temp));
    let outcome = boxed.maybe_retrain(&snapshot(&[("febre", "admit")])).unwrap();
    assert!(matches!(outcome, RetrainOutcome::NotReady { .. }));
}
