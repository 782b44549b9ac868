//! Integration tests for the Panel container, descriptor, and scitype checks.

use ndarray::{arr1, arr2};
use panel_regressors::datatypes::{
    check_is_scitype, Dataset, FeatureName, Panel, PanelDescriptor, PanelInstance, Scitype,
    ScitypeMetadata,
};

fn univariate_panel(series: &[&[f64]]) -> Panel {
    let instances = series
        .iter()
        .map(|values| {
            let column: Vec<[f64; 1]> = values.iter().map(|&v| [v]).collect();
            PanelInstance::from_values(arr2(&column))
        })
        .collect();
    Panel::new(instances, None).unwrap()
}

// ---------------------------------------------------------------------------
// PanelDescriptor
// ---------------------------------------------------------------------------

#[test]
fn default_descriptor_is_fully_unknown() {
    let desc = PanelDescriptor::default();
    assert_eq!(desc.is_univariate, None);
    assert_eq!(desc.is_equally_spaced, None);
    assert_eq!(desc.is_equal_length, None);
    assert_eq!(desc.is_empty, None);
    assert_eq!(desc.is_one_series, None);
    assert_eq!(desc.has_nans, None);
    assert_eq!(desc.n_instances, None);
    assert_eq!(desc.n_features, None);
    assert_eq!(desc.feature_names, None);
    assert_eq!(desc.scitype(), Scitype::Panel);
}

#[test]
fn descriptor_equality_is_by_value() {
    let a = PanelDescriptor {
        is_univariate: Some(true),
        n_features: Some(1),
        ..PanelDescriptor::default()
    };
    let b = PanelDescriptor {
        is_univariate: Some(true),
        n_features: Some(1),
        ..PanelDescriptor::default()
    };
    assert_eq!(a, b);
    assert_ne!(a, PanelDescriptor::default());
}

#[test]
fn empty_panel_descriptor_invariant() {
    let desc = PanelDescriptor::from_panel(&Panel::empty());
    assert_eq!(desc.is_empty, Some(true));
    // is_empty implies zero instances or zero features
    assert!(desc.n_instances == Some(0) || desc.n_features == Some(0));
    assert_eq!(desc.is_one_series, Some(false));
}

#[test]
fn multivariate_panel_descriptor_fields() {
    let panel = Panel::new(
        vec![
            PanelInstance::from_values(arr2(&[[1.0, 2.0], [3.0, 4.0]])),
            PanelInstance::from_values(arr2(&[[5.0, 6.0], [7.0, 8.0]])),
        ],
        Some(vec![
            FeatureName::Named("pressure".to_string()),
            FeatureName::Named("flow".to_string()),
        ]),
    )
    .unwrap();

    let desc = PanelDescriptor::from_panel(&panel);
    assert_eq!(desc.is_univariate, Some(false));
    assert_eq!(desc.is_empty, Some(false));
    assert_eq!(desc.is_one_series, Some(false));
    assert_eq!(desc.is_equal_length, Some(true));
    assert_eq!(desc.has_nans, Some(false));
    assert_eq!(desc.n_instances, Some(2));
    assert_eq!(desc.n_features, Some(2));

    let names = desc.feature_names.unwrap();
    assert_eq!(names.len(), 2); // len(feature_names) == n_features
}

#[test]
fn unequal_length_and_nans_are_detected() {
    let panel = univariate_panel(&[&[1.0, 2.0, 3.0], &[f64::NAN, 5.0]]);
    let desc = PanelDescriptor::from_panel(&panel);
    assert_eq!(desc.is_equal_length, Some(false));
    assert_eq!(desc.has_nans, Some(true));
    assert_eq!(desc.is_univariate, Some(true));
}

#[test]
fn single_instance_panel_is_one_series() {
    let panel = univariate_panel(&[&[1.0, 2.0, 3.0]]);
    let desc = PanelDescriptor::from_panel(&panel);
    assert_eq!(desc.is_one_series, Some(true));
    assert_eq!(desc.n_instances, Some(1));
}

#[test]
fn explicit_uniform_index_is_equally_spaced() {
    let regular = PanelInstance::with_index(
        arr2(&[[1.0], [2.0], [3.0]]),
        vec![0.0, 0.5, 1.0],
    )
    .unwrap();
    let panel = Panel::new(vec![regular], None).unwrap();
    assert_eq!(
        PanelDescriptor::from_panel(&panel).is_equally_spaced,
        Some(true)
    );

    let irregular = PanelInstance::with_index(
        arr2(&[[1.0], [2.0], [3.0]]),
        vec![0.0, 0.5, 2.0],
    )
    .unwrap();
    let panel = Panel::new(vec![irregular], None).unwrap();
    assert_eq!(
        PanelDescriptor::from_panel(&panel).is_equally_spaced,
        Some(false)
    );
}

#[test]
fn step_must_agree_across_instances() {
    // Both instances are internally uniform but with different step sizes.
    let a = PanelInstance::with_index(arr2(&[[1.0], [2.0]]), vec![0.0, 1.0]).unwrap();
    let b = PanelInstance::with_index(arr2(&[[3.0], [4.0]]), vec![0.0, 2.0]).unwrap();
    let panel = Panel::new(vec![a, b], None).unwrap();
    assert_eq!(
        PanelDescriptor::from_panel(&panel).is_equally_spaced,
        Some(false)
    );
}

// ---------------------------------------------------------------------------
// Panel construction
// ---------------------------------------------------------------------------

#[test]
fn panel_rejects_mixed_feature_counts() {
    let result = Panel::new(
        vec![
            PanelInstance::from_values(arr2(&[[1.0], [2.0]])),
            PanelInstance::from_values(arr2(&[[1.0, 2.0], [3.0, 4.0]])),
        ],
        None,
    );
    assert!(result.is_err());
}

#[test]
fn panel_rejects_wrong_feature_name_count() {
    let result = Panel::new(
        vec![PanelInstance::from_values(arr2(&[[1.0, 2.0]]))],
        Some(vec![FeatureName::Index(0)]),
    );
    assert!(result.is_err());
}

#[test]
fn instance_rejects_wrong_index_length() {
    let result = PanelInstance::with_index(arr2(&[[1.0], [2.0], [3.0]]), vec![0.0, 1.0]);
    assert!(result.is_err());
}

#[test]
fn to_univariate_keeps_first_feature() {
    let panel = Panel::new(
        vec![PanelInstance::from_values(arr2(&[[1.0, 9.0], [2.0, 8.0]]))],
        None,
    )
    .unwrap();
    let coerced = panel.to_univariate();
    assert_eq!(coerced.n_features(), 1);
    assert_eq!(coerced.instance(0).values()[(0, 0)], 1.0);
    assert_eq!(coerced.instance(0).values()[(1, 0)], 2.0);
}

// ---------------------------------------------------------------------------
// check_is_scitype
// ---------------------------------------------------------------------------

#[test]
fn panel_payload_matches_panel_scitype() {
    let panel = univariate_panel(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
    let (is_match, actual, metadata) =
        check_is_scitype(&Dataset::Panel(panel), Scitype::Panel);
    assert!(is_match);
    assert_eq!(actual, Scitype::Panel);
    assert_eq!(metadata.n_instances(), 3);
    match metadata {
        ScitypeMetadata::Panel(desc) => assert_eq!(desc.is_univariate, Some(true)),
        other => panic!("expected panel metadata, got {:?}", other),
    }
}

#[test]
fn mismatched_expectation_reports_actual_scitype() {
    let table = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
    let (is_match, actual, metadata) =
        check_is_scitype(&Dataset::Table(table), Scitype::Panel);
    assert!(!is_match);
    assert_eq!(actual, Scitype::Table);
    // Table rows count as instances.
    assert_eq!(metadata.n_instances(), 2);
}

#[test]
fn series_payload_counts_as_one_instance() {
    let series = arr1(&[1.0, 2.0, 3.0]);
    let (is_match, actual, metadata) =
        check_is_scitype(&Dataset::Series(series), Scitype::Series);
    assert!(is_match);
    assert_eq!(actual, Scitype::Series);
    assert_eq!(metadata.n_instances(), 1);
}
