//! End-to-end behaviour of the three analyzers on small, hand-checked inputs.

use column_analysis::analyzers::{
    AnalysisKind, AnalysisResult, Category, ColumnAnalysis, ColumnAnalyzer, ColumnIter,
    DistributionAnalyzer, LabelCounts, SpreadAnalyzer, SpreadPoint, StatisticsAnalyzer,
    DEFAULT_OTHERS_LABEL,
};

fn labelled(values: &[&str]) -> Vec<Vec<String>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| vec![v.to_string(), format!("L{}", i % 3)])
        .collect()
}

#[test]
fn test_discrete_spread_example() {
    let rows = vec![["1", "A"], ["0", "A"], ["1", "B"]];
    let result = SpreadAnalyzer::new().analyze(ColumnIter::new(&rows, 1, 0).unwrap());

    let spread = result.as_discrete_spread().unwrap();
    assert_eq!(spread.labels.len(), 2);
    assert_eq!(spread.get("A"), Some(LabelCounts::new(1, 1)));
    assert_eq!(spread.get("B"), Some(LabelCounts::new(1, 0)));
}

#[test]
fn test_statistics_example() {
    let rows = labelled(&["1", "2", "3", "4", "5"]);
    let result = StatisticsAnalyzer::new().analyze(ColumnIter::new(&rows, 1, 0).unwrap());

    let stats = result.as_statistics().unwrap();
    assert_eq!(stats.count, 5);
    assert_eq!(stats.min, Some(1.0));
    assert_eq!(stats.median, Some(3.0));
    assert_eq!(stats.mean, Some(3.0));
    assert_eq!(stats.max, Some(5.0));
}

#[test]
fn test_distribution_threshold_example() {
    let mut values = vec!["X"; 148];
    values.extend(["Y", "Y"]);
    let rows = labelled(&values);

    let analyzer = DistributionAnalyzer::new();
    assert_eq!(analyzer.threshold(150), 1);

    let result = analyzer.analyze(ColumnIter::new(&rows, 1, 0).unwrap());
    let dist = result.as_distribution().unwrap();
    assert_eq!(
        dist.categories,
        vec![Category::new("X", 148), Category::new("Y", 2)]
    );
    assert!(dist.others.is_none());
}

#[test]
fn test_singletons_fold_into_others() {
    let mut values = vec!["X"; 147];
    values.extend(["Y", "Y", "Z"]);
    let rows = labelled(&values);

    let result = DistributionAnalyzer::new().analyze(ColumnIter::new(&rows, 1, 0).unwrap());
    let dist = result.as_distribution().unwrap();
    assert_eq!(dist.count_of("Z"), None);
    assert_eq!(dist.others, Some(Category::new(DEFAULT_OTHERS_LABEL, 1)));
    assert_eq!(dist.total(), 150);
}

#[test]
fn test_tie_goes_low() {
    let rows = vec![["1", "a"], ["3", "b"], ["2", "c"]];
    let result = SpreadAnalyzer::new().analyze(ColumnIter::new(&rows, 1, 0).unwrap());

    let spread = result.as_continuous_spread().unwrap();
    assert_eq!(spread.mean, 2.0);
    assert_eq!(spread.high, vec![SpreadPoint::new("b", 3.0)]);
    assert!(spread.low.contains(&SpreadPoint::new("c", 2.0)));
}

#[test]
fn test_zero_data_results_are_not_errors() {
    let rows = vec![["abc", "A"], ["", "B"], ["1,5", "C"]];

    for kind in [AnalysisKind::Spread, AnalysisKind::Statistics] {
        let result = ColumnAnalysis::from(kind).analyze(&rows, 1, 0).unwrap();
        assert!(result.is_empty(), "{kind} should yield an empty result");
    }
    assert_eq!(
        ColumnAnalysis::from(AnalysisKind::Spread)
            .analyze(&rows, 1, 0)
            .unwrap(),
        AnalysisResult::NoData
    );
}

#[test]
fn test_empty_dataset_for_every_analysis() {
    let rows: Vec<Vec<String>> = Vec::new();
    for kind in AnalysisKind::ALL {
        let result = ColumnAnalysis::from(kind).analyze(&rows, 0, 1).unwrap();
        assert!(result.is_empty());
    }
}

#[test]
fn test_short_row_is_reported() {
    let rows = vec![vec!["1", "A"], vec!["2"]];
    let err = ColumnAnalysis::from(AnalysisKind::Statistics)
        .analyze(&rows, 1, 0)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Row 1 has 1 fields but at least 2 are required"
    );
}
