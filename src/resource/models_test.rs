//! Tests for resource models.

use crate::resource::*;

#[test]
fn score_defaults_progress_values() {
    let score = Score::new("user-1");
    assert_eq!(score.activity_progress, ActivityProgress::Initialized);
    assert_eq!(score.grading_progress, GradingProgress::NotReady);
    assert_eq!(score.score_pair(), None);
}

#[test]
fn score_pair_requires_both_halves() {
    let mut score = Score::new("user-1");
    score.score_given = Some(3.0);
    assert_eq!(score.score_pair(), None);

    score.score_maximum = Some(10.0);
    assert_eq!(score.score_pair(), Some((3.0, 10.0)));
}

#[test]
fn progress_enums_roundtrip_through_strings() {
    for progress in [
        ActivityProgress::Initialized,
        ActivityProgress::Started,
        ActivityProgress::InProgress,
        ActivityProgress::Submitted,
        ActivityProgress::Completed,
    ] {
        assert_eq!(progress.to_string().parse::<ActivityProgress>(), Ok(progress));
    }

    for progress in [
        GradingProgress::FullyGraded,
        GradingProgress::Pending,
        GradingProgress::PendingManual,
        GradingProgress::Failed,
        GradingProgress::NotReady,
    ] {
        assert_eq!(progress.to_string().parse::<GradingProgress>(), Ok(progress));
    }
}

#[test]
fn progress_parsing_is_case_sensitive() {
    assert!("completed".parse::<ActivityProgress>().is_err());
    assert!("FULLYGRADED".parse::<GradingProgress>().is_err());
}

#[test]
fn container_has_next_only_with_non_empty_link() {
    let item = LineItem::new("ctx", 10.0, "Quiz");

    let container = LineItemContainer::new(vec![item.clone()], None);
    assert!(!container.has_next());

    let container = LineItemContainer::new(vec![item.clone()], Some(String::new()));
    assert!(!container.has_next());
    assert_eq!(container.relation_link(), None);

    let container = LineItemContainer::new(vec![item], Some("https://h.com/ctx/lineitems?page=2".into()));
    assert!(container.has_next());
    assert_eq!(container.len(), 1);
}

#[test]
fn result_container_mirrors_line_item_container() {
    let container = ResultContainer::new(vec![GradeResult::new("u", "https://h.com/ctx/lineitems/1")], None);
    assert!(!container.has_next());
    assert!(!container.is_empty());
    assert_eq!(container.results()[0].user_identifier, "u");
}
