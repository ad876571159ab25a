//! Deck-level round trips through the serialized document.

use super::*;
use crate::ooxml::charts::ChartType;
use crate::ooxml::pptx::reader::inspect;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR\x00\x00\x00\x01\x00\x00\x00\x01";

fn deck() -> Deck {
    Deck::with_created(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
}

fn row(pairs: &[(&str, &str)]) -> TableRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn assert_round_trip(deck: &Deck) {
    let summaries = inspect(&deck.serialize().unwrap()).unwrap();
    let kinds: Vec<SlideKind> = summaries.iter().map(|s| s.kind).collect();
    let titles: Vec<&str> = summaries.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(kinds, deck.kinds());
    assert_eq!(titles, deck.titles());
}

#[test]
fn test_title_only_round_trip() {
    let mut deck = deck();
    deck.add_title("Solo", "").unwrap();
    assert_round_trip(&deck);
}

#[test]
fn test_title_and_bar_chart_round_trip() {
    let mut deck = deck();
    deck.add_title("Report", "2024").unwrap();
    deck.add_bar_chart("Sales", ["A", "B", "C"], &[10.0, 20.0, 30.0])
        .unwrap();
    assert_round_trip(&deck);

    let summaries = inspect(&deck.serialize().unwrap()).unwrap();
    let chart = summaries[1].chart.as_ref().unwrap();
    assert_eq!(chart.chart_type, ChartType::Bar);
    assert_eq!(chart.series[0].title.as_deref(), Some(DEFAULT_SERIES_NAME));
    assert_eq!(chart.series[0].categories, vec!["A", "B", "C"]);
    assert_eq!(chart.series[0].values, vec![10.0, 20.0, 30.0]);
}

#[test]
fn test_title_table_image_round_trip() {
    let mut deck = deck();
    deck.add_title("Plans", "").unwrap();
    deck.add_table(
        "Pricing Plans",
        &[
            row(&[("Plan", "Free"), ("Price", "Free")]),
            row(&[("Price", "$10 <monthly>"), ("Plan", "Pro & Team")]),
        ],
    )
    .unwrap();
    deck.add_image("Logo", PNG.to_vec(), 914_400, 914_400).unwrap();
    assert_round_trip(&deck);

    let summaries = inspect(&deck.serialize().unwrap()).unwrap();
    assert_eq!(
        summaries[1].table,
        vec![
            vec!["Plan", "Price"],
            vec!["Free", "Free"],
            vec!["Pro & Team", "$10 <monthly>"],
        ]
    );
}

#[test]
fn test_text_body_kept_verbatim() {
    let mut deck = deck();
    deck.add_text("About", "First line\n  second <line> & more")
        .unwrap();
    let summaries = inspect(&deck.serialize().unwrap()).unwrap();
    assert_eq!(summaries[0].kind, SlideKind::TextBox);
    assert_eq!(
        summaries[0].paragraphs.join("\n"),
        "First line\n  second <line> & more"
    );
}

#[test]
fn test_chart_labels_round_trip_unchanged() {
    let mut deck = deck();
    deck.add_chart(
        "Plans",
        ChartType::Bar,
        "Revenue & cost",
        ["Pro & Team", " padded ", "<Enterprise>"],
        &[1.0, 2.0, 3.0],
    )
    .unwrap();
    let summaries = inspect(&deck.serialize().unwrap()).unwrap();
    let series = &summaries[0].chart.as_ref().unwrap().series[0];
    assert_eq!(series.title.as_deref(), Some("Revenue & cost"));
    assert_eq!(series.categories, vec!["Pro & Team", " padded ", "<Enterprise>"]);
}

#[test]
fn test_line_endings_round_trip_unchanged() {
    let texts = ["Topic\n", "Q1\r\nreview", "Pricing\n\n", "\n", ""];
    let mut deck = deck();
    deck.add_title(texts[0], texts[1]).unwrap();
    for text in texts {
        deck.add_text(text, text).unwrap();
    }
    assert_round_trip(&deck);

    let summaries = inspect(&deck.serialize().unwrap()).unwrap();
    assert_eq!(summaries[0].subtitle.as_deref(), Some(texts[1]));
    for (summary, text) in summaries[1..].iter().zip(texts) {
        assert_eq!(summary.paragraphs.join("\n"), text);
    }
}

#[test]
fn test_bullets_round_trip_count() {
    let mut deck = deck();
    deck.add_bullets("Key Points", "A. B. C").unwrap();
    let summaries = inspect(&deck.serialize().unwrap()).unwrap();
    assert_eq!(summaries[0].bullet_count(), 3);
    assert_eq!(summaries[0].paragraphs, vec!["A", "B", "C"]);
}

#[test]
fn test_serialize_is_idempotent_and_non_destructive() {
    let mut deck = deck();
    deck.add_title("Deck", "Sub").unwrap();
    deck.add_pie_chart("Share", ["X", "Y"], &[1.0, 3.0]).unwrap();

    let first = deck.serialize().unwrap();
    let second = deck.serialize().unwrap();
    assert_eq!(first, second);

    deck.add_text("More", "appended after serializing").unwrap();
    assert_eq!(inspect(&deck.serialize().unwrap()).unwrap().len(), 3);
}

#[test]
fn test_failed_append_leaves_deck_unchanged() {
    let mut deck = deck();
    deck.add_title("Deck", "").unwrap();
    let before = deck.serialize().unwrap();

    assert!(deck.add_bar_chart("Bad", ["A"], &[]).is_err());
    assert!(deck.add_table("Bad", &[]).is_err());
    assert!(deck.add_image("Bad", Vec::<u8>::new(), 1, 1).is_err());
    assert_eq!(deck.serialize().unwrap(), before);
}

fn arb_append() -> impl Strategy<Value = u8> {
    0u8..6
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_slide_count_and_order_survive(ops in prop::collection::vec(arb_append(), 1..8)) {
        let mut deck = deck();
        for (i, op) in ops.iter().enumerate() {
            let title = format!("Slide {}", i);
            match op {
                0 => deck.add_title(&title, "sub").unwrap(),
                1 => deck.add_bar_chart(&title, ["A", "B"], &[1.0, 2.0]).unwrap(),
                2 => deck.add_pie_chart(&title, ["A"], &[1.0]).unwrap(),
                3 => deck.add_text(&title, "body").unwrap(),
                4 => {
                    deck.add_bullets(&title, "one. two").unwrap();
                },
                _ => deck.add_table(&title, &[row(&[("K", "V")])]).unwrap(),
            }
        }
        let summaries = inspect(&deck.serialize().unwrap()).unwrap();
        prop_assert_eq!(summaries.len(), ops.len());
        let kinds: Vec<SlideKind> = summaries.iter().map(|s| s.kind).collect();
        prop_assert_eq!(kinds, deck.kinds());
        let titles: Vec<&str> = summaries.iter().map(|s| s.title.as_str()).collect();
        prop_assert_eq!(titles, deck.titles());
    }
}
