//! Algebraic properties of the row filter.

use elev_model::{IndicatorRow, Kjoenn, Selection, Trinn, YearId};
use elev_transform::filter_rows;
use proptest::prelude::*;

fn optional(values: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        proptest::sample::select(values).prop_map(|v| Some(v.to_string())),
    ]
}

fn row() -> impl Strategy<Value = IndicatorRow> {
    (
        optional(&["2021-22", "2022-23", "2023-24"]),
        optional(&["Vg trinn 1", "Vg trinn 2", "Vg trinn 3", "Alle trinn", ""]),
        optional(&["Alle kjønn", "Gutt", "Jente"]),
    )
        .prop_map(|(skoleaar, trinn, kjoenn)| IndicatorRow {
            skoleaar,
            trinn,
            kjoenn,
            ..IndicatorRow::default()
        })
}

fn selection() -> impl Strategy<Value = Selection> {
    (
        proptest::option::of(proptest::sample::select(vec![
            YearId::new(20212022),
            YearId::new(20222023),
            YearId::new(20232024),
        ])),
        proptest::sample::select(vec![Trinn::Alle, Trinn::Vg1, Trinn::Vg2, Trinn::Vg3]),
        proptest::sample::select(vec![Kjoenn::Alle, Kjoenn::Gutt, Kjoenn::Jente]),
    )
        .prop_map(|(year, trinn, kjoenn)| Selection { year, trinn, kjoenn })
}

proptest! {
    #[test]
    fn identity_selection_keeps_everything(rows in proptest::collection::vec(row(), 0..40)) {
        let filtered = filter_rows(&rows, &Selection::default());
        prop_assert_eq!(filtered, rows);
    }

    #[test]
    fn filtering_is_idempotent(
        rows in proptest::collection::vec(row(), 0..40),
        selection in selection(),
    ) {
        let once = filter_rows(&rows, &selection);
        let twice = filter_rows(&once, &selection);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filtered_rows_are_an_ordered_subset(
        rows in proptest::collection::vec(row(), 0..40),
        selection in selection(),
    ) {
        let filtered = filter_rows(&rows, &selection);
        prop_assert!(filtered.len() <= rows.len());
        let mut remaining = rows.iter();
        for kept in &filtered {
            prop_assert!(remaining.any(|row| row == kept));
        }
    }
}
