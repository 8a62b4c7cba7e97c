//! End-to-end composition tests: widgets onto canvases, checked through
//! the emitted primitives only.

use trifold_compose::widgets::{
    CardGrid, FeatureCard, RankedTable, Step, StepSequence, TextWidget,
};
use trifold_compose::{
    Canvas, ComposeError, Compose, Geometry, Grid, Primitive, Role, Size, Theme, Widget,
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn steps(n: usize) -> Vec<Step> {
    (0..n)
        .map(|i| Step {
            title: format!("STEP {}", i + 1),
            body: "Supply collateral".to_string(),
        })
        .collect()
}

/// Slot `i` starts at `origin + i * (W / N)` and exactly `N - 1` arrows are drawn
#[test]
fn test_step_sequence_slots_and_arrows() {
    let theme = Theme::default();
    for n in 1..=7 {
        let widget = StepSequence {
            at: Geometry::new(0.5, 1.8, 12.3, 2.9),
            steps: steps(n),
        };
        let prims = widget.compose(&theme).unwrap();

        let arrows = prims
            .iter()
            .filter(|p| matches!(p, Primitive::Arrow(_)))
            .count();
        assert_eq!(arrows, n - 1, "arrows for {n} steps");

        let slot = 12.3 / n as f64;
        let cards: Vec<&Geometry> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::RoundedRectangle(shape) => Some(&shape.geometry),
                _ => None,
            })
            .collect();
        assert_eq!(cards.len(), n);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(card.left, 0.5 + i as f64 * slot);
            assert_eq!(widget.slot_left(i), 0.5 + i as f64 * slot);
        }
    }
}

#[test]
fn test_step_sequence_six_steps_matches_slot_layout() {
    let widget = StepSequence {
        at: Geometry::new(0.5, 1.8, 12.3, 2.9),
        steps: steps(6),
    };
    let prims = widget.compose(&Theme::default()).unwrap();
    let ovals: Vec<_> = prims
        .iter()
        .filter_map(|p| match p {
            Primitive::Oval(shape) => Some(shape),
            _ => None,
        })
        .collect();
    assert_eq!(ovals.len(), 6);
    assert_eq!(ovals[5].label.as_ref().unwrap().text, "6");
    assert!((widget.slot_width() - 2.05).abs() < 1e-9);

    // the arrow fills the gap between a card and the next slot
    let first_arrow = prims
        .iter()
        .find_map(|p| match p {
            Primitive::Arrow(shape) => Some(shape.geometry),
            _ => None,
        })
        .unwrap();
    assert!((first_arrow.left - 2.35).abs() < 1e-9);
    assert!((first_arrow.right() - widget.slot_left(1)).abs() < 1e-9);
}

/// Slots narrower than the circle or the arrow gap still lay out
#[test]
fn test_step_sequence_any_width() {
    let theme = Theme::default();
    let cases = [
        (0.0, 1.2, 3),
        (0.0, 12.0, 30),
        (0.5, 1.0, 6),
        (0.0, 0.1, 2),
        (0.3, 0.0, 4),
        (1.25, 7.7, 7),
        (0.5, 12.3, 1),
    ];
    for (origin, width, n) in cases {
        let widget = StepSequence {
            at: Geometry::new(origin, 1.8, width, 2.9),
            steps: steps(n),
        };
        let prims = widget
            .compose(&theme)
            .unwrap_or_else(|e| panic!("({origin}, {width}, {n}): {e}"));
        let slot = width / n as f64;

        let arrows: Vec<&Geometry> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Arrow(shape) => Some(&shape.geometry),
                _ => None,
            })
            .collect();
        assert_eq!(arrows.len(), n - 1, "arrows for ({origin}, {width}, {n})");

        let ovals: Vec<&Geometry> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Oval(shape) => Some(&shape.geometry),
                _ => None,
            })
            .collect();
        assert_eq!(ovals.len(), n);

        for i in 0..n {
            let slot_left = origin + i as f64 * slot;
            assert!((widget.slot_left(i) - slot_left).abs() < 1e-9);

            let circle = ovals[i];
            assert!(circle.left >= slot_left - 1e-9);
            assert!(circle.right() <= slot_left + slot + 1e-9);
            assert!(circle.width <= StepSequence::CIRCLE);

            if i < n - 1 {
                assert!((arrows[i].right() - widget.slot_left(i + 1)).abs() < 1e-9);
            }
        }
        for prim in &prims {
            assert!(prim.geometry().validate().is_ok());
        }
    }
}

#[test]
fn test_step_sequence_requires_steps() {
    let widget = StepSequence {
        at: Geometry::new(0.5, 1.8, 12.3, 2.9),
        steps: Vec::new(),
    };
    let err = widget.compose(&Theme::default()).unwrap_err();
    assert!(matches!(err, ComposeError::InvalidWidget { .. }));
}

#[test]
fn test_table_mismatched_row_emits_nothing() {
    let theme = Theme::default();
    let mut canvas = Canvas::new(1, 1, Size::WIDESCREEN, theme.resolve(Role::Background));
    let table = Widget::RankedTable(RankedTable::new(
        Geometry::new(0.8, 1.2, 11.5, 4.0),
        strings(&["Protocol", "Focus", "Gap"]),
        vec![strings(&["Morpho", "Lending"])],
    ));

    let err = canvas.compose(&table, &theme).unwrap_err();
    assert!(matches!(err, ComposeError::MalformedTable { .. }));
    assert!(canvas.primitives().is_empty());
}

#[test]
fn test_table_header_cells_match_columns() {
    let table = RankedTable::new(
        Geometry::new(0.8, 1.7, 10.0, 3.0),
        strings(&["Leverage", "5% / 3%", "5% / 2%", "8% / 3%"]),
        vec![
            strings(&["1x", "5.0%", "5.0%", "8.0%"]),
            strings(&["2x", "7.0%", "8.0%", "13.0%"]),
        ],
    );
    let theme = Theme::default();
    let prims = table.compose(&theme).unwrap();
    let Primitive::Table(t) = &prims[0] else {
        panic!("expected table");
    };
    assert_eq!(t.header.len(), 4);
    assert!(t
        .header
        .iter()
        .all(|c| c.style.bold && c.style.fill == theme.resolve(Role::Accent)));
    assert_eq!(t.rows[0][0].style.fill, theme.resolve(Role::CardBackground));
    assert_eq!(t.rows[1][0].style.fill, theme.resolve(Role::CardBackgroundAlt));
}

#[test]
fn test_ranked_table_splits_width_equally() {
    let table = RankedTable::new(
        Geometry::new(0.8, 1.2, 9.0, 2.0),
        strings(&["A", "B"]),
        vec![strings(&["1", "2"]), strings(&["3", "4"])],
    );
    let prims = table.compose(&Theme::default()).unwrap();
    let Primitive::Table(t) = &prims[0] else {
        panic!("expected table");
    };
    assert_eq!(t.column_widths, vec![9.0 / 2.0, 9.0 / 2.0]);
}

#[test]
fn test_ranked_table_width_override() {
    let mut table = RankedTable::new(
        Geometry::new(0.8, 1.2, 11.5, 4.0),
        strings(&["Competitor", "What they do", "Superloop advantage"]),
        vec![strings(&["Summer.fi", "Frontend", "Vault abstraction"])],
    );
    table.column_widths = Some(vec![2.3, 4.0, 5.2]);
    table.emphasize = strings(&["Frontend"]);
    let theme = Theme::default();
    let prims = table.compose(&theme).unwrap();
    let Primitive::Table(t) = &prims[0] else {
        panic!("expected table");
    };
    assert_eq!(t.column_widths, vec![2.3, 4.0, 5.2]);
    assert_eq!(t.rows[0][1].style.color, theme.resolve(Role::Highlight));
    assert_eq!(t.rows[0][2].style.color, theme.resolve(Role::TextPrimary));
}

#[test]
fn test_finalize_twice_fails() {
    let theme = Theme::default();
    let mut canvas = Canvas::new(2, 20, Size::WIDESCREEN, theme.resolve(Role::Background));
    canvas
        .compose(
            &Widget::Text(TextWidget::new(Geometry::new(0.8, 0.4, 6.0, 0.6), "THE PROBLEM")),
            &theme,
        )
        .unwrap();
    canvas.finalize().unwrap();

    let err = canvas.finalize().unwrap_err();
    assert!(matches!(err, ComposeError::CanvasClosed { .. }));
}

#[test]
fn test_append_after_finalize_leaves_primitives() {
    let theme = Theme::default();
    let mut canvas = Canvas::new(2, 20, Size::WIDESCREEN, theme.resolve(Role::Background));
    canvas
        .compose(
            &Widget::Text(TextWidget::new(Geometry::new(0.8, 0.4, 6.0, 0.6), "THE PROBLEM")),
            &theme,
        )
        .unwrap();
    canvas.close_with_number(&theme).unwrap();
    let before = canvas.primitives().to_vec();

    let extra = Widget::Text(TextWidget::new(Geometry::new(0.8, 5.8, 11.0, 0.8), "late"));
    for _ in 0..2 {
        let err = canvas.compose(&extra, &theme).unwrap_err();
        assert!(matches!(err, ComposeError::CanvasClosed { .. }));
        let err = canvas.append(extra.compose(&theme).unwrap()).unwrap_err();
        assert!(matches!(err, ComposeError::CanvasClosed { .. }));
    }
    assert_eq!(canvas.primitives(), before.as_slice());
}

#[test]
fn test_paint_order_follows_calls() {
    let theme = Theme::default();
    let mut canvas = Canvas::new(1, 1, Size::WIDESCREEN, theme.resolve(Role::Background));
    for text in ["first", "second", "third"] {
        canvas
            .compose(
                &Widget::Text(TextWidget::new(Geometry::new(1.0, 1.0, 2.0, 0.5), text)),
                &theme,
            )
            .unwrap();
    }
    let order: Vec<&str> = canvas
        .primitives()
        .iter()
        .filter_map(|p| match p {
            Primitive::TextBox(tb) => Some(tb.lines[0].text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(order, vec!["first", "second", "third"]);
}

/// Three problem cards 3.9 apart from a 0.8 margin
#[test]
fn test_three_card_problem_layout() {
    let card = |title: &str| {
        let mut card = FeatureCard::new(Geometry::new(0.0, 0.0, 3.6, 3.5), title, "body");
        card.title_color = Role::Highlight.into();
        card.border = Role::TextSubtle.into();
        card.title_offset = 0.2;
        card.body_offset = 0.9;
        Widget::FeatureCard(card)
    };
    let grid = Widget::Grid(CardGrid {
        grid: Grid::row(0.8, 1.8, 3.9),
        items: vec![
            card("Manual Looping"),
            card("Fragmented Infrastructure"),
            card("Compliance Barriers"),
        ],
    });

    let prims = grid.compose(&Theme::default()).unwrap();
    let lefts: Vec<f64> = prims
        .iter()
        .filter_map(|p| match p {
            Primitive::RoundedRectangle(shape) => Some(shape.geometry.left),
            _ => None,
        })
        .collect();
    assert_eq!(lefts.len(), 3);
    for (got, want) in lefts.iter().zip([0.8, 4.7, 8.6]) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
}

#[test]
fn test_layout_serializes_to_json() {
    let theme = Theme::default();
    let mut canvas = Canvas::new(1, 1, Size::WIDESCREEN, theme.resolve(Role::Background));
    canvas.close_with_number(&theme).unwrap();
    let json = serde_json::to_value(&canvas).unwrap();
    assert_eq!(json["state"], "finalized");
    assert_eq!(json["background"], "#0F111A");
    assert_eq!(json["primitives"][0]["type"], "text_box");
}
