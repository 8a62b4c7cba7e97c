//! Markdown source to paginated flow

use trifold_ast::Block;
use trifold_core::{load_source, paginate, parse, BreakAfter, BreakInside, StyleRuleset};

const ROADMAP: &str = "\
# Title

| Phase | Status |
|-------|-------:|
| Pilot | Done |
| Rollout | Planned |
| Second collateral | Planned |

```rust
fn main() {}
```
";

#[test]
fn test_title_table_code_flow() {
    let doc = parse(ROADMAP);
    let flow = paginate(&doc, &StyleRuleset::default());

    assert_eq!(flow.title.as_deref(), Some("Title"));
    assert_eq!(flow.blocks.len(), 3);

    let title = &flow.blocks[0];
    assert!(title.is_title);
    assert_eq!(title.break_after, BreakAfter::Avoid);

    let table = &flow.blocks[1];
    match &table.block {
        Block::Table(t) => {
            assert_eq!(t.column_count(), 2);
            assert_eq!(t.body_row_count(), 3);
            assert!(t.rows[0].is_header);
        }
        other => panic!("expected table, got {other:?}"),
    }
    assert_eq!(table.break_inside, BreakInside::Avoid);

    let code = &flow.blocks[2];
    match &code.block {
        Block::Literal(l) => {
            assert_eq!(l.language.as_deref(), Some("rust"));
            assert_eq!(l.content, "fn main() {}");
        }
        other => panic!("expected code, got {other:?}"),
    }
    assert_eq!(code.break_inside, BreakInside::Avoid);
}

#[test]
fn test_footer_numbers_every_page() {
    let flow = paginate(&parse(ROADMAP), &StyleRuleset::default());
    let footers: Vec<String> = (1..=3).map(|n| flow.ruleset.footer.render(n, 3)).collect();
    assert_eq!(footers[0], "Internal — Page 1 of 3");
    assert_eq!(footers[2], "Internal — Page 3 of 3");
}

#[test]
fn test_loaded_source_matches_inline_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmap.md");
    std::fs::write(&path, ROADMAP).unwrap();

    let text = load_source(&path).unwrap();
    assert_eq!(parse(&text), parse(ROADMAP));
}

#[test]
fn test_flow_serializes() {
    let flow = paginate(&parse(ROADMAP), &StyleRuleset::default());
    let json = serde_json::to_value(&flow).unwrap();
    assert_eq!(json["ruleset"]["version"], 1);
    assert_eq!(json["blocks"][0]["break_after"], "avoid");
    assert_eq!(json["blocks"][1]["break_inside"], "avoid");
    assert_eq!(json["ruleset"]["table"]["header_fill"], "#0F3460");
}
