//! Markdown to paginated PDF

use trifold_compose::{write_artifact, Theme};
use trifold_core::{paginate, parse, StyleRuleset};
use trifold_pdf::{render_pdf, PdfRenderer, Transpiler};

const ROADMAP: &str = "\
# Roadmap

Quarterly plan for the **vault** rollout.

## Milestones

| Phase | Owner | Status |
|-------|:-----:|-------:|
| Pilot | Ops | Done |
| Rollout | Eng | Planned |

```rust
fn main() {}
```

> Dates may move.

---

- Audit
  - Fix findings
";

#[test]
fn test_markup_follows_flow_policies() {
    let flow = paginate(&parse(ROADMAP), &StyleRuleset::with_label("Board"));
    let typst = Transpiler::transpile(&flow);

    assert!(typst.starts_with("#set document(title: \"Roadmap\")"));
    assert!(typst.contains("Board — Page"));

    // Title and the level-2 heading keep with what follows
    assert_eq!(typst.matches("sticky: true)[").count(), 2);
    // Table and code block stay whole
    assert_eq!(typst.matches("breakable: false)[").count(), 2);

    assert!(typst.contains("align: (left, center, right,)"));
    assert!(typst.contains("#line(length: 100%, stroke: 2pt + rgb(\"#0F3460\"))"));
    assert!(typst.contains("- Audit\n  - Fix findings\n"));
    assert!(typst.contains("stroke: (left: 4pt + rgb(\"#0F3460\"))"));
}

#[test]
fn test_write_pdf() {
    let flow = paginate(&parse(ROADMAP), &StyleRuleset::default());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmap.pdf");

    let size = write_artifact(&PdfRenderer::default(), &flow, &Theme::default(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(bytes.len() as u64, size);
}

#[test]
fn test_awkward_markdown_compiles() {
    let cases = [
        ("dangling link", "# Plan\n\nSee [risks](#risks).\n"),
        ("link to title", "# Plan\n\nBack to [top](#plan).\n"),
        ("repeated headings", "# Plan\n\n## Risks\n\nSee [risks](#risks).\n\n## Risks\n\nAgain.\n"),
        ("intraword bold", "# Plan\n\nUp to 5x**leverage** on *T*-bills.\n"),
        ("symbol heading", "# Plan\n\n## !!!\n\nBody\n"),
        ("footer braces", "# Plan\n\nBody\n"),
    ];
    for (name, markdown) in cases {
        let ruleset = if name == "footer braces" {
            StyleRuleset::with_label("Draft {n} [v2]")
        } else {
            StyleRuleset::default()
        };
        let flow = paginate(&parse(markdown), &ruleset);
        let bytes = render_pdf(&flow).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(bytes.starts_with(b"%PDF"), "{name}");
    }
}
