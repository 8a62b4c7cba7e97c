//! Markdown to DOCX package

use std::io::{Cursor, Read};

use trifold_compose::{write_artifact, Renderer, Theme};
use trifold_core::parse;
use trifold_docx::{Cover, DocxOptions, DocxRenderer};
use zip::ZipArchive;

const STRATEGY: &str = "\
# Superloop

Yield looping on **tokenized** treasuries. See [Aave](https://aave.com).

## Executive Summary

1. Deposit
2. Borrow
   - against collateral

# Yield Economics

| Asset | APR |
|-------|----:|
| T-Bills | 5.1% |

# Risk Management

> Liquidation risk stays bounded.

```
loop {
    borrow();
}
```
";

fn entry(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut out)
        .unwrap();
    out
}

fn render(options: DocxOptions) -> Vec<u8> {
    let doc = parse(STRATEGY);
    DocxRenderer::new(options)
        .render(&doc, &Theme::default())
        .unwrap()
}

#[test]
fn test_package_parts() {
    let bytes = render(DocxOptions::default());
    for part in [
        "[Content_Types].xml",
        "word/document.xml",
        "word/styles.xml",
        "word/numbering.xml",
        "word/_rels/document.xml.rels",
    ] {
        assert!(!entry(&bytes, part).is_empty(), "missing {part}");
    }
    assert!(entry(&bytes, "docProps/core.xml").contains("<dc:title>Superloop</dc:title>"));
}

#[test]
fn test_sections_lists_and_links() {
    let bytes = render(DocxOptions::default());
    let body = entry(&bytes, "word/document.xml");

    // Three level-1 sections, the first does not break
    assert_eq!(body.matches("<w:pageBreakBefore/>").count(), 2);
    assert!(body.contains("<w:pStyle w:val=\"Heading2\"/>"));

    assert!(body.contains("<w:numId w:val=\"2\"/>"));
    assert!(body.contains("<w:ilvl w:val=\"1\"/>"));
    assert!(body.contains("<w:tblHeader/>"));
    assert!(body.contains("<w:pStyle w:val=\"Quote\"/>"));
    assert!(body.contains("<w:pStyle w:val=\"Code\"/>"));

    let rels = entry(&bytes, "word/_rels/document.xml.rels");
    assert!(rels.contains("Target=\"https://aave.com\""));

    let numbering = entry(&bytes, "word/numbering.xml");
    assert!(numbering.contains("<w:num w:numId=\"2\">"));
}

#[test]
fn test_cover_and_contents() {
    let source = format!(
        "+++\nsubtitle = \"RWA Looping Strategy\"\ntagline = \"Leveraged yield vaults\"\ndetails = [\"Built on Aave V3 | Morpho\"]\nfootnote = \"February 2026 | Confidential\"\n+++\n{}",
        STRATEGY
    );
    let doc = parse(&source);
    let options = DocxOptions {
        cover: Some(Cover::from_document(&doc)),
        toc: true,
        ..DocxOptions::default()
    };
    let bytes = DocxRenderer::new(options)
        .render(&doc, &Theme::default())
        .unwrap();
    let body = entry(&bytes, "word/document.xml");

    let title = body.find(">Superloop</w:t>").unwrap();
    let cover = body.find("RWA Looping Strategy").unwrap();
    let tagline = body.find("Leveraged yield vaults").unwrap();
    let details = body.find("Built on Aave V3 | Morpho").unwrap();
    let footnote = body.find("February 2026 | Confidential").unwrap();
    assert!(title < cover && cover < tagline && tagline < details && details < footnote);
    let contents = body.find("Table of Contents").unwrap();
    let first_section = body.find("<w:pStyle w:val=\"Heading1\"/>").unwrap();
    assert!(cover < contents && contents < first_section);

    assert!(body.contains("1. Yield Economics"));
    assert!(body.contains("2. Risk Management"));
    assert!(body.contains("<w:hyperlink w:anchor=\"_executive_summary\">"));
}

#[test]
fn test_theme_accent_in_styles() {
    let bytes = render(DocxOptions::default());
    let styles = entry(&bytes, "word/styles.xml");
    let accent = Theme::default().resolve(trifold_compose::Role::Accent).hex();
    assert!(styles.contains(&format!("<w:color w:val=\"{}\"/>", accent)));
}

#[test]
fn test_write_to_disk() {
    let doc = parse(STRATEGY);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strategy.docx");
    let size = write_artifact(&DocxRenderer::default(), &doc, &Theme::default(), &path).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), size);
}

#[test]
fn test_repeated_headings_get_distinct_bookmarks() {
    let long = "Liquidation Thresholds Across Every Supported Lending Market";
    let source = format!(
        "# Plan\n\n## Risks\n\nSee [risks](#risks-1).\n\n## Risks\n\n## {long} A\n\n## {long} B\n"
    );
    let doc = parse(&source);
    let bytes = DocxRenderer::default()
        .render(&doc, &Theme::default())
        .unwrap();
    let body = entry(&bytes, "word/document.xml");

    assert!(body.contains("w:name=\"_risks\""));
    assert!(body.contains("w:name=\"_risks_1\""));
    assert!(body.contains("<w:hyperlink w:anchor=\"_risks_1\">"));

    let names: Vec<&str> = body
        .split("w:name=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .collect();
    assert_eq!(names.len(), 5);
    let unique: std::collections::HashSet<&&str> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
    assert!(names.iter().all(|name| name.len() <= 40));
}
