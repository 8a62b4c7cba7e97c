//! Deck description to PPTX package

use std::io::{Cursor, Read};

use trifold_compose::{write_artifact, DeckComposer, DeckDescription, Renderer, Theme};
use trifold_pptx::{PptxRenderer, PptxWriter};
use zip::ZipArchive;

const DECK: &str = r##"
title = "Superloop"

[theme]
accent = "#3366FF"

[[slides]]
frame_bars = true
numbered = false

[[slides.widgets]]
kind = "text"
left = 0.8
top = 2.5
width = 11.7
height = 1.2
text = "SUPERLOOP"
size = 54
color = "text-primary"
align = "center"

[[slides]]
header_bar = true

[[slides.widgets]]
kind = "step_sequence"
left = 0.6
top = 1.6
width = 12.0
height = 3.5

[[slides.widgets.steps]]
title = "Deposit"
body = "USDC enters the vault"

[[slides.widgets.steps]]
title = "Borrow"
body = "Loop against collateral"

[[slides.widgets.steps]]
title = "Earn"
body = "Collect the spread"

[[slides.widgets]]
kind = "ranked_table"
left = 0.8
top = 5.4
width = 11.7
height = 1.5
header = ["Protocol", "Status"]
rows = [["Aave", "Live"], ["Morpho", "Pipeline"]]
emphasize = ["Pipeline"]
"##;

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

fn render_deck() -> Vec<u8> {
    let deck = DeckDescription::from_toml_str(DECK).unwrap();
    let theme = deck.theme(&Theme::default()).unwrap();
    let canvases = DeckComposer::new(&theme).compose(&deck).unwrap();
    PptxRenderer::new(PptxWriter::for_deck(&deck))
        .render(&canvases, &theme)
        .unwrap()
}

#[test]
fn test_deck_slides() {
    let bytes = render_deck();
    let presentation = entry(&bytes, "ppt/presentation.xml");
    assert_eq!(presentation.matches("<p:sldId ").count(), 2);

    let title = entry(&bytes, "ppt/slides/slide1.xml");
    assert!(title.contains("<a:t>SUPERLOOP</a:t>"));
    assert!(title.contains("<a:pPr algn=\"ctr\""));
    // Frame bars use the overridden accent, no slide number
    assert_eq!(title.matches("<a:srgbClr val=\"3366FF\"/>").count(), 2);
    assert!(!title.contains("1 / 2"));
}

#[test]
fn test_step_slide_shapes() {
    let bytes = render_deck();
    let slide = entry(&bytes, "ppt/slides/slide2.xml");

    assert_eq!(slide.matches("prst=\"ellipse\"").count(), 3);
    assert_eq!(slide.matches("prst=\"rightArrow\"").count(), 2);
    assert_eq!(slide.matches("<p:graphicFrame>").count(), 1);
    assert!(slide.contains("<a:t>2 / 2</a:t>"));

    // Slot width 4.0, card width 3.8: the first arrow starts at 0.6 + 3.8
    assert!(slide.contains(&format!("<a:off x=\"{}\"", (4.4_f64 * 914_400.0).round() as i64)));
}

#[test]
fn test_write_artifact_to_disk() {
    let deck = DeckDescription::from_toml_str(DECK).unwrap();
    let theme = deck.theme(&Theme::default()).unwrap();
    let canvases = DeckComposer::new(&theme).compose(&deck).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/deck.pptx");
    let size = write_artifact(&PptxRenderer::default(), &canvases[..], &theme, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len() as u64, size);
    assert!(entry(&bytes, "ppt/slides/slide2.xml").contains("Pipeline"));
}
