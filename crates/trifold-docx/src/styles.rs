//! Style and numbering parts (word/styles.xml, word/numbering.xml)
//!
//! Style ids are fixed; the theme only supplies fonts and the accent color.
//! Body text is dark grey on the white page whatever the slide palette.

use quick_xml::escape::escape;
use trifold_compose::{Color, Role, Theme};

use crate::constants::NS_WORDPROCESSING;

/// Body text color
pub const TEXT_COLOR: Color = Color::rgb(0x33, 0x33, 0x33);

/// Secondary cover text
pub const MUTED_COLOR: Color = Color::rgb(0x66, 0x66, 0x66);

/// Cover footnote
pub const FAINT_COLOR: Color = Color::rgb(0x99, 0x99, 0x99);

/// Paragraph and character style ids used by the writer
pub mod ids {
    pub const NORMAL: &str = "Normal";
    pub const CODE: &str = "Code";
    pub const QUOTE: &str = "Quote";
    pub const LIST_PARAGRAPH: &str = "ListParagraph";
    pub const TOC_HEADING: &str = "TOCHeading";
    pub const HYPERLINK: &str = "Hyperlink";
    pub const INLINE_CODE: &str = "InlineCode";
    pub const TABLE: &str = "TrifoldTable";

    /// Style id for a heading level, levels past 4 use `Heading4`
    pub fn heading(level: u8) -> &'static str {
        match level {
            0 | 1 => "Heading1",
            2 => "Heading2",
            3 => "Heading3",
            _ => "Heading4",
        }
    }
}

/// (size in points, accent colored, space before in twips)
fn heading_spec(level: u8) -> (u32, bool, u32) {
    match level {
        1 => (24, true, 480),
        2 => (18, true, 360),
        3 => (14, true, 240),
        _ => (12, false, 200),
    }
}

fn heading_style(level: u8, accent: Color) -> String {
    let (size, use_accent, before) = heading_spec(level);
    let color = if use_accent { accent } else { TEXT_COLOR };
    format!(
        r#"<w:style w:type="paragraph" w:styleId="{id}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:uiPriority w:val="9"/><w:qFormat/><w:pPr><w:keepNext/><w:keepLines/><w:spacing w:before="{before}" w:after="120"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:color w:val="{color}"/><w:sz w:val="{sz}"/><w:szCs w:val="{sz}"/></w:rPr></w:style>"#,
        id = ids::heading(level),
        outline = level - 1,
        color = color.hex(),
        sz = size * 2,
    )
}

/// Generate word/styles.xml for a theme
pub fn styles_xml(theme: &Theme) -> String {
    let accent = theme.resolve(Role::Accent);
    let font = escape(theme.font_family.as_str());
    let mono = escape(theme.mono_family.as_str());

    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{ns}">
<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:color w:val="{text}"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-US"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="{normal}"><w:name w:val="Normal"/><w:qFormat/></w:style>
"#,
        ns = NS_WORDPROCESSING,
        text = TEXT_COLOR.hex(),
        normal = ids::NORMAL,
    );

    for level in 1..=4 {
        xml.push_str(&heading_style(level, accent));
        xml.push('\n');
    }

    xml.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="{toc}"><w:name w:val="TOC Heading"/><w:basedOn w:val="Heading1"/><w:next w:val="Normal"/><w:pPr><w:outlineLvl w:val="9"/></w:pPr></w:style>
<w:style w:type="paragraph" w:styleId="{code}"><w:name w:val="Code"/><w:basedOn w:val="Normal"/><w:pPr><w:keepLines/><w:shd w:val="clear" w:color="auto" w:fill="F4F4F8"/><w:spacing w:before="120" w:after="120" w:line="240" w:lineRule="auto"/><w:ind w:left="144" w:right="144"/></w:pPr><w:rPr><w:rFonts w:ascii="{mono}" w:hAnsi="{mono}" w:cs="{mono}"/><w:sz w:val="18"/><w:szCs w:val="18"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="{quote}"><w:name w:val="Quote"/><w:basedOn w:val="Normal"/><w:pPr><w:pBdr><w:left w:val="single" w:sz="24" w:space="8" w:color="{accent}"/></w:pBdr><w:ind w:left="720"/></w:pPr><w:rPr><w:i/><w:color w:val="555555"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="{list}"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:after="60"/><w:ind w:left="720"/><w:contextualSpacing/></w:pPr></w:style>
<w:style w:type="character" w:styleId="{link}"><w:name w:val="Hyperlink"/><w:rPr><w:color w:val="{accent}"/><w:u w:val="single"/></w:rPr></w:style>
<w:style w:type="character" w:styleId="{inline}"><w:name w:val="Inline Code"/><w:rPr><w:rFonts w:ascii="{mono}" w:hAnsi="{mono}" w:cs="{mono}"/><w:color w:val="C7254E"/><w:sz w:val="20"/><w:shd w:val="clear" w:color="auto" w:fill="F0F0F5"/></w:rPr></w:style>
<w:style w:type="table" w:styleId="{table}"><w:name w:val="Trifold Table"/><w:basedOn w:val="TableNormal"/><w:pPr><w:spacing w:after="0"/></w:pPr><w:rPr><w:sz w:val="20"/><w:szCs w:val="20"/></w:rPr><w:tblPr><w:jc w:val="center"/><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="{accent}"/><w:left w:val="single" w:sz="4" w:space="0" w:color="{accent}"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="{accent}"/><w:right w:val="single" w:sz="4" w:space="0" w:color="{accent}"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="{accent}"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="{accent}"/></w:tblBorders><w:tblCellMar><w:left w:w="108" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>
<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>
</w:styles>"#,
        toc = ids::TOC_HEADING,
        code = ids::CODE,
        quote = ids::QUOTE,
        list = ids::LIST_PARAGRAPH,
        link = ids::HYPERLINK,
        inline = ids::INLINE_CODE,
        table = ids::TABLE,
        accent = accent.hex(),
    ));

    xml
}

/// Bullet glyphs by nesting level
const BULLETS: [&str; 4] = ["\u{2022}", "\u{25E6}", "\u{25AA}", "\u{2022}"];

/// Number formats by nesting level
const NUMBER_FORMATS: [(&str, &str); 4] = [
    ("decimal", "%1."),
    ("lowerLetter", "%2."),
    ("lowerRoman", "%3."),
    ("decimal", "%4."),
];

/// Deepest list level written to numbering.xml, 0-based
pub const MAX_LIST_LEVEL: u8 = 3;

/// Numbering instance for bullet lists
pub const BULLET_NUM_ID: u32 = 1;

/// Tracks one numbering instance per ordered list so each restarts at 1
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    ordered_lists: u32,
}

impl Numbering {
    /// Allocate the numbering instance for a new ordered list
    pub fn next_ordered(&mut self) -> u32 {
        self.ordered_lists += 1;
        BULLET_NUM_ID + self.ordered_lists
    }

    pub fn ordered_lists(&self) -> u32 {
        self.ordered_lists
    }

    /// Generate word/numbering.xml
    pub fn to_xml(&self) -> String {
        let mut xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:numbering xmlns:w=\"{}\">\n",
            NS_WORDPROCESSING
        );

        xml.push_str("<w:abstractNum w:abstractNumId=\"0\"><w:multiLevelType w:val=\"hybridMultilevel\"/>");
        for (level, glyph) in BULLETS.iter().enumerate() {
            xml.push_str(&format!(
                "<w:lvl w:ilvl=\"{level}\"><w:start w:val=\"1\"/><w:numFmt w:val=\"bullet\"/><w:lvlText w:val=\"{glyph}\"/><w:lvlJc w:val=\"left\"/><w:pPr><w:ind w:left=\"{left}\" w:hanging=\"360\"/></w:pPr></w:lvl>",
                left = 720 * (level + 1),
            ));
        }
        xml.push_str("</w:abstractNum>\n");

        xml.push_str("<w:abstractNum w:abstractNumId=\"1\"><w:multiLevelType w:val=\"hybridMultilevel\"/>");
        for (level, (format, text)) in NUMBER_FORMATS.iter().enumerate() {
            xml.push_str(&format!(
                "<w:lvl w:ilvl=\"{level}\"><w:start w:val=\"1\"/><w:numFmt w:val=\"{format}\"/><w:lvlText w:val=\"{text}\"/><w:lvlJc w:val=\"left\"/><w:pPr><w:ind w:left=\"{left}\" w:hanging=\"360\"/></w:pPr></w:lvl>",
                left = 720 * (level + 1),
            ));
        }
        xml.push_str("</w:abstractNum>\n");

        xml.push_str(&format!(
            "<w:num w:numId=\"{}\"><w:abstractNumId w:val=\"0\"/></w:num>\n",
            BULLET_NUM_ID
        ));
        for i in 1..=self.ordered_lists {
            xml.push_str(&format!(
                "<w:num w:numId=\"{}\"><w:abstractNumId w:val=\"1\"/><w:lvlOverride w:ilvl=\"0\"><w:startOverride w:val=\"1\"/></w:lvlOverride></w:num>\n",
                BULLET_NUM_ID + i
            ));
        }

        xml.push_str("</w:numbering>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_ids() {
        assert_eq!(ids::heading(1), "Heading1");
        assert_eq!(ids::heading(4), "Heading4");
        assert_eq!(ids::heading(6), "Heading4");
    }

    #[test]
    fn test_styles_use_theme() {
        let xml = styles_xml(&Theme::default());
        assert!(xml.contains("w:ascii=\"Calibri\""));
        assert!(xml.contains("w:ascii=\"Consolas\""));
        // Heading 1-3 in accent, sized 24/18/14pt
        assert!(xml.contains("w:styleId=\"Heading1\""));
        assert!(xml.contains("<w:color w:val=\"007AFF\"/><w:sz w:val=\"48\"/>"));
        assert!(xml.contains("<w:color w:val=\"007AFF\"/><w:sz w:val=\"36\"/>"));
        assert!(xml.contains("<w:color w:val=\"007AFF\"/><w:sz w:val=\"28\"/>"));
        assert!(xml.contains("<w:color w:val=\"333333\"/><w:sz w:val=\"24\"/>"));
        assert!(xml.contains("<w:color w:val=\"333333\"/><w:sz w:val=\"22\"/>"));
    }

    #[test]
    fn test_numbering_restarts_ordered_lists() {
        let mut numbering = Numbering::default();
        assert_eq!(numbering.next_ordered(), 2);
        assert_eq!(numbering.next_ordered(), 3);

        let xml = numbering.to_xml();
        assert_eq!(xml.matches("<w:num ").count(), 3);
        assert_eq!(xml.matches("<w:startOverride w:val=\"1\"/>").count(), 2);
        assert!(xml.contains("<w:numFmt w:val=\"bullet\"/>"));
    }
}
