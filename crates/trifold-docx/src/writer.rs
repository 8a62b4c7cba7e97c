//! DOCX generation from a markdown document.
//!
//! The body is built as a string in a single pass over the blocks, the way
//! the package parts are. Level-1 sections start on a new page, except the
//! first one.

use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Seek, Write};

use quick_xml::escape::escape;
use tracing::debug;
use trifold_ast::{
    plain_text, Alignment, Block, Document, FormatType, Heading, Inline, List, ListType,
    LiteralBlock, Paragraph, Table,
};
use trifold_compose::{Color, Renderer, RenderError, Role, Theme};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::constants::*;
use crate::error::Result;
use crate::styles::{
    ids, styles_xml, Numbering, BULLET_NUM_ID, FAINT_COLOR, MAX_LIST_LEVEL, MUTED_COLOR,
    TEXT_COLOR,
};

/// Cover page content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cover {
    pub title: String,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    /// Small lines near the bottom of the cover
    pub details: Vec<String>,
    /// Last, faintest line, e.g. date and classification
    pub footnote: Option<String>,
}

impl Cover {
    /// Cover from the document's front matter
    pub fn from_document(doc: &Document) -> Self {
        let meta = &doc.metadata;
        Self {
            title: meta.title.clone().unwrap_or_else(|| "Untitled".to_string()),
            subtitle: meta.subtitle.clone(),
            tagline: meta.tagline.clone(),
            details: meta.details.clone(),
            footnote: meta.footnote.clone(),
        }
    }
}

/// What goes in front of the body
#[derive(Debug, Clone, PartialEq)]
pub struct DocxOptions {
    pub cover: Option<Cover>,
    /// Table of contents built from level-1 and level-2 headings
    pub toc: bool,
    pub toc_title: String,
}

impl Default for DocxOptions {
    fn default() -> Self {
        Self {
            cover: None,
            toc: false,
            toc_title: "Table of Contents".to_string(),
        }
    }
}

/// Run formatting accumulated through nested inlines
#[derive(Debug, Clone, Copy, Default)]
struct RunProps {
    bold: bool,
    italic: bool,
    code: bool,
}

impl RunProps {
    fn with(mut self, format: FormatType) -> Self {
        match format {
            FormatType::Bold => self.bold = true,
            FormatType::Italic => self.italic = true,
            FormatType::Monospace => self.code = true,
        }
        self
    }

    fn xml(&self, link: bool) -> String {
        let mut rpr = String::new();
        if link {
            rpr.push_str(&format!("<w:rStyle w:val=\"{}\"/>", ids::HYPERLINK));
        } else if self.code {
            rpr.push_str(&format!("<w:rStyle w:val=\"{}\"/>", ids::INLINE_CODE));
        }
        if self.bold {
            rpr.push_str("<w:b/>");
        }
        if self.italic {
            rpr.push_str("<w:i/>");
        }
        if rpr.is_empty() {
            rpr
        } else {
            format!("<w:rPr>{}</w:rPr>", rpr)
        }
    }
}

/// Bookmark names allow letters, digits and underscores, at most 40 chars
const MAX_BOOKMARK_LEN: usize = 40;

/// Word bookmark name for a heading anchor
pub fn bookmark_name(anchor: &str) -> String {
    let mut name = String::from("_");
    name.extend(
        anchor
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }),
    );
    name.truncate(MAX_BOOKMARK_LEN);
    name
}

/// Bookmark name per anchor, unique within the document
///
/// Anchors that map to the same name, e.g. two long headings sharing their
/// first 40 chars, get `_1`, `_2`, ... in source order.
pub fn bookmark_names<'a>(
    anchors: impl IntoIterator<Item = &'a str>,
) -> HashMap<String, String> {
    let mut names = HashMap::new();
    let mut used = HashSet::new();
    for anchor in anchors {
        if names.contains_key(anchor) {
            continue;
        }
        let base = bookmark_name(anchor);
        let mut name = base.clone();
        let mut n = 0;
        while used.contains(&name) {
            n += 1;
            let suffix = format!("_{}", n);
            let keep = base.len().min(MAX_BOOKMARK_LEN - suffix.len());
            name = format!("{}{}", &base[..keep], suffix);
        }
        used.insert(name.clone());
        names.insert(anchor.to_string(), name);
    }
    names
}

fn twips(points: f64) -> i64 {
    (points * 20.0).round() as i64
}

fn jc(alignment: Option<Alignment>) -> &'static str {
    match alignment {
        Some(Alignment::Center) => "center",
        Some(Alignment::Right) => "right",
        Some(Alignment::Left) | None => "left",
    }
}

/// DOCX document writer
#[derive(Debug, Clone, Default)]
pub struct DocxWriter {
    options: DocxOptions,

    /// Generated body XML
    output: String,

    /// External hyperlink targets, in relationship order
    links: Vec<String>,

    numbering: Numbering,

    /// Bookmark name per heading anchor
    bookmarks: HashMap<String, String>,

    next_bookmark_id: usize,

    /// A level-1 heading was already written
    seen_section: bool,
}

impl DocxWriter {
    pub fn new(options: DocxOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Generate the DOCX as bytes
    pub fn generate(mut self, doc: &Document, theme: &Theme) -> Result<Vec<u8>> {
        let body = self.generate_document_xml(doc, theme);

        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        write_part(&mut zip, options, "[Content_Types].xml", &content_types_xml())?;
        write_part(&mut zip, options, "_rels/.rels", &root_rels_xml())?;
        write_part(&mut zip, options, "docProps/core.xml", &core_xml(doc))?;
        write_part(&mut zip, options, "docProps/app.xml", &app_xml())?;
        write_part(&mut zip, options, "word/document.xml", &body)?;
        write_part(&mut zip, options, "word/styles.xml", &styles_xml(theme))?;
        write_part(&mut zip, options, "word/numbering.xml", &self.numbering.to_xml())?;
        write_part(
            &mut zip,
            options,
            "word/_rels/document.xml.rels",
            &self.document_rels_xml(),
        )?;

        let cursor = zip.finish()?;
        debug!(
            blocks = doc.blocks.len(),
            links = self.links.len(),
            ordered_lists = self.numbering.ordered_lists(),
            "generated docx"
        );
        Ok(cursor.into_inner())
    }

    /// Generate word/document.xml
    pub fn generate_document_xml(&mut self, doc: &Document, theme: &Theme) -> String {
        self.output.clear();
        self.bookmarks = bookmark_names(doc.anchors());

        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output.push_str(&format!(
            "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\">\n",
            NS_WORDPROCESSING, NS_RELATIONSHIPS
        ));
        self.output.push_str("<w:body>\n");

        if let Some(cover) = self.options.cover.clone() {
            self.generate_cover_page(&cover, theme.resolve(Role::Accent));
        }
        if self.options.toc {
            self.generate_toc(doc);
        }

        for block in &doc.blocks {
            self.generate_block(block);
        }

        self.output.push_str(&format!(
            "<w:sectPr><w:pgSz w:w=\"{}\" w:h=\"{}\"/><w:pgMar w:top=\"{m}\" w:right=\"{m}\" w:bottom=\"{m}\" w:left=\"{m}\" w:header=\"708\" w:footer=\"708\" w:gutter=\"0\"/></w:sectPr>\n",
            A4_WIDTH_TWIPS,
            A4_HEIGHT_TWIPS,
            m = PAGE_MARGIN_TWIPS
        ));
        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        std::mem::take(&mut self.output)
    }

    fn centered_run(&mut self, text: &str, points: f64, color: Color, bold: bool, before: i64) {
        self.output.push_str(&format!(
            "<w:p><w:pPr><w:spacing w:before=\"{}\"/><w:jc w:val=\"center\"/></w:pPr><w:r><w:rPr>{}<w:color w:val=\"{}\"/><w:sz w:val=\"{}\"/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>\n",
            before,
            if bold { "<w:b/>" } else { "" },
            color.hex(),
            (points * 2.0).round() as i64,
            escape(text)
        ));
    }

    /// Bookmark for an anchor; unknown anchors get the plain mapped name
    fn bookmark(&self, anchor: &str) -> String {
        self.bookmarks
            .get(anchor)
            .cloned()
            .unwrap_or_else(|| bookmark_name(anchor))
    }

    fn page_break(&mut self) {
        self.output.push_str("<w:p>\n<w:r>\n");
        self.output.push_str(r#"<w:br w:type="page"/>"#);
        self.output.push('\n');
        self.output.push_str("</w:r>\n</w:p>\n");
    }

    /// Centered cover: title, subtitle, tagline, then the small lines
    fn generate_cover_page(&mut self, cover: &Cover, accent: Color) {
        self.centered_run(&cover.title, 42.0, accent, true, twips(144.0));
        if let Some(subtitle) = &cover.subtitle {
            self.centered_run(subtitle, 22.0, TEXT_COLOR, false, 0);
        }
        if let Some(tagline) = &cover.tagline {
            self.centered_run(tagline, 14.0, MUTED_COLOR, false, 0);
        }
        for (i, line) in cover.details.iter().enumerate() {
            let before = if i == 0 { twips(72.0) } else { 0 };
            self.centered_run(line, 11.0, MUTED_COLOR, false, before);
        }
        if let Some(footnote) = &cover.footnote {
            let before = if cover.details.is_empty() { twips(72.0) } else { twips(11.0) };
            self.centered_run(footnote, 11.0, FAINT_COLOR, false, before);
        }
        self.page_break();
    }

    /// Table of contents as a list of internal links
    ///
    /// The heading that supplied the document title is left out.
    fn generate_toc(&mut self, doc: &Document) {
        self.output.push_str(&format!(
            "<w:p><w:pPr><w:pStyle w:val=\"{}\"/></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>\n",
            ids::TOC_HEADING,
            escape(self.options.toc_title.as_str())
        ));

        let mut skipped_title = false;
        let mut section = 0;
        for block in &doc.blocks {
            let Block::Heading(heading) = block else {
                continue;
            };
            if heading.level > 2 {
                continue;
            }
            let text = plain_text(&heading.text);
            if heading.level == 1
                && !skipped_title
                && doc.metadata.title.as_deref() == Some(text.as_str())
            {
                skipped_title = true;
                continue;
            }

            let (label, size, indent) = if heading.level == 1 {
                section += 1;
                (format!("{}. {}", section, text), 24, 0)
            } else {
                (text, 22, 360)
            };
            let run = format!(
                "<w:r><w:rPr><w:sz w:val=\"{}\"/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r>",
                size,
                escape(label.as_str())
            );
            let content = match &heading.anchor {
                Some(anchor) => format!(
                    "<w:hyperlink w:anchor=\"{}\">{}</w:hyperlink>",
                    self.bookmark(anchor),
                    run
                ),
                None => run,
            };
            self.output.push_str(&format!(
                "<w:p><w:pPr><w:spacing w:after=\"{}\"/><w:ind w:left=\"{}\"/></w:pPr>{}</w:p>\n",
                twips(4.0),
                indent,
                content
            ));
        }

        self.page_break();
    }

    fn generate_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(para) => self.generate_paragraph(para, ids::NORMAL),
            Block::Heading(heading) => self.generate_heading(heading),
            Block::List(list) => self.generate_list(list),
            Block::Table(table) => self.generate_table(table),
            Block::Literal(literal) => self.generate_literal(literal),
            Block::Quote(quote) => {
                for inner in &quote.blocks {
                    match inner {
                        Block::Paragraph(para) => self.generate_paragraph(para, ids::QUOTE),
                        other => self.generate_block(other),
                    }
                }
            }
            Block::ThematicBreak => {
                self.output
                    .push_str("<w:p><w:pPr><w:pBdr><w:bottom w:val=\"single\" w:sz=\"6\" w:space=\"1\" w:color=\"auto\"/></w:pBdr></w:pPr></w:p>\n");
            }
        }
    }

    fn generate_paragraph(&mut self, para: &Paragraph, style: &str) {
        self.output.push_str("<w:p>\n");
        self.output
            .push_str(&format!("<w:pPr><w:pStyle w:val=\"{}\"/></w:pPr>\n", style));
        self.generate_inlines(&para.inlines, RunProps::default(), false);
        self.output.push_str("</w:p>\n");
    }

    fn generate_heading(&mut self, heading: &Heading) {
        let break_before = heading.level == 1 && self.seen_section;
        if heading.level == 1 {
            self.seen_section = true;
        }

        self.output.push_str("<w:p>\n<w:pPr>");
        self.output.push_str(&format!(
            "<w:pStyle w:val=\"{}\"/>",
            ids::heading(heading.level)
        ));
        if break_before {
            self.output.push_str("<w:pageBreakBefore/>");
        }
        self.output.push_str("</w:pPr>\n");

        let bookmark = heading.anchor.as_deref().map(|anchor| {
            let id = self.next_bookmark_id;
            self.next_bookmark_id += 1;
            (id, self.bookmark(anchor))
        });
        if let Some((id, name)) = &bookmark {
            self.output.push_str(&format!(
                "<w:bookmarkStart w:id=\"{}\" w:name=\"{}\"/>\n",
                id, name
            ));
        }
        self.generate_inlines(&heading.text, RunProps::default(), false);
        if let Some((id, _)) = &bookmark {
            self.output
                .push_str(&format!("<w:bookmarkEnd w:id=\"{}\"/>\n", id));
        }

        self.output.push_str("</w:p>\n");
    }

    fn generate_list(&mut self, list: &List) {
        let num_id = match list.list_type {
            ListType::Unordered => BULLET_NUM_ID,
            ListType::Ordered => self.numbering.next_ordered(),
        };

        for item in &list.items {
            self.output.push_str("<w:p>\n<w:pPr>");
            self.output.push_str(&format!(
                "<w:pStyle w:val=\"{}\"/><w:numPr><w:ilvl w:val=\"{}\"/><w:numId w:val=\"{}\"/></w:numPr>",
                ids::LIST_PARAGRAPH,
                item.level.min(MAX_LIST_LEVEL),
                num_id
            ));
            self.output.push_str("</w:pPr>\n");
            self.generate_inlines(&item.inlines, RunProps::default(), false);
            self.output.push_str("</w:p>\n");
        }
    }

    fn generate_table(&mut self, table: &Table) {
        let columns = table.column_count().max(1);
        let col_width = TEXT_WIDTH_TWIPS / columns as i64;

        self.output.push_str("<w:tbl>\n");
        self.output.push_str(&format!(
            "<w:tblPr><w:tblStyle w:val=\"{}\"/><w:tblW w:w=\"5000\" w:type=\"pct\"/><w:tblLook w:val=\"04A0\" w:firstRow=\"1\" w:lastRow=\"0\" w:firstColumn=\"0\" w:lastColumn=\"0\" w:noHBand=\"0\" w:noVBand=\"1\"/></w:tblPr>\n",
            ids::TABLE
        ));

        self.output.push_str("<w:tblGrid>");
        for _ in 0..columns {
            self.output
                .push_str(&format!("<w:gridCol w:w=\"{}\"/>", col_width));
        }
        self.output.push_str("</w:tblGrid>\n");

        for row in &table.rows {
            self.output.push_str("<w:tr>\n");
            if row.is_header {
                self.output.push_str("<w:trPr><w:tblHeader/></w:trPr>\n");
            }

            for (col, cell) in row.cells.iter().enumerate() {
                let align = table.columns.get(col).and_then(|c| c.align);
                self.output.push_str(&format!(
                    "<w:tc><w:tcPr><w:tcW w:w=\"{}\" w:type=\"dxa\"/></w:tcPr><w:p><w:pPr><w:jc w:val=\"{}\"/></w:pPr>",
                    col_width,
                    jc(align)
                ));
                let props = RunProps {
                    bold: row.is_header,
                    ..RunProps::default()
                };
                self.generate_inlines(&cell.inlines, props, false);
                self.output.push_str("</w:p></w:tc>\n");
            }

            self.output.push_str("</w:tr>\n");
        }

        self.output.push_str("</w:tbl>\n");
        // Spacing after the table
        self.output.push_str("<w:p/>\n");
    }

    fn generate_literal(&mut self, literal: &LiteralBlock) {
        self.output.push_str("<w:p>\n");
        self.output
            .push_str(&format!("<w:pPr><w:pStyle w:val=\"{}\"/></w:pPr>\n", ids::CODE));
        self.output.push_str("<w:r>\n");
        for (i, line) in literal.content.split('\n').enumerate() {
            if i > 0 {
                self.output.push_str("<w:br/>");
            }
            self.output.push_str(&format!(
                "<w:t xml:space=\"preserve\">{}</w:t>",
                escape(line)
            ));
        }
        self.output.push_str("\n</w:r>\n");
        self.output.push_str("</w:p>\n");
    }

    fn generate_inlines(&mut self, inlines: &[Inline], props: RunProps, link: bool) {
        for inline in inlines {
            self.generate_inline(inline, props, link);
        }
    }

    fn generate_inline(&mut self, inline: &Inline, props: RunProps, link: bool) {
        match inline {
            Inline::Text(text) => {
                self.output.push_str(&format!(
                    "<w:r>{}<w:t xml:space=\"preserve\">{}</w:t></w:r>\n",
                    props.xml(link),
                    escape(text.as_str())
                ));
            }
            Inline::Format(format, inner) => {
                self.generate_inline(inner, props.with(*format), link);
            }
            Inline::Span(inlines) => self.generate_inlines(inlines, props, link),
            Inline::Link(target) => {
                if let Some(anchor) = target.url.strip_prefix('#') {
                    let name = self.bookmark(anchor);
                    self.output
                        .push_str(&format!("<w:hyperlink w:anchor=\"{}\">\n", name));
                } else {
                    self.links.push(target.url.clone());
                    let rel_id = format!("rId{}", FIRST_LINK_REL_ID + self.links.len() - 1);
                    self.output
                        .push_str(&format!("<w:hyperlink r:id=\"{}\">\n", rel_id));
                }
                self.generate_inlines(&target.text, props, true);
                self.output.push_str("</w:hyperlink>\n");
            }
            Inline::Break => {
                self.output.push_str("<w:r><w:br/></w:r>\n");
            }
        }
    }

    fn document_rels_xml(&self) -> String {
        let mut rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="styles.xml"/>
  <Relationship Id="rId2" Type="{}" Target="numbering.xml"/>
"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_STYLES, REL_TYPE_NUMBERING
        );
        for (i, url) in self.links.iter().enumerate() {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"{}\" TargetMode=\"External\"/>\n",
                FIRST_LINK_REL_ID + i,
                REL_TYPE_HYPERLINK,
                escape(url.as_str())
            ));
        }
        rels.push_str("</Relationships>");
        rels
    }
}

fn write_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    options: SimpleFileOptions,
    name: &str,
    content: &str,
) -> Result<()> {
    zip.start_file(name, options)?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn content_types_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="{}">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#,
        NS_CONTENT_TYPES
    )
}

fn root_rels_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#,
        NS_PACKAGE_RELATIONSHIPS, REL_TYPE_OFFICE_DOCUMENT
    )
}

fn core_xml(doc: &Document) -> String {
    let title = doc.metadata.title.as_deref().unwrap_or("Document");
    let creator = doc.metadata.author.as_deref().unwrap_or("trifold");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>{}</dc:creator>
</cp:coreProperties>"#,
        escape(title),
        escape(creator)
    )
}

fn app_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
  <Application>trifold</Application>
  <AppVersion>{}</AppVersion>
</Properties>"#,
        crate::VERSION
    )
}

/// Document renderer over parsed markdown
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer {
    options: DocxOptions,
}

impl DocxRenderer {
    pub fn new(options: DocxOptions) -> Self {
        Self { options }
    }
}

impl Renderer for DocxRenderer {
    type Input = Document;

    fn artifact(&self) -> &'static str {
        "docx"
    }

    fn render(&self, doc: &Document, theme: &Theme) -> std::result::Result<Vec<u8>, RenderError> {
        Ok(DocxWriter::new(self.options.clone()).generate(doc, theme)?)
    }
}
