//! DrawingML fragments for composed primitives.
//!
//! Geometry arrives in inches and leaves in EMU, rounded to the nearest
//! unit. Font sizes are written in hundredths of a point.

use quick_xml::escape::escape;
use trifold_compose::{Align, Border, Color, Geometry, Primitive, Shape, StyledText, Table, TextBox};

use crate::constants::{EMU_PER_INCH, EMU_PER_POINT};

/// Inches to EMU
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

/// Points to hundredths of a point
pub fn font_size(points: f64) -> i64 {
    (points * 100.0).round() as i64
}

/// Preset geometry name for a shape primitive
pub fn preset(primitive: &Primitive) -> Option<&'static str> {
    match primitive {
        Primitive::Rectangle(_) => Some("rect"),
        Primitive::RoundedRectangle(_) => Some("roundRect"),
        Primitive::Oval(_) => Some("ellipse"),
        Primitive::Arrow(_) => Some("rightArrow"),
        Primitive::TextBox(_) | Primitive::Table(_) => None,
    }
}

/// One `p:sp` or `p:graphicFrame` element for `primitive`
pub fn primitive_xml(primitive: &Primitive, id: u32, font: &str) -> String {
    match primitive {
        Primitive::Rectangle(shape)
        | Primitive::RoundedRectangle(shape)
        | Primitive::Oval(shape)
        | Primitive::Arrow(shape) => {
            // preset() is Some for every shape variant
            let prst = preset(primitive).unwrap_or("rect");
            shape_xml(shape, id, prst, font)
        }
        Primitive::TextBox(text_box) => text_box_xml(text_box, id, font),
        Primitive::Table(table) => table_xml(table, id, font),
    }
}

fn xfrm(geometry: &Geometry, prefix: &str) -> String {
    format!(
        "<{p}:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></{p}:xfrm>",
        emu(geometry.left),
        emu(geometry.top),
        emu(geometry.width),
        emu(geometry.height),
        p = prefix
    )
}

fn solid_fill(color: Color) -> String {
    format!("<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>", color.hex())
}

fn line(border: Option<&Border>) -> String {
    match border {
        Some(border) => format!(
            "<a:ln w=\"{}\">{}</a:ln>",
            (border.width * EMU_PER_POINT as f64).round() as i64,
            solid_fill(border.color)
        ),
        None => "<a:ln><a:noFill/></a:ln>".to_string(),
    }
}

fn algn(align: Align) -> &'static str {
    match align {
        Align::Left => "l",
        Align::Center => "ctr",
        Align::Right => "r",
    }
}

fn run_xml(text: &StyledText, font: &str) -> String {
    format!(
        "<a:r><a:rPr lang=\"en-US\" sz=\"{}\" b=\"{}\" dirty=\"0\">{}<a:latin typeface=\"{}\"/></a:rPr><a:t>{}</a:t></a:r>",
        font_size(text.size),
        u8::from(text.bold),
        solid_fill(text.color),
        escape(font),
        escape(text.text.as_str())
    )
}

fn shape_xml(shape: &Shape, id: u32, prst: &str, font: &str) -> String {
    let body = match &shape.label {
        Some(label) => format!(
            "<p:txBody><a:bodyPr anchor=\"ctr\" lIns=\"0\" rIns=\"0\" tIns=\"0\" bIns=\"0\"/><a:lstStyle/><a:p><a:pPr algn=\"ctr\"/>{}</a:p></p:txBody>",
            run_xml(label, font)
        ),
        None => String::new(),
    };

    format!(
        r#"      <p:sp>
        <p:nvSpPr><p:cNvPr id="{id}" name="Shape {id}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
        <p:spPr>{}<a:prstGeom prst="{prst}"><a:avLst/></a:prstGeom>{}{}</p:spPr>
        {body}
      </p:sp>
"#,
        xfrm(&shape.geometry, "a"),
        solid_fill(shape.fill),
        line(shape.border.as_ref()),
    )
}

fn text_box_xml(text_box: &TextBox, id: u32, font: &str) -> String {
    let wrap = if text_box.word_wrap { "square" } else { "none" };
    let mut paragraphs = String::new();
    for line in &text_box.lines {
        let bullet = if text_box.bullet {
            "<a:buFont typeface=\"Arial\"/><a:buChar char=\"\u{2022}\"/>"
        } else {
            "<a:buNone/>"
        };
        let indent = if text_box.bullet {
            " marL=\"228600\" indent=\"-228600\""
        } else {
            ""
        };
        paragraphs.push_str(&format!(
            "<a:p><a:pPr algn=\"{}\"{}><a:spcAft><a:spcPts val=\"{}\"/></a:spcAft>{}</a:pPr>{}</a:p>",
            algn(line.align),
            indent,
            font_size(text_box.space_after(line)),
            bullet,
            run_xml(line, font)
        ));
    }
    // A text body needs at least one paragraph
    if paragraphs.is_empty() {
        paragraphs.push_str("<a:p><a:endParaRPr lang=\"en-US\"/></a:p>");
    }

    format!(
        r#"      <p:sp>
        <p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>
        <p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>
        <p:txBody><a:bodyPr wrap="{wrap}" lIns="0" rIns="0" tIns="0" bIns="0" rtlCol="0"><a:noAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody>
      </p:sp>
"#,
        xfrm(&text_box.geometry, "a"),
    )
}

fn cell_xml(cell: &trifold_compose::TableCell, font: &str) -> String {
    let text = StyledText {
        text: cell.text.clone(),
        size: cell.style.size,
        color: cell.style.color,
        bold: cell.style.bold,
        align: cell.style.align,
    };
    format!(
        "<a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p><a:pPr algn=\"{}\"/>{}</a:p></a:txBody><a:tcPr anchor=\"ctr\">{}</a:tcPr></a:tc>",
        algn(cell.style.align),
        run_xml(&text, font),
        solid_fill(cell.style.fill)
    )
}

fn table_xml(table: &Table, id: u32, font: &str) -> String {
    let row_height = emu(table.geometry.height / table.row_count() as f64);

    let mut grid = String::new();
    for width in &table.column_widths {
        grid.push_str(&format!("<a:gridCol w=\"{}\"/>", emu(*width)));
    }

    let mut rows = String::new();
    for row in std::iter::once(&table.header).chain(table.rows.iter()) {
        rows.push_str(&format!("<a:tr h=\"{}\">", row_height));
        for cell in row {
            rows.push_str(&cell_xml(cell, font));
        }
        rows.push_str("</a:tr>");
    }

    format!(
        r#"      <p:graphicFrame>
        <p:nvGraphicFramePr><p:cNvPr id="{id}" name="Table {id}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>
        {}
        <a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1" bandRow="1"/><a:tblGrid>{grid}</a:tblGrid>{rows}</a:tbl></a:graphicData></a:graphic>
      </p:graphicFrame>
"#,
        xfrm(&table.geometry, "p"),
    )
}
