use crate::constants::{
    A_NAMESPACE, CHART_GRAPHIC_URI, P_NAMESPACE, RELS_NAMESPACE, TABLE_GRAPHIC_URI,
};
use crate::slide::SlideContext;
use crate::types::{
    EmuPoint, EmuSize, ImageCapability, ParagraphRecord, PixelSize, RunRecord, ShapeData,
    ShapeFailure, ShapeKind, ShapeRecord, TableCapability, TableCell, TextFrame,
};
use crate::{Error, ParserConfig, Result};
use base64::{engine::general_purpose, Engine as _};
use roxmltree::{Document, Node};
use std::io::Cursor;

/// Element names under `<p:spTree>` that represent shapes. Structural
/// children such as `nvGrpSpPr` are not shapes and are skipped.
const SHAPE_TAGS: [&str; 5] = ["sp", "pic", "graphicFrame", "grpSp", "cxnSp"];

/// Parses raw XML slide data from a PowerPoint (pptx) file and extracts one record per shape.
///
/// This function processes a single PowerPoint slide's XML data, classifies every shape
/// in the `<p:spTree>` by capability, and flattens it into a [`ShapeRecord`]. Shapes are
/// emitted in document order, which is the slide's z-order.
///
/// A failure while extracting an individual shape is contained: the shape is replaced by
/// a degraded record carrying only its identifier and the error message, the condition is
/// logged, and extraction continues with the next sibling.
///
/// # Arguments
///
/// - `xml_data`: Byte slice containing raw XML data of a PowerPoint slide.
/// - `slide_number`: 1-based slide position, used for log context only.
/// - `ctx`: Resolved relationships and preloaded media bytes for this slide.
///
/// # Errors
///
/// Parsing fails as a whole only at the slide level, if:
/// - The provided XML data isn't valid UTF-8.
/// - The XML structure is malformed or missing essential schema elements (`<p:cSld>` or `<p:spTree>` tags).
pub fn parse_slide_shapes(
    xml_data: &[u8],
    slide_number: u32,
    ctx: &SlideContext,
    config: &ParserConfig,
) -> Result<Vec<ShapeRecord>> {
    let xml_str = std::str::from_utf8(xml_data)?;
    let doc = Document::parse(xml_str)?;
    let root = doc.root_element();
    let ns = root.tag_name().namespace();

    let c_sld = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "cSld" && n.tag_name().namespace() == ns)
        .ok_or(Error::ParseError("no <p:cSld> tag in slide"))?;

    let sp_tree = c_sld
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "spTree" && n.tag_name().namespace() == ns)
        .ok_or(Error::ParseError("no <p:spTree> tag in slide"))?;

    let mut shapes = Vec::new();
    for child_node in sp_tree.children().filter(|n| n.is_element()) {
        let tag_name = child_node.tag_name().name();
        let namespace = child_node.tag_name().namespace().unwrap_or("");
        if namespace != P_NAMESPACE || !SHAPE_TAGS.contains(&tag_name) {
            continue;
        }

        match parse_shape(&child_node, ctx, config) {
            Ok(data) => shapes.push(ShapeRecord::Complete(Box::new(data))),
            Err(err) => {
                let shape_id = shape_id_of(&child_node).unwrap_or(0);
                log::warn!(
                    "failed to extract shape {} on slide {}: {}",
                    shape_id,
                    slide_number,
                    err
                );
                shapes.push(ShapeRecord::Degraded(ShapeFailure {
                    shape_id,
                    error: err.to_string(),
                }));
            }
        }
    }

    Ok(shapes)
}

fn is_a(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(A_NAMESPACE)
}

fn is_p(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(P_NAMESPACE)
}

/// Finds the `<p:cNvPr>` node carrying the shape id and name. Every shape
/// variant wraps it in its own non-visual property container (`nvSpPr`,
/// `nvPicPr`, `nvGraphicFramePr`, ...).
fn non_visual_props<'a, 'i>(shape_node: &Node<'a, 'i>) -> Option<Node<'a, 'i>> {
    shape_node
        .children()
        .find(|n| {
            n.is_element()
                && n.tag_name().namespace() == Some(P_NAMESPACE)
                && n.tag_name().name().starts_with("nv")
                && n.tag_name().name().ends_with("Pr")
        })
        .and_then(|nv| nv.children().find(|c| is_p(c, "cNvPr")))
}

fn shape_id_of(shape_node: &Node) -> Option<u64> {
    non_visual_props(shape_node)?.attribute("id")?.parse().ok()
}

/// Extracts one [`ShapeData`] record from a shape node.
///
/// Each extraction step is independent and additive: base fields always,
/// then text, structured text frame, embedded image, table, and geometry
/// whenever the shape carries the corresponding capability. Any error
/// discards the whole record; the caller degrades the shape.
fn parse_shape(shape_node: &Node, ctx: &SlideContext, config: &ParserConfig) -> Result<ShapeData> {
    let props =
        non_visual_props(shape_node).ok_or(Error::ParseError("shape has no non-visual properties"))?;
    let shape_id = props
        .attribute("id")
        .and_then(|v| v.parse().ok())
        .ok_or(Error::ParseError("shape has no numeric id"))?;

    let mut data = ShapeData {
        shape_id,
        shape_type: classify_shape(shape_node),
        name: props.attribute("name").map(str::to_string),
        text: None,
        text_frame: None,
        image: None,
        table: None,
        position: None,
        size: None,
    };

    if let Some(tx_body_node) = shape_node.children().find(|n| is_p(n, "txBody")) {
        let frame = parse_text_frame(&tx_body_node);
        data.text = Some(
            frame
                .paragraphs
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        );
        data.text_frame = Some(frame);
    }

    if shape_node.tag_name().name() == "pic" && config.extract_images {
        data.image = Some(parse_image(shape_node, ctx, config)?);
    }

    if let Some(tbl_node) = table_node(shape_node) {
        data.table = Some(parse_table(&tbl_node));
    }

    if let Some(xfrm) = transform_node(shape_node) {
        if let Some(off) = xfrm.children().find(|n| is_a(n, "off")) {
            data.position = Some(EmuPoint {
                left: emu_attribute(&off, "x")?,
                top: emu_attribute(&off, "y")?,
            });
        }
        if let Some(ext) = xfrm.children().find(|n| is_a(n, "ext")) {
            data.size = Some(EmuSize {
                width: emu_attribute(&ext, "cx")?,
                height: emu_attribute(&ext, "cy")?,
            });
        }
    }

    Ok(data)
}

fn emu_attribute(node: &Node, name: &str) -> Result<i64> {
    node.attribute(name)
        .and_then(|v| v.parse().ok())
        .ok_or(Error::ParseError("transform coordinate is not a number"))
}

/// Classifies a shape node into its kind tag.
fn classify_shape(shape_node: &Node) -> ShapeKind {
    match shape_node.tag_name().name() {
        "pic" => ShapeKind::Picture,
        "grpSp" => ShapeKind::Group,
        "cxnSp" => ShapeKind::Connector,
        "graphicFrame" => match graphic_data_uri(shape_node) {
            Some(TABLE_GRAPHIC_URI) => ShapeKind::Table,
            Some(CHART_GRAPHIC_URI) => ShapeKind::Chart,
            _ => ShapeKind::GraphicFrame,
        },
        _ => classify_sp(shape_node),
    }
}

fn classify_sp(sp_node: &Node) -> ShapeKind {
    if let Some(nv_sp_pr) = sp_node.children().find(|n| is_p(n, "nvSpPr")) {
        let is_text_box = nv_sp_pr
            .children()
            .find(|n| is_p(n, "cNvSpPr"))
            .and_then(|n| n.attribute("txBox"))
            .map(is_true_flag)
            .unwrap_or(false);
        if is_text_box {
            return ShapeKind::TextBox;
        }

        let is_placeholder = nv_sp_pr
            .children()
            .find(|n| is_p(n, "nvPr"))
            .map(|nv_pr| nv_pr.children().any(|n| is_p(&n, "ph")))
            .unwrap_or(false);
        if is_placeholder {
            return ShapeKind::Placeholder;
        }
    }
    ShapeKind::AutoShape
}

fn graphic_data_uri<'a>(frame_node: &Node<'a, '_>) -> Option<&'a str> {
    frame_node
        .descendants()
        .find(|n| is_a(n, "graphicData"))
        .and_then(|n| n.attribute("uri"))
}

/// Parses the text body node (`<p:txBody>`) into a structured text frame:
/// paragraphs in document order, each with its runs in document order.
fn parse_text_frame(tx_body_node: &Node) -> TextFrame {
    let mut paragraphs = Vec::new();

    for p_node in tx_body_node.children().filter(|n| is_a(n, "p")) {
        paragraphs.push(parse_paragraph(&p_node));
    }

    let has_text = paragraphs.iter().any(|p| !p.text.is_empty());
    TextFrame { has_text, paragraphs }
}

/// Parses a single paragraph node (`<a:p>`): indentation level and
/// alignment from `<a:pPr>`, then the run sequence.
fn parse_paragraph(p_node: &Node) -> ParagraphRecord {
    let mut level = 0;
    let mut alignment = None;

    if let Some(p_pr_node) = p_node.children().find(|n| is_a(n, "pPr")) {
        if let Some(lvl_attr) = p_pr_node.attribute("lvl") {
            level = lvl_attr.parse::<u32>().unwrap_or(0);
        }
        alignment = p_pr_node.attribute("algn").map(alignment_label);
    }

    let mut runs = Vec::new();
    for r_node in p_node.children().filter(|n| is_a(n, "r")) {
        runs.push(parse_run(&r_node));
    }

    let text: String = runs.iter().map(|r| r.text.as_str()).collect();
    ParagraphRecord { text, level, alignment, runs }
}

fn alignment_label(algn: &str) -> String {
    match algn {
        "l" => "LEFT",
        "ctr" => "CENTER",
        "r" => "RIGHT",
        "just" => "JUSTIFY",
        "justLow" => "JUSTIFY_LOW",
        "dist" => "DISTRIBUTE",
        "thaiDist" => "THAI_DISTRIBUTE",
        other => return other.to_ascii_uppercase(),
    }
    .to_string()
}

/// Parses a single run node (`<a:r>`): text content from `<a:t>` and
/// formatting from `<a:rPr>`.
///
/// The `b`/`i`/`u` attributes are tri-state in the source format; a flag
/// the run leaves unset inherits from its style. That distinction is
/// collapsed here: unset reads as `false`.
fn parse_run(r_node: &Node) -> RunRecord {
    let mut run = RunRecord {
        text: String::new(),
        bold: false,
        italic: false,
        underline: false,
        font_size: None,
        font_name: None,
        font_color: None,
    };

    if let Some(r_pr_node) = r_node.children().find(|n| is_a(n, "rPr")) {
        if let Some(b_attr) = r_pr_node.attribute("b") {
            run.bold = is_true_flag(b_attr);
        }
        if let Some(i_attr) = r_pr_node.attribute("i") {
            run.italic = is_true_flag(i_attr);
        }
        if let Some(u_attr) = r_pr_node.attribute("u") {
            run.underline = u_attr != "none";
        }
        if let Some(sz_attr) = r_pr_node.attribute("sz") {
            // sz is in hundredths of a point; 1 pt = 12700 EMU
            if let Ok(centipoints) = sz_attr.parse::<i64>() {
                run.font_size = Some((centipoints * 127).to_string());
            }
        }
        run.font_name = r_pr_node
            .children()
            .find(|n| is_a(n, "latin"))
            .and_then(|n| n.attribute("typeface"))
            .map(str::to_string);
        run.font_color = r_pr_node
            .children()
            .find(|n| is_a(n, "solidFill"))
            .and_then(|fill| fill.children().find(|n| n.is_element()))
            .and_then(|color| color_type_label(color.tag_name().name()));
    }

    if let Some(t_node) = r_node.children().find(|n| is_a(n, "t")) {
        if let Some(t) = t_node.text() {
            run.text.push_str(t);
        }
    }

    run
}

fn is_true_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Maps the solid-fill color element onto its specification-method tag.
/// Only how the color is specified is reported, never a resolved value;
/// resolving theme references would require the full style cascade.
fn color_type_label(tag: &str) -> Option<String> {
    let label = match tag {
        "srgbClr" => "RGB",
        "schemeClr" => "SCHEME",
        "sysClr" => "SYSTEM",
        "prstClr" => "PRESET",
        "hslClr" => "HSL",
        "scrgbClr" => "SCRGB",
        _ => return None,
    };
    Some(label.to_string())
}

/// Finds the `<a:tbl>` node inside a graphic frame whose payload is a
/// DrawingML table.
fn table_node<'a, 'i>(shape_node: &Node<'a, 'i>) -> Option<Node<'a, 'i>> {
    shape_node
        .descendants()
        .find(|n| is_a(n, "graphicData") && n.attribute("uri") == Some(TABLE_GRAPHIC_URI))
        .and_then(|graphic_data| graphic_data.children().find(|n| is_a(n, "tbl")))
}

/// Parses a table node (`<a:tbl>`) into the pre-flattened capability:
/// every cell in row-major order, tagged with its (row, column)
/// coordinate. Merged spans keep their placeholder `<a:tc>` elements, so
/// the cell count stays rows x columns.
fn parse_table(tbl_node: &Node) -> TableCapability {
    let mut columns = tbl_node
        .children()
        .find(|n| is_a(n, "tblGrid"))
        .map(|grid| grid.children().filter(|n| is_a(n, "gridCol")).count())
        .unwrap_or(0);

    let mut rows = 0;
    let mut cells = Vec::new();
    for (row_idx, tr_node) in tbl_node.children().filter(|n| is_a(n, "tr")).enumerate() {
        rows = row_idx + 1;
        let mut row_cells = 0;
        for (col_idx, tc_node) in tr_node.children().filter(|n| is_a(n, "tc")).enumerate() {
            row_cells = col_idx + 1;
            cells.push(TableCell {
                row: row_idx,
                column: col_idx,
                text: table_cell_text(&tc_node),
            });
        }
        // Tables without a grid definition still report a column count
        columns = columns.max(row_cells);
    }

    TableCapability { rows, columns, cells }
}

/// Extracts the plain text of a table cell (`<a:tc>`), paragraphs joined
/// with newlines. Note that inside table cells the text body is in the
/// DrawingML namespace (`<a:txBody>`), unlike shape text bodies.
fn table_cell_text(tc_node: &Node) -> String {
    let mut paragraphs = Vec::new();

    if let Some(tx_body_node) = tc_node.children().find(|n| is_a(n, "txBody")) {
        for p_node in tx_body_node.children().filter(|n| is_a(n, "p")) {
            let mut text = String::new();
            for r_node in p_node.children().filter(|n| is_a(n, "r")) {
                if let Some(t) = r_node.children().find(|n| is_a(n, "t")).and_then(|n| n.text()) {
                    text.push_str(t);
                }
            }
            paragraphs.push(text);
        }
    }

    paragraphs.join("\n")
}

/// Parses an image node (`<p:pic>`): resolves the `<a:blip>` embed
/// reference through the slide relationships to the preloaded media
/// bytes, then probes format and pixel dimensions from the header.
fn parse_image(pic_node: &Node, ctx: &SlideContext, config: &ParserConfig) -> Result<ImageCapability> {
    let blip_node = pic_node
        .descendants()
        .find(|n| is_a(n, "blip"))
        .ok_or(Error::ImageNotFound)?;

    let embed_attr = blip_node
        .attribute((RELS_NAMESPACE, "embed"))
        .or_else(|| blip_node.attribute("r:embed"))
        .ok_or(Error::ImageNotFound)?;

    let target = ctx.relationships.get(embed_attr).ok_or(Error::ImageNotFound)?;
    let data = ctx.image_data.get(embed_attr).ok_or(Error::ImageNotFound)?;

    let (width, height) = image::io::Reader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|_| Error::ParseError("unreadable image header"))?
        .into_dimensions()
        .map_err(|_| Error::ParseError("could not determine image dimensions"))?;

    Ok(ImageCapability {
        has_image: true,
        format: image_extension(target),
        size: PixelSize { width, height },
        data: config
            .include_image_data
            .then(|| general_purpose::STANDARD.encode(data)),
    })
}

fn image_extension(target: &str) -> String {
    let ext = target
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if ext == "jpeg" {
        "jpg".to_string()
    } else {
        ext
    }
}

/// Finds a shape's own transform (`<a:xfrm>`). Most shapes nest it inside
/// `<p:spPr>`, group shapes inside `<p:grpSpPr>`, graphic frames carry a
/// `<p:xfrm>` directly. None means placement is inherited from the
/// layout or master and no geometry is reported.
fn transform_node<'a, 'i>(shape_node: &Node<'a, 'i>) -> Option<Node<'a, 'i>> {
    shape_node
        .children()
        .find(|n| is_p(n, "spPr") || is_p(n, "grpSpPr"))
        .and_then(|sp_pr| sp_pr.children().find(|n| is_a(n, "xfrm")))
        .or_else(|| shape_node.children().find(|n| is_p(n, "xfrm")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::SlideContext;
    use crate::ParserConfig;

    fn wrap_slide(sp_tree_body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
    <p:cSld>
        <p:spTree>
            <p:nvGrpSpPr>
                <p:cNvPr id="1" name=""/>
                <p:cNvGrpSpPr/>
                <p:nvPr/>
            </p:nvGrpSpPr>
            <p:grpSpPr/>
            {sp_tree_body}
        </p:spTree>
    </p:cSld>
</p:sld>"#
        )
    }

    fn parse(sp_tree_body: &str) -> Vec<ShapeRecord> {
        let xml = wrap_slide(sp_tree_body);
        parse_slide_shapes(
            xml.as_bytes(),
            1,
            &SlideContext::default(),
            &ParserConfig::default(),
        )
        .unwrap()
    }

    fn complete(record: &ShapeRecord) -> &ShapeData {
        match record {
            ShapeRecord::Complete(data) => data,
            ShapeRecord::Degraded(failure) => panic!("unexpected degraded shape: {:?}", failure),
        }
    }

    const TEXT_BOX_SP: &str = r#"<p:sp>
        <p:nvSpPr>
            <p:cNvPr id="4" name="TextBox 3"/>
            <p:cNvSpPr txBox="1"/>
            <p:nvPr/>
        </p:nvSpPr>
        <p:spPr>
            <a:xfrm>
                <a:off x="914400" y="457200"/>
                <a:ext cx="1828800" cy="914400"/>
            </a:xfrm>
        </p:spPr>
        <p:txBody>
            <a:bodyPr/>
            <a:p>
                <a:pPr lvl="1" algn="ctr"/>
                <a:r>
                    <a:rPr lang="en-US" b="1" sz="1800">
                        <a:solidFill><a:srgbClr val="FF0000"/></a:solidFill>
                        <a:latin typeface="Arial"/>
                    </a:rPr>
                    <a:t>Hello </a:t>
                </a:r>
                <a:r>
                    <a:rPr lang="en-US" i="1" u="sng"/>
                    <a:t>world</a:t>
                </a:r>
            </a:p>
            <a:p>
                <a:r><a:t>second</a:t></a:r>
            </a:p>
        </p:txBody>
    </p:sp>"#;

    #[test]
    fn test_text_shape_base_fields() {
        let shapes = parse(TEXT_BOX_SP);
        assert_eq!(shapes.len(), 1);
        let data = complete(&shapes[0]);
        assert_eq!(data.shape_id, 4);
        assert_eq!(data.shape_type, ShapeKind::TextBox);
        assert_eq!(data.name.as_deref(), Some("TextBox 3"));
        assert_eq!(data.text.as_deref(), Some("Hello world\nsecond"));
        assert!(data.image.is_none());
        assert!(data.table.is_none());
    }

    #[test]
    fn test_text_frame_paragraphs_and_runs() {
        let shapes = parse(TEXT_BOX_SP);
        let frame = complete(&shapes[0]).text_frame.as_ref().unwrap();
        assert!(frame.has_text);
        assert_eq!(frame.paragraphs.len(), 2);

        let first = &frame.paragraphs[0];
        assert_eq!(first.text, "Hello world");
        assert_eq!(first.level, 1);
        assert_eq!(first.alignment.as_deref(), Some("CENTER"));
        assert_eq!(first.runs.len(), 2);

        let bold_run = &first.runs[0];
        assert!(bold_run.bold);
        assert!(!bold_run.italic);
        assert!(!bold_run.underline);
        // 18 pt = 1800 centipoints = 228600 EMU
        assert_eq!(bold_run.font_size.as_deref(), Some("228600"));
        assert_eq!(bold_run.font_name.as_deref(), Some("Arial"));
        assert_eq!(bold_run.font_color.as_deref(), Some("RGB"));

        let styled_run = &first.runs[1];
        assert!(!styled_run.bold);
        assert!(styled_run.italic);
        assert!(styled_run.underline);
        assert!(styled_run.font_size.is_none());
        assert!(styled_run.font_color.is_none());

        let second = &frame.paragraphs[1];
        assert_eq!(second.level, 0);
        assert!(second.alignment.is_none());
    }

    #[test]
    fn test_unset_formatting_collapses_to_false() {
        let explicit = r#"<p:sp>
            <p:nvSpPr><p:cNvPr id="2" name="a"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
            <p:txBody><a:p><a:r><a:rPr b="0" i="0"/><a:t>x</a:t></a:r></a:p></p:txBody>
        </p:sp>"#;
        let unset = r#"<p:sp>
            <p:nvSpPr><p:cNvPr id="2" name="a"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
            <p:txBody><a:p><a:r><a:t>x</a:t></a:r></a:p></p:txBody>
        </p:sp>"#;

        let explicit_run = complete(&parse(explicit)[0]).text_frame.as_ref().unwrap().paragraphs[0].runs[0].clone();
        let unset_run = complete(&parse(unset)[0]).text_frame.as_ref().unwrap().paragraphs[0].runs[0].clone();
        assert_eq!(explicit_run, unset_run);
        assert!(!unset_run.bold && !unset_run.italic && !unset_run.underline);
    }

    #[test]
    fn test_underline_none_is_false() {
        let body = r#"<p:sp>
            <p:nvSpPr><p:cNvPr id="2" name="a"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
            <p:txBody><a:p><a:r><a:rPr u="none"/><a:t>x</a:t></a:r></a:p></p:txBody>
        </p:sp>"#;
        let shapes = parse(body);
        assert!(!complete(&shapes[0]).text_frame.as_ref().unwrap().paragraphs[0].runs[0].underline);
    }

    #[test]
    fn test_placeholder_and_autoshape_classification() {
        let placeholder = r#"<p:sp>
            <p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
            <p:txBody><a:p><a:r><a:t>Title</a:t></a:r></a:p></p:txBody>
        </p:sp>"#;
        let autoshape = r#"<p:sp>
            <p:nvSpPr><p:cNvPr id="3" name="Oval 2"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
        </p:sp>"#;

        assert_eq!(complete(&parse(placeholder)[0]).shape_type, ShapeKind::Placeholder);
        let auto = parse(autoshape);
        let auto_data = complete(&auto[0]);
        assert_eq!(auto_data.shape_type, ShapeKind::AutoShape);
        assert!(auto_data.text.is_none());
        assert!(auto_data.text_frame.is_none());
    }

    #[test]
    fn test_group_and_connector_classification() {
        let body = r#"<p:grpSp>
            <p:nvGrpSpPr><p:cNvPr id="7" name="Group 6"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
            <p:grpSpPr>
                <a:xfrm>
                    <a:off x="100" y="200"/>
                    <a:ext cx="300" cy="400"/>
                </a:xfrm>
            </p:grpSpPr>
        </p:grpSp>
        <p:cxnSp>
            <p:nvCxnSpPr><p:cNvPr id="8" name="Connector 7"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr>
            <p:spPr/>
        </p:cxnSp>"#;

        let shapes = parse(body);
        assert_eq!(shapes.len(), 2);

        let group = complete(&shapes[0]);
        assert_eq!(group.shape_type, ShapeKind::Group);
        assert_eq!(group.position, Some(EmuPoint { left: 100, top: 200 }));
        assert_eq!(group.size, Some(EmuSize { width: 300, height: 400 }));

        assert_eq!(complete(&shapes[1]).shape_type, ShapeKind::Connector);
    }

    #[test]
    fn test_geometry_absent_when_inherited() {
        let body = r#"<p:sp>
            <p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
            <p:spPr/>
        </p:sp>"#;
        let shapes = parse(body);
        let data = complete(&shapes[0]);
        assert!(data.position.is_none());
        assert!(data.size.is_none());
    }

    const TABLE_FRAME: &str = r#"<p:graphicFrame>
        <p:nvGraphicFramePr><p:cNvPr id="5" name="Table 4"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>
        <p:xfrm>
            <a:off x="1000" y="2000"/>
            <a:ext cx="3000" cy="4000"/>
        </p:xfrm>
        <a:graphic>
            <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">
                <a:tbl>
                    <a:tblGrid><a:gridCol w="1"/><a:gridCol w="1"/><a:gridCol w="1"/></a:tblGrid>
                    <a:tr>
                        <a:tc><a:txBody><a:p><a:r><a:t>First name</a:t></a:r></a:p></a:txBody></a:tc>
                        <a:tc><a:txBody><a:p><a:r><a:t>Last name</a:t></a:r></a:p></a:txBody></a:tc>
                        <a:tc><a:txBody><a:p><a:r><a:t>Age</a:t></a:r></a:p></a:txBody></a:tc>
                    </a:tr>
                    <a:tr>
                        <a:tc><a:txBody><a:p><a:r><a:t>John</a:t></a:r></a:p></a:txBody></a:tc>
                        <a:tc><a:txBody><a:p><a:r><a:t>Doe</a:t></a:r></a:p></a:txBody></a:tc>
                        <a:tc><a:txBody><a:p><a:r><a:t>21</a:t></a:r></a:p></a:txBody></a:tc>
                    </a:tr>
                </a:tbl>
            </a:graphicData>
        </a:graphic>
    </p:graphicFrame>"#;

    #[test]
    fn test_table_flattening_row_major() {
        let shapes = parse(TABLE_FRAME);
        let data = complete(&shapes[0]);
        assert_eq!(data.shape_type, ShapeKind::Table);

        let table = data.table.as_ref().unwrap();
        assert_eq!(table.rows, 2);
        assert_eq!(table.columns, 3);
        assert_eq!(table.cells.len(), table.rows * table.columns);

        let coordinates: Vec<(usize, usize)> =
            table.cells.iter().map(|c| (c.row, c.column)).collect();
        assert_eq!(
            coordinates,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert_eq!(table.cells[0].text, "First name");
        assert_eq!(table.cells[5].text, "21");
    }

    #[test]
    fn test_table_frame_geometry() {
        let shapes = parse(TABLE_FRAME);
        let data = complete(&shapes[0]);
        assert_eq!(data.position, Some(EmuPoint { left: 1000, top: 2000 }));
        assert_eq!(data.size, Some(EmuSize { width: 3000, height: 4000 }));
    }

    #[test]
    fn test_table_without_grid_derives_columns() {
        let body = r#"<p:graphicFrame>
            <p:nvGraphicFramePr><p:cNvPr id="5" name="Table 4"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>
            <a:graphic>
                <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">
                    <a:tbl>
                        <a:tr>
                            <a:tc><a:txBody><a:p><a:r><a:t>a</a:t></a:r></a:p></a:txBody></a:tc>
                            <a:tc><a:txBody><a:p><a:r><a:t>b</a:t></a:r></a:p></a:txBody></a:tc>
                        </a:tr>
                    </a:tbl>
                </a:graphicData>
            </a:graphic>
        </p:graphicFrame>"#;
        let shapes = parse(body);
        let table = complete(&shapes[0]).table.as_ref().unwrap();
        assert_eq!(table.rows, 1);
        assert_eq!(table.columns, 2);
    }

    #[test]
    fn test_chart_frame_has_no_table() {
        let body = r#"<p:graphicFrame>
            <p:nvGraphicFramePr><p:cNvPr id="6" name="Chart 5"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>
            <a:graphic>
                <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart"/>
            </a:graphic>
        </p:graphicFrame>"#;
        let shapes = parse(body);
        let data = complete(&shapes[0]);
        assert_eq!(data.shape_type, ShapeKind::Chart);
        assert!(data.table.is_none());
    }

    #[test]
    fn test_broken_shape_degrades_without_aborting_siblings() {
        let body = r#"<p:sp>
            <p:nvSpPr><p:cNvPr id="2" name="ok"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
        </p:sp>
        <p:sp>
            <p:nvSpPr><p:cNvPr id="broken" name="bad"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
        </p:sp>
        <p:sp>
            <p:nvSpPr><p:cNvPr id="3" name="also ok"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
        </p:sp>"#;

        let shapes = parse(body);
        assert_eq!(shapes.len(), 3);
        assert!(!shapes[0].is_degraded());
        assert!(!shapes[2].is_degraded());

        match &shapes[1] {
            ShapeRecord::Degraded(failure) => {
                assert_eq!(failure.shape_id, 0);
                assert!(!failure.error.is_empty());
            }
            ShapeRecord::Complete(data) => panic!("expected degraded record, got {:?}", data),
        }
    }

    #[test]
    fn test_missing_sp_tree_is_fatal() {
        let xml = r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld/></p:sld>"#;
        let result = parse_slide_shapes(
            xml.as_bytes(),
            1,
            &SlideContext::default(),
            &ParserConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_alignment_labels() {
        assert_eq!(alignment_label("l"), "LEFT");
        assert_eq!(alignment_label("ctr"), "CENTER");
        assert_eq!(alignment_label("r"), "RIGHT");
        assert_eq!(alignment_label("just"), "JUSTIFY");
        assert_eq!(alignment_label("dist"), "DISTRIBUTE");
    }

    #[test]
    fn test_image_extension_normalization() {
        assert_eq!(image_extension("../media/image1.png"), "png");
        assert_eq!(image_extension("../media/photo.JPEG"), "jpg");
        assert_eq!(image_extension("../media/pic.jpg"), "jpg");
    }
}
