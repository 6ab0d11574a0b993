use crate::parse_xml;
use crate::types::SlideRecord;
use crate::{ParserConfig, Result};
use std::collections::HashMap;

/// Per-slide extraction context: the slide's resolved relationships and
/// the media bytes preloaded from the package. Built fresh for each slide
/// and discarded afterwards; nothing is shared across slides.
#[derive(Debug, Default)]
pub struct SlideContext {
    /// Relationship id -> target path, as declared in the slide's `.rels`.
    pub relationships: HashMap<String, String>,
    /// Relationship id -> raw media bytes, populated only when image
    /// extraction is enabled.
    pub image_data: HashMap<String, Vec<u8>>,
}

/// Extracts one slide into its record: shape list in z-order, with the
/// 1-based sequence number and the package-intrinsic slide id side by
/// side.
///
/// # Errors
///
/// Fails only on slide-level problems (invalid UTF-8, corrupt XML,
/// missing shape tree). Per-shape failures are contained inside the
/// shape list as degraded records.
pub fn extract_slide(
    slide_number: u32,
    slide_id: u32,
    xml_data: &[u8],
    ctx: &SlideContext,
    config: &ParserConfig,
) -> Result<SlideRecord> {
    let shapes = parse_xml::parse_slide_shapes(xml_data, slide_number, ctx, config)?;
    Ok(SlideRecord {
        slide_number,
        slide_id,
        shapes,
    })
}
