use crate::constants::RELS_NAMESPACE;
use crate::{Error, Result};
use roxmltree::Document;

/// Facts owned by the presentation part: slide geometry and the ordered
/// slide-id list.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationManifest {
    pub slide_width: Option<i64>,
    pub slide_height: Option<i64>,
    /// Slides in presentation order, as declared by `<p:sldIdLst>`.
    pub slide_refs: Vec<SlideRef>,
}

/// One `<p:sldId>` entry: the intrinsic slide identifier plus the
/// relationship id resolving to the slide part.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideRef {
    pub slide_id: u32,
    pub rel_id: String,
}

/// Parses `ppt/presentation.xml`.
///
/// Extracts the slide size from `<p:sldSz>` (absent is valid; the schema
/// makes it optional) and the ordered `<p:sldId>` entries. A presentation
/// without a `<p:sldIdLst>` has zero slides.
///
/// # Errors
///
/// Fails on invalid UTF-8, malformed XML, or a `<p:sldId>` entry missing
/// its id attributes.
pub fn parse_presentation_xml(xml_data: &[u8]) -> Result<PresentationManifest> {
    let xml_str = std::str::from_utf8(xml_data)?;
    let doc = Document::parse(xml_str)?;
    let root = doc.root_element();
    let ns = root.tag_name().namespace();

    let sld_sz = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "sldSz" && n.tag_name().namespace() == ns);

    let slide_width = sld_sz.and_then(|n| n.attribute("cx")).and_then(|v| v.parse().ok());
    let slide_height = sld_sz.and_then(|n| n.attribute("cy")).and_then(|v| v.parse().ok());

    let mut slide_refs = Vec::new();
    if let Some(sld_id_lst) = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "sldIdLst" && n.tag_name().namespace() == ns)
    {
        for sld_id in sld_id_lst
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "sldId")
        {
            let slide_id = sld_id
                .attribute("id")
                .and_then(|v| v.parse::<u32>().ok())
                .ok_or(Error::ParseError("slide entry has no numeric id"))?;

            let rel_id = sld_id
                .attribute((RELS_NAMESPACE, "id"))
                .or_else(|| sld_id.attribute("r:id"))
                .ok_or(Error::ParseError("slide entry has no relationship id"))?;

            slide_refs.push(SlideRef {
                slide_id,
                rel_id: rel_id.to_string(),
            });
        }
    }

    Ok(PresentationManifest {
        slide_width,
        slide_height,
        slide_refs,
    })
}
