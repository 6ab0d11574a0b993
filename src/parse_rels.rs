use crate::constants::IMAGE_REL_TYPE;
use crate::Result;
use roxmltree::Document;

/// One entry of an OPC relationships (`.rels`) part.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

/// Parses relationship (`.rels`) XML data from a PPTX package part.
///
/// Relationship parts map resource IDs to their targets; the presentation
/// part uses them to order slides, slide parts use them to locate
/// embedded media. All relationships are returned; callers filter by
/// type.
///
/// # Errors
///
/// An error is returned if the XML data is not valid UTF-8 or the XML
/// structure is malformed.
pub fn parse_relationships(xml_data: &[u8]) -> Result<Vec<Relationship>> {
    let xml_str = std::str::from_utf8(xml_data)?;
    let doc = Document::parse(xml_str)?;
    let root = doc.root_element();

    let mut relationships = Vec::new();
    for rel in root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "Relationship")
    {
        if let (Some(id), Some(rel_type), Some(target)) = (
            rel.attribute("Id"),
            rel.attribute("Type"),
            rel.attribute("Target"),
        ) {
            relationships.push(Relationship {
                id: id.to_string(),
                rel_type: rel_type.to_string(),
                target: target.to_string(),
            });
        }
    }

    Ok(relationships)
}

/// Returns only the relationships pointing at embedded images.
pub fn image_relationships(relationships: &[Relationship]) -> Vec<&Relationship> {
    relationships
        .iter()
        .filter(|rel| rel.rel_type == IMAGE_REL_TYPE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELS_WITH_IMAGES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image2.jpg"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
</Relationships>"#;

    const RELS_WITHOUT_IMAGES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
</Relationships>"#;

    #[test]
    fn test_parse_relationships() {
        let relationships = parse_relationships(RELS_WITH_IMAGES.as_bytes()).unwrap();
        assert_eq!(relationships.len(), 3);
        assert_eq!(relationships[0].id, "rId1");
        assert_eq!(relationships[0].target, "../media/image1.png");
        assert_eq!(relationships[2].id, "rId3");
    }

    #[test]
    fn test_image_relationships_filter() {
        let relationships = parse_relationships(RELS_WITH_IMAGES.as_bytes()).unwrap();
        let images = image_relationships(&relationships);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].id, "rId1");
        assert_eq!(images[0].target, "../media/image1.png");
        assert_eq!(images[1].id, "rId2");
        assert_eq!(images[1].target, "../media/image2.jpg");
    }

    #[test]
    fn test_image_relationships_empty() {
        let relationships = parse_relationships(RELS_WITHOUT_IMAGES.as_bytes()).unwrap();
        assert!(image_relationships(&relationships).is_empty());
    }

    #[test]
    fn test_parse_relationships_invalid_xml() {
        assert!(parse_relationships(b"<Relationships").is_err());
    }
}
