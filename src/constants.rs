/// PresentationML namespace (`p:` prefix in slide XML).
pub const P_NAMESPACE: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// DrawingML namespace (`a:` prefix in text bodies, tables and transforms).
pub const A_NAMESPACE: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// Officedocument relationship attribute namespace (`r:` prefix, e.g. `r:embed`).
pub const RELS_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Relationship type of an embedded image.
pub const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Relationship type of a slide part.
pub const SLIDE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

/// `graphicData` URI marking a DrawingML table inside a graphic frame.
pub const TABLE_GRAPHIC_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";

/// `graphicData` URI marking an embedded chart inside a graphic frame.
pub const CHART_GRAPHIC_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// Location of the presentation part inside the package.
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Location of the presentation part's relationships.
pub const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
