use serde::Serialize;

/// Top-level result of a parse call: the wire shape handed back to the
/// caller, ready for JSON serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput {
    pub success: bool,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    pub presentation: PresentationSummary,
    pub slides: Vec<SlideRecord>,
}

/// Presentation-level metadata, built once per parse call.
///
/// Width and height are EMU (914,400 per inch). They are `None` when the
/// package omits `<p:sldSz>`, which the schema allows; in that case they
/// serialize as `null` rather than being dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationSummary {
    pub slide_width: Option<i64>,
    pub slide_height: Option<i64>,
    pub slide_count: u32,
}

/// One slide with its shape records in z-order.
///
/// `slide_number` is the 1-based position in presentation order;
/// `slide_id` is the package-intrinsic identifier from `<p:sldId>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideRecord {
    pub slide_number: u32,
    pub slide_id: u32,
    pub shapes: Vec<ShapeRecord>,
}

/// A shape is either fully extracted or degraded to an id plus an error
/// message. There is no partial state in between: any failure during
/// extraction discards the half-built record and yields [`ShapeFailure`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShapeRecord {
    Complete(Box<ShapeData>),
    Degraded(ShapeFailure),
}

impl ShapeRecord {
    pub fn shape_id(&self) -> u64 {
        match self {
            ShapeRecord::Complete(data) => data.shape_id,
            ShapeRecord::Degraded(failure) => failure.shape_id,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ShapeRecord::Degraded(_))
    }
}

/// Fallback record for a shape whose extraction failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeFailure {
    pub shape_id: u64,
    pub error: String,
}

/// A fully extracted shape: base fields plus zero or more capability
/// extensions, each present independently of the others. Absent
/// capabilities are omitted from the serialized form entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeData {
    pub shape_id: u64,
    pub shape_type: ShapeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Concatenated plain text of the whole shape, paragraphs joined
    /// with `\n`. Present for any shape carrying a text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_frame: Option<TextFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableCapability>,
    /// EMU offset of the shape's own transform; omitted when placement
    /// is inherited from the layout or master.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<EmuPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<EmuSize>,
}

/// Shape classification tag, following the MSO shape-type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeKind {
    TextBox,
    Placeholder,
    AutoShape,
    Picture,
    Table,
    Chart,
    GraphicFrame,
    Group,
    Connector,
}

/// Structured text body of a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFrame {
    pub has_text: bool,
    pub paragraphs: Vec<ParagraphRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphRecord {
    pub text: String,
    /// Indentation level, 0-based.
    pub level: u32,
    /// Stringified alignment tag (`LEFT`, `CENTER`, ...); omitted when
    /// the paragraph has no explicit alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    pub runs: Vec<RunRecord>,
}

/// A single text run with its resolved formatting flags.
///
/// `bold`, `italic` and `underline` are definite booleans: a flag the
/// source leaves unset (inheriting from a style) is reported as `false`,
/// indistinguishable from an explicit `false`. Consumers needing the
/// inherited-vs-explicit distinction cannot recover it from this record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Stringified EMU magnitude of the run-level font size, opaque to
    /// consumers; omitted when no size is set on the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    /// How the run's color is specified (`RGB`, `SCHEME`, ...), never the
    /// resolved color value itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
}

/// Embedded raster image facts for picture shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageCapability {
    pub has_image: bool,
    /// Lowercase file extension of the media part (`png`, `jpg`, ...).
    pub format: String,
    pub size: PixelSize,
    /// Base64-encoded media payload; populated only when
    /// `ParserConfig::include_image_data` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

/// Pre-flattened table structure: every cell in row-major order, tagged
/// with its coordinate. `cells` is always present, possibly empty, and
/// holds exactly `rows * columns` entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCapability {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub row: usize,
    pub column: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmuPoint {
    pub left: i64,
    pub top: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmuSize {
    pub width: i64,
    pub height: i64,
}
