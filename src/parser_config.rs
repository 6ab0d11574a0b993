/// Configuration options for the PPTX extractor.
///
/// Use [`ParserConfig::builder()`] to create a configuration instance.
/// This allows you to customize only the desired fields while falling back to sensible defaults for the rest.
///
/// # Configuration Options
///
/// | Parameter | Type | Default | Description |
/// |-----------|------|---------|-------------|
/// | `extract_images` | `bool` | `true` | Whether embedded media is read so picture shapes report format and pixel dimensions |
/// | `include_image_data` | `bool` | `false` | Whether the base64-encoded media payload is embedded in each image capability |
///
/// # Example
///
/// ```
/// use pptx_to_json::ParserConfig;
///
/// let config = ParserConfig::builder()
///     .extract_images(true)
///     .include_image_data(false)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub extract_images: bool,
    pub include_image_data: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            extract_images: true,
            include_image_data: false,
        }
    }
}

impl ParserConfig {
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }
}

/// Builder for [`ParserConfig`].
///
/// Allows setting individual configuration fields while falling back to defaults for any unspecified values
#[derive(Debug, Default)]
pub struct ParserConfigBuilder {
    extract_images: Option<bool>,
    include_image_data: Option<bool>,
}

impl ParserConfigBuilder {
    /// Sets whether embedded media should be read from the package.
    ///
    /// When disabled, picture shapes carry no image capability at all,
    /// since pixel dimensions cannot be probed without the bytes.
    pub fn extract_images(mut self, value: bool) -> Self {
        self.extract_images = Some(value);
        self
    }

    /// Sets whether the raw media payload is embedded base64-encoded in
    /// each image capability. Implies nothing about `extract_images`;
    /// without that, this flag has no effect.
    pub fn include_image_data(mut self, value: bool) -> Self {
        self.include_image_data = Some(value);
        self
    }

    /// Builds the final [`ParserConfig`] instance, applying default values for any fields that were not set.
    pub fn build(self) -> ParserConfig {
        ParserConfig {
            extract_images: self.extract_images.unwrap_or(true),
            include_image_data: self.include_image_data.unwrap_or(false),
        }
    }
}
