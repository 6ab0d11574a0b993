use crate::constants::{PRESENTATION_PART, PRESENTATION_RELS_PART, SLIDE_REL_TYPE};
use crate::parse_presentation;
use crate::parse_rels;
use crate::parser_config::ParserConfig;
use crate::slide::{self, SlideContext};
use crate::types::{ParseOutput, PresentationSummary, SlideRecord};
use crate::{Error, Result};
use std::{
    collections::HashMap,
    io::{Cursor, Read},
    path::Path,
};

/// One slide of the package: its intrinsic identifier and the part path
/// it resolves to, in presentation order.
#[derive(Debug, Clone)]
pub struct SlideEntry {
    pub slide_id: u32,
    pub path: String,
}

/// Holds the internal representation of a loaded PowerPoint (pptx) container.
///
/// `PptxContainer` opens a byte buffer as a PPTX package, validates the
/// container structure, and exposes the presentation-level facts (slide
/// geometry, ordered slide collection). [`PptxContainer::parse`] then
/// walks the whole package into the serializable output tree.
pub struct PptxContainer {
    pub config: ParserConfig,
    archive: zip::ZipArchive<Cursor<Vec<u8>>>,
    package_size: u64,
    /// Slide width in EMU from `<p:sldSz>`, when the package declares one.
    pub slide_width: Option<i64>,
    /// Slide height in EMU from `<p:sldSz>`, when the package declares one.
    pub slide_height: Option<i64>,
    /// Slides in presentation order, as declared by `<p:sldIdLst>`.
    pub slide_entries: Vec<SlideEntry>,
}

impl PptxContainer {
    /// Opens an in-memory byte buffer as a PPTX package.
    ///
    /// Validates that the buffer is a zip archive containing a
    /// presentation part, parses the part and its relationships, and
    /// resolves the ordered slide collection. Slide order follows the
    /// `<p:sldIdLst>` declaration, not the lexicographic order of part
    /// paths.
    ///
    /// # Errors
    ///
    /// Every failure here means the package is malformed
    /// ([`crate::ErrorKind::MalformedPackage`]): not a valid archive,
    /// missing `ppt/presentation.xml`, corrupt XML, or a slide reference
    /// that resolves to nothing.
    pub fn from_bytes(data: Vec<u8>, config: ParserConfig) -> Result<Self> {
        let package_size = data.len() as u64;
        let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

        let presentation_xml = read_part(&mut archive, PRESENTATION_PART)?;
        let manifest = parse_presentation::parse_presentation_xml(&presentation_xml)?;

        let mut slide_entries = Vec::with_capacity(manifest.slide_refs.len());
        if !manifest.slide_refs.is_empty() {
            let rels_xml = read_part(&mut archive, PRESENTATION_RELS_PART)?;
            let relationships = parse_rels::parse_relationships(&rels_xml)?;
            let targets: HashMap<&str, &str> = relationships
                .iter()
                .filter(|rel| rel.rel_type == SLIDE_REL_TYPE)
                .map(|rel| (rel.id.as_str(), rel.target.as_str()))
                .collect();

            for slide_ref in &manifest.slide_refs {
                let target = targets
                    .get(slide_ref.rel_id.as_str())
                    .ok_or(Error::ParseError("unresolved slide relationship"))?;
                slide_entries.push(SlideEntry {
                    slide_id: slide_ref.slide_id,
                    path: resolve_part_path(target),
                });
            }
        }

        Ok(Self {
            config,
            archive,
            package_size,
            slide_width: manifest.slide_width,
            slide_height: manifest.slide_height,
            slide_entries,
        })
    }

    /// Opens a PPTX file from disk. Thin convenience over
    /// [`PptxContainer::from_bytes`].
    pub fn open(path: &Path, config: ParserConfig) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?, config)
    }

    /// Builds the presentation-level summary snapshot.
    pub fn summary(&self) -> PresentationSummary {
        PresentationSummary {
            slide_width: self.slide_width,
            slide_height: self.slide_height,
            slide_count: self.slide_entries.len() as u32,
        }
    }

    /// Parses every slide of the package into the full output tree.
    ///
    /// Slides are walked in presentation order and assigned contiguous
    /// 1-based sequence numbers; within each slide, shapes are walked in
    /// z-order. Degraded shape records are appended in place, never
    /// filtered, so the output always carries the complete structural
    /// skeleton of the package.
    ///
    /// `file_name` and the package byte size are echoed into the output
    /// for the caller's benefit; they do not influence parsing.
    ///
    /// # Errors
    ///
    /// Fails when a slide part is missing or its XML is corrupt. Failures
    /// scoped to a single shape do not fail the call.
    pub fn parse(&mut self, file_name: &str) -> Result<ParseOutput> {
        let presentation = self.summary();
        // Clone entries upfront so the loop can borrow the archive mutably
        let entries = self.slide_entries.clone();

        let mut slides = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            slides.push(self.load_slide(idx as u32 + 1, entry)?);
        }

        Ok(ParseOutput {
            success: true,
            file_name: file_name.to_string(),
            file_size: self.package_size,
            presentation,
            slides,
        })
    }

    /// Loads and extracts a single slide: reads the slide part, its
    /// relationships (absence is fine), preloads referenced media when
    /// image extraction is enabled, and hands everything to the
    /// extractor.
    fn load_slide(&mut self, slide_number: u32, entry: &SlideEntry) -> Result<SlideRecord> {
        let slide_xml = self.read_part(&entry.path)?;

        let rels_path = slide_rels_path(&entry.path);
        let rels_data = self.read_part(&rels_path).ok();

        let mut relationships = HashMap::new();
        let mut image_data = HashMap::new();

        if let Some(ref rels_bytes) = rels_data {
            let rels = parse_rels::parse_relationships(rels_bytes)?;

            if self.config.extract_images {
                let images: Vec<(String, String)> = parse_rels::image_relationships(&rels)
                    .into_iter()
                    .map(|rel| (rel.id.clone(), rel.target.clone()))
                    .collect();

                for (id, target) in images {
                    let media_path = media_part_path(&entry.path, &target);
                    if let Ok(data) = self.read_part(&media_path) {
                        image_data.insert(id, data);
                    }
                }
            }

            relationships = rels.into_iter().map(|rel| (rel.id, rel.target)).collect();
        }

        let ctx = SlideContext {
            relationships,
            image_data,
        };

        slide::extract_slide(slide_number, entry.slide_id, &slide_xml, &ctx, &self.config)
    }

    /// Reads a file from the PPTX archive by its internal path.
    fn read_part(&mut self, path: &str) -> Result<Vec<u8>> {
        read_part(&mut self.archive, path)
    }
}

fn read_part(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, path: &str) -> Result<Vec<u8>> {
    let mut file = archive.by_name(path).map_err(|err| match err {
        zip::result::ZipError::FileNotFound => Error::MissingPart(path.to_string()),
        other => Error::Zip(other),
    })?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}

/// Resolves a presentation-relationship target to a package part path.
/// Targets are relative to `ppt/` unless they are package-absolute.
///
/// # Example
///
/// ```text
/// "slides/slide1.xml"  -> "ppt/slides/slide1.xml"
/// "/ppt/slides/s.xml"  -> "ppt/slides/s.xml"
/// ```
fn resolve_part_path(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if let Some(upward) = target.strip_prefix("../") {
        // presentation.xml lives in ppt/, so "../" climbs to the package root
        upward.to_string()
    } else {
        format!("ppt/{}", target)
    }
}

/// Constructs the path to the relationships file for a given slide.
///
/// # Example
///
/// ```text
/// "ppt/slides/slide1.xml" -> "ppt/slides/_rels/slide1.xml.rels"
/// ```
fn slide_rels_path(slide_path: &str) -> String {
    let mut rels_path = slide_path.to_string();
    if let Some(pos) = rels_path.rfind('/') {
        rels_path.insert_str(pos + 1, "_rels/");
    }
    rels_path.push_str(".rels");
    rels_path
}

/// Resolves a media target relative to a slide part.
fn media_part_path(slide_path: &str, target: &str) -> String {
    if target.starts_with("../") {
        let adjusted_target = target.trim_start_matches("../");
        format!("ppt/{}", adjusted_target)
    } else {
        let slide_dir = slide_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        format!("{}/{}", slide_dir, target)
    }
}
