use super::ooxml::{self, attribute, Package};
use super::ConvertError;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::path::Path;

#[derive(Debug, Default, PartialEq)]
struct Shape {
    placeholder: Option<String>,
    paragraphs: Vec<String>,
}

impl Shape {
    fn is_title(&self) -> bool {
        matches!(self.placeholder.as_deref(), Some("title" | "ctrTitle"))
    }
}

const PRESENTATION_PART: &str = "ppt/presentation.xml";

pub fn convert(path: &Path) -> Result<String, ConvertError> {
    let mut package = ooxml::open_package(path)?;
    let slides = slide_parts(&mut package)?;
    if slides.is_empty() {
        return Err(ConvertError::InvalidDocument(
            "presentation contains no slides".to_string(),
        ));
    }

    let mut sections = Vec::with_capacity(slides.len());
    for (index, part) in slides.iter().enumerate() {
        let slide_xml = ooxml::read_part(&mut package, part)?.unwrap_or_default();
        let shapes = read_shapes(&slide_xml)?;

        let notes = match notes_part(&mut package, part)? {
            Some(notes_part) => match ooxml::read_part(&mut package, &notes_part)? {
                Some(xml) => notes_text(&read_shapes(&xml)?),
                None => String::new(),
            },
            None => String::new(),
        };

        sections.push(render_slide(index + 1, &shapes, &notes));
    }

    Ok(sections.join("\n\n"))
}

/// Slide part names in presentation order, taken from `p:sldIdLst` and the
/// presentation's relationships. Packages without `ppt/presentation.xml`
/// fall back to numeric file-name order.
fn slide_parts(package: &mut Package) -> Result<Vec<String>, ConvertError> {
    let Some(xml) = ooxml::read_part(package, PRESENTATION_PART)? else {
        return slide_parts_by_name(package);
    };

    let ids = slide_ids(&xml)?;
    let rels = ooxml::relationships(package, PRESENTATION_PART)?;
    Ok(ids
        .iter()
        .filter_map(|id| rels.iter().find(|rel| &rel.id == id && rel.is("slide")))
        .map(|rel| rel.target.clone())
        .collect())
}

/// `r:id` of every `p:sldId`, in document order.
fn slide_ids(presentation_xml: &str) -> Result<Vec<String>, ConvertError> {
    let mut reader = Reader::from_str(presentation_xml);
    let mut ids = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"p:sldId" => {
                if let Some(id) = attribute(&e, b"r:id") {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(ids)
}

fn slide_parts_by_name(package: &Package) -> Result<Vec<String>, ConvertError> {
    let pattern = Regex::new(r"^ppt/slides/slide(\d+)\.xml$")
        .map_err(|e| ConvertError::InvalidDocument(e.to_string()))?;

    let mut numbered: Vec<(u32, String)> = package
        .file_names()
        .filter_map(|name| {
            let number = pattern.captures(name)?[1].parse().ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    numbered.sort_unstable();
    Ok(numbered.into_iter().map(|(_, name)| name).collect())
}

/// The notes slide linked from a slide's relationships, if any.
fn notes_part(package: &mut Package, slide_part: &str) -> Result<Option<String>, ConvertError> {
    Ok(ooxml::relationships(package, slide_part)?
        .into_iter()
        .find(|rel| rel.is("notesSlide"))
        .map(|rel| rel.target))
}

fn read_shapes(xml: &str) -> Result<Vec<Shape>, ConvertError> {
    let mut reader = Reader::from_str(xml);
    let mut shapes = Vec::new();
    let mut shape: Option<Shape> = None;
    let mut paragraph = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"p:sp" => shape = Some(Shape::default()),
                b"p:ph" => set_placeholder(&mut shape, attribute(&e, b"type")),
                b"a:p" => paragraph.clear(),
                b"a:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"p:ph" => set_placeholder(&mut shape, attribute(&e, b"type")),
                b"a:br" => paragraph.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => paragraph.push_str(&t.unescape()?),
            Event::End(e) => match e.name().as_ref() {
                b"a:t" => in_text = false,
                b"a:p" => {
                    let text = paragraph.trim();
                    if let (Some(current), false) = (shape.as_mut(), text.is_empty()) {
                        current.paragraphs.push(text.to_string());
                    }
                    paragraph.clear();
                }
                b"p:sp" => {
                    if let Some(done) = shape.take() {
                        if !done.paragraphs.is_empty() {
                            shapes.push(done);
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(shapes)
}

fn set_placeholder(shape: &mut Option<Shape>, kind: Option<String>) {
    if let Some(current) = shape.as_mut() {
        // Placeholders without a type attribute are body placeholders.
        current.placeholder = Some(kind.unwrap_or_else(|| "body".to_string()));
    }
}

fn notes_text(shapes: &[Shape]) -> String {
    shapes
        .iter()
        .filter(|shape| shape.placeholder.as_deref() == Some("body"))
        .flat_map(|shape| shape.paragraphs.iter().cloned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_slide(number: usize, shapes: &[Shape], notes: &str) -> String {
    let mut out = format!("<!-- Slide number: {} -->", number);

    for shape in shapes {
        out.push('\n');
        if shape.is_title() {
            out.push_str("# ");
            out.push_str(&shape.paragraphs.join(" "));
        } else {
            out.push_str(&shape.paragraphs.join("\n"));
        }
    }

    if !notes.is_empty() {
        out.push_str("\n\n### Notes:\n");
        out.push_str(notes);
    }

    out
}
