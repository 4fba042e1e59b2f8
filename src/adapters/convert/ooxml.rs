//! Helpers shared by the Office Open XML (docx/pptx) readers.

use super::ConvertError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

pub type Package = ZipArchive<File>;

pub fn open_package(path: &Path) -> Result<Package, ConvertError> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(file)?)
}

/// Reads a part of the package as UTF-8, `None` when the part is absent.
pub fn read_part(package: &mut Package, name: &str) -> Result<Option<String>, ConvertError> {
    let mut entry = match package.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

pub fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// One internal `<Relationship>` of a part. `target` is a package part name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub kind: String,
    pub target: String,
}

impl Relationship {
    /// Matches the last segment of the relationship type URI (`slide`, `notesSlide`, ...).
    pub fn is(&self, kind: &str) -> bool {
        self.kind.rsplit('/').next() == Some(kind)
    }
}

/// Relationships declared for `part` in its `_rels/{file}.rels` sibling.
/// External targets are skipped; a part without a rels file has none.
pub fn relationships(
    package: &mut Package,
    part: &str,
) -> Result<Vec<Relationship>, ConvertError> {
    let (dir, file) = part.rsplit_once('/').unwrap_or(("", part));
    let rels_part = if dir.is_empty() {
        format!("_rels/{}.rels", file)
    } else {
        format!("{}/_rels/{}.rels", dir, file)
    };

    let Some(xml) = read_part(package, &rels_part)? else {
        return Ok(Vec::new());
    };

    let mut reader = Reader::from_str(&xml);
    let mut found = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"Relationship" => {
                if attribute(&e, b"TargetMode").as_deref() == Some("External") {
                    continue;
                }
                let id = attribute(&e, b"Id");
                let kind = attribute(&e, b"Type");
                let target = attribute(&e, b"Target");
                if let (Some(id), Some(kind), Some(target)) = (id, kind, target) {
                    found.push(Relationship {
                        id,
                        kind,
                        target: resolve_target(dir, &target),
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(found)
}

/// Resolves a relationship target against the directory of its source part.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let (mut segments, relative): (Vec<&str>, &str) = match target.strip_prefix('/') {
        Some(absolute) => (Vec::new(), absolute),
        None => (
            base_dir.split('/').filter(|s| !s.is_empty()).collect(),
            target,
        ),
    };

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}
