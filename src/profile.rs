//! Document profiles: the per-document-type schema of the message zone.
//!
//! A seal names its profile by number (tag 0x00). The profile declares which
//! tags may follow, how each one is encoded on the wire, and which are
//! mandatory. Profiles are maintained externally as XML documents:
//!
//! ```xml
//! <profile>
//!   <profileNumber>123456</profileNumber>
//!   <profileName>Statement of Comparability</profileName>
//!   <creator>...</creator>
//!   <entry tag="4" optional="false">
//!     <name>Document number</name>
//!     <type>alphanum</type>
//!   </entry>
//! </profile>
//! ```
//!
//! The field type is validated against [`FieldType`] at load time; an
//! unrecognized type string fails the whole profile rather than being carried
//! along as opaque data.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Wire encoding of a message-zone value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// C40-packed restricted alphabet (profile type `alphanum`)
    Alphanum,
    /// Raw bytes decoded as UTF-8 text (profile type `string`)
    Text,
    /// Raw bytes decoded as UTF-8 text, may contain line breaks
    /// (profile type `multistring`)
    MultilineText,
    /// Raw bytes, passed through untouched (profile type `binary`)
    Binary,
    /// 3-byte packed calendar date (profile type `date`)
    Date,
}

impl FieldType {
    /// Parse the type string used in profile XML. Fails closed.
    pub fn from_profile_value(value: &str) -> Result<Self> {
        match value {
            "alphanum" => Ok(FieldType::Alphanum),
            "string" => Ok(FieldType::Text),
            "multistring" => Ok(FieldType::MultilineText),
            "binary" => Ok(FieldType::Binary),
            "date" => Ok(FieldType::Date),
            other => Err(Error::InvalidSchemaType(other.to_string())),
        }
    }
}

/// One declared message-zone field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEntry {
    /// Tag byte identifying the field on the wire
    pub tag: u8,
    /// Human-readable field name, disclosed alongside the value
    pub name: String,
    /// Wire encoding of the value
    pub field_type: FieldType,
    /// Whether the seal may omit this field
    pub optional: bool,
}

/// Ordered schema for one document profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Declared entries in profile order
    pub entries: Vec<SchemaEntry>,
}

impl FieldSchema {
    /// Look up the entry for a tag.
    pub fn entry(&self, tag: u8) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Entries the seal must carry.
    pub fn required(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.entries.iter().filter(|e| !e.optional)
    }

    /// Parse a profile XML document into a schema.
    ///
    /// Only `<entry>` elements matter here; profile metadata such as
    /// `profileName` and `creator` is presentation data and skipped.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut entries = Vec::new();
        let mut current: Option<(u8, bool)> = None; // (tag, optional)
        let mut name: Option<String> = None;
        let mut field_type: Option<FieldType> = None;
        let mut element: Option<Vec<u8>> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"entry" => {
                    let mut tag: Option<u8> = None;
                    let mut optional = false;
                    for attr in e.attributes() {
                        let attr = attr
                            .map_err(|e| Error::InvalidProfileXml(e.to_string()))?;
                        let value = attr
                            .unescape_value()
                            .map_err(|e| Error::InvalidProfileXml(e.to_string()))?;
                        match attr.key.as_ref() {
                            b"tag" => {
                                tag = Some(value.parse().map_err(|_| {
                                    Error::InvalidProfileXml(format!(
                                        "entry tag '{}' is not a byte",
                                        value
                                    ))
                                })?);
                            },
                            b"optional" => optional = value.as_ref() == "true",
                            _ => {},
                        }
                    }
                    let tag = tag.ok_or_else(|| {
                        Error::InvalidProfileXml("entry without tag attribute".to_string())
                    })?;
                    current = Some((tag, optional));
                    name = None;
                    field_type = None;
                },
                Ok(Event::Start(e)) if current.is_some() => {
                    element = Some(e.name().as_ref().to_vec());
                },
                Ok(Event::Text(e)) if current.is_some() => {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::InvalidProfileXml(e.to_string()))?;
                    match element.as_deref() {
                        Some(b"name") => name = Some(text.into_owned()),
                        Some(b"type") => {
                            field_type = Some(FieldType::from_profile_value(&text)?)
                        },
                        _ => {},
                    }
                },
                Ok(Event::End(e)) if e.name().as_ref() == b"entry" => {
                    if let Some((tag, optional)) = current.take() {
                        let name = name.take().ok_or_else(|| {
                            Error::InvalidProfileXml(format!("entry {} without name", tag))
                        })?;
                        let field_type = field_type.take().ok_or_else(|| {
                            Error::InvalidProfileXml(format!("entry {} without type", tag))
                        })?;
                        entries.push(SchemaEntry {
                            tag,
                            name,
                            field_type,
                            optional,
                        });
                    }
                },
                Ok(Event::End(_)) => element = None,
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => return Err(Error::InvalidProfileXml(e.to_string())),
            }
        }

        if entries.is_empty() {
            return Err(Error::InvalidProfileXml("profile declares no entries".to_string()));
        }
        Ok(FieldSchema { entries })
    }
}

/// External supplier of document profiles.
///
/// `Ok(None)` means "this profile number is not known" and surfaces as an
/// unknown-profile verdict; `Err` means the lookup itself failed (transport,
/// timeout) and surfaces as inconclusive.
pub trait ProfileResolver {
    /// Resolve the schema for a document profile number.
    fn resolve(&self, doc_profile_nr: &str) -> Result<Option<FieldSchema>>;
}

/// In-memory profile resolver, useful as a cache in front of a remote
/// profile service and as a test double.
#[derive(Debug, Default)]
pub struct StaticProfileResolver {
    profiles: std::collections::HashMap<String, FieldSchema>,
}

impl StaticProfileResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under a profile number.
    pub fn insert(&mut self, doc_profile_nr: impl Into<String>, schema: FieldSchema) {
        self.profiles.insert(doc_profile_nr.into(), schema);
    }
}

impl ProfileResolver for StaticProfileResolver {
    fn resolve(&self, doc_profile_nr: &str) -> Result<Option<FieldSchema>> {
        Ok(self.profiles.get(doc_profile_nr).cloned())
    }
}
