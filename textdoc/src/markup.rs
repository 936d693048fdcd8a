//! Streaming markup events
//!
//! [`MarkupReader`] pulls events from `quick-xml` and reduces them to the
//! three the compiler cares about: element start (with attributes), element
//! end, and character data. Self-closing elements are expanded into a start
//! and an end event. CDATA is delivered as ordinary text; comments,
//! processing instructions and declarations are skipped.

use crate::error::CompileError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Start {
        name: String,
        attributes: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text(String),
}

impl MarkupEvent {
    pub fn start(name: &str, attributes: &[(&str, &str)]) -> Self {
        MarkupEvent::Start {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn end(name: &str) -> Self {
        MarkupEvent::End {
            name: name.to_string(),
        }
    }

    pub fn text(text: &str) -> Self {
        MarkupEvent::Text(text.to_string())
    }
}

/// Find an attribute value by exact name
pub fn find_attribute<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Pull reader over a template held in memory
pub struct MarkupReader<'a> {
    reader: Reader<&'a [u8]>,
    pending_end: Option<String>,
    done: bool,
}

impl<'a> MarkupReader<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.trim_text_start = false;
        config.trim_text_end = false;
        MarkupReader {
            reader,
            pending_end: None,
            done: false,
        }
    }

    /// Next event, or `None` at end of input
    pub fn next_event(&mut self) -> Result<Option<MarkupEvent>, CompileError> {
        if let Some(name) = self.pending_end.take() {
            return Ok(Some(MarkupEvent::End { name }));
        }

        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    return Err(CompileError::Markup {
                        message: err.to_string(),
                        position: self.reader.error_position(),
                    })
                }
            };

            match event {
                Event::Start(e) => return self.start_event(&e).map(Some),
                Event::Empty(e) => {
                    let event = self.start_event(&e)?;
                    if let MarkupEvent::Start { name, .. } = &event {
                        self.pending_end = Some(name.clone());
                    }
                    return Ok(Some(event));
                }
                Event::End(e) => {
                    return Ok(Some(MarkupEvent::End {
                        name: element_name(e.name().as_ref()),
                    }))
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|err| CompileError::Markup {
                        message: format!("Invalid character data: {err}"),
                        position: self.reader.buffer_position(),
                    })?;
                    return Ok(Some(MarkupEvent::Text(text.into_owned())));
                }
                Event::CData(e) => {
                    return Ok(Some(MarkupEvent::Text(
                        String::from_utf8_lossy(e.as_ref()).into_owned(),
                    )))
                }
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => return Ok(None),
            }
        }
    }

    fn start_event(&self, e: &BytesStart<'_>) -> Result<MarkupEvent, CompileError> {
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| CompileError::Markup {
                message: format!("Invalid attribute: {err}"),
                position: self.reader.buffer_position(),
            })?;
            let value = attr.unescape_value().map_err(|err| CompileError::Markup {
                message: format!("Invalid attribute value: {err}"),
                position: self.reader.buffer_position(),
            })?;
            attributes.push((element_name(attr.key.as_ref()), value.into_owned()));
        }
        Ok(MarkupEvent::Start {
            name: element_name(e.name().as_ref()),
            attributes,
        })
    }
}

impl Iterator for MarkupReader<'_> {
    type Item = Result<MarkupEvent, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
