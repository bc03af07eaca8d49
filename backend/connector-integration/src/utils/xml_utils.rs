use common_utils::{CustomResult, ParsingError};
use error_stack::report;
use quick_xml::{events::Event, Reader};
use serde_json::{Map, Value};

/// Parses a gateway XML document into a flat field mapping.
///
/// This function:
/// 1. Skips the XML declaration, comments and processing instructions
/// 2. Treats every direct child of the root element as one field
/// 3. Joins the text and CDATA content of each field into a single string, byte for byte
/// 4. Ignores attributes and anything nested below the field level
///
/// Field values are never trimmed: signatures are computed over the exact values. Whitespace
/// is only dropped between elements.
///
/// A field that appears twice keeps its last value; fields never become arrays.
pub fn parse_flat_xml(xml: &str) -> CustomResult<Map<String, Value>, ParsingError> {
    let mut reader = Reader::from_str(xml);

    let mut fields = Map::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut current: Option<(String, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                depth += 1;
                match depth {
                    1 if seen_root => return Err(xml_failure("more than one root element")),
                    1 => seen_root = true,
                    2 => current = Some((element_name(start.name().as_ref())?, String::new())),
                    _ => tracing::debug!(depth, "Skipping nested XML element"),
                }
            }
            Ok(Event::Empty(start)) => match depth {
                0 if seen_root => return Err(xml_failure("more than one root element")),
                0 => seen_root = true,
                1 => {
                    let name = element_name(start.name().as_ref())?;
                    fields.insert(name, Value::String(String::new()));
                }
                _ => tracing::debug!(depth, "Skipping nested empty XML element"),
            },
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|err| report!(ParsingError::XmlParseFailure(err.to_string())))?;
                push_field_text(depth, &mut current, &text)?;
            }
            Ok(Event::CData(cdata)) => {
                let bytes = cdata.into_inner();
                let text = std::str::from_utf8(&bytes)
                    .map_err(|err| report!(ParsingError::XmlParseFailure(err.to_string())))?;
                push_field_text(depth, &mut current, text)?;
            }
            Ok(Event::End(_)) => {
                if depth == 2 {
                    if let Some((name, value)) = current.take() {
                        fields.insert(name, Value::String(value));
                    }
                }
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| xml_failure("closing tag without an opening tag"))?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::error!(error = ?err, "Failed to parse XML document");
                return Err(report!(ParsingError::XmlParseFailure(err.to_string())));
            }
        }
    }

    if !seen_root {
        return Err(xml_failure("document has no root element"));
    }
    if depth != 0 {
        return Err(xml_failure("document ended inside an element"));
    }

    Ok(fields)
}

/// Byte oriented entry point for transports that hand over raw bodies.
pub fn parse_flat_xml_bytes(xml: &[u8]) -> CustomResult<Map<String, Value>, ParsingError> {
    let xml = std::str::from_utf8(xml)
        .map_err(|err| report!(ParsingError::XmlParseFailure(err.to_string())))?;
    parse_flat_xml(xml.trim())
}

fn push_field_text(
    depth: usize,
    current: &mut Option<(String, String)>,
    text: &str,
) -> CustomResult<(), ParsingError> {
    match depth {
        0 if !text.trim().is_empty() => Err(xml_failure("text outside the root element")),
        2 => {
            if let Some((_, value)) = current.as_mut() {
                value.push_str(text);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn element_name(raw: &[u8]) -> CustomResult<String, ParsingError> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|err| report!(ParsingError::XmlParseFailure(err.to_string())))
}

fn xml_failure(reason: &str) -> error_stack::Report<ParsingError> {
    tracing::error!(reason, "Rejected malformed XML document");
    report!(ParsingError::XmlParseFailure(reason.to_string()))
}
