//! Очистка загруженных SVG перед использованием как текстуры принта.
//!
//! Удаляются элементы, способные выполнить код (`script`, `foreignObject`
//! и встраиваемые документы), все обработчики `on*`, ссылки со схемой
//! `javascript:`, анимации, переписывающие ссылку, DOCTYPE и processing
//! instructions.

use quick_xml::events::attributes::{AttrError, Attribute};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

const FORBIDDEN_ELEMENTS: [&[u8]; 5] = [b"script", b"foreignObject", b"iframe", b"embed", b"object"];
const LINK_ATTRIBUTES: [&[u8]; 4] = [b"href", b"src", b"action", b"formaction"];
const SCRIPT_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:text/html"];
/// Элементы SMIL, которые могут записать значение в атрибут после загрузки
const ANIMATION_ELEMENTS: [&[u8]; 4] = [b"set", b"animate", b"animateMotion", b"animateTransform"];

#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error("malformed SVG: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed SVG attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("failed to write SVG: {0}")]
    Write(String),

    #[error("document root is not <svg>")]
    NotSvg,
}

pub fn sanitize_svg(input: &str) -> Result<String, SanitizeError> {
    let mut reader = Reader::from_str(input);
    let mut writer = Writer::new(Vec::new());
    let mut skip_depth = 0usize;
    let mut seen_root = false;
    let mut removed = 0usize;

    loop {
        let event = reader.read_event()?;
        let keep = match &event {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) => {
                if skip_depth == 0 && !seen_root {
                    if !e.local_name().as_ref().eq_ignore_ascii_case(b"svg") {
                        return Err(SanitizeError::NotSvg);
                    }
                    seen_root = true;
                }
                let opens = matches!(event, Event::Start(_));
                if skip_depth > 0 || is_forbidden(e) || animates_link(e)? {
                    if skip_depth == 0 {
                        removed += 1;
                    }
                    if opens {
                        skip_depth += 1;
                    }
                    None
                } else {
                    let clean = clean_element(e, &mut removed)?;
                    Some(if opens { Event::Start(clean) } else { Event::Empty(clean) })
                }
            }
            Event::End(_) if skip_depth > 0 => {
                skip_depth -= 1;
                None
            }
            // DOCTYPE может объявлять сущности, PI не нужны для отрисовки
            Event::DocType(_) | Event::PI(_) => None,
            _ if skip_depth > 0 => None,
            other => Some(other.clone()),
        };

        if let Some(event) = keep {
            writer
                .write_event(event)
                .map_err(|e| SanitizeError::Write(e.to_string()))?;
        }
    }

    if !seen_root {
        return Err(SanitizeError::NotSvg);
    }
    if removed > 0 {
        tracing::warn!(removed, "stripped unsafe SVG content");
    }

    String::from_utf8(writer.into_inner()).map_err(|e| SanitizeError::Write(e.to_string()))
}

fn is_forbidden(e: &BytesStart) -> bool {
    let name = e.local_name();
    FORBIDDEN_ELEMENTS
        .iter()
        .any(|f| name.as_ref().eq_ignore_ascii_case(f))
}

/// Анимация, целью которой является ссылка (`attributeName="href"`)
fn animates_link(e: &BytesStart) -> Result<bool, SanitizeError> {
    let name = e.local_name();
    if !ANIMATION_ELEMENTS
        .iter()
        .any(|a| name.as_ref().eq_ignore_ascii_case(a))
    {
        return Ok(false);
    }
    for attr in e.attributes() {
        let attr = attr?;
        if !attr.key.local_name().as_ref().eq_ignore_ascii_case(b"attributeName") {
            continue;
        }
        let Ok(target) = attr.unescape_value() else {
            return Ok(true);
        };
        // `xlink:href` -> `href`
        let target = target.trim();
        let local = target.rsplit(':').next().unwrap_or(target);
        return Ok(LINK_ATTRIBUTES
            .iter()
            .any(|k| local.as_bytes().eq_ignore_ascii_case(k)));
    }
    Ok(false)
}

/// Копия элемента только с безопасными атрибутами
fn clean_element(e: &BytesStart, removed: &mut usize) -> Result<BytesStart<'static>, SanitizeError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut clean = BytesStart::new(name);

    for attr in e.attributes() {
        let attr = attr?;
        if is_handler(&attr) || is_script_link(&attr) {
            *removed += 1;
            continue;
        }
        clean.push_attribute(attr);
    }
    Ok(clean)
}

fn is_handler(attr: &Attribute) -> bool {
    let key = attr.key.local_name();
    key.as_ref().len() > 2 && key.as_ref()[..2].eq_ignore_ascii_case(b"on")
}

fn is_script_link(attr: &Attribute) -> bool {
    let key = attr.key.local_name();
    if !LINK_ATTRIBUTES.iter().any(|k| key.as_ref().eq_ignore_ascii_case(k)) {
        return false;
    }
    // Значение с битыми сущностями не проверить, поэтому отбрасываем
    let Ok(value) = attr.unescape_value() else {
        return true;
    };
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    SCRIPT_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use designer_lib::fixtures::HOSTILE_SVG;

    #[test]
    fn test_strips_scripts_and_handlers() {
        let clean = sanitize_svg(HOSTILE_SVG).unwrap();
        assert!(!clean.contains("script"));
        assert!(!clean.contains("foreignObject"));
        assert!(!clean.contains("onload"));
        assert!(!clean.contains("onclick"));
        assert!(!clean.contains("javascript:"));
        assert!(clean.contains(r#"<circle cx="5" cy="5" r="4" fill="red"/>"#));
        assert!(clean.starts_with("<svg"));
        assert!(clean.ends_with("</svg>"));
    }

    #[test]
    fn test_clean_svg_is_unchanged() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><g id="logo"><rect width="4" height="4" fill="#D4AF37"/><text x="1" y="3">A &amp; B</text></g></svg>"##;
        assert_eq!(sanitize_svg(svg).unwrap(), svg);
    }

    #[test]
    fn test_keeps_fragment_links() {
        let svg = r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#logo"/></svg>"##;
        assert!(sanitize_svg(svg).unwrap().contains(r##"xlink:href="#logo""##));
    }

    #[test]
    fn test_obfuscated_javascript_href() {
        let svg = r#"<svg><a href=" java&#x09;script:alert(1)"><rect/></a></svg>"#;
        let clean = sanitize_svg(svg).unwrap();
        assert!(!clean.contains("href"));
    }

    #[test]
    fn test_link_animations_removed() {
        let svg = r#"<svg><a><set attributeName="href" to="javascript:alert(1)"/><animate attributeName="xlink:href" values="javascript:alert(2)"/><text>x</text></a></svg>"#;
        let clean = sanitize_svg(svg).unwrap();
        assert!(!clean.contains("javascript:"));
        assert_eq!(clean, "<svg><a><text>x</text></a></svg>");

        let nested = r#"<svg><a><animate attributeName="href" values="javascript:alert(3)"></animate><rect/></a></svg>"#;
        assert_eq!(sanitize_svg(nested).unwrap(), "<svg><a><rect/></a></svg>");
    }

    #[test]
    fn test_other_animations_kept() {
        let svg = r#"<svg><rect width="2" height="2"><animate attributeName="opacity" from="0" to="1" dur="1s"/></rect></svg>"#;
        assert_eq!(sanitize_svg(svg).unwrap(), svg);
    }

    #[test]
    fn test_doctype_dropped() {
        let svg = r#"<?xml version="1.0"?><!DOCTYPE svg [<!ENTITY x "boom">]><svg><rect/></svg>"#;
        let clean = sanitize_svg(svg).unwrap();
        assert!(!clean.contains("DOCTYPE"));
        assert!(clean.contains("<svg><rect/></svg>"));
    }

    #[test]
    fn test_rejects_non_svg_and_broken_xml() {
        assert!(matches!(sanitize_svg("<html><body/></html>"), Err(SanitizeError::NotSvg)));
        assert!(matches!(sanitize_svg("just text"), Err(SanitizeError::NotSvg)));
        assert!(matches!(sanitize_svg("<svg><g></svg>"), Err(SanitizeError::Xml(_))));
    }
}
