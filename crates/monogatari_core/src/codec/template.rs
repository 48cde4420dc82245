//! World template library format.
//!
//! One template per `<Type>` container:
//! `<Type>\n  <WorldType>City</WorldType>\n  <Key>Population</Key>\n</Type>`.
//! A library file is templates joined by newlines. The built-in blank preset
//! is never written.

use crate::codec::markup::{ElementView, MarkupWriter, BLOCK_TAG};
use crate::document::assembler::split_document;
use crate::model::template::WorldTemplate;
use log::debug;
use roxmltree::Document;

/// Serializes one template.
pub fn encode_template(template: &WorldTemplate) -> String {
    let mut w = MarkupWriter::container();
    w.text_element("WorldType", &template.world_type);
    for key in &template.keys {
        w.text_element("Key", key);
    }
    w.finish()
}

/// Serializes every non-blank template, newline separated.
pub fn encode_library(templates: &[WorldTemplate]) -> String {
    templates
        .iter()
        .filter(|t| !t.is_blank())
        .map(encode_template)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses one template. `None` for malformed text or a blank world type.
pub fn decode_template(text: &str) -> Option<WorldTemplate> {
    let doc = match Document::parse(text) {
        Ok(doc) => doc,
        Err(err) => {
            debug!(
                "event=template_decode module=codec status=skipped reason=malformed error={}",
                err
            );
            return None;
        }
    };
    let root = doc.root_element();
    if !root.has_tag_name(BLOCK_TAG) {
        return None;
    }
    let view = ElementView::new(root);
    let world_type = view.text("WorldType").trim().to_string();
    if world_type.is_empty() {
        return None;
    }
    let keys = view.children("Key").iter().map(|k| k.own_text()).collect();
    Some(WorldTemplate::new(world_type, keys))
}

/// Parses every well-formed, non-blank template in file order.
pub fn decode_library(text: &str) -> Vec<WorldTemplate> {
    split_document(text)
        .into_iter()
        .filter_map(decode_template)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{decode_library, encode_template};
    use crate::model::template::WorldTemplate;

    #[test]
    fn template_layout_matches_library_format() {
        let template = WorldTemplate::new("City", vec!["Population".into(), "A&B".into()]);
        assert_eq!(
            encode_template(&template),
            "<Type>\n  <WorldType>City</WorldType>\n  <Key>Population</Key>\n  <Key>A&amp;B</Key>\n</Type>\n"
        );
    }

    #[test]
    fn library_skips_blank_and_broken_entries() {
        let text = "<Type>\n  <WorldType> </WorldType>\n</Type>\n\
                    <Type><WorldType>Forest</WorldType><Key>Trees</Key></Type>\n\
                    <Type><WorldType>Broken</Type>";
        let templates = decode_library(text);
        assert_eq!(templates, vec![WorldTemplate::new("Forest", vec!["Trees".into()])]);
    }
}
