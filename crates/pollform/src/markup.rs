//! The standard poll form page.

use crate::dom::{Document, ElementBuilder};
use crate::options::{option_field_group, OptionListConfig};

/// Id of the form element.
pub const FORM_ID: &str = "poll-form";

/// `name` of the question input.
pub const QUESTION_INPUT_NAME: &str = "question";

/// Build the poll form page for `config`.
///
/// The container `fieldset` starts with two header children (a `legend`
/// and the question group), then `config.prerendered_options` option
/// groups, then the trigger button and the submit button.
pub fn poll_form_page(config: &OptionListConfig) -> Document {
    let question = ElementBuilder::new("div")
        .class("poll-question")
        .child(ElementBuilder::new("label").text("Question: "))
        .child(
            ElementBuilder::new("input")
                .attr("type", "text")
                .attr("name", QUESTION_INPUT_NAME),
        );

    let fieldset = ElementBuilder::new("fieldset")
        .id(config.container_id.as_str())
        .child(ElementBuilder::new("legend").text("New poll"))
        .child(question)
        .children((0..config.prerendered_options).map(|index| option_field_group(index, config)))
        .child(
            ElementBuilder::new("button")
                .id(config.trigger_id.as_str())
                .attr("type", "button")
                .text("Add option"),
        )
        .child(
            ElementBuilder::new("button")
                .attr("type", "submit")
                .text("Create poll"),
        );

    let html = ElementBuilder::new("html").child(
        ElementBuilder::new("body").child(
            ElementBuilder::new("form")
                .id(FORM_ID)
                .attr("method", "post")
                .child(fieldset),
        ),
    );

    Document::from_builder(&html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OPTION_GROUP_CLASS;

    #[test]
    fn test_default_layout() {
        let config = OptionListConfig::default();
        let doc = poll_form_page(&config);

        let fieldset = doc.element_by_id("poll-form-fieldset").unwrap();
        let tags: Vec<_> = doc
            .children(fieldset)
            .iter()
            .map(|&c| doc.tag_name(c).unwrap())
            .collect();
        assert_eq!(tags, vec!["legend", "div", "button", "button"]);

        let trigger = doc.element_by_id("add-poll-option").unwrap();
        assert_eq!(doc.index_in_parent(trigger), Some(config.header_count));
        assert_eq!(doc.attr(trigger, "type"), Some("button"));
        assert!(doc.element_by_id(FORM_ID).is_some());
    }

    #[test]
    fn test_prerendered_options() {
        let config = OptionListConfig::default().with_prerendered_options(3);
        let doc = poll_form_page(&config);

        let fieldset = doc.element_by_id(&config.container_id).unwrap();
        let groups = doc.children_with_class(fieldset, OPTION_GROUP_CLASS);
        assert_eq!(groups.len(), 3);
        assert_eq!(doc.index_in_parent(groups[0]), Some(2));
        assert_eq!(doc.elements_by_name(fieldset, "option").len(), 3);
    }

    #[test]
    fn test_custom_ids() {
        let config = OptionListConfig::default()
            .with_container_id("poll-options-list")
            .with_trigger_id("add-option");
        let doc = poll_form_page(&config);
        assert!(doc.element_by_id("poll-options-list").is_some());
        assert!(doc.element_by_id("add-option").is_some());
        assert!(doc.element_by_id("poll-form-fieldset").is_none());
    }

    #[test]
    fn test_serializes_as_page() {
        let doc = poll_form_page(&OptionListConfig::default());
        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html><html><body><form id=\"poll-form\""));
        assert!(html.contains("<button id=\"add-poll-option\" type=\"button\">Add option</button>"));
    }
}
