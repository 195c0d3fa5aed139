//! Construction of a single option field group.

use crate::dom::ElementBuilder;

use super::config::{LabelStyle, OptionListConfig};

/// Class carried by every option field group.
pub const OPTION_GROUP_CLASS: &str = "poll-option";

/// Describe the field group for the option at 0-based `index`.
///
/// The group is `div.poll-option > label + input[type=text]`. With
/// [`LabelStyle::Plain`] the input gets a placeholder from the configured
/// list, empty once the list is exhausted. With [`LabelStyle::Numbered`]
/// the label carries the option number and the input has no placeholder.
pub fn option_field_group(index: usize, config: &OptionListConfig) -> ElementBuilder {
    let mut input = ElementBuilder::new("input")
        .attr("type", "text")
        .attr("name", config.input_name.as_str());
    if config.label_style == LabelStyle::Plain {
        input = input.attr("placeholder", config.placeholders.get(index));
    }

    ElementBuilder::new("div")
        .class(OPTION_GROUP_CLASS)
        .child(ElementBuilder::new("label").text(config.label_style.label_text(index)))
        .child(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{BuilderChild, Document};

    fn input_of(group: &ElementBuilder) -> &ElementBuilder {
        match &group.child_nodes()[1] {
            BuilderChild::Element(input) => input,
            BuilderChild::Text(_) => panic!("expected input element"),
        }
    }

    #[test]
    fn test_plain_group_markup() {
        let config = OptionListConfig::default();
        let mut doc = Document::new();
        let node = doc.build(&option_field_group(1, &config));

        assert_eq!(
            doc.outer_html(node),
            "<div class=\"poll-option\"><label>Option: </label>\
             <input type=\"text\" name=\"option\" placeholder=\"Paris\"></div>"
        );
    }

    #[test]
    fn test_plain_group_past_placeholders() {
        let config = OptionListConfig::default();
        let group = option_field_group(8, &config);
        assert_eq!(input_of(&group).get_attr("placeholder"), Some(""));
    }

    #[test]
    fn test_numbered_group_has_no_placeholder() {
        let config = OptionListConfig::default().with_label_style(LabelStyle::Numbered);
        let mut doc = Document::new();
        let group = option_field_group(2, &config);
        assert_eq!(input_of(&group).get_attr("placeholder"), None);

        let node = doc.build(&group);
        assert_eq!(doc.text_content(node), "Option 3: ");
    }

    #[test]
    fn test_custom_input_name() {
        let mut config = OptionListConfig::default();
        config.input_name = "answer".to_string();
        let group = option_field_group(0, &config);
        assert_eq!(input_of(&group).get_attr("name"), Some("answer"));
    }
}
