//! The facade exposes the member crates behind their features.

use markwright::prelude::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_prelude_renders_nodes() {
	let node = Node::new("p").attr("#content", "hi").attr("data-role", "note");
	assert_eq!(
		Renderer::new().render(&node).unwrap(),
		r#"<p data-role="note">hi</p>"#
	);
}

#[cfg(feature = "forms")]
#[rstest]
fn test_forms_are_reexported() {
	let mut form = Form::new();
	form.add_group("side", GroupDefinition::from(json!({"weight": -1})));
	form.add_field("q", Node::of_kind(Kind::Text).attr("name", "q").attr("#group", "side"));

	let ids: Vec<String> = form
		.dispatch()
		.unwrap()
		.into_iter()
		.map(|(id, _)| id)
		.collect();
	assert_eq!(ids, ["side", "primary"]);
}

#[cfg(feature = "i18n")]
#[rstest]
fn test_catalog_plugs_into_renderer() {
	use markwright::i18n::MessageCatalog;
	use std::sync::Arc;

	let mut catalog = MessageCatalog::new("it");
	catalog.add_scoped("element.label", "Search", "Cerca");
	let renderer = Renderer::new().with_translator(Arc::new(catalog));
	let node = Node::new("input").attr("#label", "~Search");

	assert_eq!(
		renderer.render(&node).unwrap(),
		"<label><input /> Cerca</label>"
	);
}
