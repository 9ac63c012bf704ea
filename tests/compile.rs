use std::rc::Rc;

use observe_view::memory::{MemoryHost, NodeId};
use observe_view::{
	computed, method, mount, Compiler, Config, Error, Event, Host, Interpolation, Options, Template,
	Value, ViewModel,
};
use serde_json::json;


use mock::init_tracing;

fn app(host: &MemoryHost, children: &[NodeId]) -> NodeId {
	host.element("div", &[("id", "app")], children)
}

#[test]
fn interpolation_renders_and_updates() {
	init_tracing();
	let host = Rc::new(MemoryHost::new());
	let text = host.text_node("hi {{ name }}");
	let root = app(&host, &[text]);

	let vm = mount(
		host.clone(),
		Options::new("#app").data(json!({ "name": "a" })),
	)
	.unwrap();

	assert_eq!(host.text(&text), "hi a");
	assert_eq!(host.text(&root), "hi a");
	assert_eq!(host.text_writes(text), 1);

	vm.set("name", "b").unwrap();
	assert_eq!(host.text(&text), "hi b");
	assert_eq!(host.text_writes(text), 2);

	// same value, nothing happens
	vm.set("name", "b").unwrap();
	assert_eq!(host.text_writes(text), 2);
}

#[test]
fn interpolation_rerenders_the_whole_node() {
	let host = Rc::new(MemoryHost::new());
	let text = host.text_node("{{ user.name }} is {{user.age}} ({{ user.name }})");
	let root = app(&host, &[text]);

	let vm = mount(
		host.clone(),
		Options::node(root).data(json!({ "user": { "name": "Ann", "age": 30 } })),
	)
	.unwrap();

	assert_eq!(host.text(&text), "Ann is 30 (Ann)");
	assert_eq!(vm.watcher_count(), 3);

	vm.set("user.age", 31).unwrap();
	assert_eq!(host.text(&text), "Ann is 31 (Ann)");

	vm.set("user.name", "Bob").unwrap();
	assert_eq!(host.text(&text), "Bob is 31 (Bob)");
}

#[test]
fn interpolation_render_is_idempotent() {
	let vm = ViewModel::new(Options::detached().data(json!({ "a": 1, "b": "x" }))).unwrap();
	let interpolation = Interpolation::new("{{", "}}").unwrap();
	let template = Template::parse("{{ a }}-{{ b }}-{{ a }}", &interpolation).unwrap();

	let first = template.render(&vm).unwrap();
	let second = template.render(&vm).unwrap();
	assert_eq!(first, "1-x-1");
	assert_eq!(first, second);
}

#[test]
fn model_binds_both_ways() {
	init_tracing();
	let host = Rc::new(MemoryHost::new());
	let input = host.element("input", &[("directive-model", "user.age")], &[]);
	let root = app(&host, &[input]);

	let vm = mount(
		host.clone(),
		Options::node(root).data(json!({ "user": { "age": 1 } })),
	)
	.unwrap();

	assert_eq!(host.value(&input), "1");
	assert_eq!(host.value_writes(input), 1);

	host.input(input, "2").unwrap();

	// view input is stored as text
	assert_eq!(vm.get_once("user.age").unwrap(), Value::from("2"));
	assert_eq!(host.value(&input), "2");
	// one re-render from the watcher, no loop
	assert_eq!(host.value_writes(input), 2);

	// typing the same text again is a no-op write
	host.input(input, "2").unwrap();
	assert_eq!(host.value_writes(input), 2);

	vm.set("user.age", 40).unwrap();
	assert_eq!(host.value(&input), "40");
	assert_eq!(host.value_writes(input), 3);
}

#[test]
fn model_into_an_undeclared_property() {
	init_tracing();
	let host = Rc::new(MemoryHost::new());
	let input = host.element("input", &[("directive-model", "name")], &[]);
	let text = host.text_node("hi {{ name }}");
	let root = app(&host, &[input, text]);

	let vm = mount(host.clone(), Options::node(root).data(json!({}))).unwrap();
	assert_eq!(host.text(&text), "hi ");

	host.input(input, "bob").unwrap();
	assert_eq!(vm.get_once("name").unwrap(), Value::from("bob"));
	assert_eq!(host.text(&text), "hi bob");
	assert_eq!(host.value(&input), "bob");
}

#[test]
fn input_without_a_value_reads_the_node() {
	let host = Rc::new(MemoryHost::new());
	let input = host.element("input", &[("directive-model", "name")], &[]);
	let root = app(&host, &[input]);

	let vm = mount(host.clone(), Options::node(root).data(json!({ "name": "a" }))).unwrap();

	host.set_value(&input, "typed");
	host.dispatch_event(input, &Event::new("input")).unwrap();
	assert_eq!(vm.get_once("name").unwrap(), Value::from("typed"));
}

#[test]
fn access_errors_during_updates_leave_the_view_alone() {
	init_tracing();
	let host = Rc::new(MemoryHost::new());
	let text = host.text_node("{{ user.age }}");
	let root = app(&host, &[text]);

	let vm = mount(
		host.clone(),
		Options::node(root).data(json!({ "user": { "age": 1 } })),
	)
	.unwrap();

	let fired = Rc::new(std::cell::Cell::new(0));
	vm.watch("user", {
		let fired = fired.clone();
		move |_: &Value, _: &Value| -> observe_view::Result<()> {
			fired.set(fired.get() + 1);
			Ok(())
		}
	})
	.unwrap();

	// the binding fails to resolve, its sibling still runs
	assert!(vm.set("user", Value::Null).unwrap());
	assert_eq!(fired.get(), 1);
	assert_eq!(host.text(&text), "1");

	vm.set("user", json!({ "age": 5 })).unwrap();
	assert_eq!(fired.get(), 2);
	assert_eq!(host.text(&text), "5");
}

#[test]
fn reverse_write_through_a_non_object_fails() {
	init_tracing();
	let host = Rc::new(MemoryHost::new());
	let input = host.element("input", &[("directive-model", "a.b")], &[]);
	let root = app(&host, &[input]);

	let vm = mount(host.clone(), Options::node(root).data(json!({ "a": { "b": 1 } }))).unwrap();
	assert_eq!(host.value(&input), "1");

	vm.set("a", 3).unwrap();
	assert!(matches!(
		host.input(input, "x"),
		Err(Error::NotAnObject { found: "number", .. })
	));
	assert_eq!(vm.get_once("a").unwrap(), Value::from(3));
}

#[test]
fn text_directive_reuses_its_text_node() {
	let host = Rc::new(MemoryHost::new());
	let title = host.element("h1", &[("directive-text", "title")], &[]);
	let root = app(&host, &[title]);

	let vm = mount(host.clone(), Options::node(root).data(json!({ "title": "a" }))).unwrap();
	let children = host.children(&title);
	assert_eq!(children.len(), 1);
	let count = host.node_count();

	vm.set("title", "b").unwrap();
	vm.set("title", "c").unwrap();
	assert_eq!(host.children(&title), children);
	assert_eq!(host.node_count(), count);
	assert_eq!(host.text(&title), "c");
}

#[test]
fn text_and_html_directives() {
	let host = Rc::new(MemoryHost::new());
	let title = host.element(
		"h1",
		&[("directive-text", "title")],
		&[host.text_node("placeholder")],
	);
	let body = host.element("div", &[("directive-html", "body")], &[]);
	let root = app(&host, &[title, body]);

	let vm = mount(
		host.clone(),
		Options::node(root).data(json!({ "title": "Hello", "body": "<b>hi</b>" })),
	)
	.unwrap();

	assert_eq!(host.text(&title), "Hello");
	assert_eq!(host.inner_html(body), "<b>hi</b>");

	vm.set("title", "Bye").unwrap();
	vm.set("body", "<i>bye</i>").unwrap();
	assert_eq!(host.text(&title), "Bye");
	assert_eq!(host.inner_html(body), "<i>bye</i>");
}

#[test]
fn event_directive_calls_methods() {
	init_tracing();
	let host = Rc::new(MemoryHost::new());
	let button = host.element("button", &[("directive-on:click", "increment")], &[]);
	let label = host.element("span", &[], &[host.text_node("count: {{ count }}")]);
	let root = app(&host, &[button, label]);

	let vm = mount(
		host.clone(),
		Options::node(root)
			.data(json!({ "count": 0 }))
			.method(
				"increment",
				method!(vm, _event => {
					let count = vm.get_once("count")?.as_f64().unwrap_or_default();
					vm.set("count", count + 1.0)?;
					Ok(())
				}),
			),
	)
	.unwrap();

	assert_eq!(host.text(&label), "count: 0");
	host.dispatch(button, "click").unwrap();
	host.dispatch(button, "click").unwrap();
	assert_eq!(vm.get_once("count").unwrap(), Value::from(2));
	assert_eq!(host.text(&label), "count: 2");

	// other event kinds are not bound
	host.dispatch(button, "dblclick").unwrap();
	assert_eq!(vm.get_once("count").unwrap(), Value::from(2));
}

#[test]
fn method_errors_reach_the_dispatcher() {
	let host = Rc::new(MemoryHost::new());
	let button = host.element("button", &[("directive-on:click", "fail")], &[]);
	let root = app(&host, &[button]);

	let _vm = mount(
		host.clone(),
		Options::node(root).method("fail", |_, _| Err(Error::method("nope"))),
	)
	.unwrap();

	assert!(matches!(host.dispatch(button, "click"), Err(Error::Method(m)) if m == "nope"));
}

#[test]
fn computed_properties_in_templates() {
	let host = Rc::new(MemoryHost::new());
	let text = host.text_node("{{ full }}");
	let root = app(&host, &[text]);

	let vm = mount(
		host.clone(),
		Options::node(root)
			.data(json!({ "first": "Ada", "last": "Lovelace" }))
			.computed(
				"full",
				computed!(vm, cx => {
					Ok(format!("{} {}", vm.get("first", cx)?, vm.get("last", cx)?).into())
				}),
			),
	)
	.unwrap();

	assert_eq!(host.text(&text), "Ada Lovelace");
	vm.set("first", "Augusta").unwrap();
	assert_eq!(host.text(&text), "Augusta Lovelace");
}

#[test]
fn nested_elements_are_walked() {
	let host = Rc::new(MemoryHost::new());
	let deep = host.text_node("{{ a.b }}");
	let inner = host.element("p", &[("class", "x")], &[deep]);
	let outer = host.element("section", &[], &[host.comment("{{ ignored }}"), inner]);
	let root = app(&host, &[outer]);

	let vm = mount(
		host.clone(),
		Options::node(root).data(json!({ "a": { "b": "deep" } })),
	)
	.unwrap();

	assert_eq!(host.text(&deep), "deep");
	assert_eq!(vm.watcher_count(), 1);
}

#[test]
fn children_are_reattached_in_order() {
	let host = Rc::new(MemoryHost::new());
	let first = host.text_node("{{ a }}");
	let second = host.element("i", &[], &[]);
	let root = app(&host, &[first, second]);

	mount(host.clone(), Options::node(root).data(json!({ "a": 1 }))).unwrap();

	assert_eq!(host.children(&root), [first, second]);
	assert_eq!(host.parent(first), Some(root));
	assert_eq!(host.parent(second), Some(root));
}

#[test]
fn unknown_directive_is_fatal() {
	let host = Rc::new(MemoryHost::new());
	let bad = host.element("div", &[("directive-show", "visible")], &[]);
	let root = app(&host, &[bad]);

	let result = mount(host.clone(), Options::node(root));
	assert!(matches!(result, Err(Error::UnknownDirective(name)) if name == "show"));

	// the tree is put back even when compilation fails
	assert_eq!(host.children(&root), [bad]);
}

#[test]
fn event_directive_requires_argument_and_method() {
	let host = Rc::new(MemoryHost::new());
	let button = host.element("button", &[("directive-on", "go")], &[]);
	let root = app(&host, &[button]);
	let result = mount(host.clone(), Options::node(root).method("go", |_, _| Ok(())));
	assert!(matches!(result, Err(Error::MissingArgument("on"))));

	let host = Rc::new(MemoryHost::new());
	let button = host.element("button", &[("directive-on:click", "go")], &[]);
	let root = app(&host, &[button]);
	let result = mount(host.clone(), Options::node(root));
	assert!(matches!(result, Err(Error::UnknownMethod(name)) if name == "go"));
}

#[test]
fn template_access_errors_surface_at_compile_time() {
	let host = Rc::new(MemoryHost::new());
	let text = host.text_node("{{ a.b.c }}");
	let root = app(&host, &[text]);

	let result = mount(host.clone(), Options::node(root).data(json!({ "x": 1 })));
	assert!(matches!(result, Err(Error::NotAnObject { .. })));
}

#[test]
fn mount_target_must_exist() {
	let host = Rc::new(MemoryHost::new());
	app(&host, &[]);

	let result = mount(host.clone(), Options::new("#missing"));
	assert!(matches!(result, Err(Error::MountNotFound(selector)) if selector == "#missing"));

	assert!(mount(host.clone(), Options::new("div")).is_ok());
}

#[test]
fn custom_prefix_and_delimiters() {
	let host = Rc::new(MemoryHost::new());
	let text = host.text_node("[[ name ]] {{ name }}");
	let span = host.element(
		"span",
		&[("v-text", "name"), ("directive-text", "ignored")],
		&[],
	);
	let root = app(&host, &[text, span]);

	let vm = mount(
		host.clone(),
		Options::node(root)
			.data(json!({ "name": "a" }))
			.config(Config::default().prefix("v-").delimiters("[[", "]]")),
	)
	.unwrap();

	assert_eq!(host.text(&text), "a {{ name }}");
	assert_eq!(host.text(&span), "a");

	vm.set("name", "b").unwrap();
	assert_eq!(host.text(&text), "b {{ name }}");
	assert_eq!(host.text(&span), "b");
}

#[test]
fn compiler_can_be_driven_directly() {
	let host = Rc::new(MemoryHost::new());
	let text = host.text_node("{{ n }}");
	let root = app(&host, &[text]);

	let vm = ViewModel::new(Options::detached().data(json!({ "n": 1 }))).unwrap();
	Compiler::new(host.clone(), vm.clone(), &Config::default())
		.unwrap()
		.compile(&root)
		.unwrap();

	vm.set("n", 2).unwrap();
	assert_eq!(host.text(&text), "2");
}
