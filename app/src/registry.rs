use std::collections::BTreeMap;

use sycamore::prelude::*;

/// Props of a component resolved by name, passed as plain strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(BTreeMap<String, String>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

pub type Render<G> = for<'a> fn(Scope<'a>, Attrs) -> View<G>;

/// Components available to the whole tree by name.
///
/// Handed to the root scope once, instead of mutating a global registry.
pub struct Components<G: Html> {
    entries: BTreeMap<&'static str, Render<G>>,
}

impl<G: Html> Components<G> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registers `render` under `name`, replacing a previous registration.
    pub fn register(mut self, name: &'static str, render: Render<G>) -> Self {
        if self.entries.insert(name, render).is_some() {
            tracing::debug!("replacing component {name}");
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn render<'a>(&self, cx: Scope<'a>, name: &str, attrs: Attrs) -> Option<View<G>> {
        let render = self.entries.get(name)?;

        // errors while rendering are reported with this component as context
        let _entered = sentry::component::enter(name, attrs.as_map().clone());
        Some(render(cx, attrs))
    }
}

impl<G: Html> Default for Components<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Html> Clone for Components<G> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

pub fn provide_components<G: Html>(cx: Scope, components: Components<G>) {
    provide_context(cx, components);
}

pub fn use_components<G: Html>(cx: Scope) -> Option<&Components<G>> {
    try_use_context::<Components<G>>(cx)
}

#[derive(Prop)]
pub struct NamedProps {
    pub name: &'static str,
    pub attrs: Attrs,
}

/// Renders the component registered under `name`.
#[component]
pub fn Named<G: Html>(cx: Scope, NamedProps { name, attrs }: NamedProps) -> View<G> {
    let Some(components) = use_components::<G>(cx) else {
        tracing::warn!("no components provided, cannot render {name}");
        return View::empty();
    };

    components.render(cx, name, attrs).unwrap_or_else(|| {
        tracing::warn!("unknown component {name}");
        View::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label<G: Html>(cx: Scope, attrs: Attrs) -> View<G> {
        let text = attrs.get("text").unwrap_or_default().to_owned();
        view! { cx, span(class="label") { (text) } }
    }

    fn other<G: Html>(cx: Scope, _attrs: Attrs) -> View<G> {
        view! { cx, span(class="other") }
    }

    #[component]
    fn Leaf<G: Html>(cx: Scope) -> View<G> {
        view! { cx,
            p {
                Named(name="label", attrs=Attrs::new().with("text", "deep"))
            }
        }
    }

    #[component]
    fn Middle<G: Html>(cx: Scope) -> View<G> {
        view! { cx, section { Leaf {} } }
    }

    fn render(components: Components<SsrNode>, root: Render<SsrNode>) -> String {
        sycamore::render_to_string(move |cx| {
            provide_components(cx, components);
            root(cx, Attrs::new())
        })
    }

    #[test]
    fn test_attrs() {
        let mut attrs = Attrs::new().with("line", "42");
        attrs.set("color", "red");

        assert_eq!(attrs.get("line"), Some("42"));
        assert_eq!(attrs.get("color"), Some("red"));
        assert_eq!(attrs.get("heading"), None);
    }

    #[test]
    fn test_register() {
        let components = Components::<SsrNode>::new()
            .register("label", label)
            .register("other", other);

        assert!(components.contains("label"));
        assert!(!components.contains("missing"));
        assert_eq!(components.names().collect::<Vec<_>>(), ["label", "other"]);
    }

    #[test]
    fn test_register_replaces() {
        let components = Components::<SsrNode>::new()
            .register("label", label)
            .register("label", other);

        fn root<G: Html>(cx: Scope, _: Attrs) -> View<G> {
            view! { cx, Named(name="label", attrs=Attrs::new()) }
        }

        let html = render(components, root);
        assert!(html.contains("other"));
        assert!(!html.contains("class=\"label\""));
    }

    #[test]
    fn test_resolve_from_descendant() {
        fn root<G: Html>(cx: Scope, _: Attrs) -> View<G> {
            view! { cx, div { Middle {} } }
        }

        let components = Components::new().register("label", label);
        let html = render(components, root);

        assert!(html.contains("deep"));
        assert!(html.contains("class=\"label\""));
    }

    #[test]
    fn test_unknown_component_renders_nothing() {
        fn root<G: Html>(cx: Scope, _: Attrs) -> View<G> {
            view! { cx, div { Named(name="missing", attrs=Attrs::new()) } }
        }

        let html = render(Components::new(), root);
        assert!(!html.contains("span"));
    }

    #[test]
    fn test_without_components() {
        let html = sycamore::render_to_string(|cx| view! { cx, Leaf {} });
        assert!(!html.contains("deep"));
    }
}
