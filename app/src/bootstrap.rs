use sycamore::prelude::*;

use crate::{
    registry::{provide_components, Components, Render},
    App, Error, Result,
};

/// Builds the root of the application: components available by name and the mount point.
pub struct Bootstrap<G: Html> {
    selector: String,
    components: Components<G>,
}

impl<G: Html> Bootstrap<G> {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            components: Components::new(),
        }
    }

    pub fn component(mut self, name: &'static str, render: Render<G>) -> Self {
        self.components = self.components.register(name, render);
        self
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn components(&self) -> &Components<G> {
        &self.components
    }

    fn into_view(self) -> impl FnOnce(Scope<'_>) -> View<G> {
        let components = self.components;
        move |cx| root(cx, components)
    }
}

fn root<G: Html>(cx: Scope, components: Components<G>) -> View<G> {
    provide_components(cx, components);
    view! { cx, App {} }
}

/// The mounted application, it stays attached until the page unloads.
#[derive(Debug)]
pub struct Mounted {
    selector: String,
}

impl Mounted {
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl Bootstrap<DomNode> {
    /// Renders [`App`] once into the element matching the selector.
    pub fn mount(self) -> Result<Mounted> {
        let document = web_sys::window()
            .ok_or(Error::NoWindow)?
            .document()
            .ok_or(Error::NoDocument)?;

        let element = document
            .query_selector(&self.selector)
            .map_err(|_| Error::InvalidSelector(self.selector.clone()))?
            .ok_or_else(|| Error::MountPointMissing(self.selector.clone()))?;

        let selector = self.selector.clone();
        tracing::debug!(
            components = ?self.components.names().collect::<Vec<_>>(),
            "mounting application to {selector}"
        );

        sycamore::render_to(self.into_view(), &element);
        tracing::info!("application mounted to {selector}");

        Ok(Mounted { selector })
    }
}

#[cfg(any(feature = "ssr", test))]
impl Bootstrap<SsrNode> {
    pub fn render_to_string(self) -> String {
        sycamore::render_to_string(self.into_view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{components::bus_icon, consts};

    #[test]
    fn test_app_rendered_once() {
        let bootstrap = Bootstrap::<SsrNode>::new(consts::MOUNT_POINT)
            .component(consts::BUS_ICON, bus_icon::render);
        assert_eq!(bootstrap.selector(), "#app");
        assert!(bootstrap.components().contains(consts::BUS_ICON));

        let html = bootstrap.render_to_string();

        assert_eq!(html.matches("id=\"map\"").count(), 1);
        assert_eq!(html.matches("Bus Tracker").count(), 1);
    }

    #[test]
    fn test_bus_icon_resolved_in_app() {
        let bootstrap = Bootstrap::<SsrNode>::new(consts::MOUNT_POINT)
            .component(consts::BUS_ICON, bus_icon::render);

        let html = bootstrap.render_to_string();
        assert!(html.contains("bus-icon"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn test_app_without_icon() {
        let html = Bootstrap::<SsrNode>::new("#app").render_to_string();

        assert!(html.contains("Bus Tracker"));
        assert!(!html.contains("<svg"));
    }
}
