#![forbid(unsafe_code)]

//! [`NodeHost`] over live DOM elements.
//!
//! Only compiled on `wasm32` targets.

use carousel_core::{Lane, NodeHost, SlotStyle};
use tracing::{debug, trace};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::markup;

/// A DOM call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomError(String);

impl DomError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    fn js(context: &str, value: &JsValue) -> Self {
        let detail = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(value)
                    .ok()
                    .and_then(|text| text.as_string())
            })
            .unwrap_or_else(|| "unknown error".to_owned());
        Self(format!("{context}: {detail}"))
    }
}

impl core::fmt::Display for DomError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for DomError {}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        JsValue::from_str(&err.0)
    }
}

/// Lane containers located once at construction.
pub struct DomHost {
    document: Document,
    nav: Option<HtmlElement>,
    gallery: Option<HtmlElement>,
}

impl DomHost {
    /// Find both lane containers in `document`. A missing container leaves
    /// its lane unavailable.
    #[must_use]
    pub fn locate(document: Document) -> Self {
        let nav = find_container(&document, Lane::Nav);
        let gallery = find_container(&document, Lane::Gallery);
        debug!(
            target: "carousel_web::dom",
            nav = nav.is_some(),
            gallery = gallery.is_some(),
            "lane containers located"
        );
        Self {
            document,
            nav,
            gallery,
        }
    }

    fn container(&self, lane: Lane) -> Result<&HtmlElement, DomError> {
        match lane {
            Lane::Nav => self.nav.as_ref(),
            Lane::Gallery => self.gallery.as_ref(),
        }
        .ok_or_else(|| DomError::new(format!("{lane} container is missing")))
    }

    fn create_html(&self, tag: &str) -> Result<HtmlElement, DomError> {
        self.document
            .create_element(tag)
            .map_err(|err| DomError::js("createElement", &err))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::new(format!("<{tag}> is not an HtmlElement")))
    }
}

fn find_container(document: &Document, lane: Lane) -> Option<HtmlElement> {
    document
        .query_selector(markup::container_selector(lane))
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn apply_declarations<'a>(
    element: &HtmlElement,
    declarations: impl IntoIterator<Item = &'a (&'static str, String)>,
) -> Result<(), DomError> {
    let style = element.style();
    for (property, value) in declarations {
        style
            .set_property(property, value)
            .map_err(|err| DomError::js(property, &err))?;
    }
    Ok(())
}

fn apply_slot(element: &HtmlElement, slot: SlotStyle) -> Result<(), DomError> {
    apply_declarations(element, &markup::slot_declarations(slot))?;
    element
        .set_attribute(markup::RELATIVE_INDEX_ATTR, &slot.offset.to_string())
        .map_err(|err| DomError::js("setAttribute", &err))
}

impl NodeHost for DomHost {
    type Node = HtmlElement;
    type Error = DomError;

    fn lane_available(&self, lane: Lane) -> bool {
        self.container(lane).is_ok()
    }

    fn prepare_lane(&mut self, lane: Lane, viewport_height: Option<f64>) -> Result<(), DomError> {
        let container = self.container(lane)?;
        container.set_inner_html("");
        apply_declarations(container, &markup::container_declarations(viewport_height))?;
        trace!(target: "carousel_web::dom", lane = lane.as_str(), "lane container prepared");
        Ok(())
    }

    fn create_node(
        &mut self,
        lane: Lane,
        label: &str,
        style: SlotStyle,
    ) -> Result<HtmlElement, DomError> {
        let element = self.create_html("div")?;
        element.set_class_name(&markup::node_class(lane, label));
        if lane == Lane::Nav {
            let text = self.create_html("span")?;
            text.set_class_name(markup::NAV_TEXT_CLASS);
            text.set_text_content(Some(label));
            element
                .append_child(&text)
                .map_err(|err| DomError::js("appendChild", &err))?;
        }
        apply_slot(&element, style)?;
        self.container(lane)?
            .append_child(&element)
            .map_err(|err| DomError::js("appendChild", &err))?;
        Ok(element)
    }

    fn restyle_node(&mut self, node: &HtmlElement, style: SlotStyle) -> Result<(), DomError> {
        apply_slot(node, style)
    }

    fn remove_node(&mut self, node: &HtmlElement) -> Result<(), DomError> {
        node.remove();
        Ok(())
    }
}
