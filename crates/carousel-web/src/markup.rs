#![forbid(unsafe_code)]

//! DOM vocabulary for the carousel: selectors, class lists and inline CSS.
//!
//! Everything here is plain string formatting so it can be unit tested
//! natively; the wasm DOM host only applies what these helpers return.

use carousel_core::{Lane, SlotStyle};

/// Container of the project-name lane.
pub const NAV_CONTAINER_SELECTOR: &str = r#"[data-name="ProjectNav"]"#;
/// Container of the image lane.
pub const GALLERY_CONTAINER_SELECTOR: &str = r#"[data-name="ProjectCarousel"]"#;

pub const NAV_ITEM_CLASS: &str = "nav-item absolute w-full flex items-center justify-start gap-2.5 px-0 py-1 transition-all duration-300";
pub const NAV_TEXT_CLASS: &str = "project-nav-text flex-grow";
pub const IMAGE_ITEM_CLASS: &str =
    "image-item absolute w-full bg-center bg-cover bg-no-repeat transition-all duration-300";

/// Attribute mirroring each node's relative offset, for styling hooks and
/// inspection in devtools.
pub const RELATIVE_INDEX_ATTR: &str = "data-relative-index";

#[must_use]
pub const fn container_selector(lane: Lane) -> &'static str {
    match lane {
        Lane::Nav => NAV_CONTAINER_SELECTOR,
        Lane::Gallery => GALLERY_CONTAINER_SELECTOR,
    }
}

/// Class list of a lane node. Image nodes carry their image identifier as
/// an extra class that selects the background image.
#[must_use]
pub fn node_class(lane: Lane, label: &str) -> String {
    match lane {
        Lane::Nav => NAV_ITEM_CLASS.to_owned(),
        Lane::Gallery => format!("{IMAGE_ITEM_CLASS} {label}"),
    }
}

#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

#[must_use]
pub fn translate_y(value: f64) -> String {
    format!("translateY({value}px)")
}

#[must_use]
pub fn opacity(value: f64) -> String {
    format!("{value}")
}

/// Inline declarations for one node.
#[must_use]
pub fn slot_declarations(style: SlotStyle) -> [(&'static str, String); 3] {
    [
        ("transform", translate_y(style.translate_y)),
        ("height", px(style.height)),
        ("opacity", opacity(style.opacity)),
    ]
}

/// Inline declarations applied to a lane container before it is populated.
#[must_use]
pub fn container_declarations(viewport_height: Option<f64>) -> Vec<(&'static str, String)> {
    let mut declarations = vec![
        ("position", "relative".to_owned()),
        ("overflow", "hidden".to_owned()),
    ];
    if let Some(height) = viewport_height {
        declarations.push(("height", px(height)));
    }
    declarations
}

#[cfg(test)]
mod tests {
    use carousel_core::config::{GalleryConfig, NavConfig};
    use carousel_core::{GalleryLayout, Lane, NavLayout, SlotLayout};
    use pretty_assertions::assert_eq;

    use super::{container_declarations, container_selector, node_class, slot_declarations};

    #[test]
    fn selectors_match_data_names() {
        assert_eq!(container_selector(Lane::Nav), "[data-name=\"ProjectNav\"]");
        assert_eq!(
            container_selector(Lane::Gallery),
            "[data-name=\"ProjectCarousel\"]"
        );
    }

    #[test]
    fn image_nodes_carry_their_image_class() {
        let class = node_class(Lane::Gallery, "project-image-3");
        assert!(class.starts_with("image-item "));
        assert!(class.ends_with(" project-image-3"));
        assert!(node_class(Lane::Nav, "SAP").starts_with("nav-item "));
        assert!(!node_class(Lane::Nav, "SAP").contains("SAP"));
    }

    #[test]
    fn nav_slot_css() {
        let layout = NavLayout::new(&NavConfig::default());
        let declarations = slot_declarations(layout.style(-1));
        assert_eq!(
            declarations,
            [
                ("transform", "translateY(34px)".to_owned()),
                ("height", "34px".to_owned()),
                ("opacity", "0.3".to_owned()),
            ]
        );
        assert_eq!(slot_declarations(layout.style(-4))[0].1, "translateY(-68px)");
        assert_eq!(slot_declarations(layout.style(0))[2].1, "1");
    }

    #[test]
    fn gallery_slot_css() {
        let layout = GalleryLayout::new(&GalleryConfig::default());
        let declarations = slot_declarations(layout.style(1));
        assert_eq!(declarations[0].1, "translateY(297.06px)");
        assert_eq!(declarations[1].1, "297.06px");
        assert_eq!(slot_declarations(layout.style(4))[2].1, "0");
    }

    #[test]
    fn only_nav_container_gets_a_height() {
        assert_eq!(
            container_declarations(Some(170.0)),
            vec![
                ("position", "relative".to_owned()),
                ("overflow", "hidden".to_owned()),
                ("height", "170px".to_owned()),
            ]
        );
        assert_eq!(container_declarations(None).len(), 2);
    }
}
