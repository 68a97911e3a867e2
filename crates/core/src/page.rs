//! Page assembly: turns a resolved [`PageBuild`] into an HTML fragment.

use crate::render::wrap_for_editor;
use crate::resolution::{LayoutBuild, PageBuild, RegionBuild};

/// Escape text for inclusion in HTML content or a quoted attribute.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a page build as an `<article>` fragment.
pub fn render_page(page: &PageBuild) -> String {
    match page {
        PageBuild::Default { item, build } => {
            let body: String = build.fields.values().map(String::as_str).collect();
            format!(
                "<article class=\"content content--{}\" data-content-id=\"{}\"><h1>{}</h1>{body}</article>",
                escape_html(&item.content_type),
                item.id,
                escape_html(&item.title)
            )
        }
        PageBuild::Layout(layout) => render_layout(layout),
    }
}

fn render_layout(layout: &LayoutBuild) -> String {
    let template_class = layout.template.id.replace('_', "-");
    let regions: String = layout.regions.iter().map(render_region).collect();
    let editor_attr = if layout.edit_mode {
        " data-layout-editor=\"true\""
    } else {
        ""
    };
    format!(
        "<article class=\"content\" data-content-id=\"{}\" data-revision-id=\"{}\"{editor_attr}><h1>{}</h1><div class=\"layout layout--{template_class}\">{regions}</div></article>",
        layout.content_item_id,
        layout.revision_id,
        escape_html(&layout.title)
    )
}

fn render_region(region: &RegionBuild) -> String {
    let mut elements: Vec<_> = region.elements.iter().collect();
    elements.sort_by_key(|e| e.weight);

    let mut html = format!(
        "<div class=\"layout__region layout__region--{}\">",
        region.name.replace('_', "-")
    );
    for placed in elements {
        match &placed.editor {
            Some(element) => html.push_str(&wrap_for_editor(&placed.markup, element)),
            None => html.push_str(&placed.markup),
        }
    }
    if let Some(link) = &region.add_content {
        html.push_str(&format!(
            "<a class=\"layout-editor__add-content use-ajax\" href=\"{}\" data-region=\"{}\">Add content</a>",
            escape_html(&link.href()),
            escape_html(&link.region)
        ));
    }
    html.push_str("</div>");
    html
}
