//! SVG generation from laid-out block views

use crate::geometry::{ViewPoint, ViewRect};
use crate::model::{ConnectionSlot, Workspace};
use crate::patch::PatchKind;
use crate::theme::Theme;
use crate::view::{BlockView, BlockViewTree, Highlight};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add the class rules shared by every block
    pub fn add_theme_styles(&mut self, theme: &Theme) {
        let p = self.prefix();
        self.styles.push(format!(".{p}patch, .{p}fill {{ stroke: none; }}"));
        self.styles.push(format!(
            ".{p}highlight {{ fill: none; stroke: {}; stroke-width: 3; }}",
            theme.colours.highlight
        ));
        self.styles
            .push(format!(".{p}connector {{ fill-opacity: 0.6; stroke: none; }}"));
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn class(&self, name: &str) -> String {
        self.config.class(name)
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    pub fn add_rect(&mut self, rect: ViewRect, classes: &[String], fill: Option<&str>) {
        let fill_attr = fill
            .map(|f| format!(r#" fill="{}""#, f))
            .unwrap_or_default();
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            classes.join(" "),
            rect.left,
            rect.top,
            rect.width(),
            rect.height(),
            fill_attr
        ));
    }

    pub fn add_circle(&mut self, centre: ViewPoint, r: i32, classes: &[String], fill: Option<&str>) {
        let fill_attr = fill
            .map(|f| format!(r#" fill="{}""#, f))
            .unwrap_or_default();
        self.elements.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            classes.join(" "),
            centre.x,
            centre.y,
            r,
            fill_attr
        ));
    }

    /// Open a group translated to `origin`
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String], origin: ViewPoint) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements.push(format!(
            r#"{}<g{}{} transform="translate({},{})">"#,
            self.indent_str(),
            id_attr,
            class_attr,
            origin.x,
            origin.y
        ));
        self.indent += 1;
    }

    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: ViewRect) -> String {
        let padding = self.config.viewbox_padding;
        let nl = self.newline();

        let mut svg = String::new();
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            viewbox.left - padding,
            viewbox.top - padding,
            viewbox.width() + 2 * padding,
            viewbox.height() + 2 * padding
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render every block view in paint order
///
/// With `debug` set, each connector centre gets a marker coloured by its state.
pub fn render_svg(
    workspace: &Workspace,
    tree: &BlockViewTree,
    theme: &Theme,
    config: &SvgConfig,
    debug: bool,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_theme_styles(theme);

    let mut viewbox: Option<ViewRect> = None;
    for &id in tree.draw_order() {
        let (Some(view), Some(block)) = (tree.view(id), workspace.block(id)) else {
            continue;
        };
        let bounds = view.bounds();
        viewbox = Some(viewbox.map_or(bounds, |vb| vb.union(&bounds)));

        let mut classes = vec![builder.class("block")];
        if !block.type_name.is_empty() {
            classes.push(builder.class(&format!("type-{}", escape_xml(&block.type_name))));
        }
        builder.start_group(Some(block.name.as_str()), &classes, view.origin);
        render_block(&mut builder, view, &block.colour.to_css());
        if debug {
            render_connectors(&mut builder, workspace, view, config.connector_radius);
        }
        builder.end_group();
    }

    builder.build(viewbox.unwrap_or_default())
}

fn render_block(builder: &mut SvgBuilder, view: &BlockView, colour: &str) {
    let fill_class = vec![builder.class("fill")];
    for rect in &view.composite.fill_rects {
        builder.add_rect(*rect, &fill_class, Some(colour));
    }

    for patch in &view.composite.patches {
        let mut classes = vec![builder.class("patch"), builder.class(patch.kind.name())];
        if patch.rtl {
            classes.push(builder.class("rtl"));
        }
        builder.add_rect(patch.bounds, &classes, Some(colour));
    }

    let highlight = vec![builder.class("highlight")];
    match view.highlight() {
        Highlight::None => {}
        Highlight::EntireBlock => {
            let size = view.size();
            let outline = ViewRect::from_size(
                view.layout.layout_margin_left,
                0,
                size.width - view.layout.layout_margin_left,
                size.height,
            )
            .flip_if(
                view.composite.patches.first().is_some_and(|p| p.rtl),
                size.width,
            );
            builder.add_rect(outline, &highlight, None);
            for port in view.composite.patches_of(PatchKind::ValueInputInline) {
                builder.add_rect(port.bounds, &highlight, None);
            }
        }
        Highlight::Connection(conn) => {
            if let Some(offset) = view.connector_offset(conn.slot) {
                builder.add_circle(offset, 6, &highlight, None);
            }
        }
    }
}

/// Connector centres: green/cyan when idle, red/magenta while dragged, by connected state
fn render_connectors(builder: &mut SvgBuilder, workspace: &Workspace, view: &BlockView, r: i32) {
    let classes = vec![builder.class("connector")];
    for conn in workspace.connections_of(view.block) {
        let (Some(offset), Some(c)) = (view.connector_offset(conn.slot), workspace.connection(conn))
        else {
            continue;
        };
        let fill = match (c.drag_mode, c.is_connected()) {
            (false, true) => "#00ff00",
            (false, false) => "#00ffff",
            (true, true) => "#ff0000",
            (true, false) => "#ff00ff",
        };
        let mut classes = classes.clone();
        classes.push(builder.class(slot_name(conn.slot)));
        builder.add_circle(offset, r, &classes, Some(fill));
    }
}

fn slot_name(slot: ConnectionSlot) -> &'static str {
    match slot {
        ConnectionSlot::Previous => "previous",
        ConnectionSlot::Next => "next",
        ConnectionSlot::Output => "output",
        ConnectionSlot::Input(_) => "input",
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
