//! HTML document shell for static output.
//!
//! Wraps rendered page content with the site header (title group and
//! navigation menu) and footer.

use std::fmt::Write;

use mosaic_renderer::escape_html;

use crate::page::PageRenderResult;
use crate::site::SiteInfo;
use crate::site_state::{NavItem, Navigation};

const MENU_ICON_OPEN: &str = "<svg class=\"open\" width=\"24\" height=\"24\" viewBox=\"0 0 24 24\">\
<path d=\"M4 18L20 18\"/><path d=\"M4 12L20 12\"/><path d=\"M4 6L20 6\"/></svg>";
const MENU_ICON_CLOSE: &str = "<svg class=\"close\" width=\"24\" height=\"24\" viewBox=\"0 0 24 24\">\
<path d=\"M20 4L4 20M4 4L20 20\"/></svg>";
const EXPAND_ICON: &str = "<svg width=\"24\" height=\"24\" viewBox=\"0 0 24 24\">\
<path d=\"M18 8L12.2278 14.7343C12.108 14.8739 11.892 14.8739 11.7722 14.7343L6 8\"/></svg>";

/// Render a complete HTML document around a rendered page.
pub(crate) fn render_document(
    page: &PageRenderResult,
    navigation: &Navigation,
    info: &SiteInfo,
) -> String {
    let mut html = String::with_capacity(page.html.len() + 4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"pl\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&page.title));
    if let Some(stylesheet) = &info.stylesheet {
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape_html(stylesheet)
        );
    }
    if let Some(script) = &info.script {
        let _ = writeln!(
            html,
            "<script type=\"module\" src=\"{}\"></script>",
            escape_html(script)
        );
    }
    html.push_str("</head>\n<body>\n<div id=\"top\"></div>\n<div id=\"app\">\n");

    render_header(&mut html, navigation, info);

    html.push_str("<main>\n");
    html.push_str(&page.html);
    html.push_str("\n</main>\n");

    render_footer(&mut html, info);

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, navigation: &Navigation, info: &SiteInfo) {
    html.push_str("<header id=\"site-header\">\n<div>\n");
    html.push_str("<div class=\"site-title-group\">\n");
    let _ = writeln!(
        html,
        "<a class=\"site-title\" href=\"/\" rel=\"home\">{}</a>",
        escape_html(&info.name.to_uppercase())
    );
    let _ = writeln!(
        html,
        "<div class=\"site-description\">{}</div>",
        escape_html(&info.tagline)
    );
    html.push_str("</div>\n");

    html.push_str("<button command=\"--toggle\" commandfor=\"site-header\">");
    html.push_str("<span class=\"screen-reader-text\">Menu</span>");
    html.push_str(MENU_ICON_OPEN);
    html.push_str(MENU_ICON_CLOSE);
    html.push_str("</button>\n");

    html.push_str("<nav id=\"site-nav\">\n<ul>\n");
    let _ = writeln!(
        html,
        "<li><div class=\"ancestor-wrapper\"><a href=\"/\" class=\"entry-title\">{}</a></div></li>",
        escape_html(&info.home_heading)
    );
    for item in &navigation.items {
        render_nav_item(html, item);
    }
    html.push_str("</ul>\n</nav>\n");
    html.push_str("</div>\n</header>\n");
}

fn render_nav_item(html: &mut String, item: &NavItem) {
    let slug = escape_html(&item.slug);
    let _ = write!(
        html,
        "<li id=\"site-nav-{slug}\"><div class=\"ancestor-wrapper\"><a href=\"{}\" class=\"entry-title\">{}</a>",
        escape_html(&item.path),
        escape_html(&item.title)
    );

    if item.children.is_empty() {
        html.push_str("</div></li>\n");
        return;
    }

    let _ = write!(
        html,
        "<button command=\"--toggle\" commandfor=\"site-nav-{slug}\"><span class=\"screen-reader-text\">Rozwiń</span>{EXPAND_ICON}</button>"
    );
    html.push_str("</div>\n<ul class=\"sub-menu\">\n");
    for child in &item.children {
        let _ = writeln!(
            html,
            "<li><div class=\"ancestor-wrapper\"><a href=\"{}\" class=\"entry-title\">{}</a></div></li>",
            escape_html(&child.path),
            escape_html(&child.title)
        );
    }
    html.push_str("</ul>\n</li>\n");
}

fn render_footer(html: &mut String, info: &SiteInfo) {
    html.push_str("<footer id=\"site-footer\">\n<div>\n");
    html.push_str("<div class=\"site-copyright-group\">\n");
    let _ = writeln!(
        html,
        "<p class=\"site-copyright\">{} <a href=\"/\">{}</a></p>",
        escape_html(&info.copyright),
        escape_html(&info.name.to_uppercase())
    );
    let _ = writeln!(
        html,
        "<p><a href=\"{}\">{}</a></p>",
        escape_html(&info.legal_path),
        escape_html(&info.legal_label)
    );
    html.push_str("</div>\n");
    html.push_str(
        "<a class=\"to-the-top\" href=\"#app\">W górę <span aria-hidden=\"true\">&uarr;</span></a>\n",
    );
    html.push_str("</div>\n</footer>\n");
}
