//! Session views: the module grid and a single module page.

use crate::catalog::Module;
use crate::render::html::HtmlRenderer;
use crate::render::{escape_attr, escape_html};
use crate::session::Session;
use crate::toc::{render_toc, table_of_contents};

/// Render the module grid with completion badges and a progress bar.
pub fn render_overview(session: &Session) -> String {
    let config = session.catalog().config();
    let p = &config.class_prefix;
    let progress = session.progress();

    let mut output = format!("<section class=\"{p}overview\">\n");
    output.push_str(&format!(
        "<div class=\"{p}progress\"><span class=\"{p}progress-label\">{} of {} modules complete</span>\
         <div class=\"{p}progress-bar\"><div class=\"{p}progress-fill\" style=\"width: {}%\"></div></div></div>\n",
        progress.completed, progress.total, progress.percent
    ));

    output.push_str(&format!("<div class=\"{p}grid\">\n"));
    for module in session.catalog().iter() {
        output.push_str(&render_card(session, module, p));
    }
    output.push_str("</div>\n</section>\n");
    output
}

fn render_card(session: &Session, module: &Module, p: &str) -> String {
    let mut classes = format!("{p}card");
    if session.is_complete(&module.id) {
        classes.push_str(&format!(" {p}card-complete"));
    } else if session.is_viewed(&module.id) {
        classes.push_str(&format!(" {p}card-viewed"));
    }

    let mut card = format!(
        "<article class=\"{}\" data-module-id=\"{}\">\n",
        classes,
        escape_attr(&module.id)
    );
    if !module.icon.is_empty() {
        card.push_str(&format!(
            "<div class=\"{p}card-icon\">{}</div>\n",
            escape_html(&module.icon)
        ));
    }
    card.push_str(&format!(
        "<h2 class=\"{p}card-title\">{}</h2>\n",
        escape_html(&module.title)
    ));
    if !module.subtitle.is_empty() {
        card.push_str(&format!(
            "<p class=\"{p}card-subtitle\">{}</p>\n",
            escape_html(&module.subtitle)
        ));
    }
    if !module.description.is_empty() {
        card.push_str(&format!(
            "<p class=\"{p}card-description\">{}</p>\n",
            escape_html(&module.description)
        ));
    }
    if !module.topics.is_empty() {
        card.push_str(&format!("<ul class=\"{p}card-topics\">"));
        for topic in &module.topics {
            card.push_str(&format!("<li>{}</li>", escape_html(topic)));
        }
        card.push_str("</ul>\n");
    }
    if session.is_complete(&module.id) {
        card.push_str(&format!("<span class=\"{p}badge\">Completed</span>\n"));
    }
    card.push_str("</article>\n");
    card
}

/// Render one module: header, table of contents, body and navigation.
pub fn render_module_view(session: &Session, module: &Module) -> String {
    let config = session.catalog().config();
    let p = &config.class_prefix;
    let renderer = HtmlRenderer::new(config);

    let mut output = format!(
        "<article class=\"{p}module\" data-module-id=\"{}\">\n",
        escape_attr(&module.id)
    );

    output.push_str(&format!("<header class=\"{p}module-header\">\n"));
    output.push_str(&format!(
        "<button class=\"{p}back\" data-action=\"overview\">&larr; All modules</button>\n"
    ));
    output.push_str(&format!(
        "<h1 class=\"{p}module-title\">{} {}</h1>\n",
        escape_html(&module.icon),
        escape_html(&module.title)
    ));
    if !module.subtitle.is_empty() {
        output.push_str(&format!(
            "<p class=\"{p}module-subtitle\">{}</p>\n",
            escape_html(&module.subtitle)
        ));
    }
    output.push_str("</header>\n");

    if config.include_toc {
        output.push_str(&render_toc(&table_of_contents(&module.content), p));
    }

    output.push_str(&format!("<div class=\"{p}module-body\">\n"));
    output.push_str(&renderer.render_body(&module.content));
    output.push_str("</div>\n");

    output.push_str(&format!("<footer class=\"{p}module-footer\">\n"));
    if session.is_complete(&module.id) {
        output.push_str(&format!("<span class=\"{p}badge\">Completed</span>\n"));
    } else {
        output.push_str(&format!(
            "<button class=\"{p}complete\" data-action=\"mark-complete\" data-module-id=\"{}\">Mark as complete</button>\n",
            escape_attr(&module.id)
        ));
    }

    let (prev, next) = session.catalog().neighbors(&module.id);
    if let Some(prev) = prev {
        output.push_str(&nav_button(p, "prev", prev, "&larr; "));
    }
    if let Some(next) = next {
        output.push_str(&nav_button(p, "next", next, ""));
    }
    output.push_str("</footer>\n</article>\n");

    if config.standalone {
        renderer.render_page(&module.title, &output)
    } else {
        output
    }
}

fn nav_button(p: &str, direction: &str, target: &Module, arrow: &str) -> String {
    let trailing = if direction == "next" { " &rarr;" } else { "" };
    format!(
        "<button class=\"{p}nav-{direction}\" data-action=\"select\" data-module-id=\"{}\">{arrow}{}{trailing}</button>\n",
        escape_attr(&target.id),
        escape_html(&target.title)
    )
}
