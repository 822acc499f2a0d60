use core::panic;
use std::sync::OnceLock;

use serde::Deserialize;
use strum_macros::AsRefStr;
use tera::Tera;
use tracing::info;

use crate::{footer::FooterView, newsletter::FormView};

/// The pages that carry the footer form. The form posts its page back so the
/// response can be rendered where the visitor was.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Conduct,
    Podcast,
}

impl Page {
    pub fn template_file(self) -> &'static str {
        match self {
            Page::Home => "home.html",
            Page::Conduct => "conduct.html",
            Page::Podcast => "podcast.html",
        }
    }
}

#[derive(Debug)]
pub struct TemplateManager {
    tera: &'static Tera,
}

impl TemplateManager {
    pub fn init() -> Self {
        info!(
            "{:<20} - Initializing the Template manager",
            "templ manager"
        );
        static TERA: OnceLock<Tera> = OnceLock::new();
        let tera = TERA.get_or_init(|| {
            Tera::new("templates/**/*").unwrap_or_else(|e| panic!("Parsing error(s): {e}"))
        });
        Self { tera }
    }

    /// Renders a template file from the 'html/' directory.
    pub fn render_html_to_string(
        &self,
        ctx: &tera::Context,
        template_file: &str,
    ) -> Result<String, tera::Error> {
        let template = format!("html/{template_file}");
        self.tera.render(&template, ctx)
    }

    /// Renders a full page: the page template plus the shared footer and newsletter form.
    pub fn render_page(
        &self,
        mut ctx: tera::Context,
        page: Page,
        form: &FormView<'_>,
    ) -> Result<String, tera::Error> {
        ctx.insert("page", page.as_ref());
        ctx.insert("footer", &FooterView::current());
        ctx.insert("form", form);
        self.render_html_to_string(&ctx, page.template_file())
    }

    pub fn tera(&self) -> &Tera {
        self.tera
    }
}
