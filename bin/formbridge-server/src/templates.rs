//! Page templates, embedded at compile time and rendered with minijinja.

use minijinja::{context, Environment};

use crate::handlers::quote::QuoteFormOptions;

pub const CONTACT_FORM: &str = "contact-form.html";
pub const QUOTE_FORM: &str = "quote-form.html";

/// Compiled template set shared by all requests.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Parse the embedded templates. Fails only on a template syntax error.
    pub fn load() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("../templates/layout.html"))?;
        env.add_template(CONTACT_FORM, include_str!("../templates/contact-form.html"))?;
        env.add_template(QUOTE_FORM, include_str!("../templates/quote-form.html"))?;
        Ok(Self { env })
    }

    pub fn contact_form(&self) -> Result<String, minijinja::Error> {
        self.env.get_template(CONTACT_FORM)?.render(context! {
            title => "Contact Form | HubSpot CRM Integration",
        })
    }

    pub fn quote_form(&self, options: &QuoteFormOptions) -> Result<String, minijinja::Error> {
        self.env.get_template(QUOTE_FORM)?.render(context! {
            title => "Quote Request | HubSpot CRM Integration",
            options => options,
        })
    }
}
