//! Settings page view model and HTML rendering
//!
//! The view is plain data so tests can assert on exactly what a request
//! produced. `render_html` turns it into the served document.

use dash_common::User;

const LAYOUT_HTML: &str = include_str!("../ui/layout.html");

/// Page heading block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
    pub title: String,
    pub description: String,
}

/// Account settings form, pre-populated from the user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub user: User,
}

/// Full-height column layout: header on top, scrollable form below
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub header: PageHeader,
    pub form: SettingsForm,
}

impl SettingsView {
    /// Render the complete HTML document
    pub fn render_html(&self) -> String {
        // Form last: user-supplied text must never be scanned for placeholders
        LAYOUT_HTML
            .replacen("{{title}}", &escape_html(&self.header.title), 1)
            .replacen("{{header}}", &self.header.render_html(), 1)
            .replacen("{{content}}", &self.form.render_html(), 1)
    }
}

impl PageHeader {
    pub fn render_html(&self) -> String {
        format!(
            concat!(
                "        <header class=\"page-header\">\n",
                "            <h1>{}</h1>\n",
                "            <p>{}</p>\n",
                "        </header>"
            ),
            escape_html(&self.title),
            escape_html(&self.description)
        )
    }
}

impl SettingsForm {
    pub fn render_html(&self) -> String {
        let user = &self.user;
        let id = escape_html(&user.id);

        let mut html = format!(
            concat!(
                "            <form class=\"settings-form\" data-user-id=\"{id}\">\n",
                "                <input type=\"hidden\" name=\"id\" value=\"{id}\">\n"
            ),
            id = id
        );
        html.push_str(&render_field("name", "Name", "text", Some(&user.name), false));
        if user.email.is_some() {
            html.push_str(&render_field("email", "Email", "email", user.email.as_deref(), true));
        }
        html.push_str(&render_field("image", "Avatar URL", "url", user.image.as_deref(), false));
        html.push_str("            </form>");

        html
    }
}

fn render_field(
    name: &str,
    label: &str,
    input_type: &str,
    value: Option<&str>,
    readonly: bool,
) -> String {
    format!(
        concat!(
            "                <label for=\"{name}\">{label}</label>\n",
            "                <input id=\"{name}\" name=\"{name}\" type=\"{input_type}\" value=\"{value}\"{readonly}>\n"
        ),
        name = name,
        label = label,
        input_type = input_type,
        value = escape_html(value.unwrap_or_default()),
        readonly = if readonly { " readonly" } else { "" }
    )
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
