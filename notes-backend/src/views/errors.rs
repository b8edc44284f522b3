use validator::ValidationErrors;

use super::form::messages_by_field;
use super::{layout, text};

pub fn not_found(what: &str) -> String {
    let content = format!(
        r#"<h1>Not found</h1>
<p>{} does not exist.</p>
<a href="/notes">Back to notes</a>
"#,
        text(what)
    );
    layout("Not found", &content)
}

pub fn unprocessable(errors: &ValidationErrors) -> String {
    let items: String = messages_by_field(errors)
        .into_iter()
        .flat_map(|(field, messages)| {
            messages
                .into_iter()
                .map(move |m| format!("<li><b>{}</b>: {}</li>\n", text(&field), text(&m)))
        })
        .collect();

    let content = format!("<h1>Invalid input</h1>\n<ul class=\"field-errors\">\n{}</ul>\n", items);
    layout("Invalid input", &content)
}

pub fn method_not_allowed(method: &str) -> String {
    let content = format!(
        "<h1>Method not allowed</h1>\n<p>{} is not supported here.</p>\n",
        text(method)
    );
    layout("Method not allowed", &content)
}

pub fn server_error() -> String {
    layout(
        "Server error",
        "<h1>Something went wrong</h1>\n<p>The request could not be completed. Please try again.</p>\n",
    )
}
