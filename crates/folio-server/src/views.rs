//! Inline HTML views.
//!
//! Every page shares one layout: an optional flash banner, a sign-in /
//! sign-out header, and a page body. All user-originated content is
//! HTML-escaped here except rendered markdown, which is trusted output of
//! the markdown renderer. Document names are additionally percent-encoded
//! wherever they form a URL path segment.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Shared page layout.
fn layout(title: &str, flash: Option<&str>, username: Option<&str>, body: &str) -> String {
    let flash_html = flash
        .map(|message| format!(r#"<p class="flash">{}</p>"#, html_escape(message)))
        .unwrap_or_default();

    let user_html = match username {
        Some(name) => format!(
            r#"<div class="user">Signed in as {}.
            <form action="/users/signout" method="post" class="inline">
                <button type="submit">Sign Out</button>
            </form>
        </div>"#,
            html_escape(name)
        ),
        None => r#"<div class="user"><a href="/users/signin">Sign In</a></div>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - folio</title>
    <style>{}</style>
</head>
<body>
    <div class="container">
        {}
        {}
        {}
    </div>
</body>
</html>"#,
        html_escape(title),
        CSS_STYLES,
        flash_html,
        user_html,
        body
    )
}

/// Document list page.
pub fn index_page(files: &[String], flash: Option<&str>, username: Option<&str>) -> String {
    let items: String = files
        .iter()
        .map(|name| {
            let href = html_escape(&encode_path_segment(name));
            let name = html_escape(name);
            format!(
                r#"<li>
                <a href="/{href}">{name}</a>
                <a class="edit" href="/{href}/edit">edit</a>
                <form action="/{href}/delete" method="post" class="inline">
                    <button type="submit">delete</button>
                </form>
            </li>"#
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Documents</h1>
        <ul class="documents">{items}</ul>
        <p><a href="/new">New Document</a></p>"#
    );
    layout("Documents", flash, username, &body)
}

/// New-document form.
pub fn new_page(flash: Option<&str>, username: Option<&str>) -> String {
    let body = r#"<h1>Add a new document</h1>
        <form action="/create" method="post">
            <div class="field">
                <label for="filename">Document name</label>
                <input type="text" id="filename" name="filename" autofocus>
            </div>
            <button type="submit">Create</button>
        </form>"#;
    layout("New Document", flash, username, body)
}

/// Edit form pre-filled with the document's current content.
pub fn edit_page(
    name: &str,
    content: &str,
    flash: Option<&str>,
    username: Option<&str>,
) -> String {
    let body = format!(
        r#"<h1>Edit content of {name}</h1>
        <form action="/{action}" method="post">
            <div class="field">
                <textarea name="content" rows="20">{content}</textarea>
            </div>
            <button type="submit">Save Changes</button>
        </form>"#,
        action = html_escape(&encode_path_segment(name)),
        name = html_escape(name),
        content = html_escape(content)
    );
    layout("Edit Document", flash, username, &body)
}

/// Sign-in form. The username is retained across a failed attempt; the
/// password never is.
pub fn signin_page(flash: Option<&str>, username_value: &str, username: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Sign In</h1>
        <form action="/users/signin" method="post">
            <div class="field">
                <label for="username">Username</label>
                <input type="text" id="username" name="username" value="{}" autofocus>
            </div>
            <div class="field">
                <label for="password">Password</label>
                <input type="password" id="password" name="password">
            </div>
            <button type="submit">Sign In</button>
        </form>"#,
        html_escape(username_value)
    );
    layout("Sign In", flash, username, &body)
}

/// A rendered markdown document, wrapped in the shared layout.
///
/// `rendered` is trusted HTML from the markdown renderer and is embedded
/// without escaping.
pub fn document_page(
    name: &str,
    rendered: &str,
    flash: Option<&str>,
    username: Option<&str>,
) -> String {
    let body = format!(
        r#"<article class="document">{rendered}</article>
        <p><a href="/">All documents</a></p>"#
    );
    layout(name, flash, username, &body)
}

/// Characters a browser treats as URL structure inside a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'\'');

/// Percent-encode a document name for use as a URL path segment.
fn encode_path_segment(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

const CSS_STYLES: &str = r#"
* {
    box-sizing: border-box;
}
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    background: #1a1a2e;
    color: #eee;
    margin: 0;
    padding: 20px;
}
.container {
    background: #16213e;
    padding: 40px;
    border-radius: 12px;
    max-width: 720px;
    margin: 0 auto;
    box-shadow: 0 4px 20px rgba(0,0,0,0.3);
}
h1 {
    margin: 0 0 10px 0;
    color: #fff;
    font-size: 24px;
}
a {
    color: #818cf8;
}
.flash {
    background: #14532d;
    color: #86efac;
    padding: 12px;
    border-radius: 6px;
    font-size: 14px;
}
.user {
    color: #aaa;
    font-size: 14px;
    margin-bottom: 20px;
}
.documents {
    list-style: none;
    padding: 0;
}
.documents li {
    padding: 8px 0;
    border-bottom: 1px solid #333;
}
.documents .edit {
    margin-left: 12px;
    font-size: 14px;
}
.field {
    margin-bottom: 20px;
}
label {
    display: block;
    margin-bottom: 8px;
    color: #ddd;
    font-size: 14px;
}
input, textarea {
    width: 100%;
    padding: 12px;
    border: 1px solid #333;
    border-radius: 6px;
    background: #0f0f23;
    color: #fff;
    font-size: 16px;
}
input:focus, textarea:focus {
    outline: none;
    border-color: #4f46e5;
}
button {
    padding: 10px 14px;
    background: #4f46e5;
    color: #fff;
    border: none;
    border-radius: 6px;
    font-size: 14px;
    cursor: pointer;
}
button:hover {
    background: #4338ca;
}
form.inline {
    display: inline;
}
form.inline button {
    padding: 4px 8px;
    font-size: 12px;
    background: #7f1d1d;
}
.document {
    background: #0f0f23;
    padding: 20px;
    border-radius: 6px;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_documents() {
        let files = vec!["about.md".to_string(), "changes.txt".to_string()];
        let html = index_page(&files, None, None);
        assert!(html.contains(r#"<a href="/about.md">about.md</a>"#));
        assert!(html.contains(r#"<a href="/changes.txt">changes.txt</a>"#));
    }

    #[test]
    fn flash_banner_is_rendered_when_present() {
        let html = index_page(&[], Some("Welcome!"), None);
        assert!(html.contains(r#"<p class="flash">Welcome!</p>"#));

        let html = index_page(&[], None, None);
        assert!(!html.contains(r#"class="flash""#));
    }

    #[test]
    fn links_percent_encode_document_names() {
        let files = vec!["q&a #1.md".to_string()];
        let html = index_page(&files, None, None);
        assert!(html.contains(r#"href="/q&amp;a%20%231.md""#));
        assert!(html.contains(r#"href="/q&amp;a%20%231.md/edit""#));
        assert!(html.contains(r#"action="/q&amp;a%20%231.md/delete""#));
        // Display text keeps the readable name.
        assert!(html.contains(">q&amp;a #1.md</a>"));
    }

    #[test]
    fn edit_form_action_percent_encodes_the_name() {
        let html = edit_page("notes #1.md", "x", None, None);
        assert!(html.contains(r#"action="/notes%20%231.md""#));
    }

    #[test]
    fn user_content_is_escaped() {
        let html = edit_page("a.txt", "<script>alert(1)</script>", None, None);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn rendered_markdown_is_embedded_unescaped() {
        let html = document_page("about.md", "<h1>Ruby is...</h1>", None, None);
        assert!(html.contains("<h1>Ruby is...</h1>"));
    }

    #[test]
    fn signin_form_retains_username_value() {
        let html = signin_page(Some("Invalid credentials"), "admin", None);
        assert!(html.contains(r#"value="admin""#));
        assert!(html.contains("Invalid credentials"));
    }

    #[test]
    fn header_reflects_signed_in_state() {
        let html = index_page(&[], None, Some("admin"));
        assert!(html.contains("Signed in as admin."));
        assert!(html.contains("/users/signout"));

        let html = index_page(&[], None, None);
        assert!(html.contains(r#"href="/users/signin""#));
    }
}
