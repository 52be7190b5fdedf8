//! Server-rendered chat page.

use crate::connector::api::DISCLAIMER;
use crate::{LegalDomain, Role, Session};

const TITLE: &str = "Indian Legal Law Chatbot";
const KEYWORD_SUGGESTIONS: &str = "Fundamental Rights, IPC Section 420, Cybercrime laws, \
Divorce procedure, Bail, FIR, Consumer rights, Property dispute, Labour rights";

const STYLE: &str = r#"
body {font-family: system-ui, sans-serif; margin: 0; display: flex; color: #2d3a4a;}
aside {width: 260px; padding: 1.5em; background: #f7f9fb; min-height: 100vh; box-sizing: border-box;}
main {flex: 1; max-width: 760px; margin: 0 auto; padding: 1.5em;}
.main-header {display: flex; align-items: center; gap: 12px; margin-bottom: 0.5em;}
.main-title {font-size: 2em; font-weight: 700;}
.disclaimer-box {background: #fff3cd; border-left: 6px solid #ffecb5; padding: 0.8em 1em; margin-bottom: 1em; border-radius: 6px;}
.error-box {background: #fdecea; border-left: 6px solid #f5c2c0; padding: 0.8em 1em; margin-bottom: 1em; border-radius: 6px;}
.chat-user {background: #e3f2fd; border-radius: 8px; padding: 0.7em 1em; margin-bottom: 0.5em; border: 1px solid #90caf9; white-space: pre-wrap;}
.chat-assistant {background: #f1f8e9; border-radius: 8px; padding: 0.7em 1em; margin-bottom: 0.5em; border: 1px solid #aed581; white-space: pre-wrap;}
.chat-label {font-weight: 600; margin-right: 0.5em;}
.sidebar-title {font-size: 1.2em; font-weight: 600; margin-bottom: 0.5em;}
.sidebar-keywords {margin-top: 2em; font-weight: 600;}
.footer-note {text-align: center; color: #888; margin-top: 2em;}
input[type=text] {width: 100%; padding: 0.6em; box-sizing: border-box;}
"#;

/// Everything the page needs for one render.
pub struct PageView<'a> {
    pub session: &'a Session,
    pub domain: LegalDomain,
    pub model_name: &'a str,
    pub error: Option<&'a str>,
}

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

pub fn render_page(view: &PageView<'_>) -> String {
    let session_id = view.session.id();
    let ask_action = format!("/session/{}/ask", session_id);
    let end_action = format!("/session/{}/end", session_id);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n", TITLE, STYLE));

    // The domain select belongs to the ask form via the form attribute.
    html.push_str("<aside>\n<div class='sidebar-title'>Select Legal Domain</div>\n");
    html.push_str("<select name=\"domain\" form=\"ask-form\">\n");
    for domain in LegalDomain::ALL {
        let selected = if domain == view.domain { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            domain.slug(),
            selected,
            escape_html(&domain.display_label())
        ));
    }
    html.push_str("</select>\n");
    html.push_str("<div class='sidebar-keywords'>Keyword Suggestions:</div>\n");
    html.push_str(&format!("<div>{}</div>\n", KEYWORD_SUGGESTIONS));
    html.push_str(&format!(
        "<form method=\"post\" action=\"{}\"><button type=\"submit\">New conversation</button></form>\n",
        end_action
    ));
    html.push_str("</aside>\n<main>\n");

    html.push_str(&format!(
        "<div class='main-header'><span style='font-size:2.2em;'>⚖️</span><span class='main-title'>{}</span></div>\n",
        TITLE
    ));
    html.push_str(&format!(
        "<div class='disclaimer-box'>⚠️ {}</div>\n",
        escape_html(DISCLAIMER)
    ));

    if let Some(error) = view.error {
        html.push_str(&format!(
            "<div class='error-box'><strong>Request failed:</strong> {}</div>\n",
            escape_html(error)
        ));
    }

    html.push_str("<h3>Chat History</h3>\n");
    for message in view.session.transcript() {
        let (class, label) = match message.role() {
            Role::User => ("chat-user", "🧑‍💼 You:"),
            Role::Assistant => ("chat-assistant", "🤖 Legal Assistant:"),
        };
        html.push_str(&format!(
            "<div class='{}'><span class='chat-label'>{}</span>{}</div>\n",
            class,
            label,
            escape_html(message.content())
        ));
    }

    html.push_str(&format!(
        "<form id=\"ask-form\" method=\"post\" action=\"{}\">\n",
        ask_action
    ));
    html.push_str("<label for=\"question\">Ask your legal question:</label>\n");
    html.push_str(&format!(
        "<input type=\"text\" id=\"question\" name=\"question\" value=\"{}\" \
placeholder=\"Type your legal question and press Enter...\" autofocus>\n",
        escape_html(view.session.draft())
    ));
    html.push_str("</form>\n");

    html.push_str(&format!(
        "<div class='footer-note'>Powered by <b>{}</b> (Google AI).</div>\n",
        escape_html(&footer_model_name(view.model_name))
    ));
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// `gemini-2.0-flash` reads as "Gemini 2.0 Flash API".
fn footer_model_name(model: &str) -> String {
    let words: Vec<String> = model
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    format!("{} API", words.join(" "))
}
