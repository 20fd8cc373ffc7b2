//! Presentation — shapes generated documents for the two-panel view and the
//! rich-text copy button.

use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

use crate::outreach::generator::GeneratedOutput;

/// One display panel: the Markdown source plus its HTML rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: &'static str,
    pub markdown: String,
    pub html: String,
}

/// What the browser places on the clipboard when the user copies the email.
/// `html` is the rich-text flavour; `plain_text` is the fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipboardPayload {
    pub html: String,
    pub plain_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Presentation {
    pub panels: Vec<Panel>,
    pub copy: ClipboardPayload,
}

pub const EMAIL_PANEL_TITLE: &str = "Email Preview";
pub const ADVICE_PANEL_TITLE: &str = "Resume Tailoring Suggestions";

#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter;

impl Presenter {
    /// Email panel first, resume advice second when the output carries it.
    pub fn display(&self, output: &GeneratedOutput) -> Presentation {
        let email = output.email_markdown();
        let mut panels = vec![panel(EMAIL_PANEL_TITLE, email)];
        if let Some(advice) = output.resume_advice_markdown() {
            panels.push(panel(ADVICE_PANEL_TITLE, advice));
        }

        Presentation {
            panels,
            copy: self.offer_copy(email),
        }
    }

    pub fn offer_copy(&self, markdown: &str) -> ClipboardPayload {
        ClipboardPayload {
            html: markdown_to_html(markdown),
            plain_text: markdown.to_string(),
        }
    }
}

fn panel(title: &'static str, markdown: &str) -> Panel {
    Panel {
        title,
        markdown: markdown.to_string(),
        html: markdown_to_html(markdown),
    }
}

/// Raw HTML in model output is escaped rather than passed through.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        pulldown_cmark::Event::Html(raw) | pulldown_cmark::Event::InlineHtml(raw) => {
            pulldown_cmark::Event::Text(raw)
        }
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_bold_and_bullets_render() {
        let html = markdown_to_html("Interested in **Backend Engineer**\n\n- Go\n- Postgres");
        assert!(html.contains("<strong>Backend Engineer</strong>"));
        assert!(html.contains("<li>Go</li>"));
        assert!(html.contains("<ul>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = markdown_to_html("Hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_display_extended_output_has_two_panels() {
        let output = GeneratedOutput::EmailWithAdvice {
            email_markdown: "Hi **Acme**".to_string(),
            resume_advice_markdown: "- Move Go up".to_string(),
        };

        let presentation = Presenter.display(&output);

        assert_eq!(presentation.panels.len(), 2);
        assert_eq!(presentation.panels[0].title, EMAIL_PANEL_TITLE);
        assert_eq!(presentation.panels[1].title, ADVICE_PANEL_TITLE);
        assert_eq!(presentation.copy.plain_text, "Hi **Acme**");
        assert!(presentation.copy.html.contains("<strong>Acme</strong>"));
    }

    #[test]
    fn test_display_simple_output_has_email_panel_only() {
        let output = GeneratedOutput::Email {
            email_markdown: "Dear team".to_string(),
        };

        let presentation = Presenter.display(&output);

        assert_eq!(presentation.panels.len(), 1);
        assert_eq!(presentation.panels[0].html, "<p>Dear team</p>\n");
    }
}
