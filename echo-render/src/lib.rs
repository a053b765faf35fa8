use ansi_term::Colour::{Blue, Red, Yellow};
use ansi_term::Style;
use anyhow::Result;
use echo_core::EchoExchange;
use serde::Serialize;

/// Title of the card the form is drawn in.
pub const CARD_TITLE: &str = "Echo Service";

const CARD_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Bordered card with the input and whichever result block applies
    #[default]
    Formatted,
    /// Compact JSON of the present payload only
    Raw,
}

pub trait Renderer {
    fn mode(&self) -> DisplayMode {
        DisplayMode::Formatted
    }

    fn render_heading(&self, heading: &str) -> String;

    fn render_exchange(&self, exchange: &EchoExchange) -> Result<String>;
}

pub struct CliRenderer {
    mode: DisplayMode,
    color: bool,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            mode: DisplayMode::Formatted,
            color: true,
        }
    }

    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn style(&self, style: Style) -> Style {
        if self.color {
            style
        } else {
            Style::new()
        }
    }

    fn render_block<T: Serialize>(&self, title: &str, payload: &T, style: Style) -> Result<String> {
        let mut output = format!("\n{}\n", self.style(style.bold()).paint(title));
        let json = serde_json::to_string_pretty(payload)?;
        for line in json.lines() {
            output.push_str(&format!("  {}\n", self.style(style).paint(line)));
        }
        Ok(output)
    }

    fn render_card(&self, exchange: &EchoExchange) -> Result<String> {
        let mut output = format!("\n{}\n", self.style(Blue.bold()).paint(CARD_TITLE));
        output.push_str(&"─".repeat(CARD_WIDTH));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            self.style(Yellow.normal()).paint("Message:"),
            exchange.outgoing_message
        ));

        // At most one of the result blocks is drawn
        if let Some(response) = &exchange.response {
            output.push_str(&self.render_block("Response:", response, Style::new())?);
        }
        if let Some(error) = &exchange.error {
            output.push_str(&self.render_block("Error:", error, Red.normal())?);
        }

        output.push_str(&"─".repeat(CARD_WIDTH));
        output.push('\n');
        Ok(output)
    }

    fn render_raw(&self, exchange: &EchoExchange) -> Result<String> {
        // Payloads are exclusive, so at most one of these is printed
        if let Some(response) = &exchange.response {
            return Ok(serde_json::to_string(response)?);
        }
        if let Some(error) = &exchange.error {
            return Ok(serde_json::to_string(error)?);
        }
        Ok(String::new())
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CliRenderer {
    fn mode(&self) -> DisplayMode {
        self.mode
    }

    fn render_heading(&self, heading: &str) -> String {
        format!(
            "{}\n{}",
            self.style(Blue.bold()).paint(heading),
            "═".repeat(heading.chars().count())
        )
    }

    fn render_exchange(&self, exchange: &EchoExchange) -> Result<String> {
        match self.mode {
            DisplayMode::Formatted => self.render_card(exchange),
            DisplayMode::Raw => self.render_raw(exchange),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_core::EchoError;
    use serde_json::json;

    fn plain() -> CliRenderer {
        CliRenderer::new().with_color(false)
    }

    fn exchange(message: &str) -> EchoExchange {
        EchoExchange {
            outgoing_message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_exchange_shows_neither_block() {
        let output = plain().render_exchange(&exchange("draft")).unwrap();
        assert!(output.contains(CARD_TITLE));
        assert!(output.contains("Message: draft"));
        assert!(!output.contains("Response:"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn response_block_shows_pretty_json() {
        let mut exchange = exchange("hello");
        exchange.response = Some(json!({"message": "hello"}));

        let output = plain().render_exchange(&exchange).unwrap();
        assert!(output.contains("Response:"));
        assert!(output.contains(r#""message": "hello""#));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn error_block_shows_failure_object() {
        let mut exchange = exchange("hello");
        exchange.error = Some(EchoError::Status {
            url: "http://localhost/api/echo".to_string(),
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: json!(null),
        });

        let output = plain().render_exchange(&exchange).unwrap();
        assert!(output.contains("Error:"));
        assert!(output.contains(r#""status": 500"#));
        assert!(!output.contains("Response:"));
    }

    #[test]
    fn raw_mode_prints_only_the_payload() {
        let renderer = plain().with_mode(DisplayMode::Raw);
        let mut exchange = exchange("hello");
        assert_eq!(renderer.render_exchange(&exchange).unwrap(), "");

        exchange.response = Some(json!({"echo": "hello"}));
        assert_eq!(renderer.render_exchange(&exchange).unwrap(), r#"{"echo":"hello"}"#);
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let output = plain().render_heading("League Pick Rate History");
        assert!(!output.contains('\x1B'));
        assert!(output.starts_with("League Pick Rate History\n"));

        let colored = CliRenderer::new().render_heading("League Pick Rate History");
        assert!(colored.contains('\x1B'));
    }
}
