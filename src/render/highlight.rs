//! Lexer resolution and tokenization on top of syntect.

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::errors::Result;

/// Theme every code block is colored with.
pub const CODE_THEME: &str = "InspiredGitHub";

/// Last-resort guesses when neither the declared language nor the first line
/// identify the syntax. Checked in order.
const KEYWORD_HINTS: &[(&str, &str)] = &[
    ("def ", "Python"),
    ("import ", "Python"),
    ("print(", "Python"),
    ("fn ", "Rust"),
    ("#include", "C"),
    ("public class", "Java"),
    ("function ", "JavaScript"),
    ("SELECT ", "SQL"),
    ("<html", "HTML"),
];

/// One colored slice of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub rgb: (u8, u8, u8),
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(CODE_THEME).unwrap_or_default();
        Self { syntaxes, theme }
    }

    /// Picks a syntax for `code`. Resolution never fails; unknown code is plain text.
    pub fn resolve(&self, code: &str, language: Option<&str>) -> &SyntaxReference {
        if let Some(language) = language {
            if let Some(syntax) = self
                .syntaxes
                .find_syntax_by_token(language)
                .or_else(|| self.syntaxes.find_syntax_by_name(language))
            {
                return syntax;
            }
            log::warn!("Unknown code language {language:?}; guessing from content");
        }
        self.guess(code)
    }

    fn guess(&self, code: &str) -> &SyntaxReference {
        if let Some(syntax) = code
            .lines()
            .next()
            .and_then(|line| self.syntaxes.find_syntax_by_first_line(line))
        {
            return syntax;
        }
        KEYWORD_HINTS
            .iter()
            .filter(|(needle, _)| code.contains(needle))
            .find_map(|(_, name)| self.syntaxes.find_syntax_by_name(name))
            .unwrap_or_else(|| {
                log::debug!("No lexer matched; rendering code as plain text");
                self.syntaxes.find_syntax_plain_text()
            })
    }

    /// Splits `code` into colored tokens, line endings included.
    pub fn tokens(&self, code: &str, syntax: &SyntaxReference) -> Result<Vec<Token>> {
        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut tokens = Vec::new();
        for line in LinesWithEndings::from(code) {
            for (style, text) in lines.highlight_line(line, &self.syntaxes)? {
                let color = style.foreground;
                tokens.push(Token {
                    text: text.to_string(),
                    rgb: (color.r, color.g, color.b),
                    bold: style.font_style.contains(FontStyle::BOLD),
                    italic: style.font_style.contains(FontStyle::ITALIC),
                    underline: style.font_style.contains(FontStyle::UNDERLINE),
                });
            }
        }
        Ok(tokens)
    }

    /// Tokens grouped per source line, line endings stripped.
    pub fn token_lines(&self, code: &str, syntax: &SyntaxReference) -> Result<Vec<Vec<Token>>> {
        let mut lines = vec![Vec::new()];
        for mut token in self.tokens(code, syntax)? {
            let ends_line = token.text.ends_with('\n');
            if ends_line {
                token.text.truncate(token.text.trim_end_matches(['\r', '\n']).len());
            }
            if !token.text.is_empty() {
                if let Some(line) = lines.last_mut() {
                    line.push(token);
                }
            }
            if ends_line {
                lines.push(Vec::new());
            }
        }
        if lines.len() > 1 && lines.last().is_some_and(Vec::is_empty) {
            lines.pop();
        }
        Ok(lines)
    }

    /// Background color of the theme, white when the theme has none.
    pub fn background(&self) -> (u8, u8, u8) {
        self.theme
            .settings
            .background
            .map_or((255, 255, 255), |c| (c.r, c.g, c.b))
    }

    /// Standalone HTML rendering of `code`.
    pub fn html(&self, code: &str, syntax: &SyntaxReference) -> Result<String> {
        Ok(highlighted_html_for_string(
            code,
            &self.syntaxes,
            syntax,
            &self.theme,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_language_wins() {
        let highlighter = Highlighter::new();
        assert_eq!(highlighter.resolve("x = 1", Some("python")).name, "Python");
        assert_eq!(highlighter.resolve("x = 1", Some("rs")).name, "Rust");
    }

    #[test]
    fn unknown_language_falls_back_to_guessing() {
        let highlighter = Highlighter::new();
        let syntax = highlighter.resolve("def f():\n    return 1\n", Some("no-such-lang"));
        assert_eq!(syntax.name, "Python");
        let plain = highlighter.resolve("just words", None);
        assert_eq!(plain.name, "Plain Text");
    }

    #[test]
    fn tokens_cover_the_source() {
        let highlighter = Highlighter::new();
        let code = "x = 1\nprint(x)\n";
        let syntax = highlighter.resolve(code, Some("python"));
        let tokens = highlighter.tokens(code, syntax).unwrap();
        let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, code);
        let lines = highlighter.token_lines(code, syntax).unwrap();
        assert_eq!(lines.len(), 2);
    }
}
