//! Template node-tree parsing.
//!
//! A small, permissive parser for the HTML-ish template language: enough
//! structure to walk elements, their attributes, and text runs. Candidate
//! expressions come from `{{ ... }}` interpolation bodies in text nodes and
//! from every attribute value (bound attributes carry expressions; static
//! ones simply fail expression parsing later and contribute nothing).

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: String,
        attrs: Vec<Attr>,
        children: Vec<Node>,
    },
    Text(String),
}

/// Tags that never have children.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Parse a template body into a node tree.
///
/// Tolerant of stray `<` in text and of implicitly-closed elements at end of
/// input; hard failures (unterminated comments, quotes, or tags) surface as
/// errors so the caller can fall back to pattern scanning.
pub fn parse(input: &str) -> Result<Vec<Node>> {
    TemplateParser { input, pos: 0 }.run()
}

/// Candidate expression strings: interpolation bodies and attribute values.
pub fn candidate_expressions(nodes: &[Node]) -> Vec<String> {
    let mut out = Vec::new();
    collect_candidates(nodes, &mut out);
    out
}

fn collect_candidates(nodes: &[Node], out: &mut Vec<String>) {
    for node in nodes {
        match node {
            Node::Element { attrs, children, .. } => {
                for attr in attrs {
                    if let Some(value) = &attr.value {
                        out.push(value.clone());
                    }
                }
                collect_candidates(children, out);
            }
            Node::Text(text) => interpolations(text, out),
        }
    }
}

/// Bodies of `{{ ... }}` interpolations in a text run.
fn interpolations(text: &str, out: &mut Vec<String>) {
    let mut at = 0;
    while let Some(rel) = text[at..].find("{{") {
        let start = at + rel + 2;
        let Some(end_rel) = text[start..].find("}}") else {
            return;
        };
        out.push(text[start..start + end_rel].trim().to_string());
        at = start + end_rel + 2;
    }
}

type PendingElement = (String, Vec<Attr>, Vec<Node>);

struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl TemplateParser<'_> {
    fn run(mut self) -> Result<Vec<Node>> {
        let mut stack: Vec<PendingElement> = Vec::new();
        let mut roots: Vec<Node> = Vec::new();

        while self.pos < self.input.len() {
            if self.starts_with("<!--") {
                self.skip_comment()?;
            } else if self.starts_with("</") {
                let name = self.read_close_tag()?;
                close_element(&mut stack, &mut roots, &name);
            } else if self.at_open_tag() {
                let (tag, attrs, self_closing) = self.read_open_tag()?;
                if self_closing || VOID_TAGS.contains(&tag.as_str()) {
                    push_node(
                        &mut stack,
                        &mut roots,
                        Node::Element {
                            tag,
                            attrs,
                            children: Vec::new(),
                        },
                    );
                } else {
                    stack.push((tag, attrs, Vec::new()));
                }
            } else {
                let text = self.read_text();
                if !text.is_empty() {
                    push_node(&mut stack, &mut roots, Node::Text(text));
                }
            }
        }

        // Unclosed elements close implicitly at end of input.
        while let Some((tag, attrs, children)) = stack.pop() {
            push_node(&mut stack, &mut roots, Node::Element { tag, attrs, children });
        }

        Ok(roots)
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn at_open_tag(&self) -> bool {
        let rest = &self.input[self.pos..];
        rest.starts_with('<')
            && rest[1..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
    }

    fn skip_comment(&mut self) -> Result<()> {
        match self.input[self.pos..].find("-->") {
            Some(rel) => {
                self.pos += rel + 3;
                Ok(())
            }
            None => bail!("unterminated comment"),
        }
    }

    fn read_close_tag(&mut self) -> Result<String> {
        self.pos += 2;
        let name = self.read_name();
        match self.input[self.pos..].find('>') {
            Some(rel) => {
                self.pos += rel + 1;
                Ok(name)
            }
            None => bail!("unterminated closing tag"),
        }
    }

    fn read_open_tag(&mut self) -> Result<(String, Vec<Attr>, bool)> {
        self.pos += 1;
        let tag = self.read_name();
        let mut attrs = Vec::new();
        loop {
            self.skip_whitespace();
            let rest = &self.input[self.pos..];
            if rest.is_empty() {
                bail!("unterminated tag <{}>", tag);
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                return Ok((tag, attrs, true));
            }
            if rest.starts_with('>') {
                self.pos += 1;
                return Ok((tag, attrs, false));
            }
            if rest.starts_with('/') {
                self.pos += 1;
                continue;
            }
            if let Some(attr) = self.read_attr()? {
                attrs.push(attr);
            }
        }
    }

    fn read_attr(&mut self) -> Result<Option<Attr>> {
        let name = self.read_attr_name();
        if name.is_empty() {
            // Stray punctuation inside a tag; step over it.
            self.advance_char();
            return Ok(None);
        }
        self.skip_whitespace();
        if !self.starts_with("=") {
            return Ok(Some(Attr { name, value: None }));
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = match self.input[self.pos..].chars().next() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let Some(rel) = self.input[self.pos..].find(quote) else {
                    bail!("unterminated attribute value for {}", name);
                };
                let value = self.input[self.pos..self.pos + rel].to_string();
                self.pos += rel + 1;
                value
            }
            _ => {
                let start = self.pos;
                while let Some(c) = self.input[self.pos..].chars().next() {
                    if c.is_whitespace() || c == '>' || c == '/' {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
                self.input[start..self.pos].to_string()
            }
        };
        Ok(Some(Attr {
            name,
            value: Some(value),
        }))
    }

    fn read_name(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.input[self.pos..].chars().next() {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    fn read_attr_name(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.input[self.pos..].chars().next() {
            if c.is_whitespace() || matches!(c, '=' | '>' | '/' | '"' | '\'') {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.input[start..self.pos].to_string()
    }

    fn read_text(&mut self) -> String {
        let start = self.pos;
        // A lone '<' that opens no tag is text.
        if self.starts_with("<") {
            self.pos += 1;
        }
        match self.input[self.pos..].find('<') {
            Some(rel) => self.pos += rel,
            None => self.pos = self.input.len(),
        }
        self.input[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.input[self.pos..].chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn advance_char(&mut self) {
        if let Some(c) = self.input[self.pos..].chars().next() {
            self.pos += c.len_utf8();
        }
    }
}

fn push_node(stack: &mut [PendingElement], roots: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some((_, _, children)) => children.push(node),
        None => roots.push(node),
    }
}

fn close_element(stack: &mut Vec<PendingElement>, roots: &mut Vec<Node>, name: &str) {
    let Some(open_index) = stack.iter().rposition(|(tag, _, _)| tag == name) else {
        // Stray closing tag, ignored.
        return;
    };
    while stack.len() > open_index {
        if let Some((tag, attrs, children)) = stack.pop() {
            push_node(stack, roots, Node::Element { tag, attrs, children });
        }
    }
}
