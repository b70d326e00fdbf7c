//! Single-file-component block splitting.

use anyhow::{Result, bail};

/// Template and script blocks of a `.vue` component.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SfcBlocks {
    pub template: Option<String>,
    pub script: Option<String>,
}

/// Split a component into its top-level `<template>` and `<script>` blocks.
///
/// `<template>` nests (scoped slots), so the block runs to the matching
/// closing tag, not the first one. Style and custom blocks are ignored.
pub fn split(content: &str) -> Result<SfcBlocks> {
    let mut blocks = SfcBlocks::default();

    let mut template_span = None;
    if let Some(open) = find_tag(content, "template", 0) {
        let (body_start, self_closing) = open_tag_end(content, open)?;
        if self_closing {
            blocks.template = Some(String::new());
            template_span = Some((open, body_start));
        } else {
            let body_end = matching_template_close(content, body_start)?;
            blocks.template = Some(content[body_start..body_end].to_string());
            template_span = Some((open, body_end));
        }
    }

    // The script block is a sibling of the template, never inside it.
    let mut search_from = 0;
    while let Some(open) = find_tag(content, "script", search_from) {
        if let Some((template_start, template_end)) = template_span
            && open > template_start
            && open < template_end
        {
            search_from = template_end;
            continue;
        }
        let (body_start, self_closing) = open_tag_end(content, open)?;
        if self_closing {
            blocks.script = Some(String::new());
        } else {
            let Some(rel_end) = content[body_start..].find("</script") else {
                bail!("unterminated <script> block");
            };
            blocks.script = Some(content[body_start..body_start + rel_end].to_string());
        }
        break;
    }

    Ok(blocks)
}

/// Find `<name` at or after `from`, requiring a tag-name boundary after it.
fn find_tag(content: &str, name: &str, from: usize) -> Option<usize> {
    let needle = format!("<{}", name);
    let mut at = from;
    while let Some(rel) = content[at..].find(&needle) {
        let pos = at + rel;
        let after = pos + needle.len();
        match content[after..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(pos),
            None => return None,
            _ => at = after,
        }
    }
    None
}

/// Index just past the `>` of the open tag starting at `open`, plus whether
/// the tag was self-closing. Quoted attribute values may contain `>`.
fn open_tag_end(content: &str, open: usize) -> Result<(usize, bool)> {
    let bytes = content.as_bytes();
    let mut i = open;
    let mut quote: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => {
                    let self_closing = i > open && bytes[i - 1] == b'/';
                    return Ok((i + 1, self_closing));
                }
                _ => {}
            },
        }
        i += 1;
    }
    bail!("unterminated tag in component");
}

/// Index of the `</template` matching the block whose body starts at
/// `body_start`, honoring nested `<template>` tags.
fn matching_template_close(content: &str, body_start: usize) -> Result<usize> {
    let mut depth = 1usize;
    let mut at = body_start;
    loop {
        let next_open = find_tag(content, "template", at);
        let next_close = content[at..].find("</template").map(|rel| at + rel);
        match (next_open, next_close) {
            (Some(open), Some(close)) if open < close => {
                let (end, self_closing) = open_tag_end(content, open)?;
                if !self_closing {
                    depth += 1;
                }
                at = end;
            }
            (_, Some(close)) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(close);
                }
                at = close + "</template".len();
            }
            _ => bail!("unterminated <template> block"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_template_and_script() {
        let content = "<template>\n  <p>{{ $t('a') }}</p>\n</template>\n\n<script>\nexport default {}\n</script>\n";
        let blocks = split(content).unwrap();
        assert_eq!(blocks.template.as_deref(), Some("\n  <p>{{ $t('a') }}</p>\n"));
        assert_eq!(blocks.script.as_deref(), Some("\nexport default {}\n"));
    }

    #[test]
    fn test_split_nested_templates() {
        let content = concat!(
            "<template>\n",
            "  <div>\n",
            "    <template v-slot:body>\n",
            "      <span>inner</span>\n",
            "    </template>\n",
            "  </div>\n",
            "</template>\n",
            "<script>const x = 1</script>\n",
        );
        let blocks = split(content).unwrap();
        let template = blocks.template.unwrap();
        assert!(template.contains("v-slot:body"));
        assert!(template.contains("<span>inner</span>"));
        assert!(template.trim_end().ends_with("</div>"));
        assert_eq!(blocks.script.as_deref(), Some("const x = 1"));
    }

    #[test]
    fn test_split_script_only() {
        let blocks = split("<script>\nconst a = 1\n</script>").unwrap();
        assert_eq!(blocks.template, None);
        assert_eq!(blocks.script.as_deref(), Some("\nconst a = 1\n"));
    }

    #[test]
    fn test_split_script_with_attributes() {
        let blocks = split("<script lang=\"ts\">let x: number = 1</script>").unwrap();
        assert_eq!(blocks.script.as_deref(), Some("let x: number = 1"));
    }

    #[test]
    fn test_split_unterminated_template_fails() {
        assert!(split("<template><div>").is_err());
    }

    #[test]
    fn test_split_unterminated_script_fails() {
        assert!(split("<template><p>x</p></template><script>const a = 1").is_err());
    }

    #[test]
    fn test_split_ignores_style_block() {
        let blocks = split("<template><p>x</p></template>\n<style>.a { color: red }</style>").unwrap();
        assert_eq!(blocks.template.as_deref(), Some("<p>x</p>"));
        assert_eq!(blocks.script, None);
    }

    #[test]
    fn test_script_tag_inside_template_is_not_the_script_block() {
        let content = "<template><p>use &lt;script&gt; <scripted-widget /></p></template><script>const a = 1</script>";
        let blocks = split(content).unwrap();
        assert_eq!(blocks.script.as_deref(), Some("const a = 1"));
    }
}
