use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

/// A markdown document split into its YAML front matter and the free text after it
#[derive(Debug, Clone)]
pub struct FrontmatterDocument {
    pub frontmatter: serde_yaml::Value,
    pub body: String,
}

/// Parse a type from markdown content with YAML frontmatter
///
/// Returns the deserialized front matter together with the markdown body.
///
/// # Errors
///
/// Returns an error if frontmatter extraction fails or YAML deserialization fails.
pub fn parse_from_markdown<T: DeserializeOwned>(content: &str, type_name: &str) -> Result<(T, String)> {
    let doc = split_frontmatter(content)?;
    let value = serde_yaml::from_value(doc.frontmatter)
        .with_context(|| format!("Failed to parse {type_name} from frontmatter"))?;
    Ok((value, doc.body))
}

/// Split markdown content into parsed YAML frontmatter and the remaining body.
///
/// Expects frontmatter delimited by `---` at the start and end.
///
/// # Example
///
/// ```text
/// ---
/// title: Auth rollout
/// phases: []
/// ---
/// # Markdown content here
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Content is empty or missing opening `---`
/// - Closing `---` is not found
/// - YAML content cannot be parsed
pub fn split_frontmatter(content: &str) -> Result<FrontmatterDocument> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() || !lines[0].trim().starts_with("---") {
        bail!("No frontmatter delimiter found at start of content");
    }

    // Closing delimiter must sit at the opening delimiter's indentation, so an
    // indented `---` inside a block scalar does not end the front matter.
    let opening_indent = lines[0].len() - lines[0].trim_start().len();

    let end_idx = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| {
            let trimmed = line.trim_start();
            trimmed.starts_with("---") && line.len() - trimmed.len() == opening_indent
        })
        .map(|(idx, _)| idx)
        .ok_or_else(|| anyhow::anyhow!("Frontmatter not properly closed with ---"))?;

    let yaml_content = lines[1..end_idx].join("\n");
    let frontmatter =
        serde_yaml::from_str(&yaml_content).context("Failed to parse YAML frontmatter")?;

    let body = lines[end_idx + 1..].join("\n");

    Ok(FrontmatterDocument { frontmatter, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_yaml_frontmatter(content: &str) -> Result<serde_yaml::Value> {
        split_frontmatter(content).map(|doc| doc.frontmatter)
    }

    #[test]
    fn test_extract_valid_frontmatter() {
        let content = r#"---
title: Auth rollout
status: draft
---
# Markdown content
More content here"#;

        let yaml = extract_yaml_frontmatter(content).unwrap();
        assert_eq!(yaml["title"].as_str(), Some("Auth rollout"));
        assert_eq!(yaml["status"].as_str(), Some("draft"));
    }

    #[test]
    fn test_split_returns_body() {
        let content = "---\ntitle: Plan\n---\n## Phase 1: Setup\nText";
        let doc = split_frontmatter(content).unwrap();
        assert_eq!(doc.body, "## Phase 1: Setup\nText");
    }

    #[test]
    fn test_extract_missing_opening_delimiter() {
        let content = "No frontmatter here\n# Just markdown";
        let result = extract_yaml_frontmatter(content);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No frontmatter delimiter"));
    }

    #[test]
    fn test_extract_missing_closing_delimiter() {
        let content = "---\ntitle: Plan\n# No closing delimiter";
        let result = extract_yaml_frontmatter(content);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not properly closed"));
    }

    #[test]
    fn test_extract_empty_content() {
        assert!(extract_yaml_frontmatter("").is_err());
    }

    #[test]
    fn test_extract_invalid_yaml() {
        let content = r#"---
invalid: yaml: syntax: error
---
# Content"#;
        let result = extract_yaml_frontmatter(content);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse YAML"));
    }

    #[test]
    fn test_extract_with_embedded_delimiter_in_block_scalar() {
        let content = r#"---
title: Plan
description: |
  Example front matter:

  ---
  name: example
  ---

  More text here.
status: draft
---
# Markdown content"#;

        let yaml = extract_yaml_frontmatter(content).unwrap();
        assert_eq!(yaml["title"].as_str(), Some("Plan"));
        assert_eq!(yaml["status"].as_str(), Some("draft"));
        assert!(yaml["description"].as_str().unwrap().contains("---"));
    }

    #[test]
    fn test_parse_from_markdown_typed() {
        #[derive(serde::Deserialize)]
        struct Header {
            title: String,
        }

        let content = "---\ntitle: Typed\n---\nbody";
        let (header, body): (Header, String) = parse_from_markdown(content, "Header").unwrap();
        assert_eq!(header.title, "Typed");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_parse_from_markdown_reports_type_name() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Header {
            title: String,
        }

        let content = "---\nstatus: draft\n---\n";
        let err = parse_from_markdown::<Header>(content, "Header").unwrap_err();
        assert!(err.to_string().contains("Failed to parse Header"));
    }
}
