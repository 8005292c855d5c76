//! Markdown document parsing

pub mod frontmatter;

pub use frontmatter::{parse_from_markdown, split_frontmatter, FrontmatterDocument};
