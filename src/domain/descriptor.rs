//! Literal substring rewrites for the Linux launcher and metadata descriptors.

use std::fmt;

use super::config::BrandIdentity;

/// Descriptor files patched in every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// `key=value` launcher entry.
    Desktop,
    /// XML-like application metadata.
    AppData,
}

impl DescriptorKind {
    pub const ALL: [DescriptorKind; 2] = [DescriptorKind::Desktop, DescriptorKind::AppData];

    /// Path relative to the variant root.
    pub fn relative_path(&self) -> &'static str {
        match self {
            DescriptorKind::Desktop => "resources/linux/code.desktop",
            DescriptorKind::AppData => "resources/linux/code.appdata.xml",
        }
    }

    /// Ordered replacement rules for this descriptor.
    pub fn replacements(&self, identity: &BrandIdentity) -> Vec<Replacement> {
        let BrandIdentity { name, executable, tagline } = identity;
        match self {
            DescriptorKind::Desktop => vec![
                Replacement::new("Name=Code", format!("Name={name}")),
                Replacement::new("Comment=Code Editor", format!("Comment={name} - {tagline}")),
                Replacement::new("GenericName=Text Editor", format!("GenericName={tagline}")),
                Replacement::new("Exec=code", format!("Exec={executable}")),
                Replacement::new("Icon=code", format!("Icon={executable}")),
            ],
            DescriptorKind::AppData => vec![
                Replacement::new("<name>Code</name>", format!("<name>{name}</name>")),
                Replacement::new(
                    "<summary>Code Editor</summary>",
                    format!("<summary>{name} - {tagline}</summary>"),
                ),
                Replacement::new(
                    "<description>",
                    format!("<description>\n    <p>{name} is an {tagline} built on VS Code technology.</p>"),
                ),
            ],
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorKind::Desktop => f.write_str("desktop file"),
            DescriptorKind::AppData => f.write_str("appdata file"),
        }
    }
}

/// Exact-substring rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub old: String,
    pub new: String,
}

impl Replacement {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self { old: old.into(), new: new.into() }
    }

    /// Rewrite every occurrence of `old`. A rule whose `new` text embeds its
    /// `old` text is skipped once `new` is already present.
    pub fn apply(&self, content: &str) -> String {
        if self.old.is_empty() || !content.contains(&self.old) {
            return content.to_string();
        }
        if self.new.contains(&self.old) && content.contains(&self.new) {
            return content.to_string();
        }
        content.replace(&self.old, &self.new)
    }
}

/// Apply rules in order.
pub fn apply_replacements(content: &str, rules: &[Replacement]) -> String {
    rules.iter().fold(content.to_string(), |text, rule| rule.apply(&text))
}
