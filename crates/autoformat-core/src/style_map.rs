//! Style map: inline style names to visual declarations.
//!
//! Owned by the rendering layer; the engine only ever refers to styles by name.

use std::collections::BTreeMap;

use crate::document::BlockType;
use crate::style::InlineStyle;

/// An RGBA color, components in `0..=255` and alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Create a color.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba(...)` notation.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {:.1})", self.r, self.g, self.b, self.a)
    }
}

/// Visual attributes for one inline style. Unset fields leave the inherited value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDeclaration {
    /// Foreground color.
    pub color: Option<Rgba>,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
    /// Line-through decoration.
    pub strikethrough: bool,
    /// Monospace font family.
    pub monospace: bool,
}

/// Mapping from inline style to its declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleMap {
    entries: BTreeMap<InlineStyle, StyleDeclaration>,
}

impl StyleMap {
    /// An empty style map.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace one entry.
    pub fn with(mut self, style: InlineStyle, declaration: StyleDeclaration) -> Self {
        self.entries.insert(style, declaration);
        self
    }

    /// Declaration for `style`.
    pub fn get(&self, style: &InlineStyle) -> Option<&StyleDeclaration> {
        self.entries.get(style)
    }

    /// Merge the declarations of every style in `styles`; later styles win on color.
    pub fn resolve<'a>(&self, styles: impl IntoIterator<Item = &'a InlineStyle>) -> StyleDeclaration {
        let mut out = StyleDeclaration::default();
        for declaration in styles.into_iter().filter_map(|s| self.get(s)) {
            out.color = declaration.color.or(out.color);
            out.bold |= declaration.bold;
            out.italic |= declaration.italic;
            out.underline |= declaration.underline;
            out.strikethrough |= declaration.strikethrough;
            out.monospace |= declaration.monospace;
        }
        out
    }
}

impl Default for StyleMap {
    /// The built-in styles plus `COLOR_RED`.
    fn default() -> Self {
        let flag = StyleDeclaration::default;
        Self::empty()
            .with(InlineStyle::Bold, StyleDeclaration { bold: true, ..flag() })
            .with(InlineStyle::Italic, StyleDeclaration { italic: true, ..flag() })
            .with(
                InlineStyle::Underline,
                StyleDeclaration {
                    underline: true,
                    ..flag()
                },
            )
            .with(
                InlineStyle::Strikethrough,
                StyleDeclaration {
                    strikethrough: true,
                    ..flag()
                },
            )
            .with(
                InlineStyle::Code,
                StyleDeclaration {
                    monospace: true,
                    ..flag()
                },
            )
            .with(
                InlineStyle::ColorRed,
                StyleDeclaration {
                    color: Some(Rgba::new(255, 0, 0, 1.0)),
                    ..flag()
                },
            )
    }
}

/// CSS class the rendering layer attaches to blocks of `block_type`.
pub fn block_style_class(block_type: &BlockType) -> Option<&'static str> {
    match block_type {
        BlockType::CodeBlock => Some("codeBlockStyle"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_colors_red() {
        let map = StyleMap::default();
        let red = map.get(&InlineStyle::ColorRed).unwrap();
        assert_eq!(
            red.color.map(|c| c.to_css()).as_deref(),
            Some("rgba(255, 0, 0, 1.0)")
        );
        assert!(map.get(&InlineStyle::Custom("HIGHLIGHT".into())).is_none());
    }

    #[test]
    fn test_resolve_combines_flags() {
        let map = StyleMap::default();
        let styles = [InlineStyle::Bold, InlineStyle::ColorRed, InlineStyle::Underline];
        let resolved = map.resolve(styles.iter());
        assert!(resolved.bold && resolved.underline);
        assert_eq!(resolved.color, Some(Rgba::new(255, 0, 0, 1.0)));
    }

    #[test]
    fn test_block_style_class() {
        assert_eq!(block_style_class(&BlockType::CodeBlock), Some("codeBlockStyle"));
        assert_eq!(block_style_class(&BlockType::HeaderOne), None);
    }
}
