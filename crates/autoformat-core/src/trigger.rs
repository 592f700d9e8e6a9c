//! Trigger detection: classify a key press into a shortcut command.

use std::fmt;
use std::str::FromStr;

use crate::editor::EditorState;
use crate::error::UnknownCommand;
use crate::keys::{KeyCode, KeyEvent};
use crate::style::InlineStyle;

/// The closed set of shortcut commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCommand {
    /// `#` + space: turn the block into a level-one heading.
    HashtagToHeading,
    /// `*` + space: bold the block.
    AsteriskToBold,
    /// `**` + space: color the block red.
    AsteriskToRed,
    /// `***` + space: underline the block.
    AsteriskToUnderline,
    /// ```` ``` ```` + space: turn the block into a code block.
    InsertCodeBlock,
}

impl ShortcutCommand {
    /// Every command, in trigger-rule order.
    pub const ALL: [Self; 5] = [
        Self::HashtagToHeading,
        Self::AsteriskToBold,
        Self::AsteriskToRed,
        Self::AsteriskToUnderline,
        Self::InsertCodeBlock,
    ];

    /// The command's symbolic name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HashtagToHeading => "hashtag-to-heading",
            Self::AsteriskToBold => "asterisk-to-bold",
            Self::AsteriskToRed => "asterisk-to-red",
            Self::AsteriskToUnderline => "asterisk-to-underline",
            Self::InsertCodeBlock => "insert-code-block",
        }
    }

    /// `(style, delimiter length)` for the inline style commands.
    pub fn inline_style(&self) -> Option<(InlineStyle, usize)> {
        match self {
            Self::AsteriskToBold => Some((InlineStyle::Bold, 1)),
            Self::AsteriskToRed => Some((InlineStyle::ColorRed, 2)),
            Self::AsteriskToUnderline => Some((InlineStyle::Underline, 3)),
            Self::HashtagToHeading | Self::InsertCodeBlock => None,
        }
    }
}

impl fmt::Display for ShortcutCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShortcutCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Result of classifying a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    /// The key completes a shortcut.
    Command(ShortcutCommand),
    /// Not a shortcut; the host applies its default key binding.
    Default,
}

/// One trigger rule: the block must start with `prefix` and the caret must sit right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerRule {
    /// Required leading token.
    pub prefix: &'static str,
    /// Command fired when the rule matches.
    pub command: ShortcutCommand,
}

impl TriggerRule {
    /// The caret offset the rule requires: the prefix length in characters.
    pub fn offset(&self) -> usize {
        self.prefix.chars().count()
    }
}

/// Trigger rules in evaluation order. The first match wins.
pub const TRIGGER_RULES: [TriggerRule; 5] = [
    TriggerRule {
        prefix: "#",
        command: ShortcutCommand::HashtagToHeading,
    },
    TriggerRule {
        prefix: "*",
        command: ShortcutCommand::AsteriskToBold,
    },
    TriggerRule {
        prefix: "**",
        command: ShortcutCommand::AsteriskToRed,
    },
    TriggerRule {
        prefix: "***",
        command: ShortcutCommand::AsteriskToUnderline,
    },
    TriggerRule {
        prefix: "```",
        command: ShortcutCommand::InsertCodeBlock,
    },
];

/// Classify `event` against the current editor state.
///
/// Only an unshifted space can trigger a shortcut. The rule is chosen by the block holding the
/// selection's start and the start offset; since every rule pins the offset to its own prefix
/// length, `*`, `**` and `***` never compete for the same caret position.
pub fn key_binding(state: &EditorState, event: &KeyEvent) -> KeyBinding {
    if event.code != KeyCode::Space || event.shift() {
        return KeyBinding::Default;
    }
    let Some(block) = state.current_block() else {
        return KeyBinding::Default;
    };
    let offset = state.selection().start_offset();

    TRIGGER_RULES
        .iter()
        .find(|rule| offset == rule.offset() && block.starts_with(rule.prefix))
        .map_or(KeyBinding::Default, |rule| KeyBinding::Command(rule.command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ContentState;
    use crate::keys::Modifiers;
    use crate::selection::SelectionState;

    fn state_at(text: &str, offset: usize) -> EditorState {
        let state = EditorState::create_with_content(ContentState::from_text(text));
        let key = state.current_content().first_block().key().clone();
        let caret = SelectionState::caret_in(state.current_content(), key, offset).unwrap();
        state.force_selection(caret).unwrap()
    }

    fn classify(text: &str, offset: usize) -> KeyBinding {
        key_binding(&state_at(text, offset), &KeyEvent::space())
    }

    #[test]
    fn test_command_names_parse_back() {
        for command in ShortcutCommand::ALL {
            assert_eq!(command.as_str().parse::<ShortcutCommand>(), Ok(command));
        }
        assert_eq!(
            "bold".parse::<ShortcutCommand>(),
            Err(UnknownCommand("bold".to_string()))
        );
    }

    #[test]
    fn test_each_rule_fires_at_its_offset() {
        use ShortcutCommand::*;
        assert_eq!(classify("#", 1), KeyBinding::Command(HashtagToHeading));
        assert_eq!(classify("*", 1), KeyBinding::Command(AsteriskToBold));
        assert_eq!(classify("**", 2), KeyBinding::Command(AsteriskToRed));
        assert_eq!(classify("***", 3), KeyBinding::Command(AsteriskToUnderline));
        assert_eq!(classify("```", 3), KeyBinding::Command(InsertCodeBlock));
    }

    #[test]
    fn test_asterisk_prefixes_resolve_by_offset() {
        use ShortcutCommand::*;
        assert_eq!(classify("***text", 1), KeyBinding::Command(AsteriskToBold));
        assert_eq!(classify("***text", 2), KeyBinding::Command(AsteriskToRed));
        assert_eq!(classify("***text", 3), KeyBinding::Command(AsteriskToUnderline));
        assert_eq!(classify("***text", 4), KeyBinding::Default);
    }

    #[test]
    fn test_prefix_exactness() {
        assert_eq!(
            classify("#x", 1),
            KeyBinding::Command(ShortcutCommand::HashtagToHeading)
        );
        assert_eq!(classify("#x", 2), KeyBinding::Default);
        assert_eq!(classify("#x", 0), KeyBinding::Default);
        assert_eq!(classify("``", 2), KeyBinding::Default);
        assert_eq!(classify("hello", 0), KeyBinding::Default);
    }

    #[test]
    fn test_only_unshifted_space_triggers() {
        let state = state_at("#", 1);
        let shifted = KeyEvent::new(KeyCode::Space, Modifiers::SHIFT);
        assert_eq!(key_binding(&state, &shifted), KeyBinding::Default);
        assert_eq!(key_binding(&state, &KeyEvent::enter()), KeyBinding::Default);
        assert_eq!(
            key_binding(&state, &KeyEvent::plain(KeyCode::Char('a'))),
            KeyBinding::Default
        );
        let with_ctrl = KeyEvent::new(KeyCode::Space, Modifiers::CONTROL);
        assert_eq!(
            key_binding(&state, &with_ctrl),
            KeyBinding::Command(ShortcutCommand::HashtagToHeading)
        );
    }
}
