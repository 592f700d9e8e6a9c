use autoformat_core::{
    AutoformatConfig, Block, BlockType, ChangeType, ContentState, DelimiterSearch, EditorState,
    HandleValue, InlineStyle, KeyBinding, KeyEvent, SelectionState, ShortcutCommand,
    ShortcutEngine, StyleRange, handle_key_command, key_binding,
};
use pretty_assertions::assert_eq;

fn state_with(block_type: BlockType, text: &str, offset: usize) -> EditorState {
    let content = ContentState::from_blocks(vec![Block::new("b0", block_type, text)]).unwrap();
    let state = EditorState::create_with_content(content);
    let caret = SelectionState::caret_in(state.current_content(), "b0", offset).unwrap();
    state.force_selection(caret).unwrap()
}

fn unstyled(text: &str, offset: usize) -> EditorState {
    state_with(BlockType::Unstyled, text, offset)
}

fn press_space(engine: &ShortcutEngine, state: &EditorState) -> (HandleValue, EditorState) {
    engine.process_key(state, &KeyEvent::space())
}

#[test]
fn test_heading_shortcut() {
    let engine = ShortcutEngine::default();
    let state = unstyled("#", 1);
    assert_eq!(
        key_binding(&state, &KeyEvent::space()),
        KeyBinding::Command(ShortcutCommand::HashtagToHeading)
    );

    let (verdict, next) = press_space(&engine, &state);
    assert_eq!(verdict, HandleValue::Handled);
    let block = next.current_block().unwrap();
    assert_eq!(block.text(), "");
    assert_eq!(block.block_type(), &BlockType::HeaderOne);
    assert_eq!(next.selection().start_offset(), 0);
    assert!(next.selection().is_collapsed());
}

#[test]
fn test_bold_shortcut_with_trailing_text() {
    // The caret sits right after the delimiter while the rest of the line is already typed.
    let state = unstyled("*hello", 1);
    let mut committed = None;
    let verdict = handle_key_command(
        &state,
        ShortcutCommand::AsteriskToBold,
        &AutoformatConfig::default(),
        |next| committed = Some(next),
    );
    assert_eq!(verdict, HandleValue::Handled);

    let next = committed.unwrap();
    let block = next.current_block().unwrap();
    assert_eq!(block.text(), "hello");
    assert_eq!(
        block.styles().ranges(),
        &[StyleRange::new(InlineStyle::Bold, 0, 5)]
    );
    assert_eq!(next.selection().start_offset(), 0);
    assert_eq!(next.selection().end_offset(), 5);
    assert_eq!(next.last_change_type(), Some(ChangeType::ChangeInlineStyle));
}

#[test]
fn test_red_and_underline_shortcuts() {
    let engine = ShortcutEngine::default();

    let (verdict, next) = press_space(&engine, &unstyled("**note", 2));
    assert_eq!(verdict, HandleValue::Handled);
    let block = next.current_block().unwrap();
    assert_eq!(block.text(), "note");
    assert!(block.styles().covers(&InlineStyle::ColorRed, 0, 4));
    assert!(!block.styles().covers(&InlineStyle::Bold, 0, 1));

    let (verdict, next) = press_space(&engine, &unstyled("***title", 3));
    assert_eq!(verdict, HandleValue::Handled);
    let block = next.current_block().unwrap();
    assert_eq!(block.text(), "title");
    assert_eq!(
        block.styles().ranges(),
        &[StyleRange::new(InlineStyle::Underline, 0, 5)]
    );
}

#[test]
fn test_code_block_shortcut() {
    let engine = ShortcutEngine::default();
    let (verdict, next) = press_space(&engine, &unstyled("```", 3));
    assert_eq!(verdict, HandleValue::Handled);
    let block = next.current_block().unwrap();
    assert_eq!(block.text(), "");
    assert_eq!(block.block_type(), &BlockType::CodeBlock);
}

#[test]
fn test_enter_after_shortcut_resets_block_type() {
    let engine = ShortcutEngine::default();
    let (_, heading) = press_space(&engine, &unstyled("#", 1));
    let heading = heading.insert_text("Title");

    let (verdict, next) = engine.process_key(&heading, &KeyEvent::enter());
    assert_eq!(verdict, HandleValue::Handled);

    let blocks: Vec<_> = next.current_content().blocks().collect();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].text(), "Title");
    assert_eq!(blocks[0].block_type(), &BlockType::HeaderOne);
    assert_eq!(blocks[1].text(), "");
    assert_eq!(blocks[1].block_type(), &BlockType::Unstyled);
    assert_eq!(next.selection().start_key(), blocks[1].key());
}

#[test]
fn test_enter_in_plain_block_is_not_handled() {
    let engine = ShortcutEngine::default();
    let state = unstyled("plain", 5);
    let mut called = false;
    let verdict = engine.handle_key_down(&state, &KeyEvent::enter(), |_| called = true);
    assert_eq!(verdict, HandleValue::NotHandled);
    assert!(!called);
}

#[test]
fn test_no_false_triggers() {
    let engine = ShortcutEngine::default();
    let cases = [
        ("hello #", 7),
        ("a*", 2),
        ("#", 0),
        ("##", 2),
        ("``", 2),
        ("****", 4),
        ("", 0),
    ];
    for (text, offset) in cases {
        let state = unstyled(text, offset);
        assert_eq!(
            key_binding(&state, &KeyEvent::space()),
            KeyBinding::Default,
            "{text:?} at {offset}"
        );
        let (verdict, next) = press_space(&engine, &state);
        assert_eq!(verdict, HandleValue::NotHandled);
        assert_eq!(next.current_content(), state.current_content());
    }
}

#[test]
fn test_prefix_exactness_picks_rule_by_offset() {
    let expected = [
        ("*", 1, ShortcutCommand::AsteriskToBold),
        ("**", 2, ShortcutCommand::AsteriskToRed),
        ("***", 3, ShortcutCommand::AsteriskToUnderline),
        ("```", 3, ShortcutCommand::InsertCodeBlock),
    ];
    for (text, offset, command) in expected {
        assert_eq!(
            key_binding(&unstyled(text, offset), &KeyEvent::space()),
            KeyBinding::Command(command),
            "{text:?}"
        );
    }
    // A caret after the first asterisk of "**" only fires the bold rule.
    assert_eq!(
        key_binding(&unstyled("**", 1), &KeyEvent::space()),
        KeyBinding::Command(ShortcutCommand::AsteriskToBold)
    );
}

#[test]
fn test_shortcuts_are_deterministic() {
    let engine = ShortcutEngine::default();
    let state = unstyled("**x", 2);
    let (first_verdict, first) = press_space(&engine, &state);
    let (second_verdict, second) = press_space(&engine, &state);
    assert_eq!(first_verdict, second_verdict);
    assert_eq!(first.current_content(), second.current_content());
    assert_eq!(first.selection(), second.selection());
}

#[test]
fn test_shortcut_leaves_other_blocks_untouched() {
    let engine = ShortcutEngine::default();
    let content = ContentState::from_blocks(vec![
        Block::new("top", BlockType::Unstyled, "first"),
        Block::new("mid", BlockType::Unstyled, "#"),
        Block::new("end", BlockType::CodeBlock, "let x = 1;"),
    ])
    .unwrap();
    let state = EditorState::create_with_content(content.clone())
        .force_selection(SelectionState::caret_in(&content, "mid", 1).unwrap())
        .unwrap();

    let (verdict, next) = press_space(&engine, &state);
    assert_eq!(verdict, HandleValue::Handled);
    let after = next.current_content();
    assert!(after.shares_block(&content, &"top".into()));
    assert!(after.shares_block(&content, &"end".into()));
    assert!(!after.shares_block(&content, &"mid".into()));
    assert_eq!(after.plain_text(), "first\n\nlet x = 1;");
}

#[test]
fn test_shortcut_ignores_shifted_space() {
    let state = unstyled("#", 1);
    let event = KeyEvent::new(
        autoformat_core::KeyCode::Space,
        autoformat_core::Modifiers::SHIFT,
    );
    assert_eq!(key_binding(&state, &event), KeyBinding::Default);
}

#[test]
fn test_delimiter_search_policies_differ_on_earlier_run() {
    // Block "*a*" with the caret after the first asterisk: only the first run is eligible
    // for the trigger, and both policies strip it.
    let state = unstyled("*a*", 1);
    for policy in [DelimiterSearch::FirstOccurrence, DelimiterSearch::BeforeCaret] {
        let config = AutoformatConfig {
            delimiter_search: policy,
            ..AutoformatConfig::default()
        };
        let next = autoformat_core::apply_command(&state, ShortcutCommand::AsteriskToBold, &config)
            .unwrap();
        assert_eq!(next.current_block().unwrap().text(), "a*");
    }

    // Dispatched directly with the caret at the end, the policies pick different runs.
    let state = unstyled("*a*", 3);
    let first = autoformat_core::apply_command(
        &state,
        ShortcutCommand::AsteriskToBold,
        &AutoformatConfig::default(),
    )
    .unwrap();
    assert_eq!(first.current_block().unwrap().text(), "a*");

    let before_caret = AutoformatConfig {
        delimiter_search: DelimiterSearch::BeforeCaret,
        ..AutoformatConfig::default()
    };
    let second =
        autoformat_core::apply_command(&state, ShortcutCommand::AsteriskToBold, &before_caret)
            .unwrap();
    assert_eq!(second.current_block().unwrap().text(), "*a");
}

#[test]
fn test_heading_on_header_block_declines() {
    let engine = ShortcutEngine::default();
    let state = state_with(BlockType::HeaderOne, "#", 1);
    let (verdict, next) = press_space(&engine, &state);
    assert_eq!(verdict, HandleValue::NotHandled);
    assert_eq!(next.current_block().unwrap().text(), "#");
}

#[test]
fn test_toggle_removes_style_already_covering_block() {
    let engine = ShortcutEngine::default();
    let block = Block::new("b0", BlockType::Unstyled, "*bold")
        .with_styles([StyleRange::new(InlineStyle::Bold, 1, 5)])
        .unwrap();
    let content = ContentState::from_blocks(vec![block]).unwrap();
    let state = EditorState::create_with_content(content.clone())
        .force_selection(SelectionState::caret_in(&content, "b0", 1).unwrap())
        .unwrap();

    let (verdict, next) = press_space(&engine, &state);
    assert_eq!(verdict, HandleValue::Handled);
    let block = next.current_block().unwrap();
    assert_eq!(block.text(), "bold");
    assert!(block.styles().is_empty());
}

#[test]
fn test_undo_restores_snapshot_before_shortcut() {
    let engine = ShortcutEngine::default();
    let state = engine.create_empty().insert_text("*");
    let (_, styled) = press_space(&engine, &state);
    assert_eq!(styled.current_block().unwrap().text(), "");

    let undone = styled.undo().unwrap();
    assert_eq!(undone.current_content(), state.current_content());
    assert_eq!(undone.selection(), state.selection());
    assert_eq!(undone.last_change_type(), Some(ChangeType::Undo));

    let redone = undone.redo().unwrap();
    assert_eq!(redone.current_content(), styled.current_content());
}

#[test]
fn test_typing_session() {
    let engine = ShortcutEngine::default();
    let mut state = engine.create_empty();

    for ch in "# Notes\n*** key\n``` fn main() {}\nafter".chars() {
        let (verdict, next) = engine.process_key(&state, &KeyEvent::from_char(ch));
        state = match verdict {
            HandleValue::Handled => next,
            HandleValue::NotHandled if ch == '\n' => {
                let (content, caret) = state
                    .current_content()
                    .split_block(state.selection())
                    .unwrap();
                state.push(content, caret, ChangeType::SplitBlock).unwrap()
            }
            HandleValue::NotHandled => state.insert_text(&ch.to_string()),
        };
    }

    let blocks: Vec<_> = state
        .current_content()
        .blocks()
        .map(|b| (b.text(), b.block_type().clone()))
        .collect();
    assert_eq!(
        blocks,
        vec![
            ("Notes".to_string(), BlockType::HeaderOne),
            ("key".to_string(), BlockType::Unstyled),
            ("fn main() {}".to_string(), BlockType::CodeBlock),
            ("after".to_string(), BlockType::Unstyled),
        ]
    );
    let key_block = state.current_content().blocks().nth(1).unwrap();
    assert!(key_block.styles().covers(&InlineStyle::Underline, 0, 3));
}

#[test]
fn test_engine_applies_history_limit() {
    let engine = ShortcutEngine::new(AutoformatConfig {
        history_limit: 2,
        ..AutoformatConfig::default()
    });
    let mut state = engine.create_empty();
    for ch in ["a", "b", "c", "d"] {
        state = state.insert_text(ch);
    }
    assert_eq!(state.undo_depth(), 2);
}

fn three_blocks(middle: Block, offset: usize) -> (ContentState, EditorState) {
    let content = ContentState::from_blocks(vec![
        Block::new("top", BlockType::Unstyled, "top"),
        middle,
        Block::new("end", BlockType::Unstyled, "end"),
    ])
    .unwrap();
    let key = content.blocks().nth(1).unwrap().key().clone();
    let state = EditorState::create_with_content(content.clone())
        .force_selection(SelectionState::caret_in(&content, key, offset).unwrap())
        .unwrap();
    (content, state)
}

#[test]
fn test_enter_mid_heading_splits_and_resets_new_block() {
    let engine = ShortcutEngine::default();
    let heading = Block::new("a", BlockType::HeaderOne, "Hello world")
        .with_styles([StyleRange::new(InlineStyle::Bold, 3, 8)])
        .unwrap();
    let (content, state) = three_blocks(heading, 5);

    let (verdict, next) = engine.process_key(&state, &KeyEvent::enter());
    assert_eq!(verdict, HandleValue::Handled);

    let after = next.current_content();
    let blocks: Vec<_> = after.blocks().collect();
    assert_eq!(blocks.len(), 4);
    assert_eq!(blocks[1].text(), "Hello");
    assert_eq!(blocks[1].block_type(), &BlockType::HeaderOne);
    assert_eq!(
        blocks[1].styles().ranges(),
        &[StyleRange::new(InlineStyle::Bold, 3, 5)]
    );
    assert_eq!(blocks[2].text(), " world");
    assert_eq!(blocks[2].block_type(), &BlockType::Unstyled);
    assert_eq!(
        blocks[2].styles().ranges(),
        &[StyleRange::new(InlineStyle::Bold, 0, 3)]
    );
    assert_eq!(next.selection().start_key(), blocks[2].key());
    assert_eq!(next.selection().start_offset(), 0);
    assert!(next.selection().is_collapsed());

    assert!(after.shares_block(&content, &"top".into()));
    assert!(after.shares_block(&content, &"end".into()));

    assert_eq!(next.undo_depth(), 1);
    let undone = next.undo().unwrap();
    assert_eq!(undone.current_content(), &content);
    assert_eq!(undone.current_content().plain_text(), "top\nHello world\nend");
}

#[test]
fn test_inline_shortcut_leaves_other_blocks_shared() {
    let engine = ShortcutEngine::default();
    let (content, state) = three_blocks(Block::new("mid", BlockType::Unstyled, "**alert"), 2);

    let (verdict, next) = press_space(&engine, &state);
    assert_eq!(verdict, HandleValue::Handled);
    let after = next.current_content();
    assert!(after.shares_block(&content, &"top".into()));
    assert!(after.shares_block(&content, &"end".into()));
    assert!(!after.shares_block(&content, &"mid".into()));
    assert_eq!(after.plain_text(), "top\nalert\nend");
}
