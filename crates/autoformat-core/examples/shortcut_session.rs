//! Shortcut session example
//!
//! Feeds a typed script through `ShortcutEngine` and prints the resulting blocks.

use autoformat_core::{
    ChangeType, EditorState, HandleValue, KeyEvent, ShortcutEngine, StyleMap,
    block_style_class,
};

fn type_script(engine: &ShortcutEngine, script: &str) -> EditorState {
    let mut state = engine.create_empty();
    for ch in script.chars() {
        let (verdict, next) = engine.process_key(&state, &KeyEvent::from_char(ch));
        state = match verdict {
            HandleValue::Handled => {
                println!(
                    "  {:?} handled -> {}",
                    ch,
                    next.last_change_type().map_or("none", |c| c.as_str())
                );
                next
            }
            // Default behavior of a host for keys the engine leaves alone.
            HandleValue::NotHandled if ch == '\n' => {
                let (content, caret) = state
                    .current_content()
                    .split_block(state.selection())
                    .expect("selection is valid");
                state
                    .push(content, caret, ChangeType::SplitBlock)
                    .expect("caret is valid")
            }
            HandleValue::NotHandled => state.insert_text(&ch.to_string()),
        };
    }
    state
}

fn main() {
    println!("=== Autoformat shortcut session ===\n");

    let engine = ShortcutEngine::default();
    let script = "# Shopping\n* milk\n** eggs\n*** bread\n``` total = 3\ndone";

    println!("1. Typing:");
    let state = type_script(&engine, script);

    println!("\n2. Blocks:");
    let style_map = StyleMap::default();
    for block in state.current_content().blocks() {
        let declaration = style_map.resolve(&block.inline_style_at(0));
        println!(
            "  [{}] {:<12} {:?} class={:?} bold={} underline={} color={:?}",
            block.key(),
            block.block_type(),
            block.text(),
            block_style_class(block.block_type()),
            declaration.bold,
            declaration.underline,
            declaration.color.map(|c| c.to_css()),
        );
    }

    println!("\n3. History:");
    println!("  undo depth: {}", state.undo_depth());
    if let Some(undone) = state.undo() {
        println!("  after one undo: {:?}", undone.current_content().plain_text());
    }
}
