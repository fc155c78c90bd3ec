//! Whole-file parsing tests through the public API.

use jstype_parser::{NodeIndex, ParsedSource, parse};

const MODULE: &str = r#"
import { readFile } from "fs/promises";

/**
 * Adds two numbers.
 * @param {number} a
 * @param {number} b
 * @returns {number}
 */
export function add(a, b) {
  return a + b;
}

const cache = new Map();
let hits /*: number */ = 0;

export class Store extends Base {
  #items = [];
  static create(...args) {
    return new Store(...args);
  }
  async load(path, { encoding = "utf8" } = {}) {
    const text = await readFile(path, encoding);
    for (const [key, value] of Object.entries(JSON.parse(text))) {
      this.#items.push({ key, value });
    }
    return this;
  }
}

const double = (xs) => xs.map((x) => x * 2).filter(Boolean);
label: while (hits < 10) {
  hits++;
  if (cache.has(hits)) continue label;
  cache.set(hits, `hit ${hits}`);
}
export default { add, double };
"#;

/// Every node except the root must be reachable exactly once from the root.
fn assert_tree_is_connected(parsed: &ParsedSource) {
    let mut seen = vec![0u32; parsed.arena.len()];
    let mut stack: Vec<NodeIndex> = vec![parsed.root];
    while let Some(index) = stack.pop() {
        seen[index.0 as usize] += 1;
        stack.extend(parsed.arena.children(index));
    }
    for (i, count) in seen.iter().enumerate() {
        assert_eq!(
            *count,
            1,
            "node {i} ({}) reached {count} times",
            parsed.arena.nodes[i].data.kind_name()
        );
    }
}

#[test]
fn parses_realistic_module_without_errors() {
    let parsed = parse("store.js", MODULE);
    assert!(
        parsed.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        parsed.diagnostics
    );
    assert_eq!(parsed.statements().len(), 8);
    assert_tree_is_connected(&parsed);
}

#[test]
fn node_spans_nest_within_parents() {
    let parsed = parse("store.js", MODULE);
    let mut stack = vec![parsed.root];
    while let Some(index) = stack.pop() {
        let parent = parsed.node(index).unwrap();
        for child in parsed.arena.children(index) {
            let node = parsed.node(child).unwrap();
            assert!(
                parent.pos <= node.pos && node.end <= parent.end,
                "{} [{}, {}) escapes {} [{}, {})",
                node.data.kind_name(),
                node.pos,
                node.end,
                parent.data.kind_name(),
                parent.pos,
                parent.end
            );
            stack.push(child);
        }
    }
}

#[test]
fn records_every_comment() {
    let parsed = parse("store.js", MODULE);
    assert_eq!(parsed.comments.len(), 2);
    assert!(parsed.comments[0].is_doc_block(&parsed.source));
    assert_eq!(parsed.comment_text(&parsed.comments[1]), "/*: number */");
}

#[test]
fn locations_use_one_based_display_values() {
    let parsed = parse("store.js", "let a = 1;\n  let b = 2;");
    let second = parsed.statements()[1];
    let location = parsed.location(parsed.node(second).unwrap().pos);
    assert_eq!(location.display_line(), 2);
    assert_eq!(location.display_column(), 3);
}

#[test]
fn empty_file_has_no_statements() {
    let parsed = parse("empty.js", "");
    assert!(!parsed.has_errors());
    assert!(parsed.statements().is_empty());
}

#[test]
fn hashbang_and_comments_only() {
    let parsed = parse("bin.js", "#!/usr/bin/env node\n// nothing here\n/* still nothing */\n");
    assert!(!parsed.has_errors());
    assert!(parsed.statements().is_empty());
    assert_eq!(parsed.comments.len(), 2);
}
