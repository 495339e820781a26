//! Nested list markup from a flat run of list-item blocks.
//!
//! An item deeper than the last item of the innermost open list opens a
//! nested list inside that item. Any other item closes the lists deeper than
//! it and becomes a sibling in the outermost list whose last item is at least
//! as deep:
//!
//! ```text
//! depth 0 "1"       <ul>
//! depth 1 "2"  →    <li>1
//! depth 0 "3"       <ul>
//!                   <li>2</li>
//!                   </ul>
//!                   </li>
//!                   <li>3</li>
//!                   </ul>
//! ```

use std::fmt::Write;

use crate::block::{inner_markup, open_tag};
use crate::context::RenderContext;
use crate::model::Block;

/// Render a run of consecutive list-item blocks.
pub(crate) fn build_list(blocks: &[Block], ctx: &RenderContext<'_>) -> String {
    let mut out = String::new();
    // Last item of each open list, outermost first. Depths strictly increase
    // and every list has an open `<li>`.
    let mut open: Vec<&Block> = Vec::new();

    for block in blocks {
        let level = open.partition_point(|last| last.depth < block.depth);
        if level == open.len() {
            if !open.is_empty() {
                out.push('\n');
            }
            open_list(&mut out, block);
            open.push(block);
        } else {
            for last in open.drain(level + 1..).rev() {
                out.push_str("</li>\n");
                close_list(&mut out, last);
            }
            out.push_str("</li>\n");
            let prev = open[level];
            if prev.block_type != block.block_type {
                close_list(&mut out, prev);
                open_list(&mut out, block);
            }
            open[level] = block;
        }
        open_tag(&mut out, "li", &block.data, ctx.directional);
        out.push_str(&inner_markup(block, ctx));
    }

    for last in open.iter().rev() {
        out.push_str("</li>\n");
        close_list(&mut out, last);
    }
    out
}

fn list_tag(block: &Block) -> &'static str {
    block.block_type.html_tag().unwrap_or("ul")
}

fn open_list(out: &mut String, block: &Block) {
    writeln!(out, "<{}>", list_tag(block)).unwrap();
}

fn close_list(out: &mut String, block: &Block) {
    writeln!(out, "</{}>", list_tag(block)).unwrap();
}
