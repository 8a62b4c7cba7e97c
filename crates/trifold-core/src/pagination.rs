//! Paginated flow: document blocks tagged with page-break policies.
//!
//! No measurement happens here. Each block only records whether a page
//! break may follow it and whether it may be split; the PDF renderer does
//! the actual breaking.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trifold_ast::{plain_text, Block, Document};

use crate::style::StyleRuleset;

/// May a page break follow the block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakAfter {
    #[default]
    Auto,
    /// Keep with the next block
    Avoid,
}

/// May the block be split across pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakInside {
    #[default]
    Auto,
    Avoid,
}

/// A block with its break policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowBlock {
    pub block: Block,
    pub break_after: BreakAfter,
    pub break_inside: BreakInside,
    /// First level-1 heading, styled with the title rule
    pub is_title: bool,
}

/// Ruleset plus the ordered flow of blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFlow {
    pub ruleset: StyleRuleset,
    pub title: Option<String>,
    pub blocks: Vec<FlowBlock>,
}

impl PageFlow {
    /// No page break may fall between block `index` and the next one
    pub fn keeps_with_next(&self, index: usize) -> bool {
        self.blocks
            .get(index)
            .is_some_and(|b| b.break_after == BreakAfter::Avoid)
    }

    /// Block `index` must stay on one page
    pub fn is_unbreakable(&self, index: usize) -> bool {
        self.blocks
            .get(index)
            .is_some_and(|b| b.break_inside == BreakInside::Avoid)
    }
}

/// Apply the ruleset's break policies to every block
pub fn paginate(document: &Document, ruleset: &StyleRuleset) -> PageFlow {
    let mut title_seen = false;
    let blocks: Vec<FlowBlock> = document
        .blocks
        .iter()
        .map(|block| {
            let mut flow = FlowBlock {
                block: block.clone(),
                break_after: BreakAfter::Auto,
                break_inside: BreakInside::Auto,
                is_title: false,
            };
            match block {
                Block::Heading(heading) => {
                    flow.is_title = heading.level == 1 && !title_seen;
                    title_seen |= flow.is_title;
                    flow.break_after = if flow.is_title {
                        ruleset.title.break_after
                    } else {
                        ruleset.heading(heading.level).break_after
                    };
                }
                Block::Table(_) => flow.break_inside = ruleset.table.break_inside,
                Block::Literal(_) => flow.break_inside = ruleset.code.break_inside,
                _ => {}
            }
            flow
        })
        .collect();

    let title = document.metadata.title.clone().or_else(|| {
        blocks.iter().find(|b| b.is_title).and_then(|b| match &b.block {
            Block::Heading(h) => Some(plain_text(&h.text)),
            _ => None,
        })
    });

    debug!(
        blocks = blocks.len(),
        kept = blocks.iter().filter(|b| b.break_after == BreakAfter::Avoid).count(),
        unbreakable = blocks
            .iter()
            .filter(|b| b.break_inside == BreakInside::Avoid)
            .count(),
        "paginated document"
    );

    PageFlow {
        ruleset: ruleset.clone(),
        title,
        blocks,
    }
}
