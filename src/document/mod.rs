//! Document model: an immutable, ordered sequence of block nodes

mod block;
mod import;
mod paragraph;

pub use block::{BlockKind, BlockNode, ListMarker};
pub use import::{DocumentImporter, JsonImporter, PlainTextImporter};
pub use paragraph::{word_spans, BlockId, FragmentPosition, ParagraphFragment};

use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// IDs stay below 2^53 so they survive a round trip through a JS number
const ID_MASK: u64 = (1 << 53) - 1;

/// The block sequence handed to the pagination engine.
///
/// Cloning is cheap: blocks are shared, so a pagination run can hold its own
/// snapshot while the session moves on to a newer document.
#[derive(Debug, Clone, Default)]
pub struct DocumentModel {
    /// Blocks in document order
    blocks: Arc<[BlockNode]>,
    /// Maps block ID to position
    positions: Arc<FxHashMap<BlockId, usize>>,
}

impl DocumentModel {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from imported blocks.
    ///
    /// Each block's ID comes from its import key, or from its content when
    /// the importer gave none, so IDs survive edits elsewhere in the
    /// document. A repeated key or identical content gets a derived ID.
    pub fn from_blocks(blocks: Vec<BlockNode>) -> Self {
        let mut blocks = blocks;
        let mut positions =
            FxHashMap::with_capacity_and_hasher(blocks.len(), Default::default());

        for (idx, block) in blocks.iter_mut().enumerate() {
            let id = unique_id(block.identity_hash(), &positions);
            if let Some(key) = &block.key {
                if id.0 != block.identity_hash() & ID_MASK {
                    log::debug!("block {} repeats key {:?}", idx, key);
                }
            }
            block.set_id(id);
            block.reindex_words();
            positions.insert(id, idx);
        }

        Self {
            blocks: blocks.into(),
            positions: Arc::new(positions),
        }
    }

    /// Get block count
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks in order
    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    /// Get block by position
    pub fn get(&self, index: usize) -> Option<&BlockNode> {
        self.blocks.get(index)
    }

    /// Get block by ID
    pub fn block(&self, id: BlockId) -> Option<&BlockNode> {
        self.position_of(id).and_then(|idx| self.blocks.get(idx))
    }

    /// Position of a block in the document
    pub fn position_of(&self, id: BlockId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Iterate over blocks in order
    pub fn iter(&self) -> impl Iterator<Item = &BlockNode> + '_ {
        self.blocks.iter()
    }

    /// Total words across all paragraphs
    pub fn word_count(&self) -> usize {
        self.blocks.iter().map(BlockNode::word_count).sum()
    }

    /// Whether two handles share the same block storage
    pub fn same_content(&self, other: &DocumentModel) -> bool {
        Arc::ptr_eq(&self.blocks, &other.blocks)
    }
}

/// `hash` as an ID, re-hashed with a counter until it is not taken
fn unique_id(hash: u64, taken: &FxHashMap<BlockId, usize>) -> BlockId {
    let mut id = BlockId(hash & ID_MASK);
    let mut repeat = 0u64;
    while taken.contains_key(&id) {
        repeat += 1;
        let mut hasher = FxHasher::default();
        hash.hash(&mut hasher);
        repeat.hash(&mut hasher);
        id = BlockId(hasher.finish() & ID_MASK);
    }
    id
}
