//! Step-driven traversal drawings for the four compared data structures.

pub mod bst;
pub mod canvas;
mod render;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use canvas::{Canvas, DisplayList, DrawCommand};
pub use render::{draw_array, draw_bst, draw_hashmap, draw_linked_list};

pub const DEFAULT_DATASET: [i64; 8] = [42, 17, 63, 8, 29, 55, 71, 34];
pub const DEFAULT_TARGET: i64 = 29;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DsType {
    Bst,
    Array,
    Hashmap,
    Linkedlist,
}

impl DsType {
    pub const ALL: [DsType; 4] = [Self::Bst, Self::Array, Self::Hashmap, Self::Linkedlist];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bst => "bst",
            Self::Array => "array",
            Self::Hashmap => "hashmap",
            Self::Linkedlist => "linkedlist",
        }
    }

    pub fn info(&self) -> DsInfo {
        match self {
            Self::Bst => DsInfo {
                ds: *self,
                label: "Binary Search Tree",
                big_o: BigO {
                    search: "O(log n)",
                    insert: "O(log n)",
                    delete: "O(log n)",
                },
                industry_context: "Used in database indexes (B-Trees), file systems, and autocomplete engines. PostgreSQL uses B-Tree indexes by default for ordered data.",
            },
            Self::Array => DsInfo {
                ds: *self,
                label: "Flat Array (Linear)",
                big_o: BigO {
                    search: "O(n)",
                    insert: "O(1) end / O(n) mid",
                    delete: "O(n)",
                },
                industry_context: "Best for small datasets or when cache locality matters. Used in GPU shaders, image pixel buffers, and fixed-size lookup tables.",
            },
            Self::Hashmap => DsInfo {
                ds: *self,
                label: "HashMap",
                big_o: BigO {
                    search: "O(1) avg",
                    insert: "O(1) avg",
                    delete: "O(1) avg",
                },
                industry_context: "Used everywhere: Redis key-value store, DNS caches, session stores, and language runtime symbol tables. O(1) is the gold standard for lookups.",
            },
            Self::Linkedlist => DsInfo {
                ds: *self,
                label: "Linked List",
                big_o: BigO {
                    search: "O(n)",
                    insert: "O(1) head",
                    delete: "O(1) known node",
                },
                industry_context: "Used in LRU cache implementations, undo/redo stacks, and OS process scheduling queues. Excellent for frequent insertions/deletions at known positions.",
            },
        }
    }
}

impl fmt::Display for DsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DsType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "bst" => Ok(Self::Bst),
            "array" => Ok(Self::Array),
            "hashmap" => Ok(Self::Hashmap),
            "linkedlist" => Ok(Self::Linkedlist),
            other => bail!("Unknown data structure: {}", other),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BigO {
    pub search: &'static str,
    pub insert: &'static str,
    pub delete: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DsInfo {
    #[serde(rename = "type")]
    pub ds: DsType,
    pub label: &'static str,
    pub big_o: BigO,
    pub industry_context: &'static str,
}

/// Clears the surface and draws frame `step` of `ds`.
pub fn render_frame(surface: &mut impl Canvas, ds: DsType, dataset: &[i64], target: i64, step: usize) {
    surface.clear(canvas::palette::BACKGROUND);
    match ds {
        DsType::Bst => draw_bst(surface, dataset, target, step),
        DsType::Array => draw_array(surface, dataset, target, step),
        DsType::Hashmap => draw_hashmap(surface, dataset, target, step),
        DsType::Linkedlist => draw_linked_list(surface, dataset, target, step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ds_type_parse() {
        for ds in DsType::ALL {
            assert_eq!(ds.as_str().parse::<DsType>().unwrap(), ds);
        }
        assert_eq!("HashMap".parse::<DsType>().unwrap(), DsType::Hashmap);
        assert!("heap".parse::<DsType>().is_err());
    }

    #[test]
    fn test_render_frame_starts_with_background() {
        let mut list = DisplayList::default();
        render_frame(&mut list, DsType::Bst, &DEFAULT_DATASET, DEFAULT_TARGET, 0);

        assert!(matches!(
            &list.commands[0],
            DrawCommand::Clear { color } if color == canvas::palette::BACKGROUND
        ));

        let len = list.commands.len();
        render_frame(&mut list, DsType::Bst, &DEFAULT_DATASET, DEFAULT_TARGET, 0);
        assert_eq!(list.commands.len(), len);
    }
}
