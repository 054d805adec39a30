//! Persistence boundary. Documents travel as a JSON array of blocks; this
//! module is the only place that touches that encoding, so swapping the
//! backing store later means changing one file.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::Block;

pub fn load_blocks(path: &Path) -> Result<Vec<Block>> {
    let raw = fs::read_to_string(path)?;
    parse_blocks(&raw)
}

pub fn parse_blocks(raw: &str) -> Result<Vec<Block>> {
    let blocks: Vec<Block> = serde_json::from_str(raw)?;
    log::debug!("loaded {} blocks", blocks.len());
    Ok(blocks)
}

pub fn save_blocks(path: &Path, blocks: &[Block]) -> Result<()> {
    let raw = serde_json::to_string_pretty(blocks)?;
    fs::write(path, raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockBody;

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(parse_blocks("not json").is_err());
        assert!(parse_blocks(r#"[{"id":"a"}]"#).is_err());
    }

    #[test]
    fn parse_accepts_unknown_optional_fields_missing() {
        let blocks =
            parse_blocks(r#"[{"id":"t1","type":"title","content":"Introdução"}]"#).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title_level(), 1);
    }

    #[test]
    fn save_then_load_preserves_order() {
        let blocks = vec![
            Block {
                id: "a".into(),
                body: BlockBody::Paragraph {
                    content: "um".into(),
                },
            },
            Block {
                id: "b".into(),
                body: BlockBody::PageBreak {},
            },
        ];
        let path = std::env::temp_dir().join("abntdoc-storage-roundtrip.json");
        save_blocks(&path, &blocks).unwrap();
        let loaded = load_blocks(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "a");
        assert_eq!(loaded[1].id, "b");
    }
}
