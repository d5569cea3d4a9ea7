/// Splitting interleaved codewords into error correction blocks
use crate::decoder::version::EcLevelInfo;

/// One Reed-Solomon block: data codewords followed by its EC codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    /// How many leading codewords carry data
    pub num_data_codewords: usize,
    /// Data then EC codewords
    pub codewords: Vec<u8>,
}

/// De-interleave `codewords` into blocks for the given EC level.
///
/// Codewords are dealt round robin: first the data codewords every block
/// has, then the extra data codeword of each long block, then the EC
/// codewords. Returns `None` when fewer codewords than the level needs were
/// read; any surplus is ignored.
pub fn get_data_blocks(codewords: &[u8], ec_info: &EcLevelInfo) -> Option<Vec<DataBlock>> {
    let total_codewords = ec_info.total_codewords();
    if codewords.len() < total_codewords {
        log::trace!(
            "read {} codewords, need {}",
            codewords.len(),
            total_codewords
        );
        return None;
    }
    let codewords = &codewords[..total_codewords];

    let mut blocks: Vec<DataBlock> = ec_info
        .ec_blocks
        .iter()
        .flat_map(|group| {
            std::iter::repeat_n(group.data_codewords_per_block, group.num_blocks)
        })
        .map(|num_data_codewords| DataBlock {
            num_data_codewords,
            codewords: Vec::with_capacity(num_data_codewords + ec_info.ec_codewords_per_block),
        })
        .collect();

    let short_block_size = ec_info.ec_blocks.first()?.data_codewords_per_block;
    let mut remaining = codewords.iter().copied();

    for _ in 0..short_block_size {
        for block in blocks.iter_mut() {
            block.codewords.push(remaining.next()?);
        }
    }

    if ec_info.ec_blocks.len() == 2 {
        let small_block_count = ec_info.ec_blocks[0].num_blocks;
        for block in blocks.iter_mut().skip(small_block_count) {
            block.codewords.push(remaining.next()?);
        }
    }

    let mut block_index = 0;
    for codeword in remaining {
        let block_count = blocks.len();
        blocks[block_index % block_count].codewords.push(codeword);
        block_index += 1;
    }

    Some(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::version::Version;
    use crate::models::ECLevel;

    #[test]
    fn test_single_block() {
        let info = Version::from_number(1).unwrap().ec_level(ECLevel::M);
        let codewords: Vec<u8> = (0..26).collect();
        let blocks = get_data_blocks(&codewords, info).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].num_data_codewords, 16);
        assert_eq!(blocks[0].codewords, codewords);
    }

    #[test]
    fn test_two_group_interleaving() {
        // Version 5-Q: 2 blocks of 15 and 2 blocks of 16 data codewords,
        // 18 EC codewords each
        let info = Version::from_number(5).unwrap().ec_level(ECLevel::Q);
        assert_eq!(info.ec_blocks.len(), 2);
        let codewords: Vec<u8> = (0..134u32).map(|i| i as u8).collect();
        let blocks = get_data_blocks(&codewords, info).unwrap();

        assert_eq!(blocks.len(), 4);
        let data: Vec<usize> = blocks.iter().map(|b| b.num_data_codewords).collect();
        assert_eq!(data, vec![15, 15, 16, 16]);
        assert_eq!(&blocks[0].codewords[..3], &[0, 4, 8]);
        assert_eq!(&blocks[3].codewords[..3], &[3, 7, 11]);
        // Extra data codewords of the long blocks follow the shared ones
        assert_eq!(blocks[2].codewords[15], 60);
        assert_eq!(blocks[3].codewords[15], 61);
        // EC codewords start after all 62 data codewords
        assert_eq!(blocks[0].codewords[15], 62);
        assert_eq!(blocks[2].codewords[16], 64);
        for block in &blocks {
            assert_eq!(block.codewords.len(), block.num_data_codewords + 18);
        }
    }

    #[test]
    fn test_too_few_codewords() {
        let info = Version::from_number(1).unwrap().ec_level(ECLevel::L);
        assert!(get_data_blocks(&[0; 25], info).is_none());
        assert!(get_data_blocks(&[0; 30], info).is_some());
    }
}
