use crate::{
    bitstreams::{BinaryReader, BinaryWriter},
    error::Error,
};

use super::{
    codec::{read_tree, write_tree},
    CodeTable, FrequencyTable, HuffmanTree, Node, PSEUDO_EOF, SYMBOL_BITS,
};

fn code_string(table: &CodeTable, symbol: u16) -> String {
    table
        .code(symbol)
        .unwrap()
        .iter()
        .map(|b| if *b { '1' } else { '0' })
        .collect()
}

fn serialize(tree: &HuffmanTree) -> (Vec<u8>, u64) {
    let mut out = Vec::new();
    let mut writer = BinaryWriter::new(&mut out);
    let bits = write_tree(tree, &mut writer).unwrap();
    writer.close().unwrap();
    (out, bits)
}

#[test]
fn test_frequency_counts() {
    let freq = FrequencyTable::from(&b"abracadabra"[..]);

    assert_eq!(freq.count(b'a' as u16), 5);
    assert_eq!(freq.count(b'b' as u16), 2);
    assert_eq!(freq.count(b'r' as u16), 2);
    assert_eq!(freq.count(b'c' as u16), 1);
    assert_eq!(freq.count(b'z' as u16), 0);
    assert_eq!(freq.count(PSEUDO_EOF), 1);
    assert_eq!(freq.total_bytes(), 11);
    assert_eq!(freq.distinct_bytes(), 5);
}

#[test]
fn test_frequency_from_reader_matches_slice() {
    let data: Vec<u8> = (0..50_000u32).map(|i| (i * 7 % 251) as u8).collect();

    let from_reader = FrequencyTable::from_reader(data.as_slice()).unwrap();

    assert_eq!(from_reader, FrequencyTable::from(data.as_slice()));
}

#[test]
fn test_leaves_end_with_eof() {
    let freq = FrequencyTable::from(&b"ba"[..]);
    let leaves: Vec<_> = freq.leaves().collect();

    assert_eq!(leaves, vec![(b'a' as u16, 1), (b'b' as u16, 1), (PSEUDO_EOF, 1)]);
}

#[test]
fn test_aaab_tree_shape() {
    let freq = FrequencyTable::from(&[65u8, 65, 65, 66][..]);
    let tree = HuffmanTree::build(&freq);
    let codes = CodeTable::from_tree(&tree);

    // B and EOF (both weight 1) merge first, B dequeued first, then the pair joins A.
    assert_eq!(code_string(&codes, 65), "1");
    assert_eq!(code_string(&codes, 66), "00");
    assert_eq!(code_string(&codes, PSEUDO_EOF), "01");
    assert_eq!(tree.weight(), 5);
    assert_eq!(codes.compressed_bits(), 3 + 2 + 2);
}

#[test]
fn test_equal_weights_follow_insertion_order() {
    let freq = FrequencyTable::from(&b"abc"[..]);
    let tree = HuffmanTree::build(&freq);
    let codes = CodeTable::from_tree(&tree);

    // Queue: a, b, c, EOF (all 1). a+b -> n1(2), c+EOF -> n2(2), n1+n2 -> root.
    assert_eq!(code_string(&codes, b'a' as u16), "00");
    assert_eq!(code_string(&codes, b'b' as u16), "01");
    assert_eq!(code_string(&codes, b'c' as u16), "10");
    assert_eq!(code_string(&codes, PSEUDO_EOF), "11");
}

#[test]
fn test_empty_input_gets_synthetic_sibling() {
    let tree = HuffmanTree::build(&FrequencyTable::new());
    let codes = CodeTable::from_tree(&tree);

    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(tree.depth(), 1);
    assert_eq!(code_string(&codes, PSEUDO_EOF), "0");
    assert_eq!(codes.compressed_bits(), 1);
}

#[test]
fn test_single_distinct_symbol_gets_one_bit() {
    let data = vec![b'x'; 1000];
    let tree = HuffmanTree::build(&FrequencyTable::from(data.as_slice()));
    let codes = CodeTable::from_tree(&tree);

    assert_eq!(tree.leaf_count(), 2);
    assert_eq!(code_string(&codes, PSEUDO_EOF), "0");
    assert_eq!(code_string(&codes, b'x' as u16), "1");
    assert_eq!(codes.compressed_bits(), 1001);
}

#[test]
fn test_codes_are_prefix_free() {
    let data: Vec<u8> = (0..20_000u32).map(|i| ((i * i) % 97 + (i % 13) * 11) as u8).collect();
    let tree = HuffmanTree::build(&FrequencyTable::from(data.as_slice()));
    let codes = CodeTable::from_tree(&tree);
    let all: Vec<_> = codes.iter().collect();

    assert_eq!(all.len(), tree.leaf_count());
    for (i, (a, code_a)) in all.iter().enumerate() {
        for (b, code_b) in all.iter().skip(i + 1) {
            assert!(!code_a.starts_with(*code_b), "{} is a prefix of {}", b, a);
            assert!(!code_b.starts_with(*code_a), "{} is a prefix of {}", a, b);
        }
    }
}

#[test]
fn test_compressed_bits_is_weighted_length_sum() {
    let data = b"this is an example of a huffman tree";
    let freq = FrequencyTable::from(&data[..]);
    let tree = HuffmanTree::build(&freq);
    let codes = CodeTable::from_tree(&tree);

    let expected: u64 = freq
        .leaves()
        .map(|(s, w)| w * codes.code(s).unwrap().len() as u64)
        .sum();

    assert_eq!(codes.compressed_bits(), expected);
    assert_eq!(tree.weight(), data.len() as u64 + 1);
}

#[test]
fn test_build_is_deterministic() {
    let data: Vec<u8> = (0..4096u32).map(|i| (i % 7 + i % 5) as u8).collect();
    let freq = FrequencyTable::from(data.as_slice());

    assert_eq!(HuffmanTree::build(&freq), HuffmanTree::build(&freq));
}

#[test]
fn test_tree_serialization_layout() {
    let freq = FrequencyTable::from(&[65u8, 65, 65, 66][..]);
    let tree = HuffmanTree::build(&freq);

    let (out, bits) = serialize(&tree);

    // 0 0 1:066 1:256 1:065
    assert_eq!(bits, 2 + 3 * (1 + SYMBOL_BITS));

    let mut reader = BinaryReader::new(out.as_slice());
    assert_eq!(reader.read_int(2).unwrap(), Some(0b00));
    assert_eq!(reader.read_int(10).unwrap(), Some((1 << 9) | 66));
    assert_eq!(reader.read_int(10).unwrap(), Some((1 << 9) | 256));
    assert_eq!(reader.read_int(10).unwrap(), Some((1 << 9) | 65));
}

#[test]
fn test_tree_read_rebuilds_same_codes() {
    let data = b"she sells sea shells by the sea shore";
    let tree = HuffmanTree::build(&FrequencyTable::from(&data[..]));
    let (out, _) = serialize(&tree);

    let read = read_tree(&mut BinaryReader::new(out.as_slice())).unwrap();

    assert_eq!(read.root(), 0);
    assert_eq!(read.leaf_count(), tree.leaf_count());
    assert_eq!(read.weight(), tree.leaf_count() as u64);

    let original: Vec<_> = CodeTable::from_tree(&tree).iter().map(|(s, c)| (s, c.to_bitvec())).collect();
    let rebuilt: Vec<_> = CodeTable::from_tree(&read).iter().map(|(s, c)| (s, c.to_bitvec())).collect();
    assert_eq!(original, rebuilt);
}

/// A left-leaning chain: every internal node has a leaf on its right.
fn skewed_tree(leaves: usize) -> HuffmanTree {
    let mut tree = HuffmanTree { nodes: Vec::new(), root: 0 };
    let mut current = tree.push(Node::Leaf { symbol: PSEUDO_EOF, weight: 1 });

    for i in 0..leaves - 1 {
        let leaf = tree.push(Node::Leaf { symbol: (i % 256) as u16, weight: 1 });
        let weight = tree.node(current).weight() + 1;
        current = tree.push(Node::Internal { weight, left: current, right: leaf });
    }

    tree.root = current;
    tree
}

#[test]
fn test_deep_tree_does_not_overflow_stack() {
    let tree = skewed_tree(10_000);
    assert_eq!(tree.depth(), 9_999);

    let (out, bits) = serialize(&tree);
    assert_eq!(bits, 9_999 + 10_000 * (1 + SYMBOL_BITS));

    let read = read_tree(&mut BinaryReader::new(out.as_slice())).unwrap();
    assert_eq!(read.depth(), 9_999);
    assert_eq!(read.leaf_count(), 10_000);

    let codes = CodeTable::from_tree(&read);
    assert_eq!(codes.code(PSEUDO_EOF).unwrap().len(), 9_999);
}

#[test]
fn test_read_tree_truncated() {
    let tree = HuffmanTree::build(&FrequencyTable::from(&b"hello"[..]));
    let (out, _) = serialize(&tree);

    let result = read_tree(&mut BinaryReader::new(&out[..2]));

    assert!(matches!(result, Err(Error::Truncated { .. })));
}

#[test]
fn test_read_tree_rejects_out_of_range_symbol() {
    let mut out = Vec::new();
    let mut writer = BinaryWriter::new(&mut out);
    writer.push_bit(false).unwrap();
    writer.push_bit(true).unwrap();
    writer.push_bits(300, SYMBOL_BITS).unwrap();
    writer.close().unwrap();

    let result = read_tree(&mut BinaryReader::new(out.as_slice()));

    assert!(matches!(result, Err(Error::InvalidSymbol(300))));
}

#[test]
fn test_read_tree_rejects_leaf_root() {
    let mut out = Vec::new();
    let mut writer = BinaryWriter::new(&mut out);
    writer.push_bit(true).unwrap();
    writer.push_bits(PSEUDO_EOF as u64, SYMBOL_BITS).unwrap();
    writer.close().unwrap();

    let result = read_tree(&mut BinaryReader::new(out.as_slice()));

    assert!(matches!(result, Err(Error::MalformedTree(_))));
}
