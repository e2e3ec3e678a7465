/// Key layout for the Fjall favorites keyspace
///
/// Partition structure:
/// - `favorites`: fav:{seq:016} -> FavoriteRecord (JSON), in insertion order
/// - `urls`: url:{url} -> seq (u64 big-endian)
/// - `metadata`: meta:{key} -> value

/// Encode a favorite key: fav:{seq:016}
pub fn encode_favorite_key(seq: u64) -> Vec<u8> {
    format!("fav:{:016}", seq).into_bytes()
}

/// Decode a favorite key: fav:{seq:016} -> seq
pub fn decode_favorite_key(key: &[u8]) -> Option<u64> {
    let key_str = std::str::from_utf8(key).ok()?;
    key_str.strip_prefix("fav:")?.parse().ok()
}

/// Encode a url index key: url:{url}
pub fn encode_url_key(url: &str) -> Vec<u8> {
    format!("url:{}", url).into_bytes()
}

/// Encode a metadata key: meta:{key}
pub fn encode_meta_key(key: &str) -> Vec<u8> {
    format!("meta:{}", key).into_bytes()
}

/// Decode a stored sequence number
pub fn decode_seq(value: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = value.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_key_encoding() {
        let key = encode_favorite_key(42);
        assert_eq!(key, b"fav:0000000000000042");
        assert_eq!(decode_favorite_key(&key), Some(42));
        assert_eq!(decode_favorite_key(b"url:x"), None);
    }

    #[test]
    fn test_favorite_keys_sort_by_sequence() {
        assert!(encode_favorite_key(9) < encode_favorite_key(10));
        assert!(encode_favorite_key(99) < encode_favorite_key(100));
    }

    #[test]
    fn test_url_key_encoding() {
        let key = encode_url_key("https://img/1.jpg");
        assert_eq!(key, b"url:https://img/1.jpg");
    }

    #[test]
    fn test_seq_decoding() {
        assert_eq!(decode_seq(&7u64.to_be_bytes()), Some(7));
        assert_eq!(decode_seq(b"short"), None);
    }

    #[test]
    fn test_meta_key_encoding() {
        assert_eq!(encode_meta_key("next_seq"), b"meta:next_seq");
    }
}
