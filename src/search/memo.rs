/// Remembers the last computed value and the inputs it came from.
///
/// Recomputes only when the key differs by value from the previous one.
#[derive(Debug)]
pub struct Memo<K, V> {
    last: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo { last: None }
    }
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some((last_key, value)) = &self.last {
            if *last_key == key {
                return value.clone();
            }
        }
        let value = compute();
        self.last = Some((key, value.clone()));
        value
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_computes_once() {
        let mut memo: Memo<(String, u64), usize> = Memo::default();
        let mut calls = 0;
        for _ in 0..3 {
            let value = memo.get_or_compute(("al".to_string(), 1), || {
                calls += 1;
                42
            });
            assert_eq!(value, 42);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_new_key_recomputes_and_clear_forgets() {
        let mut memo: Memo<u64, u64> = Memo::default();
        assert_eq!(memo.get_or_compute(1, || 10), 10);
        assert_eq!(memo.get_or_compute(2, || 20), 20);
        assert_eq!(memo.get_or_compute(2, || 99), 20);
        memo.clear();
        assert_eq!(memo.get_or_compute(2, || 30), 30);
    }
}
