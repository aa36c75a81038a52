//! Parallel-edge keys.

/// A key type a multigraph can assign to edges added without one.
///
/// The new key starts at the number of edges already between the endpoints
/// and counts up past any key in use, so the first edge gets `0`.
pub trait EdgeKey: Clone + PartialEq {
    fn fresh(taken: &[&Self]) -> Self;
}

impl EdgeKey for () {
    fn fresh(_taken: &[&Self]) -> Self {}
}

impl EdgeKey for String {
    fn fresh(taken: &[&Self]) -> Self {
        let mut n = taken.len();
        loop {
            let key = n.to_string();
            if !taken.iter().any(|k| **k == key) {
                return key;
            }
            n += 1;
        }
    }
}

macro_rules! integer_edge_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl EdgeKey for $t {
                fn fresh(taken: &[&Self]) -> Self {
                    let mut key = taken.len() as $t;
                    while taken.contains(&&key) {
                        key += 1;
                    }
                    key
                }
            }
        )*
    };
}

integer_edge_key!(u8, u16, u32, u64, usize, i32, i64);
