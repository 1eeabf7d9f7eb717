use std::cmp::Ordering;

/// Sort `items` best-first with `compare` and attach tie-aware ranks.
///
/// Items whose keys compare `Equal` share a rank; the next distinct key
/// gets its 1-based position in sorted order (1, 1, 3, not 1, 1, 2).
/// `compare` must order better keys first. Ties keep input order.
pub fn dense_rank_by<T, K, KF, CF>(items: Vec<T>, key_fn: KF, compare: CF) -> Vec<(T, u32)>
where
    KF: Fn(&T) -> K,
    CF: Fn(&K, &K) -> Ordering,
{
    let mut keyed: Vec<(K, T)> = items.into_iter().map(|t| (key_fn(&t), t)).collect();
    keyed.sort_by(|a, b| compare(&a.0, &b.0));

    let mut out: Vec<(T, u32)> = Vec::with_capacity(keyed.len());
    let mut prev: Option<(K, u32)> = None;
    for (i, (key, item)) in keyed.into_iter().enumerate() {
        let rank = match &prev {
            Some((prev_key, prev_rank)) if compare(prev_key, &key) == Ordering::Equal => *prev_rank,
            _ => (i + 1) as u32,
        };
        out.push((item, rank));
        prev = Some((key, rank));
    }
    out
}

/// Overall class-rank key: compulsory pass, then passes in the best-N
/// selection, then total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    pub compulsory_pass: bool,
    pub pass_count: usize,
    pub total: i64,
}

pub fn better_first<K: Ord>(a: &K, b: &K) -> Ordering {
    b.cmp(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks_of(totals: &[i64]) -> Vec<(i64, u32)> {
        dense_rank_by(totals.to_vec(), |t| *t, better_first)
    }

    #[test]
    fn ties_share_rank_and_skip_following_positions() {
        let got = ranks_of(&[90, 90, 80, 70, 70, 70, 60]);
        let ranks: Vec<u32> = got.iter().map(|(_, r)| *r).collect();
        assert_eq!(ranks, vec![1, 1, 3, 4, 4, 4, 7]);
    }

    #[test]
    fn sorts_before_ranking_and_keeps_input_order_within_ties() {
        let items = vec![("a", 50), ("b", 70), ("c", 50), ("d", 90)];
        let got = dense_rank_by(items, |(_, v)| *v, better_first);
        let names: Vec<(&str, u32)> = got.iter().map(|((n, _), r)| (*n, *r)).collect();
        assert_eq!(names, vec![("d", 1), ("b", 2), ("a", 3), ("c", 3)]);
    }

    #[test]
    fn middle_tie_gives_one_two_two_four() {
        let ranks: Vec<u32> = ranks_of(&[10, 8, 8, 5]).iter().map(|(_, r)| *r).collect();
        assert_eq!(ranks, vec![1, 2, 2, 4]);
    }

    #[test]
    fn empty_and_single() {
        assert!(ranks_of(&[]).is_empty());
        assert_eq!(ranks_of(&[3]), vec![(3, 1)]);
    }

    #[test]
    fn rank_key_orders_pass_gate_before_pass_count_before_total() {
        let english_fail_high_total = RankKey {
            compulsory_pass: false,
            pass_count: 5,
            total: 560,
        };
        let english_pass_low_total = RankKey {
            compulsory_pass: true,
            pass_count: 2,
            total: 200,
        };
        let more_passes = RankKey {
            compulsory_pass: true,
            pass_count: 6,
            total: 250,
        };
        let got = dense_rank_by(
            vec![english_fail_high_total, english_pass_low_total, more_passes],
            |k| *k,
            better_first,
        );
        assert_eq!(got[0], (more_passes, 1));
        assert_eq!(got[1], (english_pass_low_total, 2));
        assert_eq!(got[2], (english_fail_high_total, 3));
    }
}
