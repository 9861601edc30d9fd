//! Offset pagination envelope shared by catalogue endpoints.
//!
//! [`paginate`] slices an already filtered and sorted collection into one
//! page and reports the metadata clients need to render page controls. The
//! component deliberately performs no page clamping: callers are responsible
//! for keeping `page` within `1..=last_page`, and an out-of-range page yields
//! an empty data slice while `total` and `last_page` still describe the full
//! collection.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// One page of results plus display metadata.
///
/// ## Invariants
/// - `last_page >= 1`, even for an empty collection.
/// - `from`/`to` are 1-indexed display bounds; both are `0` when the page
///   holds no items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, preserving the input order.
    pub data: Vec<T>,
    /// The requested page number.
    pub current_page: u32,
    /// Page size the slice was computed with.
    pub per_page: u32,
    /// Size of the whole collection before slicing.
    pub total: u64,
    /// Index of the last non-empty page, never below 1.
    pub last_page: u32,
    /// 1-indexed position of the first item on this page, 0 when empty.
    pub from: u64,
    /// 1-indexed position of the last item on this page, 0 when empty.
    pub to: u64,
}

impl<T> Page<T> {
    /// Map the page's items while keeping the metadata intact.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroU32;
    ///
    /// let page = pagination::paginate(&[1, 2, 3], NonZeroU32::MIN, NonZeroU32::new(2).unwrap());
    /// let doubled = page.map(|n| n * 2);
    /// assert_eq!(doubled.data, vec![2, 4]);
    /// assert_eq!(doubled.total, 3);
    /// ```
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
            from: self.from,
            to: self.to,
        }
    }
}

/// Index of the last page for a collection of `total` items.
///
/// Always at least 1 so UIs can render a page indicator even for an empty
/// result set.
///
/// # Examples
/// ```
/// use std::num::NonZeroU32;
///
/// let per_page = NonZeroU32::new(12).unwrap();
/// assert_eq!(pagination::last_page(0, per_page), 1);
/// assert_eq!(pagination::last_page(12, per_page), 1);
/// assert_eq!(pagination::last_page(13, per_page), 2);
/// ```
#[must_use]
pub fn last_page(total: u64, per_page: NonZeroU32) -> u32 {
    let per = u64::from(per_page.get());
    let pages = total.div_ceil(per).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Slice `items` into the requested page.
///
/// `start = (page - 1) * per_page`; a `page` beyond the end of the
/// collection produces an empty `data` vector while the metadata still
/// reflects the full collection.
///
/// # Examples
/// ```
/// use std::num::NonZeroU32;
///
/// let per_page = NonZeroU32::new(2).unwrap();
/// let page = pagination::paginate(&["a", "b", "c"], NonZeroU32::new(2).unwrap(), per_page);
/// assert_eq!(page.data, vec!["c"]);
/// assert_eq!(page.from, 3);
/// assert_eq!(page.to, 3);
/// assert_eq!(page.last_page, 2);
/// ```
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: NonZeroU32, per_page: NonZeroU32) -> Page<T> {
    let total = items.len() as u64;
    let per = u64::from(per_page.get());
    let start = u64::from(page.get() - 1) * per;
    let end = (start + per).min(total);

    let data: Vec<T> = if start >= total {
        Vec::new()
    } else {
        let start_idx = usize::try_from(start).unwrap_or(usize::MAX);
        let end_idx = usize::try_from(end).unwrap_or(usize::MAX);
        items
            .get(start_idx..end_idx)
            .map(<[T]>::to_vec)
            .unwrap_or_default()
    };

    let (from, to) = if data.is_empty() {
        (0, 0)
    } else {
        (start + 1, start + data.len() as u64)
    };

    Page {
        data,
        current_page: page.get(),
        per_page: per_page.get(),
        total,
        last_page: last_page(total, per_page),
        from,
        to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn nz(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("test values are non-zero")
    }

    #[rstest]
    #[case::empty(0, 12, 1)]
    #[case::exact_fit(24, 12, 2)]
    #[case::remainder(25, 12, 3)]
    #[case::single(1, 12, 1)]
    fn last_page_rounds_up_with_floor_of_one(
        #[case] total: u64,
        #[case] per_page: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(last_page(total, nz(per_page)), expected);
    }

    #[rstest]
    fn first_page_slices_from_the_front() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, nz(1), nz(2));

        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total, 5);
        assert_eq!(page.last_page, 3);
        assert_eq!((page.from, page.to), (1, 2));
    }

    #[rstest]
    fn final_partial_page_reports_narrow_bounds() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, nz(3), nz(2));

        assert_eq!(page.data, vec![5]);
        assert_eq!((page.from, page.to), (5, 5));
    }

    #[rstest]
    fn out_of_range_page_is_empty_but_metadata_is_intact() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, nz(9), nz(2));

        assert!(page.data.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.last_page, 3);
        assert_eq!((page.from, page.to), (0, 0));
    }

    #[rstest]
    fn empty_collection_yields_from_zero() {
        let page = paginate::<u32>(&[], nz(1), nz(12));

        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.last_page, 1);
        assert_eq!((page.from, page.to), (0, 0));
    }

    /// Every item appears on exactly one page and the page sizes sum to the
    /// collection size.
    #[rstest]
    #[case::per_one(1)]
    #[case::per_three(3)]
    #[case::per_seven(7)]
    #[case::per_larger_than_total(50)]
    fn pages_partition_the_collection(#[case] per_page: u32) {
        let items: Vec<u32> = (0..23).collect();
        let per = nz(per_page);
        let pages = last_page(items.len() as u64, per);

        let mut seen = Vec::new();
        for page_no in 1..=pages {
            let page = paginate(&items, nz(page_no), per);
            seen.extend(page.data);
        }

        assert_eq!(seen, items, "concatenated pages must rebuild the input");
    }

    #[rstest]
    fn map_preserves_metadata() {
        let items: Vec<u32> = (1..=5).collect();
        let page = paginate(&items, nz(2), nz(2)).map(|n| n.to_string());

        assert_eq!(page.data, vec!["3".to_owned(), "4".to_owned()]);
        assert_eq!(page.total, 5);
        assert_eq!((page.from, page.to), (3, 4));
    }

    #[rstest]
    fn envelope_serialises_with_flat_metadata() {
        let page = paginate(&[10, 20], nz(1), nz(12));
        let value = serde_json::to_value(&page).expect("page should serialise");

        assert_eq!(value["data"], serde_json::json!([10, 20]));
        assert_eq!(value["current_page"], 1);
        assert_eq!(value["per_page"], 12);
        assert_eq!(value["total"], 2);
        assert_eq!(value["last_page"], 1);
        assert_eq!(value["from"], 1);
        assert_eq!(value["to"], 2);
    }
}
