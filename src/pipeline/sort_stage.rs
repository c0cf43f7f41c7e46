//! Item ordering stage.
//!
//! Each item list is sorted in two stable passes: first by the bought key, then by
//! the made key. Items outside a pass's category keep their relative order behind
//! the ones inside it, so the net order is made items, then bought items, then the
//! rest.

use crate::config::SortConfig;
use crate::model::{Bom, BomAssemblyItem};

/// Sort the summary and every assembly of `bom` in place.
pub fn sort_bom(bom: &mut Bom, sort: &SortConfig) {
    for assembly in bom.item_lists_mut() {
        tracing::debug!(
            "Sorting {} items of {}",
            assembly.items.len(),
            assembly.partnumber
        );
        sort_items(&mut assembly.items, sort);
    }
}

/// Sort one item list.
pub fn sort_items(items: &mut [BomAssemblyItem], sort: &SortConfig) {
    sort_absent_last(items, |item| {
        item.source
            .is_bought()
            .then(|| item.property(&sort.bought))
    });
    sort_absent_last(items, |item| {
        item.source.is_made().then(|| item.property(&sort.made))
    });
}

/// Stable sort where `None` keys trail every `Some` key in original order.
///
/// An item of the pass's category whose sort cell is empty has key `Some(None)`
/// and leads its group.
fn sort_absent_last<F>(items: &mut [BomAssemblyItem], key: F)
where
    F: Fn(&BomAssemblyItem) -> Option<Option<&str>>,
{
    items.sort_by(|a, b| match (key(a), key(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
