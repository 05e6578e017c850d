use std::num::NonZeroUsize;

/// Most items the Web API accepts in a single "add items to playlist" call.
pub const MAX_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// Lazy, single-pass iterator over consecutive chunks of an item sequence.
///
/// Created by [`batches`].
#[derive(Debug)]
pub struct Batches<I> {
    inner: I,
    size: NonZeroUsize,
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<I::Item> = self.inner.by_ref().take(self.size.get()).collect();
        if batch.is_empty() { None } else { Some(batch) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.inner.size_hint();
        let size = self.size.get();
        (lower.div_ceil(size), upper.map(|u| u.div_ceil(size)))
    }
}

/// Splits `items` into batches of at most `size` elements, keeping their order.
///
/// Every batch but the last holds exactly `size` items. An empty input yields
/// no batches at all.
pub fn batches<I: IntoIterator>(items: I, size: NonZeroUsize) -> Batches<I::IntoIter> {
    Batches {
        inner: items.into_iter(),
        size,
    }
}
