use std::slice::{ChunksExact, ChunksExactMut, Iter, IterMut};

/// A read-only cursor over the element bytes of a raster buffer.
///
/// Elements are visited in row-major, channel-minor order. Row padding is skipped.
pub struct Elements<'a> {
    rows: ChunksExact<'a, u8>,
    current: Iter<'a, u8>,
    row_bytes: usize,
    remaining: usize,
}

impl<'a> Elements<'a> {
    pub(crate) fn new(data: &'a [u8], row_pitch: usize, row_bytes: usize, rows: usize) -> Self {
        // a zero pitch means there is nothing to visit
        Self {
            rows: data.chunks_exact(row_pitch.max(1)),
            current: Default::default(),
            row_bytes,
            remaining: if row_pitch == 0 { 0 } else { rows * row_bytes },
        }
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a u8;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(val) = self.current.next() {
                self.remaining -= 1;
                return Some(val);
            }
            if self.remaining == 0 {
                return None;
            }
            let row = self.rows.next()?;
            self.current = row[..self.row_bytes].iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Elements<'_> {}

/// A mutable cursor over the element bytes of a raster buffer.
///
/// Advances element by element in row-major, channel-minor order and hands out a mutable
/// reference to the current byte. Row padding is skipped.
///
/// # Examples
///
/// ```
/// use pixscan_image::{ImageSize, RasterBuffer};
///
/// let mut image = RasterBuffer::new(ImageSize { width: 2, height: 2 }, 1, vec![1, 2, 3, 4]).unwrap();
///
/// for val in image.elements_mut() {
///     *val *= 2;
/// }
///
/// assert_eq!(image.to_vec(), vec![2, 4, 6, 8]);
/// ```
pub struct ElementsMut<'a> {
    rows: ChunksExactMut<'a, u8>,
    current: IterMut<'a, u8>,
    row_bytes: usize,
    remaining: usize,
}

impl<'a> ElementsMut<'a> {
    pub(crate) fn new(
        data: &'a mut [u8],
        row_pitch: usize,
        row_bytes: usize,
        rows: usize,
    ) -> Self {
        Self {
            rows: data.chunks_exact_mut(row_pitch.max(1)),
            current: Default::default(),
            row_bytes,
            remaining: if row_pitch == 0 { 0 } else { rows * row_bytes },
        }
    }
}

impl<'a> Iterator for ElementsMut<'a> {
    type Item = &'a mut u8;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(val) = self.current.next() {
                self.remaining -= 1;
                return Some(val);
            }
            if self.remaining == 0 {
                return None;
            }
            let row = self.rows.next()?;
            let (head, _padding) = row.split_at_mut(self.row_bytes);
            self.current = head.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ElementsMut<'_> {}
