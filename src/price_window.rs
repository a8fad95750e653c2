use crate::Price;
use std::collections::VecDeque;

/// Fixed-size window of the most recent prices.
///
/// The sum is taken over the window contents on every read, oldest first,
/// so a window of identical prices sums exactly regardless of what was
/// evicted before it.
#[derive(Clone, Debug)]
pub(crate) struct PriceWindow {
    size: usize,
    window: VecDeque<Price>,
}

impl PriceWindow {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            window: VecDeque::with_capacity(size),
        }
    }

    #[inline]
    pub fn add(&mut self, price: Price) {
        if self.is_ready() {
            self.window.pop_front();
        }

        self.window.push_back(price);
    }

    #[inline]
    pub fn sum(&self) -> Option<Price> {
        self.is_ready().then(|| self.window.iter().sum())
    }

    #[inline]
    fn is_ready(&self) -> bool {
        self.window.len() == self.size
    }
}
