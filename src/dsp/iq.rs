/// One complex baseband sample as the radio front end consumes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IqSample {
    pub re: i8,
    pub im: i8,
}

impl IqSample {
    pub const ZERO: Self = Self { re: 0, im: 0 };

    pub const fn new(re: i8, im: i8) -> Self {
        Self { re, im }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.re == 0 && self.im == 0
    }
}
