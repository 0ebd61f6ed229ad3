/// Admission decision for a request of a given cost.
pub trait Limiter {
    /// Returns true and pays `cost` when the request is admitted. A rejected
    /// request pays nothing.
    fn allowed(&mut self, cost: u64) -> bool;
}

/// A limiter that can report its spendable balance.
pub trait TokenLimiter: Limiter {
    /// Balance as of the last `allowed` call. Does not refill.
    fn tokens(&self) -> u64;
}

impl<L: Limiter + ?Sized> Limiter for &mut L {
    fn allowed(&mut self, cost: u64) -> bool {
        (**self).allowed(cost)
    }
}

impl<L: TokenLimiter + ?Sized> TokenLimiter for &mut L {
    fn tokens(&self) -> u64 {
        (**self).tokens()
    }
}

impl<L: Limiter + ?Sized> Limiter for Box<L> {
    fn allowed(&mut self, cost: u64) -> bool {
        (**self).allowed(cost)
    }
}

impl<L: TokenLimiter + ?Sized> TokenLimiter for Box<L> {
    fn tokens(&self) -> u64 {
        (**self).tokens()
    }
}
