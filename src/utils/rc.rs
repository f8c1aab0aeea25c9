use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;
use std::rc::Rc as RcInner;

/// A reference-counting pointer to `T` with an efficient [`PartialEq`] implementation.
///
/// Unlike [`std::rc::Rc`] this compares by allocation, which makes it usable for yew
/// properties holding trait objects such as `Rc<dyn LiveTracker>`.
#[repr(transparent)]
pub struct Rc<T>(RcInner<T>)
where
    T: ?Sized;

impl<T> Rc<T> {
    /// Creates a new `Rc`.
    #[inline]
    pub fn new(value: T) -> Self {
        Self(RcInner::new(value))
    }
}

impl<T> Rc<T>
where
    T: ?Sized,
{
    /// Returns `true` if both `Rc`s point to the same allocation.
    ///
    /// Only the data addresses are compared. Handles to the same trait object created in
    /// different codegen units may carry different vtable pointers.
    ///
    /// Note that the [`PartialEq`] implementation uses `ptr_eq`.
    #[inline]
    pub fn ptr_eq(this: &Rc<T>, other: &Rc<T>) -> bool {
        RcInner::as_ptr(&this.0) as *const u8 == RcInner::as_ptr(&other.0) as *const u8
    }

    /// Returns a clone of the inner [`std::rc::Rc`].
    #[inline]
    pub fn to_std(this: &Rc<T>) -> RcInner<T> {
        this.0.clone()
    }
}

impl<T> Clone for Rc<T>
where
    T: ?Sized,
{
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for Rc<T>
where
    T: ?Sized,
{
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}

impl<T> From<RcInner<T>> for Rc<T>
where
    T: ?Sized,
{
    #[inline]
    fn from(inner: RcInner<T>) -> Self {
        Self(inner)
    }
}

impl<T> PartialEq for Rc<T>
where
    T: ?Sized,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<T> Eq for Rc<T> where T: ?Sized {}

impl<T> Debug for Rc<T>
where
    T: ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Rc({:p})", RcInner::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Rc;

    #[test]
    fn test_rc_ptr_eq() {
        let ptr = Rc::new(1);
        let same_ptr = ptr.clone();
        let other_ptr = Rc::new(1);

        assert_eq!(ptr, same_ptr);
        assert_ne!(ptr, other_ptr);
    }

    #[test]
    fn test_rc_unsized() {
        let inner: std::rc::Rc<dyn Fn() -> u8> = std::rc::Rc::new(|| 1);
        let ptr: Rc<dyn Fn() -> u8> = Rc::from(inner.clone());
        let same_ptr: Rc<dyn Fn() -> u8> = Rc::from(inner);

        assert_eq!(ptr, same_ptr);
        assert_eq!(ptr(), 1);

        let other: std::rc::Rc<dyn Fn() -> u8> = std::rc::Rc::new(|| 1);
        assert_ne!(ptr, Rc::from(other));
    }
}
