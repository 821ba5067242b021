//! Index-addressed output fill shared by every kernel.
//!
//! Each output slot is a pure function of its index, so with the `parallel`
//! feature the slots are computed on the rayon pool. A slot's own value is
//! computed the same way on either path.

/// Write `sample(i)` into `out[i]` for every index.
pub(crate) fn fill_indexed<T, G>(out: &mut [T], sample: G)
where
    T: Send,
    G: Fn(usize) -> T + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_iter_mut()
            .enumerate()
            .for_each(|(i, slot)| *slot = sample(i));
    }

    #[cfg(not(feature = "parallel"))]
    {
        out.iter_mut()
            .enumerate()
            .for_each(|(i, slot)| *slot = sample(i));
    }
}
