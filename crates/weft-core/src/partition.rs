//! Partitioned execution over contiguous index ranges.
//!
//! Every array-wide pass in Weft writes only the output indices of the chunk
//! it is handed, so chunks never need to synchronise with each other. These
//! helpers hide whether chunks run inline or on the rayon pool.

use rayon::prelude::*;
use tracing::trace;

use crate::config::ExecConfig;
use crate::error::{check_len, FieldError};

/// Run `f(start, chunk)` over contiguous chunks of `out`.
///
/// `start` is the index of `chunk[0]` within `out`. Runs inline when
/// [`ExecConfig::fans_out`] is false.
pub fn for_each_chunk<T, F>(out: &mut [T], exec: ExecConfig, f: F) -> Result<(), FieldError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    exec.validate()?;
    let len = exec.chunk_len;
    if exec.fans_out(out.len()) {
        trace!(elements = out.len(), chunk_len = len, "partitioned pass");
        out.par_chunks_mut(len)
            .enumerate()
            .for_each(|(i, chunk)| f(i * len, chunk));
    } else {
        f(0, out);
    }
    Ok(())
}

/// Run `f(start, a_chunk, b_chunk)` over matching chunks of two buffers.
///
/// Both buffers must have the same length.
pub fn for_each_chunk_zip<A, B, F>(
    a: &mut [A],
    b: &mut [B],
    exec: ExecConfig,
    f: F,
) -> Result<(), FieldError>
where
    A: Send,
    B: Send,
    F: Fn(usize, &mut [A], &mut [B]) + Send + Sync,
{
    exec.validate()?;
    check_len(a.len(), b.len())?;
    let len = exec.chunk_len;
    if exec.fans_out(a.len()) {
        trace!(elements = a.len(), chunk_len = len, "partitioned zip pass");
        a.par_chunks_mut(len)
            .zip(b.par_chunks_mut(len))
            .enumerate()
            .for_each(|(i, (ca, cb))| f(i * len, ca, cb));
    } else {
        f(0, a, b);
    }
    Ok(())
}

/// Fill `out[i] = f(i)` for every index, partitioned.
pub fn fill_indexed<T, F>(out: &mut [T], exec: ExecConfig, f: F) -> Result<(), FieldError>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    for_each_chunk(out, exec, |start, chunk| {
        for (k, slot) in chunk.iter_mut().enumerate() {
            *slot = f(start + k);
        }
    })
}
