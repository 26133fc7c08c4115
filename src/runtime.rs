//! Blocking bridge for the CLI.

use crate::error::Result;
use std::future::Future;
use tokio::runtime::Builder;

/// Drive one future to completion on a fresh current-thread runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = Builder::new_current_thread().enable_all().build()?;
    Ok(rt.block_on(future))
}
