// src/api/pagination.rs
//! Continuation-resolving listing over any `WikiRepository`.

use super::types::{Continuation, PaginationResult, QueryParams, QueryResponse};
use super::WikiRepository;
use crate::constants::MAX_CONTINUATION_ROUNDS;
use crate::error::AppError;

/// Issues `base` and follows every `continue` object the server returns,
/// collecting what `extract` pulls out of each batch.
///
/// Stops when a response carries no continuation. A server that hands back
/// the same continuation twice, or keeps going past
/// `MAX_CONTINUATION_ROUNDS`, is reported as a malformed response.
pub async fn fetch_all_continued<R, T, F>(
    repo: &R,
    base: &QueryParams,
    mut extract: F,
) -> Result<PaginationResult<T>, AppError>
where
    R: WikiRepository + ?Sized,
    T: Send,
    F: FnMut(&QueryResponse) -> Result<Vec<T>, AppError> + Send,
{
    let mut items = Vec::new();
    let mut continuation: Option<Continuation> = None;
    let mut requests_made = 0u32;

    loop {
        if requests_made >= MAX_CONTINUATION_ROUNDS {
            return Err(AppError::MalformedResponse(format!(
                "Continuation did not terminate after {} requests for {}",
                requests_made, base
            )));
        }

        let params = match &continuation {
            Some(c) => base.continued(c),
            None => base.clone(),
        };

        let response = repo.execute(&params).await?;
        requests_made += 1;
        items.extend(extract(&response)?);

        match response.continuation {
            Some(next) if continuation.as_ref() == Some(&next) => {
                return Err(AppError::MalformedResponse(format!(
                    "Server repeated continuation for {}",
                    base
                )));
            }
            Some(next) => {
                log::debug!("Continuing {} (batch {})", base, requests_made);
                continuation = Some(next);
            }
            None => {
                if !response.batch_complete {
                    log::warn!(
                        "Listing {} ended without batchcomplete; members may be missing",
                        base
                    );
                }
                break;
            }
        }
    }

    Ok(PaginationResult {
        items,
        requests_made,
    })
}
