use crate::domain::MovieRecord;

/// Store write produced by a favorite toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    Upsert(MovieRecord),
    Delete(MovieRecord),
}

impl StoreOp {
    pub fn record(&self) -> &MovieRecord {
        match self {
            StoreOp::Upsert(record) | StoreOp::Delete(record) => record,
        }
    }
}

/// Invert the favorite flag of the record with `target_id`.
///
/// Returns the new display list and the store write to perform. When no
/// record in `current` matches, the list is returned as is with no write.
pub fn toggle(current: &[MovieRecord], target_id: i64) -> (Vec<MovieRecord>, Option<StoreOp>) {
    let mut op = None;

    let movies = current
        .iter()
        .map(|movie| {
            if movie.id != target_id {
                return movie.clone();
            }

            let updated = movie.with_favorite(!movie.is_favorite);
            op = Some(if updated.is_favorite {
                StoreOp::Upsert(updated.clone())
            } else {
                StoreOp::Delete(updated.clone())
            });
            updated
        })
        .collect();

    (movies, op)
}
